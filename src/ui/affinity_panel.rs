//! AffinityPanel - interactive CPU pinning
//!
//! Shows the tri-state CPU affinity tree (matching C htop's AffinityPanel)
//! to the left of the process panel: Space toggles the node under the
//! cursor, Enter commits the resulting CPU set via sched_setaffinity,
//! Escape cancels.

use super::crt::{
    beep, ColorElement, KEY_DOWN, KEY_END, KEY_ESC, KEY_HOME, KEY_LC_Q, KEY_LINEFEED, KEY_NPAGE,
    KEY_PPAGE, KEY_RETURN, KEY_UP, KEY_WHEELDOWN, KEY_WHEELUP,
};
use super::function_bar::FunctionBar;
use super::header::Header;
use super::main_panel::MainPanel;
use super::Crt;
use crate::core::{Affinity, Machine, Settings, TriState};

/// Context needed to draw the affinity panel alongside the main process panel.
pub struct AffinityMenuContext<'a> {
    pub main_panel: &'a mut MainPanel,
    pub header: &'a Header,
    pub settings: &'a Settings,
    pub hide_meters: bool,
}

/// Run the affinity selector for `pid`, applying the committed CPU set on
/// Enter. A failure to read or set the mask (unsupported platform,
/// permission denied, process gone) is surfaced as an audible beep only.
pub fn show_affinity_panel(crt: &mut Crt, machine: &mut Machine, ctx: &mut AffinityMenuContext, pid: i32) {
    let current = crate::platform::get_process_affinity(pid).unwrap_or_default();
    let topo = crate::platform::get_cpu_topology();
    let mut affinity = if topo.is_empty() {
        Affinity::flat(machine.active_cpus.max(1), &current)
    } else {
        Affinity::from_topology(&topo, &current)
    };

    let panel_width = 36i32;
    let panel_y = ctx.main_panel.y;
    let panel_height = crt.height() - panel_y - 1;

    let orig_main_x = ctx.main_panel.x;
    let orig_main_w = ctx.main_panel.w;
    ctx.main_panel.move_to(panel_width, panel_y);
    ctx.main_panel.resize(crt.width() - panel_width, panel_height);
    ctx.main_panel.needs_redraw = true;

    let function_bar = FunctionBar::with_functions(vec![
        ("Space".to_string(), "Toggle ".to_string()),
        ("Enter".to_string(), "Set    ".to_string()),
        ("Esc".to_string(), "Cancel ".to_string()),
    ]);

    let mut selected: i32 = 0;
    let mut scroll_v: i32 = 0;
    let body_height = panel_height - 1; // header row

    loop {
        let rows = affinity.flatten();
        let max_selected = (rows.len() as i32 - 1).max(0);
        selected = selected.clamp(0, max_selected);
        if selected < scroll_v {
            scroll_v = selected;
        } else if selected >= scroll_v + body_height {
            scroll_v = selected - body_height + 1;
        }
        scroll_v = scroll_v.clamp(0, (rows.len() as i32 - body_height).max(0));

        if !ctx.hide_meters {
            ctx.header.draw(crt, machine, ctx.settings);
        }

        let header_attr = crt.color(ColorElement::PanelHeaderFocus);
        crt.mv(panel_y, 0);
        crt.attrset(header_attr);
        crt.addstr_raw("Affinity:");
        for _ in "Affinity:".len()..panel_width as usize {
            crt.addch_raw(' ' as u32);
        }
        crt.attrset(crate::ui::crt::A_NORMAL);

        let box_color = crt.color(ColorElement::CheckBox);
        let mark_color = crt.color(ColorElement::CheckMark);
        let text_color = crt.color(ColorElement::CheckText);
        let selection_attr = crt.color(ColorElement::PanelSelectionFocus);

        for row in 0..body_height {
            let y = panel_y + 1 + row;
            crt.mv(y, 0);
            let idx = (scroll_v + row) as usize;

            if idx < rows.len() {
                let (_, depth, label, state) = &rows[idx];
                let is_selected = idx as i32 == selected;
                let base_attr = if is_selected { selection_attr } else { text_color };

                crt.attrset(if is_selected { selection_attr } else { box_color });
                crt.addstr_raw("[");
                crt.attrset(if is_selected { selection_attr } else { mark_color });
                crt.addstr_raw(match state {
                    TriState::On => "x",
                    TriState::Partial => "o",
                    TriState::Off => " ",
                });
                crt.attrset(if is_selected { selection_attr } else { box_color });
                crt.addstr_raw("] ");

                crt.attrset(base_attr);
                let indent = "  ".repeat(*depth);
                let line = format!("{indent}{label}");
                let display: String = line.chars().take((panel_width - 4) as usize).collect();
                let written = display.chars().count();
                crt.addstr_raw(&display);
                for _ in written..(panel_width as usize - 4) {
                    crt.addch_raw(' ' as u32);
                }
            } else {
                crt.attrset(crate::ui::crt::A_NORMAL);
                for _ in 0..panel_width {
                    crt.addch_raw(' ' as u32);
                }
            }
            crt.attrset(crate::ui::crt::A_NORMAL);
        }

        ctx.main_panel.draw(crt, machine, ctx.settings);

        let fb_y = crt.height() - 1;
        function_bar.draw_simple(crt, fb_y);
        crt.refresh();

        let key = crt.getch();
        match key {
            KEY_UP => selected -= 1,
            KEY_DOWN => selected += 1,
            KEY_PPAGE => selected -= body_height,
            KEY_NPAGE => selected += body_height,
            KEY_HOME => selected = 0,
            KEY_END => selected = max_selected,
            KEY_WHEELUP => selected -= 3,
            KEY_WHEELDOWN => selected += 3,
            32 => {
                // Space - toggle the node under the cursor
                affinity.toggle_row(selected as usize);
            }
            KEY_LINEFEED | KEY_RETURN => {
                let set = affinity.committed_set();
                if set.is_empty() || !crate::platform::set_process_affinity(pid, &set) {
                    beep();
                }
                break;
            }
            KEY_ESC | KEY_LC_Q => break,
            _ => {}
        }
    }

    crt.clear_area(0, panel_y, panel_width, panel_height + 1);
    ctx.main_panel.move_to(orig_main_x, panel_y);
    ctx.main_panel.resize(orig_main_w, panel_height);
    ctx.main_panel.needs_redraw = true;
}
