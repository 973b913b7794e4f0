//! IO priority menu for htop-rs.
//!
//! Help, kill-signal, sort-column, and user-filter menus are implemented
//! directly as inline `ScreenManager` methods (`show_help`, `show_kill_menu`,
//! `show_sort_menu`, `show_user_menu`); this module only holds the one menu
//! that was wired up separately, via `SidePanelContext`.

use super::crt::beep;
use super::function_bar::FunctionBar;
use super::header::Header;
use super::main_panel::MainPanel;
use super::panel::Panel;
use super::Crt;
use crate::core::{Machine, Settings};

/// IO priority class constants (linux/ioprio.h), kept here so the menu
/// compiles the same way on every platform; only Linux actually applies them.
const IOPRIO_CLASS_NONE: i32 = 0;
const IOPRIO_CLASS_RT: i32 = 1;
const IOPRIO_CLASS_BE: i32 = 2;
const IOPRIO_CLASS_IDLE: i32 = 3;
const IOPRIO_CLASS_SHIFT: i32 = 13;

fn ioprio_tuple(class: i32, data: i32) -> i32 {
    (class << IOPRIO_CLASS_SHIFT) | data
}

/// Context for the IO priority menu
pub struct IOPriorityMenuContext<'a> {
    pub main_panel: &'a mut MainPanel,
    pub header: &'a Header,
    pub settings: &'a Settings,
    pub hide_meters: bool,
}

/// Show the IO priority selection menu (matches C htop IOPriorityPanel):
/// "None (based on nice)", Realtime 0-7, Best-effort 0-7, Idle.
pub fn show_io_priority_menu(
    crt: &mut Crt,
    machine: &mut Machine,
    ctx: &mut IOPriorityMenuContext,
    pid: i32,
    current_ioprio: i32,
) {
    let panel_width = 22i32;
    let panel_y = ctx.main_panel.y;
    let panel_height = crt.height() - panel_y - 1;

    let mut panel = Panel::new(0, panel_y, panel_width, panel_height);
    panel.set_header("IO Priority:");
    panel.function_bar = FunctionBar::new_enter_esc("Set    ", "Cancel ");

    let mut entries: Vec<(String, i32)> = vec![(
        "None (based on nice)".to_string(),
        ioprio_tuple(IOPRIO_CLASS_NONE, 0),
    )];
    for (class, name) in [(IOPRIO_CLASS_RT, "Realtime"), (IOPRIO_CLASS_BE, "Best-effort")] {
        for level in 0..8 {
            let suffix = if level == 0 {
                " (High)"
            } else if level == 7 {
                " (Low)"
            } else {
                ""
            };
            entries.push((format!("{name} {level}{suffix}"), ioprio_tuple(class, level)));
        }
    }
    entries.push(("Idle".to_string(), ioprio_tuple(IOPRIO_CLASS_IDLE, 0)));

    let mut default_position = 0i32;
    for (i, (name, value)) in entries.iter().enumerate() {
        panel.add_list_item(name, *value);
        if *value == current_ioprio {
            default_position = i as i32;
        }
    }
    panel.set_selected(default_position);

    let mut side_ctx = super::side_panel_menu::SidePanelContext {
        main_panel: ctx.main_panel,
        header: ctx.header,
        settings: ctx.settings,
        hide_meters: ctx.hide_meters,
    };

    let result = super::side_panel_menu::run_side_panel_menu(crt, machine, &mut side_ctx, &mut panel);

    if let super::side_panel_menu::SidePanelResult::Selected(idx) = result {
        if let Some((_, ioprio)) = entries.get(idx) {
            if !crate::platform::set_io_priority(pid, *ioprio) {
                // Action-refused: e.g. non-root tried to raise priority. Audible beep only.
                beep();
            }
        }
    }
}
