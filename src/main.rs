//! htop-rs - A Rust port of htop, an interactive process viewer
//!
//! Copyright (C) 2004-2024 htop dev team
//! Released under the GNU GPLv2+

mod core;
mod meters;
mod platform;
mod ui;

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

use crate::core::{Machine, Settings};
use crate::ui::{Crt, Header, MainPanel, ScreenManager};

/// Static flag for clean shutdown
static RUNNING: AtomicBool = AtomicBool::new(true);

/// htop - an interactive process viewer
#[derive(Parser, Debug)]
#[command(name = "htop-rs")]
#[command(author = "htop dev team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive process viewer", long_about = None)]
struct Args {
    /// Use a monochrome color scheme
    #[arg(short = 'C', long = "no-color")]
    no_color: bool,

    /// Set the delay between updates, in tenths of seconds
    #[arg(short = 'd', long = "delay", value_name = "DELAY")]
    delay: Option<u32>,

    /// Show only the commands matching the given filter
    #[arg(short = 'F', long = "filter", value_name = "FILTER")]
    filter: Option<String>,

    /// Highlight new and old processes
    #[arg(short = 'H', long = "highlight-changes", value_name = "DELAY")]
    highlight_changes: Option<Option<u32>>,

    /// Disable the mouse
    #[arg(short = 'M', long = "no-mouse")]
    no_mouse: bool,

    /// Exit htop after NUMBER iterations/frame updates
    #[arg(short = 'n', long = "max-iterations", value_name = "NUMBER")]
    max_iterations: Option<i64>,

    /// Show only the given PIDs
    #[arg(short = 'p', long = "pid", value_name = "PID", value_delimiter = ',')]
    pids: Option<Vec<u32>>,

    /// Disable all system and process changing features
    #[arg(long = "readonly")]
    readonly: bool,

    /// Sort by COLUMN in list view
    #[arg(short = 's', long = "sort-key", value_name = "COLUMN")]
    sort_key: Option<String>,

    /// Show the tree view
    #[arg(short = 't', long = "tree")]
    tree: bool,

    /// Show only processes for a given user
    #[arg(short = 'u', long = "user", value_name = "USERNAME")]
    user: Option<Option<String>>,

    /// Do not use unicode but plain ASCII
    #[arg(short = 'U', long = "no-unicode")]
    no_unicode: bool,

    /// Hide meters
    #[arg(long = "no-meters")]
    no_meters: bool,

    /// Hide the function bar
    #[arg(long = "no-function-bar")]
    no_function_bar: bool,
}

fn setup_signal_handlers() {
    if let Err(e) = ctrlc::set_handler(move || {
        RUNNING.store(false, Ordering::SeqCst);
    }) {
        warn!("failed to install Ctrl+C handler: {e}");
    }
}

/// Install a file-based tracing subscriber. stdout/stderr are owned by
/// ncurses once the UI starts, so logs go to `htop-rs.log` in the current
/// directory instead. Returns the worker guard; dropping it flushes the
/// writer, so the caller must hold it for the process lifetime.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_path = Path::new("htop-rs.log");
    let file_appender = tracing_appender::rolling::never(".", log_path);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(_) => Some(guard),
        Err(_) => None,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging();

    // Set up signal handlers
    setup_signal_handlers();

    // Initialize platform-specific code
    if let Err(e) = platform::init() {
        error!("platform init failed: {e}");
        eprintln!("htop-rs: platform init failed: {e}");
        std::process::exit(1);
    }

    // Create the machine (system state)
    let user_id = args.user.as_ref().map(|u| {
        u.as_ref()
            .map(|name| platform::get_uid_for_username(name).unwrap_or(u32::MAX))
            .unwrap_or_else(|| unsafe { libc::geteuid() })
    });

    let mut machine = Machine::new(user_id);
    
    // Create settings
    let mut settings = Settings::new();
    
    // Apply command line arguments
    if args.no_color {
        settings.color_scheme = core::ColorScheme::Monochrome;
    }
    if let Some(delay) = args.delay {
        settings.delay = delay.max(1).min(100);
    }
    if args.no_mouse {
        settings.enable_mouse = false;
    }
    if args.tree {
        settings.tree_view = true;
    }
    if args.highlight_changes.is_some() {
        settings.highlight_changes = true;
        if let Some(Some(delay)) = args.highlight_changes {
            settings.highlight_delay_secs = delay.max(1) as i32;
        }
    }
    if let Some(ref key) = args.sort_key {
        if key == "help" {
            print_sort_keys();
            return Ok(());
        }
        settings.sort_key = core::ProcessField::from_name(key);
        if settings.sort_key.is_none() {
            eprintln!("htop-rs: unknown sort column '{key}'");
            std::process::exit(1);
        }
    }
    if args.no_function_bar {
        settings.hide_function_bar = 2;
    }
    if args.readonly {
        settings.readonly = true;
    }

    settings.allow_unicode = !args.no_unicode;
    machine.iterations_remaining = args.max_iterations.unwrap_or(-1);
    
    if let Some(ref pids) = args.pids {
        machine.set_pid_filter(pids.clone());
    }

    // Initialize CRT (terminal)
    let mut crt = match Crt::new(&settings) {
        Ok(crt) => crt,
        Err(e) => {
            error!("terminal setup failed: {e}");
            eprintln!("htop-rs: terminal setup failed: {e}");
            std::process::exit(1);
        }
    };

    info!("htop-rs starting, delay={} tenths", settings.delay);

    // Create header with meters
    let mut header = Header::new(&machine, settings.header_layout, settings.header_margin);
    header.populate_from_settings(&settings);

    // Create main panel
    let mut main_panel = MainPanel::new();
    if let Some(filter) = args.filter {
        main_panel.set_filter(&filter);
    }

    // Create screen manager
    let mut screen_manager = ScreenManager::new(header, &mut machine, &settings);
    screen_manager.add_panel(Box::new(main_panel));

    // Main loop (platform::scan is called inside run())
    let run_result = screen_manager.run(&mut crt, &mut machine, &RUNNING);

    // Cleanup happens unconditionally, even on a fatal runtime error, so the
    // terminal is never left in raw/noecho mode.
    crt.done();
    platform::done();

    if let Err(e) = run_result {
        error!("main loop aborted: {e}");
        eprintln!("htop-rs: {e}");
        std::process::exit(1);
    }

    info!("htop-rs exiting cleanly");

    // Save settings if changed
    if settings.changed {
        settings.write()?;
    }

    Ok(())
}

fn print_sort_keys() {
    println!("Available sort keys:");
    for field in core::ProcessField::all() {
        if let Some(name) = field.name() {
            println!("  {:>19} {}", name, field.description());
        }
    }
}
