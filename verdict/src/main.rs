//! verdict: review a batch of generated responses in the terminal.
//!
//! Entry point for the `verdict` binary. Wires together configuration
//! (`config` + `cli`), file logging (`logging`), the terminal lifecycle
//! (`tui`), the unified event bus (`event`), the loader thread (`loader`),
//! and rendering (`ui`). Review logic lives in `verdict-core`.
//!
//! # Startup sequence
//!
//! 1. Parse arguments and load the config file. Config errors go to stderr
//!    because the terminal is still in cooked mode.
//! 2. Install file logging.
//! 3. `install_panic_hook()` before `init_tui()` so a panic restores the terminal.
//! 4. `register_sigterm()`, polled on a 50 ms heartbeat.
//! 5. `init_tui()`, spawn the event task and the loader thread, then queue the
//!    input file (if any). The first frame shows a loading state. Later loads
//!    go through the same channel from the `o` prompt.
//!
//! The event loop exits only via `break`, so `restore_tui()` at the bottom is
//! always reached; the panic hook covers the rest.

mod app;
mod cli;
mod config;
mod event;
mod loader;
mod logging;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;
use std::time::Duration;

use clap::Parser;

use crate::event::AppEvent;
use crate::loader::types::LoadRequest;
use crate::ui::keybindings::{self, KeyAction};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = cli::Cli::parse();
    let config = cli.apply(config::load_config());

    let _log_guard = match logging::init(&config.log_filter) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("verdict: logging disabled: {e}");
            None
        }
    };
    tracing::info!(version = env!("CARGO_PKG_VERSION"), ?config, "starting");

    let theme = theme::Theme::from_name(&config.theme);
    let mut state = app::AppState::new(config.export_file.clone());

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;

    let (load_tx, load_rx) = crossbeam_channel::unbounded::<LoadRequest>();
    let loader_events = handler.tx.clone();
    let highlight = config.highlight;
    std::thread::Builder::new()
        .name("verdict-loader".into())
        .spawn(move || loader::worker::loader_loop(load_rx, loader_events, highlight))?;

    state.loader_tx = Some(load_tx);
    if let Some(path) = cli.input.clone() {
        state.open(path);
    }

    'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is checked even when the terminal is idle.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    tracing::info!("SIGTERM received");
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        // The only draw() call in the program.
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            tracing::error!(error = %e, "draw failed");
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Key(key)) => {
                        if keybindings::handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Mouse(mouse)) => {
                        if keybindings::handle_mouse(mouse, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Tick) => state.tick(),
                    Some(AppEvent::Loaded(result)) => state.apply_load(*result),
                    Some(AppEvent::Resize(_, _)) => {
                        // frame.area() picks up the new size on the next Render.
                    }
                    Some(AppEvent::Quit) | None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    // Closing the request channel stops the loader thread.
    state.loader_tx = None;
    tui::restore_tui()?;
    if state.has_unexported_changes() {
        tracing::warn!("exiting with unexported decisions");
    }
    tracing::info!("exiting");
    Ok(())
}
