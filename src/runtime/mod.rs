use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::config::resolve_config_path;
use crate::coordinator::Coordinator;
use crate::energy::EnergySource;
use crate::loader::Sources;
use crate::message::AppMsg;
use crate::{logging, player};

mod event_loop;
mod settings;


use settings::{Loaded, load_settings};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let Loaded { settings, rejected } = load_settings();

    // Without a usable log file the app runs with logging off.
    if let Ok(Some(path)) = logging::init(&settings.log) {
        info!(path = %path.display(), "logging started");
    }
    if let Some(reason) = rejected {
        warn!(
            %reason,
            path = ?resolve_config_path(),
            "config rejected, using defaults"
        );
    }

    let player = player::open(&settings.player);
    let energy = EnergySource::open(&settings.visualizer);
    let sources = Sources::from_settings(&settings);

    let (tx, rx) = mpsc::channel::<AppMsg>();
    let mut coordinator = Coordinator::new(&settings, player, energy, sources, tx.clone());
    coordinator.attach_mpris(crate::mpris::spawn_mpris(tx));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &mut coordinator, &rx);

    coordinator.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        warn!(error = %e, "event loop failed");
    }
    info!("exiting");
    run_result
}
