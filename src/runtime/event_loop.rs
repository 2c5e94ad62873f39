use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::coordinator::{Coordinator, Flow};
use crate::message::AppMsg;
use crate::ui;

/// Upper bound on one input wait so worker replies are picked up promptly.
const POLL: Duration = Duration::from_millis(50);

/// Main terminal event loop: draws, applies worker and remote messages,
/// forwards key presses and fires the progress and visualizer timers.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    coordinator: &mut Coordinator,
    rx: &Receiver<AppMsg>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, coordinator))?;

        loop {
            match rx.try_recv() {
                Ok(msg) => {
                    if coordinator.handle_msg(msg) == Flow::Quit {
                        debug!("quit requested remotely");
                        return Ok(());
                    }
                }
                Err(TryRecvError::Empty) => break,
                // The coordinator owns a sender, so this only happens at teardown.
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        let now = Instant::now();
        let wait = coordinator
            .next_deadline(now)
            .map_or(POLL, |d| d.min(POLL));
        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && coordinator.handle_key(key) == Flow::Quit {
                    return Ok(());
                }
            }
        }

        coordinator.tick(Instant::now());
    }
}
