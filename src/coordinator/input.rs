use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Coordinator, Flow};
use crate::app::Focus;

impl Coordinator {
    /// Route one key press according to the focused part of the screen.
    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }
        match self.app.focus {
            Focus::Search => self.search_key(key),
            Focus::Devices => self.picker_key(key),
            Focus::Results => return self.results_key(key),
        }
        Flow::Continue
    }

    fn search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.app.exit_search(),
            KeyCode::Enter => match self.app.submit_query() {
                Some(query) => self.search(&query),
                None => self.screen.set_status("Type something to search."),
            },
            KeyCode::Backspace => self.app.pop_query_char(),
            KeyCode::Char(c) if !c.is_control() => self.app.push_query_char(c),
            _ => {}
        }
    }

    fn picker_key(&mut self, key: KeyEvent) {
        let Some(picker) = self.app.picker.as_mut() else {
            self.app.close_devices();
            return;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => picker.prev(),
            KeyCode::Down | KeyCode::Char('j') => picker.next(),
            KeyCode::Enter => self.select_picked_device(),
            KeyCode::Esc | KeyCode::Char('d') | KeyCode::Char('q') => self.app.close_devices(),
            _ => {}
        }
    }

    fn results_key(&mut self, key: KeyEvent) -> Flow {
        let seek = i64::from(self.steps.seek_step);
        let big_seek = i64::from(self.steps.big_seek_step);
        let volume = i32::from(self.steps.volume_step);
        match key.code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('/') => self.app.enter_search(),
            KeyCode::Down | KeyCode::Char('j') => self.app.next(),
            KeyCode::Up | KeyCode::Char('k') => self.app.prev(),
            KeyCode::Enter => self.play_selected(),
            KeyCode::Char(' ') => self.toggle_play(),
            KeyCode::Char('s') => self.stop(),
            KeyCode::Char('-') => self.change_volume(-volume),
            KeyCode::Char('=') | KeyCode::Char('+') => self.change_volume(volume),
            KeyCode::Left => self.seek(-seek),
            KeyCode::Right => self.seek(seek),
            KeyCode::Char('[') => self.seek(-big_seek),
            KeyCode::Char(']') => self.seek(big_seek),
            KeyCode::Char('a') => self.toggle_auto_continue(),
            KeyCode::Char('n') => self.toggle_normalizer(),
            KeyCode::Char('d') => self.open_devices(),
            KeyCode::Char('t') => self.cycle_theme(),
            _ => {}
        }
        Flow::Continue
    }
}
