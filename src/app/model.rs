//! Application model types: `App`, `Focus` and `DevicePicker`.

use crate::catalog::Track;
use crate::config::ThemeName;
use crate::player::AudioDevice;

/// Which part of the screen receives typed keys.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Results,
    Search,
    Devices,
}

/// Output-device popup.
#[derive(Debug, Clone, PartialEq)]
pub struct DevicePicker {
    pub devices: Vec<AudioDevice>,
    pub selected: usize,
}

impl DevicePicker {
    /// Open on `current` when it is listed, else on the first entry.
    pub fn new(devices: Vec<AudioDevice>, current: &str) -> Self {
        let devices = if devices.is_empty() {
            vec![AudioDevice::auto()]
        } else {
            devices
        };
        let selected = devices.iter().position(|d| d.name == current).unwrap_or(0);
        Self { devices, selected }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1).min(self.devices.len().saturating_sub(1));
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn picked(&self) -> Option<&AudioDevice> {
        self.devices.get(self.selected)
    }
}

/// The browse model.
#[derive(Debug, Default)]
pub struct App {
    pub results: Vec<Track>,
    pub selected: usize,
    pub focus: Focus,
    /// Text being typed into the search box.
    pub query: String,
    /// Last query that was submitted.
    pub last_query: Option<String>,
    pub picker: Option<DevicePicker>,
    pub theme: ThemeName,
}

impl App {
    pub fn new(theme: ThemeName) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Row under the cursor.
    pub fn selection(&self) -> Option<(usize, &Track)> {
        self.results.get(self.selected).map(|t| (self.selected, t))
    }

    /// Replace the list wholesale; the cursor goes back to the top.
    pub fn set_results(&mut self, results: Vec<Track>) {
        self.results = results;
        self.selected = 0;
    }

    /// Move the cursor down, stopping at the last row.
    pub fn next(&mut self) {
        if self.has_results() {
            self.selected = (self.selected + 1).min(self.results.len() - 1);
        }
    }

    /// Move the cursor up, stopping at the first row.
    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn set_selected(&mut self, idx: usize) {
        if self.has_results() {
            self.selected = idx.min(self.results.len() - 1);
        }
    }

    pub fn enter_search(&mut self) {
        self.focus = Focus::Search;
    }

    pub fn exit_search(&mut self) {
        self.focus = Focus::Results;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
    }

    /// Submit the typed query. Blank input is refused and keeps focus in
    /// the search box.
    pub fn submit_query(&mut self) -> Option<String> {
        let query = self.query.trim().to_string();
        if query.is_empty() {
            return None;
        }
        self.focus = Focus::Results;
        self.last_query = Some(query.clone());
        Some(query)
    }

    pub fn open_devices(&mut self, devices: Vec<AudioDevice>, current: &str) {
        self.picker = Some(DevicePicker::new(devices, current));
        self.focus = Focus::Devices;
    }

    pub fn close_devices(&mut self) {
        self.picker = None;
        self.focus = Focus::Results;
    }

    pub fn cycle_theme(&mut self) -> ThemeName {
        self.theme = self.theme.next();
        self.theme
    }
}
