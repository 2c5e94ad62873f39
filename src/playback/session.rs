use crate::catalog::Track;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
        }
    }
}

/// The loaded track. Existing at all means "something is loaded", so the
/// track, its index and the playing flag are always set together.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTrack {
    pub index: usize,
    pub track: Track,
    pub playing: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    active: Option<ActiveTrack>,
}

impl Session {
    pub fn active(&self) -> Option<&ActiveTrack> {
        self.active.as_ref()
    }

    pub fn state(&self) -> PlaybackState {
        match &self.active {
            None => PlaybackState::Idle,
            Some(a) if a.playing => PlaybackState::Playing,
            Some(_) => PlaybackState::Paused,
        }
    }

    pub fn start(&mut self, index: usize, track: Track) {
        self.active = Some(ActiveTrack {
            index,
            track,
            playing: true,
        });
    }

    pub fn set_playing(&mut self, playing: bool) {
        if let Some(a) = self.active.as_mut() {
            a.playing = playing;
        }
    }

    /// `true` when `index`/`track` names something other than the loaded track.
    pub fn differs_from(&self, index: usize, track: &Track) -> bool {
        match &self.active {
            Some(a) => a.index != index || a.track.id != track.id,
            None => true,
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}
