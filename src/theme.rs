//! Colour palettes for the terminal UI, cycled with `t`.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeName;

pub struct Theme {
    pub name: ThemeName,
    pub accent: Color,
    pub secondary: Color,
    pub text: Color,
    pub dimmed: Color,
    pub background: Color,
    pub panel: Color,
    /// Caps the layout width so the player stays small on wide terminals.
    pub compact: bool,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

pub const THEMES: &[Theme] = &[
    Theme {
        name: ThemeName::Dark,
        accent: rgb(0x22d3ee),
        secondary: rgb(0xf59e0b),
        text: rgb(0xe5e7eb),
        dimmed: rgb(0x9ca3af),
        background: rgb(0x0f172a),
        panel: rgb(0x111827),
        compact: false,
    },
    Theme {
        name: ThemeName::Dracula,
        accent: rgb(0xbd93f9),
        secondary: rgb(0xff79c6),
        text: rgb(0xf8f8f2),
        dimmed: rgb(0x9ea0b4),
        background: rgb(0x1e1f29),
        panel: rgb(0x282a36),
        compact: false,
    },
    Theme {
        name: ThemeName::Caramel,
        accent: rgb(0xf2a65a),
        secondary: rgb(0xe76f51),
        text: rgb(0xf8e4c9),
        dimmed: rgb(0xc49a85),
        background: rgb(0x1b0c0c),
        panel: rgb(0x2e1717),
        compact: false,
    },
    Theme {
        name: ThemeName::Light,
        accent: rgb(0x3b82f6),
        secondary: rgb(0xf97316),
        text: rgb(0x0f172a),
        dimmed: rgb(0x64748b),
        background: rgb(0xffffff),
        panel: rgb(0xf8fafc),
        compact: false,
    },
    Theme {
        name: ThemeName::Mini,
        accent: rgb(0x22d3ee),
        secondary: rgb(0xf59e0b),
        text: rgb(0xe5e7eb),
        dimmed: rgb(0x9ca3af),
        background: rgb(0x0f172a),
        panel: rgb(0x111827),
        compact: true,
    },
];

/// Widest layout the compact theme uses, in columns.
pub const COMPACT_WIDTH: u16 = 96;

impl ThemeName {
    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Dracula => "dracula",
            Self::Caramel => "caramel",
            Self::Light => "light",
            Self::Mini => "mini",
        }
    }

    /// The theme after this one, wrapping around.
    pub fn next(self) -> Self {
        let i = THEMES.iter().position(|t| t.name == self).unwrap_or(0);
        THEMES[(i + 1) % THEMES.len()].name
    }
}

pub fn theme(name: ThemeName) -> &'static Theme {
    THEMES
        .iter()
        .find(|t| t.name == name)
        .unwrap_or(&THEMES[0])
}

impl Theme {
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn lyric_active(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .add_modifier(Modifier::BOLD)
    }
}
