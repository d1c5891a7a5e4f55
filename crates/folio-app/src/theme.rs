#![forbid(unsafe_code)]

//! Monochrome theme.
//!
//! The site this app presents is black-and-white with grey supporting text,
//! so the palette stays in that register: default foreground for body copy,
//! bold white for headings, dark grey for secondary text, reverse video for
//! the few filled surfaces (active tab, buttons, chips).

use folio_runtime::{Color, Style};

/// Resolved styles for every surface the views draw.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Body text.
    pub text: Style,
    /// Secondary/supporting text.
    pub muted: Style,
    /// Headings and the brand mark.
    pub heading: Style,
    /// Active tab / pressed button: filled.
    pub active: Style,
    /// Inactive tabs and hints.
    pub inactive: Style,
    /// Technology chips.
    pub chip: Style,
    /// Activatable links.
    pub link: Style,
    /// Progress bar fill.
    pub bar_fill: Style,
    /// Progress bar trough.
    pub bar_empty: Style,
    /// Modal backdrop scrim.
    pub scrim: Style,
    /// Panel borders.
    pub border: Style,
    /// Field awaiting required input after a refused submit.
    pub invalid: Style,
}

impl Theme {
    /// The single monochrome palette.
    #[must_use]
    pub fn mono() -> Self {
        let grey = Color::DarkGrey;
        Self {
            text: Style::new(),
            muted: Style::new().fg(grey),
            heading: Style::new().fg(Color::White).bold(),
            active: Style::new().fg(Color::Black).bg(Color::White).bold(),
            inactive: Style::new().fg(grey),
            chip: Style::new().fg(Color::Black).bg(Color::Grey),
            link: Style::new().fg(Color::White).underline(),
            bar_fill: Style::new().bg(Color::White),
            bar_empty: Style::new().bg(Color::DarkGrey).dim(),
            scrim: Style::new().fg(grey).dim(),
            border: Style::new().fg(grey),
            invalid: Style::new().fg(Color::White).bold().underline(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mono()
    }
}
