#![forbid(unsafe_code)]

//! The home screen: hero, stats, and a fixed four-record preview.

use folio_core::CatalogStore;
use folio_runtime::{Frame, Rect};

use crate::theme::Theme;

/// Static home screen; the preview always shows the catalog's first four
/// records, whatever the portfolio cursor says.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeScreen;

impl HomeScreen {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, frame: &mut Frame, area: Rect, catalog: &CatalogStore, theme: &Theme) {
        let x = area.x + 1;
        let clip = area.right();
        let mut y = area.y + 1;

        frame.draw_text(x, y, "code", theme.heading, clip);
        frame.draw_text(x, y + 1, "poetry", theme.heading, clip);
        y += 3;

        frame.draw_text(
            x,
            y,
            "Welcome to a digital journey that transcends code and design.",
            theme.muted,
            clip,
        );
        frame.draw_text(
            x,
            y + 1,
            "Discover the artistry of development, captured in motion.",
            theme.muted,
            clip,
        );
        y += 3;

        frame.draw_text(x, y, "(W) (E) (B)", theme.inactive, clip);
        y += 2;

        frame.draw_text(x, y, "+250k", theme.heading, clip);
        frame.draw_text(x + 7, y, "lines of code shipped", theme.muted, clip);
        frame.draw_text(x + 34, y, "+800k", theme.heading, clip);
        frame.draw_text(x + 41, y, "hours of engaging storytelling", theme.muted, clip);
        y += 2;

        frame.draw_text(x, y, "selected work", theme.heading, clip);
        y += 1;
        for (i, record) in catalog.preview().iter().enumerate() {
            if y >= area.bottom() {
                break;
            }
            let number = format!("{:02}", i + 1);
            frame.draw_text(x, y, &number, theme.muted, clip);
            let after = frame.draw_text(x + 4, y, &record.title, theme.text, clip);
            frame.draw_text(after + 2, y, &record.category, theme.muted, clip);
            y += 1;
        }

        if y < area.bottom() {
            frame.draw_text(x, y + 1, "press 3 for the full portfolio", theme.inactive, clip);
        }
    }
}
