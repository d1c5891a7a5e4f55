#![forbid(unsafe_code)]

//! Header and footer chrome.
//!
//! The header carries the brand mark, the screen tabs, and a right-aligned
//! `"{location}, {clock}"` status; the footer shows key hints. Tab layout is
//! a pure function of the frame width so mouse hit-testing in `update` and
//! drawing in `view` cannot disagree.

use chrono::Local;
use folio_runtime::{Frame, Rect};
use unicode_width::UnicodeWidthStr;

use crate::screens::ScreenId;
use crate::theme::Theme;

/// Rows consumed by the header (content + rule).
pub const HEADER_ROWS: u16 = 2;

/// Rows consumed by the footer.
pub const FOOTER_ROWS: u16 = 1;

const BRAND: &str = "▪▪ RAJU HALDER";

/// Wall-clock display string, re-rendered every second.
///
/// Matches the site header's format, e.g. `"Thu, 07 Aug 25, 03:12 PM"`.
#[must_use]
pub fn clock_string() -> String {
    Local::now().format("%a, %d %b %y, %I:%M %p").to_string()
}

/// The content region between header and footer.
#[must_use]
pub fn content_area(width: u16, height: u16) -> Rect {
    let full = Rect::new(0, 0, width, height);
    let (_, rest) = full.split_top(HEADER_ROWS);
    let (content, _) = rest.split_bottom(FOOTER_ROWS);
    content
}

/// Clickable tab regions on the header row, in registry order.
#[must_use]
pub fn tab_rects(width: u16) -> Vec<(ScreenId, Rect)> {
    let mut col = BRAND.width() as u16 + 4;
    let mut rects = Vec::with_capacity(ScreenId::ALL.len());
    for id in ScreenId::ALL {
        let label_width = id.title().width() as u16 + 2;
        if col + label_width > width {
            break;
        }
        rects.push((id, Rect::new(col, 0, label_width, 1)));
        col += label_width + 1;
    }
    rects
}

/// The tab under a mouse position, if any.
#[must_use]
pub fn tab_at(width: u16, col: u16, row: u16) -> Option<ScreenId> {
    tab_rects(width)
        .into_iter()
        .find(|(_, rect)| rect.contains(col, row))
        .map(|(id, _)| id)
}

/// Draw the header onto the top rows.
pub fn render_header(frame: &mut Frame, active: ScreenId, status: &str, theme: &Theme) {
    let width = frame.width();
    frame.draw_text(1, 0, BRAND, theme.heading, width);

    for (id, rect) in tab_rects(width) {
        let style = if id == active { theme.active } else { theme.inactive };
        let label = format!(" {} ", id.title());
        frame.draw_text(rect.x, rect.y, &label, style, rect.right());
    }

    let status_width = status.width() as u16;
    if status_width + 1 < width {
        frame.draw_text(width - status_width - 1, 0, status, theme.muted, width);
    }

    for x in 0..width {
        frame.set(
            x,
            1,
            folio_runtime::Cell {
                ch: '─',
                style: theme.border,
            },
        );
    }
}

/// Draw the footer hint line onto the bottom row.
pub fn render_footer(frame: &mut Frame, hints: &str, theme: &Theme) {
    let y = frame.height().saturating_sub(FOOTER_ROWS);
    frame.draw_text(1, y, hints, theme.inactive, frame.width());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_area_excludes_chrome() {
        let area = content_area(80, 24);
        assert_eq!(area, Rect::new(0, HEADER_ROWS, 80, 24 - HEADER_ROWS - FOOTER_ROWS));
    }

    #[test]
    fn tabs_cover_all_screens_when_wide() {
        let rects = tab_rects(120);
        assert_eq!(rects.len(), ScreenId::ALL.len());
        // Tabs must not overlap.
        for pair in rects.windows(2) {
            assert!(pair[0].1.right() < pair[1].1.x);
        }
    }

    #[test]
    fn tabs_truncate_on_narrow_frames() {
        let rects = tab_rects(30);
        assert!(rects.len() < ScreenId::ALL.len());
    }

    #[test]
    fn tab_hit_testing_round_trips() {
        for (id, rect) in tab_rects(120) {
            assert_eq!(tab_at(120, rect.x, 0), Some(id));
            assert_eq!(tab_at(120, rect.right() - 1, 0), Some(id));
        }
        assert_eq!(tab_at(120, 0, 0), None, "brand is not a tab");
        assert_eq!(tab_at(120, 50, 5), None, "content rows have no tabs");
    }

    #[test]
    fn header_highlights_active_tab() {
        let theme = Theme::mono();
        let mut frame = Frame::new(120, 3);
        render_header(&mut frame, ScreenId::Portfolio, "Global, now", &theme);
        let (_, rect) = tab_rects(120)
            .into_iter()
            .find(|(id, _)| *id == ScreenId::Portfolio)
            .unwrap();
        assert_eq!(frame.get(rect.x + 1, 0).unwrap().style, theme.active);
    }

    #[test]
    fn header_shows_status_right_aligned() {
        let theme = Theme::mono();
        let mut frame = Frame::new(80, 3);
        render_header(&mut frame, ScreenId::Home, "Global, Thu 07", &theme);
        assert!(frame.row_text(0).trim_end().ends_with("Global, Thu 07"));
    }

    #[test]
    fn clock_string_has_expected_shape() {
        let clock = clock_string();
        // "Thu, 07 Aug 25, 03:12 PM" — two comma separators and a meridiem.
        assert_eq!(clock.matches(", ").count(), 2, "clock format drifted: {clock}");
        assert!(clock.ends_with("AM") || clock.ends_with("PM"));
    }
}
