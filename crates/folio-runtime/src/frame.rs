#![forbid(unsafe_code)]

//! Cell frame and geometry.
//!
//! Views render into a [`Frame`] of styled cells; the program presents it by
//! diffing against the previous frame and rewriting only changed rows. Wide
//! graphemes occupy their leading cell plus a continuation marker so column
//! arithmetic stays cell-accurate.

use crossterm::style::{Attribute, Attributes, ContentStyle};
use unicode_width::UnicodeWidthChar;

pub use crossterm::style::Color;

/// Marker stored after a double-width character; the painter emits nothing
/// for it because the terminal already advanced two columns.
pub(crate) const CONTINUATION: char = '\0';

// ─────────────────────────────────────────────────────────────────────────────
// Geometry
// ─────────────────────────────────────────────────────────────────────────────

/// An axis-aligned cell rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub const fn left(&self) -> u16 {
        self.x
    }

    #[must_use]
    pub const fn top(&self) -> u16 {
        self.y
    }

    /// One past the last column.
    #[must_use]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// One past the last row.
    #[must_use]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrink by a horizontal and vertical margin on each side.
    #[must_use]
    pub fn inset(&self, dx: u16, dy: u16) -> Rect {
        Rect {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            width: self.width.saturating_sub(dx.saturating_mul(2)),
            height: self.height.saturating_sub(dy.saturating_mul(2)),
        }
    }

    /// Whether a cell position falls inside this rect.
    #[must_use]
    pub const fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.right() && row >= self.y && row < self.bottom()
    }

    /// A `width x height` rect centered inside `self` (clamped to fit).
    #[must_use]
    pub fn centered(&self, width: u16, height: u16) -> Rect {
        let w = width.min(self.width);
        let h = height.min(self.height);
        Rect {
            x: self.x + (self.width - w) / 2,
            y: self.y + (self.height - h) / 2,
            width: w,
            height: h,
        }
    }

    /// Split off the top `rows`, returning `(top, rest)`.
    #[must_use]
    pub fn split_top(&self, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(self.height);
        let top = Rect::new(self.x, self.y, self.width, rows);
        let rest = Rect::new(self.x, self.y + rows, self.width, self.height - rows);
        (top, rest)
    }

    /// Split off the bottom `rows`, returning `(rest, bottom)`.
    #[must_use]
    pub fn split_bottom(&self, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(self.height);
        let rest = Rect::new(self.x, self.y, self.width, self.height - rows);
        let bottom = Rect::new(self.x, self.y + self.height - rows, self.width, rows);
        (rest, bottom)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Style
// ─────────────────────────────────────────────────────────────────────────────

/// Terminal text styling for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl Style {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            dim: false,
            italic: false,
            underline: false,
            reverse: false,
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    #[must_use]
    pub const fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Convert to the backend's content style.
    #[must_use]
    pub fn to_content_style(&self) -> ContentStyle {
        let mut attributes = Attributes::default();
        if self.bold {
            attributes.set(Attribute::Bold);
        }
        if self.dim {
            attributes.set(Attribute::Dim);
        }
        if self.italic {
            attributes.set(Attribute::Italic);
        }
        if self.underline {
            attributes.set(Attribute::Underlined);
        }
        if self.reverse {
            attributes.set(Attribute::Reverse);
        }
        ContentStyle {
            foreground_color: self.fg,
            background_color: self.bg,
            underline_color: None,
            attributes,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame
// ─────────────────────────────────────────────────────────────────────────────

/// One styled cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

/// A full-screen grid of cells for one rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    /// Create a blank frame.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole frame as a rect.
    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Read a cell; out-of-bounds reads return `None`.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Write a cell; out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill a rect with a character and style.
    pub fn fill(&mut self, area: Rect, ch: char, style: Style) {
        for y in area.top()..area.bottom().min(self.height) {
            for x in area.left()..area.right().min(self.width) {
                self.set(x, y, Cell { ch, style });
            }
        }
    }

    /// Draw text starting at `(x, y)`, clipped at `clip_right`.
    ///
    /// Returns the column after the last cell written. Double-width
    /// characters take two cells and are skipped entirely when only one
    /// column remains.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, style: Style, clip_right: u16) -> u16 {
        let clip = clip_right.min(self.width);
        let mut col = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > clip {
                break;
            }
            self.set(col, y, Cell { ch, style });
            if w == 2 {
                self.set(col + 1, y, Cell { ch: CONTINUATION, style });
            }
            col += w;
        }
        col
    }

    /// Draw text horizontally centered within `area` on row `y`.
    pub fn draw_text_centered(&mut self, area: Rect, y: u16, text: &str, style: Style) {
        let text_width = text.chars().map(|c| c.width().unwrap_or(0)).sum::<usize>() as u16;
        let x = area.x + area.width.saturating_sub(text_width) / 2;
        self.draw_text(x, y, text, style, area.right());
    }

    /// One row of cells, for the painter.
    #[must_use]
    pub(crate) fn row(&self, y: u16) -> &[Cell] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Plain-text contents of a row, for assertions in tests.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .iter()
            .filter(|c| c.ch != CONTINUATION)
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(2, 3, 10, 4);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 7);
        assert!(!r.is_empty());
        assert!(Rect::new(0, 0, 0, 5).is_empty());
    }

    #[test]
    fn rect_contains() {
        let r = Rect::new(2, 2, 4, 2);
        assert!(r.contains(2, 2));
        assert!(r.contains(5, 3));
        assert!(!r.contains(6, 3));
        assert!(!r.contains(5, 4));
    }

    #[test]
    fn rect_inset() {
        let r = Rect::new(0, 0, 10, 6).inset(2, 1);
        assert_eq!(r, Rect::new(2, 1, 6, 4));
    }

    #[test]
    fn rect_centered_clamps() {
        let r = Rect::new(0, 0, 10, 10).centered(20, 4);
        assert_eq!(r.width, 10);
        assert_eq!(r.height, 4);
        assert_eq!(r.y, 3);
    }

    #[test]
    fn rect_splits() {
        let r = Rect::new(0, 0, 10, 10);
        let (top, rest) = r.split_top(3);
        assert_eq!(top.height, 3);
        assert_eq!(rest, Rect::new(0, 3, 10, 7));
        let (rest, bottom) = r.split_bottom(2);
        assert_eq!(bottom, Rect::new(0, 8, 10, 2));
        assert_eq!(rest.height, 8);
    }

    #[test]
    fn draw_text_clips() {
        let mut frame = Frame::new(10, 2);
        let end = frame.draw_text(7, 0, "hello", Style::default(), 10);
        assert_eq!(end, 10);
        assert_eq!(frame.row_text(0), "       hel");
    }

    #[test]
    fn draw_text_out_of_bounds_row_is_dropped() {
        let mut frame = Frame::new(10, 1);
        frame.draw_text(0, 5, "x", Style::default(), 10);
        assert_eq!(frame.row_text(0), " ".repeat(10));
    }

    #[test]
    fn wide_chars_take_two_cells() {
        let mut frame = Frame::new(6, 1);
        let end = frame.draw_text(0, 0, "日本", Style::default(), 6);
        assert_eq!(end, 4);
        assert_eq!(frame.get(0, 0).unwrap().ch, '日');
        assert_eq!(frame.get(1, 0).unwrap().ch, CONTINUATION);
        assert_eq!(frame.get(2, 0).unwrap().ch, '本');
    }

    #[test]
    fn wide_char_not_split_at_clip() {
        let mut frame = Frame::new(3, 1);
        let end = frame.draw_text(0, 0, "a日", Style::default(), 2);
        // Only 'a' fits; the wide char would straddle the clip edge.
        assert_eq!(end, 1);
        assert_eq!(frame.row_text(0), "a  ");
    }

    #[test]
    fn centered_text() {
        let mut frame = Frame::new(11, 1);
        frame.draw_text_centered(frame.area(), 0, "mid", Style::default());
        assert_eq!(frame.row_text(0), "    mid    ");
    }

    #[test]
    fn fill_covers_rect_only() {
        let mut frame = Frame::new(4, 3);
        frame.fill(Rect::new(1, 1, 2, 1), '#', Style::default());
        assert_eq!(frame.row_text(0), "    ");
        assert_eq!(frame.row_text(1), " ## ");
        assert_eq!(frame.row_text(2), "    ");
    }

    #[test]
    fn style_builder_to_content_style() {
        let style = Style::new().fg(Color::White).bold().underline();
        let cs = style.to_content_style();
        assert_eq!(cs.foreground_color, Some(Color::White));
        assert!(cs.attributes.has(Attribute::Bold));
        assert!(cs.attributes.has(Attribute::Underlined));
        assert!(!cs.attributes.has(Attribute::Italic));
    }
}
