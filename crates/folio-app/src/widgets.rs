#![forbid(unsafe_code)]

//! Small builder-style widgets shared by the screens.

use folio_runtime::{Frame, Rect, Style};
use unicode_width::UnicodeWidthStr;

// ─────────────────────────────────────────────────────────────────────────────
// Progress bar
// ─────────────────────────────────────────────────────────────────────────────

/// A one-row progress bar with an optional trailing label.
#[derive(Debug, Clone, Default)]
pub struct ProgressBar<'a> {
    ratio: f32,
    label: Option<&'a str>,
    fill: Style,
    trough: Style,
}

impl<'a> ProgressBar<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill ratio, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn ratio(mut self, ratio: f32) -> Self {
        self.ratio = ratio.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub fn fill_style(mut self, style: Style) -> Self {
        self.fill = style;
        self
    }

    #[must_use]
    pub fn trough_style(mut self, style: Style) -> Self {
        self.trough = style;
        self
    }

    pub fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let label_width = self.label.map(|l| l.width() as u16 + 1).unwrap_or(0);
        let bar_width = area.width.saturating_sub(label_width);

        // A full bar must render full even when the ratio rounds down.
        let filled = if self.ratio >= 1.0 {
            bar_width
        } else {
            (f32::from(bar_width) * self.ratio).floor() as u16
        };

        let y = area.y;
        for x in 0..bar_width {
            let style = if x < filled { self.fill } else { self.trough };
            frame.set(area.x + x, y, folio_runtime::Cell { ch: ' ', style });
        }
        if let Some(label) = self.label {
            frame.draw_text(area.x + bar_width + 1, y, label, Style::default(), area.right());
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Panel
// ─────────────────────────────────────────────────────────────────────────────

/// A bordered box with an optional title in the top edge.
#[derive(Debug, Clone, Default)]
pub struct Panel<'a> {
    title: Option<&'a str>,
    border_style: Style,
    title_style: Style,
}

impl<'a> Panel<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    #[must_use]
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    /// The drawable region inside the borders.
    #[must_use]
    pub fn inner(&self, area: Rect) -> Rect {
        area.inset(1, 1)
    }

    pub fn render(&self, area: Rect, frame: &mut Frame) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let style = self.border_style;
        let (left, right) = (area.left(), area.right() - 1);
        let (top, bottom) = (area.top(), area.bottom() - 1);

        for x in left + 1..right {
            frame.set(x, top, folio_runtime::Cell { ch: '─', style });
            frame.set(x, bottom, folio_runtime::Cell { ch: '─', style });
        }
        for y in top + 1..bottom {
            frame.set(left, y, folio_runtime::Cell { ch: '│', style });
            frame.set(right, y, folio_runtime::Cell { ch: '│', style });
        }
        frame.set(left, top, folio_runtime::Cell { ch: '╭', style });
        frame.set(right, top, folio_runtime::Cell { ch: '╮', style });
        frame.set(left, bottom, folio_runtime::Cell { ch: '╰', style });
        frame.set(right, bottom, folio_runtime::Cell { ch: '╯', style });

        if let Some(title) = self.title {
            let text = format!(" {title} ");
            frame.draw_text(left + 2, top, &text, self.title_style, right);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chips
// ─────────────────────────────────────────────────────────────────────────────

/// Draw a row of `tag` chips; returns the column after the last chip.
pub fn draw_chips(
    frame: &mut Frame,
    x: u16,
    y: u16,
    tags: &[String],
    style: Style,
    clip_right: u16,
) -> u16 {
    let mut col = x;
    for tag in tags {
        let text = format!(" {tag} ");
        let width = text.width() as u16;
        if col + width > clip_right {
            break;
        }
        col = frame.draw_text(col, y, &text, style, clip_right);
        col += 1;
    }
    col.saturating_sub(1).max(x)
}

// ─────────────────────────────────────────────────────────────────────────────
// Text input
// ─────────────────────────────────────────────────────────────────────────────

/// A labelled line-edit box; the contact form stacks four of these.
///
/// Editing is append/backspace only: the portfolio form has no cursor
/// movement, matching the original's plain inputs.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    multiline: bool,
    label_style: Style,
    text_style: Style,
    placeholder_style: Style,
    border_style: Style,
}

impl<'a> TextInput<'a> {
    #[must_use]
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
            multiline: false,
            label_style: Style::default(),
            text_style: Style::default(),
            placeholder_style: Style::default(),
            border_style: Style::default(),
        }
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = multiline;
        self
    }

    #[must_use]
    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    #[must_use]
    pub fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    #[must_use]
    pub fn placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Rows this input occupies: label + bordered box.
    #[must_use]
    pub fn height(&self) -> u16 {
        if self.multiline { 1 + 5 } else { 1 + 3 }
    }

    pub fn render(&self, area: Rect, frame: &mut Frame) {
        if area.height < self.height() {
            return;
        }
        frame.draw_text(area.x, area.y, self.label, self.label_style, area.right());

        let box_area = Rect::new(area.x, area.y + 1, area.width, self.height() - 1);
        let panel = Panel::new().border_style(if self.focused {
            self.label_style
        } else {
            self.border_style
        });
        panel.render(box_area, frame);
        let inner = panel.inner(box_area);

        if self.value.is_empty() {
            frame.draw_text(inner.x, inner.y, self.placeholder, self.placeholder_style, inner.right());
        } else if self.multiline {
            // Last lines win when the text overflows the box.
            let rows = inner.height as usize;
            let lines: Vec<&str> = self.value.split('\n').collect();
            let start = lines.len().saturating_sub(rows);
            for (i, line) in lines[start..].iter().enumerate() {
                let tail = tail_fitting(line, inner.width as usize);
                frame.draw_text(inner.x, inner.y + i as u16, tail, self.text_style, inner.right());
            }
        } else {
            let tail = tail_fitting(self.value, inner.width.saturating_sub(1) as usize);
            let end = frame.draw_text(inner.x, inner.y, tail, self.text_style, inner.right());
            if self.focused {
                frame.draw_text(end, inner.y, "▏", self.label_style, inner.right());
            }
        }
    }
}

/// The longest suffix of `text` that fits in `width` columns.
fn tail_fitting(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }
    let mut start = text.len();
    let mut used = 0;
    for (idx, ch) in text.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}
