#![forbid(unsafe_code)]

//! The project detail overlay.
//!
//! At most one overlay instance exists; opening while one is up rebinds the
//! record in place. Closing plays the open transitions in reverse, then the
//! app detaches the overlay once the timeline settles. Links inside the
//! overlay open externally without closing it.

use std::time::Duration;

use folio_core::ProjectRecord;
use folio_runtime::animation::ease_out;
use folio_runtime::event::{Event, KeyCode, MouseButton, MouseEventKind};
use folio_runtime::{Frame, Rect, Timeline, Transition};

use crate::theme::Theme;
use crate::widgets::{Panel, draw_chips};

const BACKDROP: &str = "modal-backdrop";
const CONTENT: &str = "modal-content";

const BACKDROP_FADE: Duration = Duration::from_millis(300);
const CONTENT_FADE: Duration = Duration::from_millis(400);
const CONTENT_DELAY: Duration = Duration::from_millis(100);
const CLOSE_FADE: Duration = Duration::from_millis(300);
const CLOSE_BACKDROP_DELAY: Duration = Duration::from_millis(100);

/// What the app should do with an input the overlay consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Nothing further.
    None,
    /// Begin the close transition.
    Close,
    /// Open an external link; the overlay stays up.
    OpenUrl(String),
}

/// The single overlay instance.
#[derive(Debug, Clone)]
pub struct ProjectModal {
    record: ProjectRecord,
    timeline: Timeline,
    closing: bool,
}

impl ProjectModal {
    /// Open bound to a record, playing the entrance transitions.
    #[must_use]
    pub fn open(record: ProjectRecord) -> Self {
        let timeline = Timeline::with_transitions([
            Transition::new(BACKDROP, 0.0, 1.0, BACKDROP_FADE).easing(ease_out),
            Transition::new(CONTENT, 0.0, 1.0, CONTENT_FADE)
                .delay(CONTENT_DELAY)
                .easing(ease_out),
        ]);
        Self {
            record,
            timeline,
            closing: false,
        }
    }

    /// Rebind to another record; the overlay itself is reused.
    pub fn replace(&mut self, record: ProjectRecord) {
        self.record = record;
    }

    /// The record currently bound.
    #[must_use]
    pub fn record(&self) -> &ProjectRecord {
        &self.record
    }

    /// Whether the close transition is playing.
    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Start the reverse transition; repeated calls are no-ops.
    pub fn begin_close(&mut self) {
        if self.closing {
            return;
        }
        self.closing = true;
        self.timeline.push(
            Transition::new(CONTENT, 1.0, 0.0, CLOSE_FADE).easing(ease_out),
        );
        self.timeline.push(
            Transition::new(BACKDROP, 1.0, 0.0, CLOSE_FADE)
                .delay(CLOSE_BACKDROP_DELAY)
                .easing(ease_out),
        );
    }

    /// Advance the transitions; returns `true` when the closed overlay
    /// should be detached.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.timeline.tick(dt);
        self.closing && self.timeline.is_idle()
    }

    /// Whether any transition is still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.timeline.is_idle()
    }

    /// The centered content box within `area`.
    #[must_use]
    pub fn content_box(area: Rect) -> Rect {
        let width = area.width.saturating_sub(6).min(72).max(20);
        let height = area.height.saturating_sub(2).min(18).max(8);
        area.centered(width, height)
    }

    fn link_rows(content: Rect) -> (u16, u16) {
        let base = content.bottom().saturating_sub(4);
        (base, base + 1)
    }

    /// Handle an input the app routed to the overlay. The overlay consumes
    /// everything while open; clicks on inner links must not fall through to
    /// anything beneath it.
    #[must_use]
    pub fn handle(&mut self, event: &Event, area: Rect) -> ModalAction {
        if self.closing {
            return ModalAction::None;
        }
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('x') => ModalAction::Close,
                KeyCode::Char('o') => ModalAction::OpenUrl(self.record.live_url.clone()),
                KeyCode::Char('g') => ModalAction::OpenUrl(self.record.github_url.clone()),
                _ => ModalAction::None,
            },
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
                let content = Self::content_box(area);
                let (live_row, source_row) = Self::link_rows(content);
                if !content.contains(mouse.column, mouse.row) {
                    return ModalAction::Close;
                }
                if mouse.row == content.top() && mouse.column >= content.right().saturating_sub(4) {
                    return ModalAction::Close;
                }
                if mouse.row == live_row {
                    return ModalAction::OpenUrl(self.record.live_url.clone());
                }
                if mouse.row == source_row {
                    return ModalAction::OpenUrl(self.record.github_url.clone());
                }
                ModalAction::None
            }
            _ => ModalAction::None,
        }
    }

    /// Render over whatever is beneath.
    pub fn view(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let backdrop = self.timeline.value_or(BACKDROP, 1.0);
        let content_v = self.timeline.value_or(CONTENT, 1.0);

        if backdrop > 0.15 {
            let ch = if backdrop > 0.6 { '░' } else { '·' };
            frame.fill(area, ch, theme.scrim);
        }
        if content_v < 0.2 {
            return;
        }

        // The box grows in with the content transition (scale 0.9 -> 1.0).
        let full = Self::content_box(area);
        let scale = 0.9 + 0.1 * content_v;
        let width = (f32::from(full.width) * scale) as u16;
        let height = (f32::from(full.height) * scale).max(6.0) as u16;
        let content = area.centered(width, height);

        frame.fill(content, ' ', theme.text);
        let panel = Panel::new()
            .title(&self.record.title)
            .title_style(theme.heading)
            .border_style(theme.border);
        panel.render(content, frame);
        frame.draw_text(
            content.right().saturating_sub(4),
            content.top(),
            " ✕ ",
            theme.inactive,
            content.right(),
        );

        if content_v < 0.85 {
            // Text settles in only once the box has mostly grown.
            return;
        }

        let inner = panel.inner(content).inset(1, 0);
        let mut y = inner.top();
        let clip = inner.right();

        frame.draw_text(inner.x, y, &self.record.category, theme.muted, clip);
        y += 2;

        let overview = format!(
            "{}. This project showcases modern web development practices and \
             demonstrates proficiency in full-stack development.",
            self.record.description
        );
        for line in wrap(&overview, inner.width as usize) {
            if y >= inner.bottom() {
                break;
            }
            frame.draw_text(inner.x, y, &line, theme.text, clip);
            y += 1;
        }
        y += 1;

        if y < inner.bottom() {
            draw_chips(frame, inner.x, y, &self.record.tech, theme.chip, clip);
            y += 2;
        }

        let (live_row, source_row) = Self::link_rows(content);
        frame.draw_text(inner.x, live_row, "↗ Live Demo", theme.link, clip);
        frame.draw_text(
            inner.x + 14,
            live_row,
            "view the deployed application  [o]",
            theme.muted,
            clip,
        );
        frame.draw_text(inner.x, source_row, "⌂ Source Code", theme.link, clip);
        frame.draw_text(
            inner.x + 14,
            source_row,
            "explore the codebase on GitHub [g]",
            theme.muted,
            clip,
        );

        frame.draw_text(
            inner.x,
            content.bottom().saturating_sub(2),
            "completed in 4-6 weeks · esc to close",
            theme.inactive,
            clip,
        );
    }
}

/// Greedy word wrap to at most `width` columns per line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::catalog::builtin_catalog;
    use folio_runtime::event::{KeyEvent, KeyModifiers, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn area() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    fn sample() -> ProjectRecord {
        builtin_catalog().remove(0)
    }

    #[test]
    fn open_starts_entrance_transitions() {
        let modal = ProjectModal::open(sample());
        assert!(modal.is_animating());
        assert!(!modal.is_closing());
    }

    #[test]
    fn replace_rebinds_without_restarting_close() {
        let mut modal = ProjectModal::open(sample());
        let other = builtin_catalog().remove(3);
        modal.replace(other.clone());
        assert_eq!(modal.record().id, other.id);
        assert!(!modal.is_closing());
    }

    #[test]
    fn escape_requests_close() {
        let mut modal = ProjectModal::open(sample());
        assert_eq!(modal.handle(&key(KeyCode::Esc), area()), ModalAction::Close);
    }

    #[test]
    fn close_plays_reverse_then_detaches() {
        let mut modal = ProjectModal::open(sample());
        // Let the entrance finish.
        assert!(!modal.tick(Duration::from_millis(600)));
        modal.begin_close();
        assert!(modal.is_closing());
        assert!(!modal.tick(Duration::from_millis(100)), "reverse still playing");
        assert!(modal.tick(Duration::from_millis(500)), "detach after reverse");
    }

    #[test]
    fn begin_close_twice_is_stable() {
        let mut modal = ProjectModal::open(sample());
        modal.begin_close();
        modal.begin_close();
        assert!(modal.is_closing());
    }

    #[test]
    fn inputs_ignored_while_closing() {
        let mut modal = ProjectModal::open(sample());
        modal.begin_close();
        assert_eq!(modal.handle(&key(KeyCode::Char('o')), area()), ModalAction::None);
    }

    #[test]
    fn click_outside_content_closes() {
        let mut modal = ProjectModal::open(sample());
        assert_eq!(modal.handle(&click(0, 0), area()), ModalAction::Close);
    }

    #[test]
    fn link_click_opens_url_without_closing() {
        let mut modal = ProjectModal::open(sample());
        let content = ProjectModal::content_box(area());
        let (live_row, _) = ProjectModal::link_rows(content);
        let action = modal.handle(&click(content.x + 2, live_row), area());
        assert_eq!(action, ModalAction::OpenUrl(sample().live_url));
        assert!(!modal.is_closing(), "link must not also close the overlay");
    }

    #[test]
    fn keyboard_links_open_urls() {
        let mut modal = ProjectModal::open(sample());
        assert_eq!(
            modal.handle(&key(KeyCode::Char('g')), area()),
            ModalAction::OpenUrl(sample().github_url)
        );
    }

    #[test]
    fn view_renders_title_once_settled() {
        let theme = Theme::mono();
        let mut modal = ProjectModal::open(sample());
        modal.tick(Duration::from_millis(600));
        let mut frame = Frame::new(80, 24);
        modal.view(&mut frame, area(), &theme);
        let text: String = (0..24).map(|y| frame.row_text(y)).collect();
        assert!(text.contains("E-commerce Platform"));
        assert!(text.contains("Live Demo"));
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("one two three four five", 9);
        assert!(lines.iter().all(|l| l.len() <= 9), "{lines:?}");
        assert_eq!(lines.join(" "), "one two three four five");
    }
}
