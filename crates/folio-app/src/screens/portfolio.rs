#![forbid(unsafe_code)]

//! The full portfolio list.
//!
//! Rows carry a hover detail line (description, tech, links) for the single
//! hovered project; selecting a row opens the detail overlay. Pointer motion
//! and the keyboard cursor drive the same hovered id, so at most one row is
//! ever hovered. Revealed rows stagger in; "Load More" reveals the next page
//! and disappears once everything is visible.
//!
//! Layout is a pure function of the content area, the scroll offset, and the
//! visible count, shared by drawing and mouse hit-testing.

use std::time::Duration;

use folio_core::CatalogStore;
use folio_runtime::animation::{ease_out, stagger_offsets};
use folio_runtime::event::{Event, KeyCode, MouseButton, MouseEventKind};
use folio_runtime::{Cmd, Frame, Rect, Timeline, Transition};

use crate::app::Msg;
use crate::theme::Theme;
use crate::widgets::draw_chips;

/// Rows per project block: main line, detail line, separator.
const BLOCK_ROWS: u16 = 3;

/// Rows consumed by the screen title.
const TITLE_ROWS: u16 = 2;

const ENTRANCE: Duration = Duration::from_millis(500);
const ENTRANCE_STAGGER: Duration = Duration::from_millis(120);

/// One timeline target per possible row.
const ROW_TARGETS: [&str; 8] = [
    "pf-row-0", "pf-row-1", "pf-row-2", "pf-row-3", "pf-row-4", "pf-row-5", "pf-row-6", "pf-row-7",
];

/// Computed screen geometry.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// `(record index, block rect)` for blocks that fit the area.
    pub rows: Vec<(usize, Rect)>,
    /// The load-more button, when the affordance is visible and fits.
    pub load_more: Option<Rect>,
}

/// Pure layout: which blocks land where for a given scroll position.
#[must_use]
pub fn layout(area: Rect, visible: usize, can_more: bool, scroll: usize) -> Layout {
    let mut out = Layout::default();
    let mut y = area.y + TITLE_ROWS;
    for index in scroll..visible {
        if y + BLOCK_ROWS > area.bottom() {
            return out;
        }
        out.rows.push((index, Rect::new(area.x, y, area.width, BLOCK_ROWS - 1)));
        y += BLOCK_ROWS;
    }
    if can_more && y < area.bottom() {
        out.load_more = Some(Rect::new(area.x, y, area.width, 1));
    }
    out
}

/// Hover-line link hit regions within a block.
#[must_use]
pub fn link_spans(block: Rect) -> (Rect, Rect) {
    let y = block.y + 1;
    let live = Rect::new(block.x + 4, y, 10, 1);
    let source = Rect::new(live.right() + 2, y, 12, 1);
    (live, source)
}

/// The portfolio screen.
#[derive(Debug, Clone)]
pub struct PortfolioScreen {
    hovered: Option<String>,
    selected: usize,
    scroll: usize,
    entrance: Timeline,
}

impl PortfolioScreen {
    #[must_use]
    pub fn new(initial_visible: usize) -> Self {
        let mut screen = Self {
            hovered: None,
            selected: 0,
            scroll: 0,
            entrance: Timeline::new(),
        };
        screen.stagger_in(0, initial_visible);
        screen
    }

    /// The single hovered project id, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Whether entrance transitions are still running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.entrance.is_idle()
    }

    /// Advance entrance transitions.
    pub fn tick(&mut self, dt: Duration) {
        self.entrance.tick(dt);
    }

    fn stagger_in(&mut self, from: usize, to: usize) {
        let offsets = stagger_offsets(to.saturating_sub(from), ENTRANCE_STAGGER);
        for (target, delay) in ROW_TARGETS.iter().take(to).skip(from).zip(offsets) {
            self.entrance
                .push(Transition::new(*target, 0.0, 1.0, ENTRANCE).delay(delay).easing(ease_out));
        }
    }

    fn row_revealed(&self, index: usize) -> bool {
        ROW_TARGETS
            .get(index)
            .and_then(|t| self.entrance.value(t))
            .map(|v| v > 0.3)
            .unwrap_or(true)
    }

    fn ensure_visible(&mut self, area: Rect, visible: usize, can_more: bool) {
        loop {
            let current = layout(area, visible, can_more, self.scroll);
            if current.rows.iter().any(|(i, _)| *i == self.selected) {
                return;
            }
            if self.selected < self.scroll {
                self.scroll = self.selected;
                return;
            }
            if self.scroll + 1 >= visible {
                return;
            }
            self.scroll += 1;
        }
    }

    fn select(&mut self, index: usize, catalog: &CatalogStore) {
        self.selected = index;
        self.hovered = catalog.visible().get(index).map(|r| r.id.clone());
    }

    /// Handle an input routed to this screen.
    pub fn handle(&mut self, event: &Event, area: Rect, catalog: &mut CatalogStore) -> Cmd<Msg> {
        let visible = catalog.visible_count();
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    let next = self.selected.saturating_sub(1);
                    self.select(next, catalog);
                    self.ensure_visible(area, visible, catalog.can_load_more());
                    Cmd::none()
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    let next = (self.selected + 1).min(visible.saturating_sub(1));
                    self.select(next, catalog);
                    self.ensure_visible(area, visible, catalog.can_load_more());
                    Cmd::none()
                }
                KeyCode::Enter => match catalog.visible().get(self.selected) {
                    Some(record) => Cmd::msg(Msg::OpenModal(record.clone())),
                    None => Cmd::none(),
                },
                KeyCode::Char('m') => {
                    self.reveal_more(catalog);
                    Cmd::none()
                }
                KeyCode::Char('o') => self.open_link(catalog, |r| r.live_url.clone()),
                KeyCode::Char('g') => self.open_link(catalog, |r| r.github_url.clone()),
                _ => Cmd::none(),
            },
            Event::Mouse(mouse) => {
                let shape = layout(area, visible, catalog.can_load_more(), self.scroll);
                match mouse.kind {
                    MouseEventKind::Moved => {
                        // Last write wins; leaving every block clears the hover.
                        let hit = shape
                            .rows
                            .iter()
                            .find(|(_, rect)| rect.contains(mouse.column, mouse.row));
                        match hit {
                            Some((index, _)) => self.select(*index, catalog),
                            None => self.hovered = None,
                        }
                        Cmd::none()
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        if let Some(button) = shape.load_more
                            && button.contains(mouse.column, mouse.row)
                        {
                            self.reveal_more(catalog);
                            return Cmd::none();
                        }
                        let hit = shape
                            .rows
                            .iter()
                            .find(|(_, rect)| rect.contains(mouse.column, mouse.row));
                        let Some((index, rect)) = hit else {
                            return Cmd::none();
                        };
                        let record = match catalog.visible().get(*index) {
                            Some(r) => r.clone(),
                            None => return Cmd::none(),
                        };
                        // Inner links swallow the click so the row's own
                        // open-overlay action never fires with it.
                        if self.hovered.as_deref() == Some(record.id.as_str()) {
                            let (live, source) = link_spans(*rect);
                            if live.contains(mouse.column, mouse.row) {
                                return Cmd::open_url(record.live_url);
                            }
                            if source.contains(mouse.column, mouse.row) {
                                return Cmd::open_url(record.github_url);
                            }
                        }
                        self.select(*index, catalog);
                        Cmd::msg(Msg::OpenModal(record))
                    }
                    _ => Cmd::none(),
                }
            }
            _ => Cmd::none(),
        }
    }

    fn reveal_more(&mut self, catalog: &mut CatalogStore) {
        if !catalog.can_load_more() {
            return;
        }
        let before = catalog.visible_count();
        catalog.load_more();
        self.stagger_in(before, catalog.visible_count());
    }

    fn open_link(
        &self,
        catalog: &CatalogStore,
        pick: impl Fn(&folio_core::ProjectRecord) -> String,
    ) -> Cmd<Msg> {
        match self.hovered.as_deref().and_then(|id| catalog.by_id(id)) {
            Some(record) => Cmd::open_url(pick(record)),
            None => Cmd::none(),
        }
    }

    /// Render into the content area.
    pub fn view(&self, frame: &mut Frame, area: Rect, catalog: &CatalogStore, theme: &Theme) {
        frame.draw_text(area.x + 1, area.y, "portfolio", theme.heading, area.right());
        let counter = format!("{} of {} shown", catalog.visible_count(), catalog.len());
        frame.draw_text(
            area.right().saturating_sub(counter.len() as u16 + 1),
            area.y,
            &counter,
            theme.muted,
            area.right(),
        );

        let shape = layout(area, catalog.visible_count(), catalog.can_load_more(), self.scroll);
        for (index, rect) in &shape.rows {
            let Some(record) = catalog.visible().get(*index) else {
                continue;
            };
            if !self.row_revealed(*index) {
                continue;
            }
            let hovered = self.hovered.as_deref() == Some(record.id.as_str());
            let selected = *index == self.selected;

            if selected {
                frame.draw_text(rect.x, rect.y, "▸", theme.heading, rect.right());
            }
            let number = format!("{:02}", index + 1);
            frame.draw_text(rect.x + 2, rect.y, &number, theme.muted, rect.right());
            let title_style = if hovered { theme.active } else { theme.heading };
            let after = frame.draw_text(rect.x + 5, rect.y, &record.title, title_style, rect.right());
            frame.draw_text(after + 2, rect.y, &record.category, theme.muted, rect.right());

            let detail_y = rect.y + 1;
            if hovered {
                let (live, source) = link_spans(*rect);
                frame.draw_text(live.x, detail_y, "[↗ demo]", theme.link, live.right());
                frame.draw_text(source.x, detail_y, "[⌂ source]", theme.link, source.right());
                draw_chips(
                    frame,
                    source.right() + 2,
                    detail_y,
                    &record.tech,
                    theme.chip,
                    rect.right(),
                );
            } else {
                frame.draw_text(rect.x + 5, detail_y, &record.description, theme.muted, rect.right());
            }
        }

        if let Some(button) = shape.load_more {
            frame.draw_text_centered(button, button.y, "[ Load More Projects ]", theme.active);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::MemoryStore;
    use folio_core::catalog::INITIAL_VISIBLE;
    use folio_runtime::event::{KeyEvent, KeyModifiers, MouseEvent};

    fn catalog() -> CatalogStore {
        CatalogStore::load(&MemoryStore::new())
    }

    fn area() -> Rect {
        Rect::new(0, 2, 80, 30)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn moved(column: u16, row: u16) -> Event {
        mouse(MouseEventKind::Moved, column, row)
    }

    fn click(column: u16, row: u16) -> Event {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    #[test]
    fn layout_places_visible_blocks_and_button() {
        let shape = layout(area(), INITIAL_VISIBLE, true, 0);
        assert_eq!(shape.rows.len(), INITIAL_VISIBLE);
        assert!(shape.load_more.is_some());
        // Blocks never overlap.
        for pair in shape.rows.windows(2) {
            assert!(pair[0].1.bottom() <= pair[1].1.y);
        }
    }

    #[test]
    fn layout_clips_blocks_to_area() {
        let small = Rect::new(0, 0, 80, 8);
        let shape = layout(small, INITIAL_VISIBLE, true, 0);
        assert!(shape.rows.len() < INITIAL_VISIBLE);
        assert!(shape.load_more.is_none());
    }

    #[test]
    fn pointer_motion_sets_single_hover_last_write_wins() {
        let mut cat = catalog();
        let mut screen = PortfolioScreen::new(cat.visible_count());
        let shape = layout(area(), cat.visible_count(), true, 0);

        let (_, first) = shape.rows[0];
        let (_, third) = shape.rows[2];
        screen.handle(&moved(first.x + 3, first.y), area(), &mut cat);
        assert_eq!(screen.hovered(), Some("1"));
        screen.handle(&moved(third.x + 3, third.y), area(), &mut cat);
        assert_eq!(screen.hovered(), Some("3"), "last write wins");

        // Leaving every block clears the hover.
        screen.handle(&moved(0, area().bottom() - 1), area(), &mut cat);
        assert_eq!(screen.hovered(), None);
    }

    #[test]
    fn keyboard_cursor_drives_same_hover() {
        let mut cat = catalog();
        let mut screen = PortfolioScreen::new(cat.visible_count());
        screen.handle(&key(KeyCode::Down), area(), &mut cat);
        assert_eq!(screen.hovered(), Some("2"));
        screen.handle(&key(KeyCode::Up), area(), &mut cat);
        assert_eq!(screen.hovered(), Some("1"));
        // Clamped at the ends.
        screen.handle(&key(KeyCode::Up), area(), &mut cat);
        assert_eq!(screen.hovered(), Some("1"));
    }

    #[test]
    fn enter_opens_overlay_for_selected() {
        let mut cat = catalog();
        let mut screen = PortfolioScreen::new(cat.visible_count());
        screen.handle(&key(KeyCode::Down), area(), &mut cat);
        let cmd = screen.handle(&key(KeyCode::Enter), area(), &mut cat);
        match cmd {
            Cmd::Msg(Msg::OpenModal(record)) => assert_eq!(record.id, "2"),
            other => panic!("expected OpenModal, got {other:?}"),
        }
    }

    #[test]
    fn row_click_opens_overlay() {
        let mut cat = catalog();
        let mut screen = PortfolioScreen::new(cat.visible_count());
        let shape = layout(area(), cat.visible_count(), true, 0);
        let (_, second) = shape.rows[1];
        let cmd = screen.handle(&click(second.x + 8, second.y), area(), &mut cat);
        assert!(matches!(cmd, Cmd::Msg(Msg::OpenModal(r)) if r.id == "2"));
    }

    #[test]
    fn hover_link_click_opens_url_not_overlay() {
        let mut cat = catalog();
        let mut screen = PortfolioScreen::new(cat.visible_count());
        let shape = layout(area(), cat.visible_count(), true, 0);
        let (_, first) = shape.rows[0];

        screen.handle(&moved(first.x + 3, first.y), area(), &mut cat);
        let (live, _) = link_spans(first);
        let cmd = screen.handle(&click(live.x + 1, live.y), area(), &mut cat);
        match cmd {
            Cmd::OpenUrl(url) => assert!(url.starts_with("https://")),
            other => panic!("inner link must not open the overlay: {other:?}"),
        }
    }

    #[test]
    fn load_more_click_reveals_rest_and_hides_button() {
        let mut cat = catalog();
        let mut screen = PortfolioScreen::new(cat.visible_count());
        let shape = layout(area(), cat.visible_count(), true, 0);
        let button = shape.load_more.unwrap();

        screen.handle(&click(button.x + 10, button.y), area(), &mut cat);
        assert_eq!(cat.visible_count(), 8);
        assert!(!cat.can_load_more());

        let after = layout(area(), cat.visible_count(), cat.can_load_more(), 0);
        assert!(after.load_more.is_none(), "affordance gone at full cursor");
        assert_eq!(after.rows.len(), 8);
    }

    #[test]
    fn load_more_key_is_idempotent_at_full() {
        let mut cat = catalog();
        let mut screen = PortfolioScreen::new(cat.visible_count());
        screen.handle(&key(KeyCode::Char('m')), area(), &mut cat);
        screen.handle(&key(KeyCode::Char('m')), area(), &mut cat);
        assert_eq!(cat.visible_count(), 8);
    }

    #[test]
    fn keyboard_link_requires_hover() {
        let mut cat = catalog();
        let mut screen = PortfolioScreen::new(cat.visible_count());
        screen.hovered = None;
        assert!(matches!(
            screen.handle(&key(KeyCode::Char('o')), area(), &mut cat),
            Cmd::None
        ));
        screen.handle(&key(KeyCode::Down), area(), &mut cat);
        assert!(matches!(
            screen.handle(&key(KeyCode::Char('o')), area(), &mut cat),
            Cmd::OpenUrl(_)
        ));
    }

    #[test]
    fn view_shows_rows_and_counter() {
        let cat = catalog();
        let mut screen = PortfolioScreen::new(cat.visible_count());
        screen.tick(Duration::from_secs(3));
        let theme = Theme::mono();
        let mut frame = Frame::new(80, 32);
        screen.view(&mut frame, area(), &cat, &theme);
        let text: String = (0..32).map(|y| frame.row_text(y) + "\n").collect();
        assert!(text.contains("portfolio"));
        assert!(text.contains("6 of 8 shown"));
        assert!(text.contains("E-commerce Platform"));
        assert!(text.contains("Load More Projects"));
    }

    #[test]
    fn selection_scrolls_into_view() {
        let mut cat = catalog();
        cat.load_more();
        let small = Rect::new(0, 0, 80, 12);
        let mut screen = PortfolioScreen::new(cat.visible_count());
        for _ in 0..7 {
            screen.handle(&key(KeyCode::Down), small, &mut cat);
        }
        assert_eq!(screen.selected, 7);
        let shape = layout(small, cat.visible_count(), false, screen.scroll);
        assert!(shape.rows.iter().any(|(i, _)| *i == 7), "selected row visible");
    }
}
