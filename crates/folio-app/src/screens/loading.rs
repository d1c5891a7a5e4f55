#![forbid(unsafe_code)]

//! The first-visit loading view.
//!
//! Owns only visuals: a staged entrance (brand, headline, bar, dots, footer
//! fade in on their original delays) and a bar display that eases toward the
//! walk's value instead of stepping. Phase logic lives in
//! [`folio_core::visit::LoadSequence`]; the app feeds this view progress
//! values and animation ticks.

use std::time::Duration;

use folio_runtime::animation::ease_out;
use folio_runtime::{Frame, Timeline, Transition};

use crate::theme::Theme;
use crate::widgets::ProgressBar;

const LOGO: &str = "logo";
const HEADLINE: &str = "headline";
const BAR_WRAP: &str = "bar-wrap";
const DOTS: &str = "dots";
const FOOTER: &str = "footer";
const BAR: &str = "bar";

const ENTRANCE: Duration = Duration::from_millis(600);
const BAR_CHASE: Duration = Duration::from_millis(300);

/// Visual state for the loading view.
#[derive(Debug, Clone)]
pub struct LoadingScreen {
    timeline: Timeline,
    elapsed: Duration,
}

impl LoadingScreen {
    /// Start the staged entrance.
    #[must_use]
    pub fn new() -> Self {
        let stage = |target, delay_ms| {
            Transition::new(target, 0.0, 1.0, ENTRANCE)
                .delay(Duration::from_millis(delay_ms))
                .easing(ease_out)
        };
        Self {
            timeline: Timeline::with_transitions([
                stage(LOGO, 200),
                stage(HEADLINE, 400),
                stage(BAR_WRAP, 600),
                stage(DOTS, 800),
                stage(FOOTER, 1000),
            ]),
            elapsed: Duration::ZERO,
        }
    }

    /// Ease the displayed bar toward a new walk value.
    pub fn chase(&mut self, value: f32) {
        let from = self.timeline.value_or(BAR, 0.0);
        self.timeline
            .push(Transition::new(BAR, from, value, BAR_CHASE).easing(ease_out));
    }

    /// Advance all transitions.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.timeline.tick(dt);
    }

    /// Whether anything is still moving (the bar chase counts).
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.timeline.is_idle()
    }

    /// The eased bar value currently displayed.
    #[must_use]
    pub fn displayed(&self) -> f32 {
        self.timeline.value_or(BAR, 0.0)
    }

    fn reveal(&self, target: &str) -> Reveal {
        let v = self.timeline.value_or(target, 1.0);
        if v < 0.2 {
            Reveal::Hidden
        } else if v < 0.85 {
            Reveal::Faint
        } else {
            Reveal::Full
        }
    }

    /// Render over the whole frame. `progress` is the walk's actual value;
    /// the readout rounds it while the bar shows the eased chase.
    pub fn view(&self, frame: &mut Frame, theme: &Theme, progress: f32) {
        let area = frame.area();
        frame.fill(area, ' ', theme.text);

        let mid = area.height / 2;
        let column = area.centered(area.width.min(52), area.height);

        match self.reveal(LOGO) {
            Reveal::Hidden => {}
            faded => {
                let style = faded.pick(theme.heading, theme.muted);
                frame.draw_text_centered(area, mid.saturating_sub(6), "▪▪ RAJU HALDER", style);
            }
        }

        match self.reveal(HEADLINE) {
            Reveal::Hidden => {}
            faded => {
                let strong = faded.pick(theme.heading, theme.muted);
                frame.draw_text_centered(area, mid.saturating_sub(4), "Crafting Digital", strong);
                frame.draw_text_centered(area, mid.saturating_sub(3), "Experiences", strong);
                frame.draw_text_centered(
                    area,
                    mid.saturating_sub(1),
                    "Loading portfolio of innovative web solutions",
                    theme.muted,
                );
            }
        }

        if self.reveal(BAR_WRAP) != Reveal::Hidden {
            let y = mid + 1;
            frame.draw_text(column.x, y, "Loading", theme.muted, column.right());
            let pct = format!("{}%", progress.round() as u16);
            frame.draw_text(
                column.right().saturating_sub(pct.len() as u16),
                y,
                &pct,
                theme.muted,
                column.right(),
            );
            ProgressBar::new()
                .ratio(self.displayed() / 100.0)
                .fill_style(theme.bar_fill)
                .trough_style(theme.bar_empty)
                .render(folio_runtime::Rect::new(column.x, y + 1, column.width, 1), frame);
        }

        if self.reveal(DOTS) != Reveal::Hidden {
            // Three dots pulsing in turn, 300ms apart.
            let lit = (self.elapsed.as_millis() / 300) % 3;
            let mut dots = String::new();
            for i in 0..3 {
                dots.push(if i == lit { '●' } else { '○' });
                dots.push(' ');
            }
            frame.draw_text_centered(area, mid + 3, dots.trim_end(), theme.muted);
        }

        if self.reveal(FOOTER) != Reveal::Hidden {
            frame.draw_text_centered(
                area,
                area.height.saturating_sub(2),
                "Web Developer • UI/UX Designer • Creative Technologist",
                theme.inactive,
            );
        }
    }
}

impl Default for LoadingScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reveal {
    Hidden,
    Faint,
    Full,
}

impl Reveal {
    fn pick(self, full: folio_runtime::Style, faint: folio_runtime::Style) -> folio_runtime::Style {
        match self {
            Reveal::Faint => faint,
            _ => full,
        }
    }
}
