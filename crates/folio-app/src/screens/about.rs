#![forbid(unsafe_code)]

//! The about screen. Static biography, skills, and contact details.

use folio_runtime::{Frame, Rect};

use crate::theme::Theme;

const SKILLS: [(&str, &str); 4] = [
    ("Frontend", "React, Next.js, Vue, Tailwind CSS, GSAP"),
    ("Backend", "Node.js, Express, MongoDB, PostgreSQL"),
    ("Design", "Figma, Adobe XD, Photoshop"),
    ("Other", "AWS, Docker, CI/CD, Git"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct AboutScreen;

impl AboutScreen {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let x = area.x + 1;
        let clip = area.right();
        let mut y = area.y + 1;

        frame.draw_text(x, y, "about.about.about", theme.heading, clip);
        y += 2;

        frame.draw_text(x, y, "Creative Developer", theme.heading, clip);
        y += 1;
        frame.draw_text(
            x,
            y,
            "Hi, I'm Raju Halder, a passionate web developer with over 5 years of",
            theme.muted,
            clip,
        );
        frame.draw_text(
            x,
            y + 1,
            "experience creating immersive digital experiences that blend technical",
            theme.muted,
            clip,
        );
        frame.draw_text(x, y + 2, "excellence with creative vision.", theme.muted, clip);
        y += 4;

        for (label, items) in SKILLS {
            if y >= area.bottom() {
                break;
            }
            frame.draw_text(x, y, label, theme.text, clip);
            frame.draw_text(x + 11, y, items, theme.muted, clip);
            y += 1;
        }
        y += 1;

        if y + 2 < area.bottom() {
            frame.draw_text(x, y, "Contact Information", theme.heading, clip);
            frame.draw_text(x, y + 1, "RAJU HALDER • Web Developer", theme.muted, clip);
            frame.draw_text(
                x,
                y + 2,
                "+91 7501411769 • akarajuhalder@gmail.com",
                theme.muted,
                clip,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_bio_and_skills() {
        let theme = Theme::mono();
        let mut frame = Frame::new(90, 24);
        AboutScreen::new().view(&mut frame, Rect::new(0, 0, 90, 24), &theme);
        let text: String = (0..24).map(|y| frame.row_text(y) + "\n").collect();
        assert!(text.contains("Creative Developer"));
        assert!(text.contains("Frontend"));
        assert!(text.contains("akarajuhalder@gmail.com"));
    }
}
