#![forbid(unsafe_code)]

//! The contact screen.
//!
//! Four required fields and a send action. Submission validates that every
//! field is non-empty (refusing focuses the first empty field), opens the
//! composed messaging URL externally, and clears the form after a short
//! cosmetic delay — whether or not the navigation landed.

use std::time::Duration;

use folio_core::ContactForm;
use folio_core::composer::Field;
use folio_runtime::event::{Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use folio_runtime::{Cmd, Frame, Rect};

use crate::app::Msg;
use crate::theme::Theme;
use crate::widgets::TextInput;

/// Cosmetic delay between submitting and the field reset.
pub const RESET_DELAY: Duration = Duration::from_millis(300);

/// Focus slots: the four fields then the send button.
const SEND_SLOT: usize = Field::ALL.len();

/// Computed form geometry.
#[derive(Debug, Clone)]
pub struct FormLayout {
    pub fields: [Rect; 4],
    pub send: Rect,
    pub info: Option<Rect>,
}

/// Pure layout shared by drawing and hit-testing.
#[must_use]
pub fn form_layout(area: Rect) -> FormLayout {
    let (info, form) = if area.width >= 84 {
        let info = Rect::new(area.x + 1, area.y + 2, 38, area.height.saturating_sub(2));
        let form_x = area.x + 42;
        let form = Rect::new(form_x, area.y + 2, area.right().saturating_sub(form_x + 1), area.height);
        (Some(info), form)
    } else {
        (None, Rect::new(area.x + 1, area.y + 2, area.width.saturating_sub(2), area.height))
    };

    let heights = [4u16, 4, 4, 6];
    let mut y = form.y;
    let mut fields = [Rect::default(); 4];
    for (slot, h) in heights.into_iter().enumerate() {
        fields[slot] = Rect::new(form.x, y, form.width, h);
        y += h;
    }
    let send = Rect::new(form.x, y + 1, form.width, 1);
    FormLayout { fields, send, info }
}

/// The contact screen.
#[derive(Debug, Clone)]
pub struct ContactScreen {
    form: ContactForm,
    focus: usize,
}

impl ContactScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: ContactForm::new(),
            focus: 0,
        }
    }

    /// Current form state (tests, status line).
    #[must_use]
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Clear every field and return focus to the top.
    pub fn reset(&mut self) {
        self.form.reset();
        self.focus = 0;
    }

    fn focused_field(&self) -> Option<Field> {
        Field::ALL.get(self.focus).copied()
    }

    fn submit(&mut self) -> Cmd<Msg> {
        if let Some(empty) = self.form.first_empty() {
            // The closest thing to the browser's required-field prompt:
            // refuse and put the cursor where input is missing.
            self.focus = Field::ALL.iter().position(|f| *f == empty).unwrap_or(0);
            tracing::debug!(field = empty.label(), "submission refused, field required");
            return Cmd::none();
        }
        let url = self.form.outreach_url();
        tracing::debug!(%url, "contact hand-off composed");
        Cmd::batch(vec![
            Cmd::open_url(url.as_str()),
            Cmd::tick(RESET_DELAY, || Msg::ResetContactForm),
        ])
    }

    /// Handle an input routed to this screen.
    pub fn handle(&mut self, event: &Event, area: Rect) -> Cmd<Msg> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Tab => {
                    self.focus = (self.focus + 1) % (SEND_SLOT + 1);
                    Cmd::none()
                }
                KeyCode::BackTab => {
                    self.focus = (self.focus + SEND_SLOT) % (SEND_SLOT + 1);
                    Cmd::none()
                }
                KeyCode::Enter => match self.focused_field() {
                    Some(Field::Message) => {
                        self.form.value_mut(Field::Message).push('\n');
                        Cmd::none()
                    }
                    Some(_) => {
                        self.focus += 1;
                        Cmd::none()
                    }
                    None => self.submit(),
                },
                KeyCode::Backspace => {
                    if let Some(field) = self.focused_field() {
                        self.form.value_mut(field).pop();
                    }
                    Cmd::none()
                }
                KeyCode::Char(c)
                    if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    if let Some(field) = self.focused_field() {
                        self.form.value_mut(field).push(c);
                    }
                    Cmd::none()
                }
                _ => Cmd::none(),
            },
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
                let shape = form_layout(area);
                if shape.send.contains(mouse.column, mouse.row) {
                    self.focus = SEND_SLOT;
                    return self.submit();
                }
                for (slot, rect) in shape.fields.iter().enumerate() {
                    if rect.contains(mouse.column, mouse.row) {
                        self.focus = slot;
                        break;
                    }
                }
                Cmd::none()
            }
            Event::Paste(text) => {
                if let Some(field) = self.focused_field() {
                    self.form.value_mut(field).push_str(text);
                }
                Cmd::none()
            }
            _ => Cmd::none(),
        }
    }

    /// Render into the content area.
    pub fn view(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.draw_text(area.x + 1, area.y, "contact", theme.heading, area.right());

        let shape = form_layout(area);
        if let Some(info) = shape.info {
            let clip = info.right();
            let mut y = info.y;
            frame.draw_text(info.x, y, "Let's work together", theme.heading, clip);
            y += 2;
            frame.draw_text(info.x, y, "Always interested in new projects and", theme.muted, clip);
            frame.draw_text(info.x, y + 1, "collaborations — reach out via WhatsApp.", theme.muted, clip);
            y += 3;
            for (label, value) in [
                ("Phone / WhatsApp", "+91 7501411769"),
                ("Email", "akarajuhalder@gmail.com"),
                ("Instagram", "@aka_director"),
                ("GitHub", "github.com/akasaam"),
            ] {
                if y + 1 >= info.bottom() {
                    break;
                }
                frame.draw_text(info.x, y, label, theme.text, clip);
                frame.draw_text(info.x, y + 1, value, theme.muted, clip);
                y += 3;
            }
        }

        for (slot, field) in Field::ALL.into_iter().enumerate() {
            TextInput::new(field.label(), self.form.value(field))
                .placeholder(field.placeholder())
                .focused(self.focus == slot)
                .multiline(field == Field::Message)
                .label_style(theme.text)
                .text_style(theme.text)
                .placeholder_style(theme.inactive)
                .border_style(theme.border)
                .render(shape.fields[slot], frame);
        }

        let send_style = if self.focus == SEND_SLOT { theme.active } else { theme.link };
        frame.draw_text_centered(shape.send, shape.send.y, "[ Send via WhatsApp ]", send_style);
    }
}

impl Default for ContactScreen {
    fn default() -> Self {
        Self::new()
    }
}
