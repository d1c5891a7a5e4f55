#![forbid(unsafe_code)]

//! Contact form state and the outbound message hand-off.
//!
//! The composer gathers four free-text fields, validates that all are
//! non-empty, and deterministically renders them into a single text payload
//! that is percent-encoded onto a fixed messaging URL. Submission is
//! terminal: nothing is persisted, nothing is retried, and the fields reset
//! afterwards regardless of whether the navigation actually landed.

use url::Url;

/// Messaging service base.
pub const SERVICE_BASE: &str = "https://wa.me";

/// Fixed destination identifier (number without `+` or spaces).
pub const DESTINATION: &str = "917501411769";

/// The four form fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    /// Fields in display/focus order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    /// Placeholder text shown while the field is empty.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Your full name",
            Field::Email => "your.email@example.com",
            Field::Subject => "Project inquiry",
            Field::Message => "Tell me about your project...",
        }
    }
}

/// Mutable state of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// New empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a field's current value.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Mutable access for per-keystroke edits.
    pub fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    /// First field that fails the required check, if any.
    ///
    /// Whitespace-only input counts as empty.
    #[must_use]
    pub fn first_empty(&self) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|f| self.value(*f).trim().is_empty())
    }

    /// Whether submission is allowed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Render the fixed outbound template.
    #[must_use]
    pub fn compose_message(&self) -> String {
        format!(
            "Hello! I'm {name}\n\n\
             Subject: {subject}\n\n\
             {message}\n\n\
             Contact Details:\n\
             Email: {email}\n\n\
             Best regards,\n\
             {name}",
            name = self.name,
            subject = self.subject,
            message = self.message,
            email = self.email,
        )
    }

    /// Build the outbound messaging URL with the encoded payload.
    #[must_use]
    pub fn outreach_url(&self) -> Url {
        let mut url = Url::parse(SERVICE_BASE).expect("static service base is a valid URL");
        // Url::parse normalizes the path; set the destination segment explicitly.
        url.set_path(DESTINATION);
        url.query_pairs_mut()
            .append_pair("text", &self.compose_message());
        url
    }

    /// Clear all fields after a submission.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> ContactForm {
        ContactForm {
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            subject: "Hi".to_string(),
            message: "Test".to_string(),
        }
    }

    #[test]
    fn template_is_exact() {
        let expected = "Hello! I'm Ana\n\n\
                        Subject: Hi\n\n\
                        Test\n\n\
                        Contact Details:\n\
                        Email: ana@x.com\n\n\
                        Best regards,\n\
                        Ana";
        assert_eq!(ana().compose_message(), expected);
    }

    #[test]
    fn url_targets_fixed_destination() {
        let url = ana().outreach_url();
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/917501411769");
    }

    #[test]
    fn decoded_payload_round_trips() {
        let form = ana();
        let url = form.outreach_url();
        let (key, text) = url.query_pairs().next().expect("text param present");
        assert_eq!(key, "text");
        assert_eq!(text, form.compose_message());
    }

    #[test]
    fn payload_is_encoded_in_raw_query() {
        let url = ana().outreach_url();
        let raw = url.query().expect("query present");
        assert!(!raw.contains('\n'), "newlines must be encoded: {raw}");
        assert!(raw.starts_with("text="));
    }

    #[test]
    fn empty_fields_block_submission_in_order() {
        let mut form = ContactForm::new();
        assert_eq!(form.first_empty(), Some(Field::Name));
        form.name = "Ana".into();
        assert_eq!(form.first_empty(), Some(Field::Email));
        form.email = "ana@x.com".into();
        form.subject = "Hi".into();
        assert_eq!(form.first_empty(), Some(Field::Message));
        form.message = "Test".into();
        assert!(form.is_complete());
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut form = ana();
        form.subject = "   ".into();
        assert_eq!(form.first_empty(), Some(Field::Subject));
        assert!(!form.is_complete());
    }

    #[test]
    fn reset_clears_every_field() {
        let mut form = ana();
        form.reset();
        for field in Field::ALL {
            assert_eq!(form.value(field), "");
        }
    }

    #[test]
    fn value_mut_edits_land_in_payload() {
        let mut form = ana();
        form.value_mut(Field::Subject).push_str(" there");
        assert!(form.compose_message().contains("Subject: Hi there"));
    }
}
