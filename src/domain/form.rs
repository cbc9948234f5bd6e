//! Article form input
//!
//! The two free-text fields the user edits before asking for a prediction.
//! Fields are stored verbatim; only submission looks at their trimmed form.

/// Title and body of the article being checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub title: String,
    pub body: String,
}

impl FormInput {
    /// Creates a form input from owned or borrowed strings
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Returns true when there is something worth sending
    ///
    /// A form is submittable when at least one of the fields contains a
    /// non-whitespace character.
    pub fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty() || !self.body.trim().is_empty()
    }

    /// Returns true when both fields are exactly empty
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }

    /// Resets both fields to empty strings
    pub fn reset(&mut self) {
        self.title.clear();
        self.body.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_input_is_empty() {
        let input = FormInput::default();
        assert!(input.is_empty());
        assert!(!input.is_submittable());
    }

    #[test]
    fn whitespace_only_is_not_submittable() {
        let input = FormInput::new("   ", "\n\t ");
        assert!(!input.is_empty());
        assert!(!input.is_submittable());
    }

    #[test]
    fn either_field_makes_it_submittable() {
        assert!(FormInput::new("Test", "").is_submittable());
        assert!(FormInput::new("", "Some body").is_submittable());
        assert!(FormInput::new("  x ", "   ").is_submittable());
    }

    #[test]
    fn fields_are_kept_verbatim() {
        let input = FormInput::new("  padded title  ", "body\n");
        assert_eq!(input.title, "  padded title  ");
        assert_eq!(input.body, "body\n");
    }

    #[test]
    fn reset_clears_both_fields() {
        let mut input = FormInput::new("a", "b");
        input.reset();
        assert!(input.is_empty());
    }
}
