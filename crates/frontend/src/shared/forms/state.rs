use crate::shared::api::ApiError;
use contracts::shared::server_errors::ServerErrors;
use std::collections::BTreeMap;

/// Errors and progress of an open form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormModalState {
    pub field_errors: BTreeMap<String, Vec<String>>,
    pub non_field_errors: Vec<String>,
    pub submitting: bool,
}

impl FormModalState {
    pub fn start_submit(&mut self) {
        self.field_errors.clear();
        self.non_field_errors.clear();
        self.submitting = true;
    }

    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty() || !self.non_field_errors.is_empty()
    }

    pub fn field(&self, name: &str) -> Vec<String> {
        self.field_errors.get(name).cloned().unwrap_or_default()
    }

    /// Client-side validation failures
    pub fn apply_local_errors(&mut self, errors: Vec<(&'static str, String)>) {
        self.submitting = false;
        for (name, message) in errors {
            self.field_errors.entry(name.to_string()).or_default().push(message);
        }
    }

    /// Maps a server error body onto the form. Messages for fields the form
    /// does not show are listed with the form-level errors.
    pub fn apply_server_errors(&mut self, errors: &ServerErrors, known_fields: &[&str]) {
        self.submitting = false;
        self.non_field_errors.extend(errors.non_field.iter().cloned());
        for (name, messages) in &errors.fields {
            if known_fields.contains(&name.as_str()) {
                self.field_errors
                    .entry(name.clone())
                    .or_default()
                    .extend(messages.iter().cloned());
            } else {
                self.non_field_errors
                    .extend(messages.iter().map(|m| format!("{}: {}", name, m)));
            }
        }
        if !self.has_errors() {
            self.non_field_errors.push("The server rejected the request".to_string());
        }
    }

    pub fn apply_error(&mut self, error: &ApiError, known_fields: &[&str]) {
        match error.server_errors() {
            Some(errors) => self.apply_server_errors(errors, known_fields),
            None => {
                self.submitting = false;
                self.non_field_errors.push(error.to_string());
            }
        }
    }

    pub fn finish(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_map_to_fields_and_form() {
        let mut state = FormModalState::default();
        state.start_submit();
        let errors = ServerErrors::parse(
            r#"{"name": ["Name must be unique"], "owner": ["Invalid"], "non_field_errors": ["Cannot move"]}"#,
        );
        state.apply_server_errors(&errors, &["name", "parent"]);

        assert!(!state.submitting);
        assert_eq!(state.field("name"), vec!["Name must be unique".to_string()]);
        assert!(state.field("parent").is_empty());
        assert_eq!(
            state.non_field_errors,
            vec!["Cannot move".to_string(), "owner: Invalid".to_string()]
        );
    }

    #[test]
    fn test_empty_error_body_still_reports() {
        let mut state = FormModalState::default();
        state.start_submit();
        state.apply_error(
            &ApiError::Http {
                status: 400,
                errors: ServerErrors::default(),
            },
            &["name"],
        );
        assert_eq!(state.non_field_errors.len(), 1);
    }

    #[test]
    fn test_network_error_is_form_level() {
        let mut state = FormModalState::default();
        state.start_submit();
        state.apply_error(&ApiError::Network("offline".into()), &["name"]);
        assert_eq!(state.non_field_errors, vec!["Network error: offline".to_string()]);

        state.start_submit();
        assert!(!state.has_errors());
        assert!(state.submitting);
    }
}
