use std::collections::BTreeMap;

use validator::ValidationErrors;

/// Messages per form field, ready to be shown next to the inputs.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("Invalid {field}"),
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }
        FieldErrors(fields)
    }
}

/// Whitespace-only input counts as empty. Anything else is kept as typed.
pub fn blank_as_empty(value: &str) -> &str {
    if value.trim().is_empty() { "" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_blank_input_is_emptied() {
        assert_eq!(blank_as_empty(" \n\t "), "");
        assert_eq!(blank_as_empty("  indented\n"), "  indented\n");
    }
}
