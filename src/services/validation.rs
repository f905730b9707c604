//! Form validation and sanitization.
//!
//! Every mutating form goes through the same chain: trim each string field,
//! check the `validator` rules declared on the form struct, then escape the
//! accepted values for markup before they become a draft. All fields are
//! checked; each field reports the first rule it breaks.

use chrono::NaiveDate;
use serde::Serialize;
use validator::{Validate, ValidationError};

use crate::domain::BookStatus;

/// One violated rule, as shown next to the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Replace markup-significant characters with HTML entities
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Run the declared rules and list violations in form order
pub fn violations<T: Validate>(input: &T, field_order: &[&str]) -> Vec<FieldError> {
    let Err(errors) = input.validate() else {
        return Vec::new();
    };
    let by_field = errors.field_errors();

    field_order
        .iter()
        .filter_map(|field| {
            let first = by_field.get(*field)?.first()?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid {}", field));
            Some(FieldError::new(*field, message))
        })
        .collect()
}

/// `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn parse_id(value: &str) -> Option<i32> {
    value.parse::<i32>().ok().filter(|id| *id > 0)
}

pub fn alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(char::is_alphanumeric) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

/// Empty is allowed; anything else must be an ISO date
pub fn optional_iso_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_date(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("iso_date"))
    }
}

pub fn reference_id(value: &str) -> Result<(), ValidationError> {
    match parse_id(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("reference")),
    }
}

pub fn reference_ids(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|v| parse_id(v).is_some()) {
        Ok(())
    } else {
        Err(ValidationError::new("reference"))
    }
}

/// Empty falls back to the default status
pub fn book_status(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<BookStatus>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("status"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name required"))]
        name: String,
        #[validate(
            length(min = 1, message = "Code required"),
            custom(function = "alphanumeric", message = "Code must be alphanumeric")
        )]
        code: String,
        #[validate(custom(function = "optional_iso_date", message = "Bad date"))]
        date: String,
    }

    #[test]
    fn test_escape_replaces_markup_characters() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;&#x2F;b&gt;"
        );
        assert_eq!(escape("Fantasy"), "Fantasy");
    }

    #[test]
    fn test_trim_strips_both_ends() {
        assert_eq!(trim("  Fantasy \n"), "Fantasy");
    }

    #[test]
    fn test_violations_collects_every_field_in_order() {
        let sample = Sample {
            name: String::new(),
            code: "a b".to_string(),
            date: "17/10/2026".to_string(),
        };
        let errors = violations(&sample, &["name", "code", "date"]);
        assert_eq!(
            errors,
            vec![
                FieldError::new("name", "Name required"),
                FieldError::new("code", "Code must be alphanumeric"),
                FieldError::new("date", "Bad date"),
            ]
        );
    }

    #[test]
    fn test_violations_reports_first_rule_per_field() {
        let sample = Sample {
            name: "ok".to_string(),
            code: String::new(),
            date: String::new(),
        };
        let errors = violations(&sample, &["name", "code", "date"]);
        assert_eq!(errors, vec![FieldError::new("code", "Code required")]);
    }

    #[test]
    fn test_valid_input_has_no_violations() {
        let sample = Sample {
            name: "ok".to_string(),
            code: "abc123".to_string(),
            date: "2026-10-17".to_string(),
        };
        assert!(violations(&sample, &["name", "code", "date"]).is_empty());
    }

    #[test]
    fn test_reference_and_status_rules() {
        assert!(reference_id("12").is_ok());
        assert!(reference_id("").is_err());
        assert!(reference_id("-1").is_err());
        assert!(reference_ids(&["1".to_string(), "2".to_string()]).is_ok());
        assert!(reference_ids(&["x".to_string()]).is_err());
        assert!(book_status("Loaned").is_ok());
        assert!(book_status("").is_ok());
        assert!(book_status("Lost").is_err());
    }
}
