use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{ApiError, FieldErrors};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Rejects empty and whitespace-only text.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

pub fn password_rule(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    if value.chars().count() < MIN_PASSWORD_LEN {
        let mut error = ValidationError::new("length");
        error.add_param(Cow::from("min"), &MIN_PASSWORD_LEN);
        return Err(error);
    }
    Ok(())
}

/// Profile updates: a blank password means "unchanged".
pub fn optional_password(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Ok(())
    } else {
        password_rule(value)
    }
}

/// Run the derived rules and report every failing field at once.
pub fn check<T: Validate>(request: &T, message: &str) -> Result<(), ApiError> {
    request
        .validate()
        .map_err(|errors| ApiError::validation_error(message, Some(field_errors(&errors))))
}

/// One message per field, keyed by the field's wire name.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, errs)| {
            let error = errs.first()?;
            let field = wire_name(field);
            let message = describe(&field, error);
            Some((field, message))
        })
        .collect()
}

fn wire_name(field: &str) -> String {
    if field == "item_type" {
        return "type".to_string();
    }

    let mut name = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            name.extend(c.to_uppercase());
            upper = false;
        } else {
            name.push(c);
        }
    }
    name
}

/// `startTime` -> `Start time`
fn label(field: &str) -> String {
    let mut label = String::with_capacity(field.len() + 2);
    for (i, c) in field.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            label.push(' ');
            label.extend(c.to_lowercase());
        } else {
            label.push(c);
        }
    }
    label
}

fn describe(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let label = label(field);
    match &*error.code {
        "required" | "blank" => format!("{} is mandatory", label),
        "email" => format!("{} must be a well-formed email address", label),
        "length" => match (error.params.get("min"), error.params.get("max")) {
            (Some(min), _) => format!("{} must be at least {} characters", label, min),
            (None, Some(max)) => format!("{} must be at most {} characters", label, max),
            (None, None) => format!("{} has an invalid length", label),
        },
        _ => format!("{} is invalid", label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "not_blank"), length(max = 5))]
        title: String,
        #[validate(custom(function = "not_blank"), email)]
        contact_email: String,
        #[validate(custom(function = "password_rule"))]
        password: String,
    }

    fn sample(title: &str, contact_email: &str, password: &str) -> Sample {
        Sample {
            title: title.into(),
            contact_email: contact_email.into(),
            password: password.into(),
        }
    }

    fn errors_of(sample: &Sample) -> FieldErrors {
        match sample.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => field_errors(&e),
        }
    }

    #[test]
    fn valid_sample_passes() {
        assert!(errors_of(&sample("ok", "alice@example.com", "secret1")).is_empty());
    }

    #[test]
    fn messages_use_wire_names_and_labels() {
        let errors = errors_of(&sample("   ", "nope", "123"));
        assert_eq!(errors["title"], "Title is mandatory");
        assert_eq!(errors["contactEmail"], "Contact email must be a well-formed email address");
        assert_eq!(errors["password"], "Password must be at least 6 characters");

        let errors = errors_of(&sample("toolong", "alice@example.com", "secret1"));
        assert_eq!(errors["title"], "Title must be at most 5 characters");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(errors_of(&sample("żółć", "alice@example.com", "secret1")).is_empty());
    }

    #[test]
    fn email_shape() {
        for bad in ["alice", "@example.com", "alice@", "al ice@example.com", "a@b@c"] {
            let errors = errors_of(&sample("ok", bad, "secret1"));
            assert!(errors.contains_key("contactEmail"), "accepted {bad}");
        }
    }

    #[test]
    fn blank_password_is_mandatory_but_optional_on_update() {
        let errors = errors_of(&sample("ok", "alice@example.com", "      "));
        assert_eq!(errors["password"], "Password is mandatory");

        assert!(optional_password("   ").is_ok());
        assert!(optional_password("abc").is_err());
        assert!(optional_password("secret1").is_ok());
    }

    #[test]
    fn wire_names() {
        assert_eq!(wire_name("first_name"), "firstName");
        assert_eq!(wire_name("item_type"), "type");
        assert_eq!(wire_name("startTime"), "startTime");
        assert_eq!(label("endTime"), "End time");
    }
}
