//! Checks applied to a review before it is submitted.

use cinesearch_models::NewReview;
use serde::Serialize;
use thiserror::Error;

pub const RATING_REQUIRED: &str = "Rating is required (1-5 stars)";
pub const TEXT_REQUIRED: &str = "Review text is required";
pub const IDENTITY_REQUIRED: &str = "Name or email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewField {
    Rating,
    Text,
    /// Name and email together
    Identity,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: ReviewField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", joined(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

fn joined(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.message).collect::<Vec<_>>().join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn message_for(&self, field: ReviewField) -> Option<&'static str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

/// `local@domain.tld` with no whitespace and a single `@`
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Validate a draft, returning a trimmed copy ready to submit
pub fn validate_review(review: &NewReview) -> Result<NewReview, ValidationErrors> {
    let text = review.text.trim();
    let name = review.name.trim();
    let email = review.email.trim();
    let mut errors = Vec::new();

    if !(1..=5).contains(&review.rating) {
        errors.push(FieldError {
            field: ReviewField::Rating,
            message: RATING_REQUIRED,
        });
    }
    if text.is_empty() {
        errors.push(FieldError {
            field: ReviewField::Text,
            message: TEXT_REQUIRED,
        });
    }
    if name.is_empty() && email.is_empty() {
        errors.push(FieldError {
            field: ReviewField::Identity,
            message: IDENTITY_REQUIRED,
        });
    }
    if !email.is_empty() && !is_valid_email(email) {
        errors.push(FieldError {
            field: ReviewField::Email,
            message: EMAIL_INVALID,
        });
    }

    if !errors.is_empty() {
        return Err(ValidationErrors { errors });
    }

    Ok(NewReview {
        rating: review.rating,
        text: text.to_string(),
        name: name.to_string(),
        email: email.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(rating: u8, text: &str, name: &str, email: &str) -> NewReview {
        NewReview {
            rating,
            text: text.to_string(),
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_valid_review_is_trimmed() {
        let review = validate_review(&draft(5, "  great  ", " A ", "")).unwrap();
        assert_eq!(review.text, "great");
        assert_eq!(review.name, "A");
    }

    #[test]
    fn test_every_rule_reported() {
        let err = validate_review(&draft(0, "   ", "", "")).unwrap_err();
        assert_eq!(err.errors().len(), 3);
        assert_eq!(err.message_for(ReviewField::Rating), Some(RATING_REQUIRED));
        assert_eq!(err.message_for(ReviewField::Text), Some(TEXT_REQUIRED));
        assert_eq!(err.message_for(ReviewField::Identity), Some(IDENTITY_REQUIRED));
        assert!(err.to_string().contains("Review text is required"));
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_review(&draft(6, "ok", "A", "")).is_err());
        assert!(validate_review(&draft(1, "ok", "A", "")).is_ok());
    }

    #[test]
    fn test_email_alone_is_enough_identity() {
        assert!(validate_review(&draft(3, "ok", "", "a@b.io")).is_ok());
    }

    #[test]
    fn test_email_shape() {
        for bad in ["plain", "a@b", "@b.io", "a@.io", "a@b.", "a b@c.io", "a@b@c.io"] {
            let err = validate_review(&draft(3, "ok", "A", bad)).unwrap_err();
            assert_eq!(err.message_for(ReviewField::Email), Some(EMAIL_INVALID), "{}", bad);
        }
        assert!(validate_review(&draft(3, "ok", "A", "neo@zion.example.org")).is_ok());
    }
}
