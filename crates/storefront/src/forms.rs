use std::ops::RangeInclusive;

use shared::error::{FieldError, ValidationErrors, Violation};

pub const SIGNUP_NAME_MIN_CHARS: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct LoginForm<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl LoginForm<'_> {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut report = Report::default();
        report.check("email", email_violation(self.email));
        report.check("password", required_violation(self.password));
        report.finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SignupForm<'a> {
    pub email: &'a str,
    pub name: &'a str,
}

impl SignupForm<'_> {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut report = Report::default();
        report.check("email", email_violation(self.email));
        report.check(
            "name",
            required_violation(self.name.trim())
                .or_else(|| min_chars_violation(self.name.trim(), SIGNUP_NAME_MIN_CHARS)),
        );
        report.finish()
    }
}

/// A numeric quiz answer that must fall inside `accepted`.
#[derive(Debug, Clone)]
pub struct QuizForm<'a> {
    pub answer: &'a str,
    pub accepted: RangeInclusive<i64>,
}

impl QuizForm<'_> {
    pub fn validate(&self) -> Result<i64, ValidationErrors> {
        let raw = self.answer.trim();
        if raw.is_empty() {
            return Err(single("answer", Violation::ValueMissing));
        }
        let Ok(value) = raw.parse::<i64>() else {
            return Err(single("answer", Violation::TypeMismatch));
        };
        if !self.accepted.contains(&value) {
            return Err(single("answer", Violation::OutOfRange));
        }
        Ok(value)
    }
}

/// Shape check for an email address.
///
/// The local part may be empty; the domain needs at least two dot-separated
/// labels made of ASCII alphanumerics and inner hyphens.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c));
    let labels: Vec<&str> = domain.split('.').collect();
    let domain_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

    local_ok && domain_ok
}

fn email_violation(value: &str) -> Option<Violation> {
    let value = value.trim();
    required_violation(value).or_else(|| (!is_valid_email(value)).then_some(Violation::TypeMismatch))
}

fn required_violation(value: &str) -> Option<Violation> {
    value.is_empty().then_some(Violation::ValueMissing)
}

fn min_chars_violation(value: &str, min: usize) -> Option<Violation> {
    (value.chars().count() < min).then_some(Violation::TooShort)
}

fn single(field: &str, violation: Violation) -> ValidationErrors {
    ValidationErrors {
        fields: vec![FieldError::new(field, violation)],
    }
}

#[derive(Default)]
struct Report {
    fields: Vec<FieldError>,
}

impl Report {
    fn check(&mut self, field: &str, violation: Option<Violation>) {
        if let Some(violation) = violation {
            self.fields.push(FieldError::new(field, violation));
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                fields: self.fields,
            })
        }
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
