use std::fmt;

use serde::Serialize;

use super::domain::{ContactDetails, ContactForm};

/// One field-level problem with a contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ContactViolation {
    EmailMissing,
    EmailMalformed,
    PhoneMissing,
    PhoneMalformed,
    NoContactChannel,
    PrivacyNotAcknowledged,
}

impl ContactViolation {
    /// The form field the inline message belongs to.
    pub const fn field(&self) -> &'static str {
        match self {
            ContactViolation::EmailMissing | ContactViolation::EmailMalformed => "email",
            ContactViolation::PhoneMissing | ContactViolation::PhoneMalformed => "phone",
            ContactViolation::NoContactChannel => "consent",
            ContactViolation::PrivacyNotAcknowledged => "privacy",
        }
    }

    pub const fn message(&self) -> &'static str {
        match self {
            ContactViolation::EmailMissing => "Email is required",
            ContactViolation::EmailMalformed => "Please enter a valid email address",
            ContactViolation::PhoneMissing => "Phone number is required",
            ContactViolation::PhoneMalformed => "Please enter a valid phone number",
            ContactViolation::NoContactChannel => "Please select at least one contact preference",
            ContactViolation::PrivacyNotAcknowledged => {
                "Please agree to the privacy terms to continue"
            }
        }
    }
}

/// Every violation found in one validation pass, so a form can render all of
/// its inline messages at once instead of revealing them one resubmit at a
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactViolations(pub Vec<ContactViolation>);

impl fmt::Display for ContactViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", violation.field(), violation.message())?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ContactViolations {}

/// Validates a raw contact form, returning trimmed details or the full list
/// of violations.
pub fn validate_contact(form: &ContactForm) -> Result<ContactDetails, ContactViolations> {
    let mut violations = Vec::new();

    let email = form.email.trim();
    if email.is_empty() {
        violations.push(ContactViolation::EmailMissing);
    } else if !is_plausible_email(email) {
        violations.push(ContactViolation::EmailMalformed);
    }

    let phone = form.phone.trim();
    if phone.is_empty() {
        violations.push(ContactViolation::PhoneMissing);
    } else if !is_plausible_phone(phone) {
        violations.push(ContactViolation::PhoneMalformed);
    }

    if !form.email_consent && !form.phone_consent {
        violations.push(ContactViolation::NoContactChannel);
    }

    if !form.privacy_acknowledged {
        violations.push(ContactViolation::PrivacyNotAcknowledged);
    }

    if !violations.is_empty() {
        return Err(ContactViolations(violations));
    }

    Ok(ContactDetails {
        email: email.to_string(),
        phone: phone.to_string(),
        email_consent: form.email_consent,
        phone_consent: form.phone_consent,
    })
}

/// Single `@`, non-empty local part, dotted domain, no whitespace.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let Some(domain) = parts.next() else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let mut labels = domain.split('.');
    let has_dot = domain.contains('.');
    has_dot && labels.all(|label| !label.is_empty())
}

/// Optional leading `+`, common separators ignored, 10 to 15 digits.
fn is_plausible_phone(phone: &str) -> bool {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    let mut digits = 0usize;
    for c in rest.chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if !matches!(c, ' ' | '-' | '.' | '(' | ')') {
            return false;
        }
    }
    (10..=15).contains(&digits)
}
