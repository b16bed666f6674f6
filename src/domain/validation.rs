//! Input validation for checkout forms and identifiers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-+()]{10,}$").expect("valid phone regex"));

static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("valid uuid regex")
});

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// At least ten digits, spaces or `-+()` once whitespace is removed.
pub fn validate_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&compact)
}

pub fn validate_name(name: &str) -> bool {
    name.trim().chars().count() >= 2
}

pub fn validate_required(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

pub fn validate_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Order ids are UUIDs, any case.
pub fn validate_order_id(order_id: &str) -> bool {
    UUID_RE.is_match(order_id)
}

pub fn validate_encrypted_order_id(encrypted: &str) -> bool {
    !encrypted.is_empty() && encrypted.bytes().all(|b| b.is_ascii_hexdigit())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has_field_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

/// Customer details collected before redirecting to the payment page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Validates the checkout form. Phone and name are checked only when given.
pub fn validate_checkout_form(form: &CheckoutForm) -> ValidationResult {
    let mut errors = Vec::new();
    let mut push = |field: &str, message: &str| {
        errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        })
    };

    if !validate_required(Some(&form.email)) {
        push("email", "Email is required");
    } else if !validate_email(&form.email) {
        push("email", "Please enter a valid email address");
    }

    if let Some(phone) = form.phone.as_deref().filter(|p| !p.is_empty()) {
        if !validate_phone(phone) {
            push("phone", "Please enter a valid phone number");
        }
    }

    if let Some(name) = form.name.as_deref().filter(|n| !n.is_empty()) {
        if !validate_name(name) {
            push("name", "Name must be at least 2 characters");
        }
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
    }
}

/// Escapes HTML-significant characters.
pub fn sanitize_input(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

/// Trims and lowercases the email, then sanitizes it if valid.
pub fn validate_and_sanitize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_lowercase();
    validate_email(&normalized).then(|| sanitize_input(&normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Field Validators
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn email_rules() {
        assert!(validate_email("ada@example.com"));
        assert!(validate_email("a.b+c@sub.example.ng"));
        assert!(!validate_email("ada@example"));
        assert!(!validate_email("ada example@x.com"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn phone_rules() {
        assert!(validate_phone("+234 801 234 5678"));
        assert!(validate_phone("(080) 1234-5678"));
        assert!(!validate_phone("12345"));
        assert!(!validate_phone("0801234567x"));
    }

    #[test]
    fn name_rules() {
        assert!(validate_name("Ada"));
        assert!(!validate_name(" A "));
    }

    #[test]
    fn required_rules() {
        assert!(validate_required(Some("x")));
        assert!(!validate_required(Some("   ")));
        assert!(!validate_required(None));
    }

    #[test]
    fn amount_rules() {
        assert!(validate_amount(0.01));
        assert!(!validate_amount(0.0));
        assert!(!validate_amount(-5.0));
        assert!(!validate_amount(f64::NAN));
        assert!(!validate_amount(f64::INFINITY));
    }

    #[test]
    fn order_id_must_be_uuid() {
        assert!(validate_order_id("2b1c6a0e-8d0f-4a55-9c1e-3f1f5d1f0a11"));
        assert!(validate_order_id("2B1C6A0E-8D0F-4A55-9C1E-3F1F5D1F0A11"));
        assert!(!validate_order_id("ord-123"));
    }

    #[test]
    fn encrypted_id_must_be_hex() {
        assert!(validate_encrypted_order_id("deadBEEF"));
        assert!(!validate_encrypted_order_id(""));
        assert!(!validate_encrypted_order_id("xyz"));
    }

    // ══════════════════════════════════════════════════════════════
    // Checkout Form
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn valid_form_has_no_errors() {
        let form = CheckoutForm {
            email: "ada@example.com".to_string(),
            phone: Some("+2348012345678".to_string()),
            name: Some("Ada".to_string()),
        };
        let result = validate_checkout_form(&form);
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn missing_email_is_required_error() {
        let result = validate_checkout_form(&CheckoutForm::default());
        assert!(!result.valid);
        assert_eq!(result.field_error("email"), Some("Email is required"));
    }

    #[test]
    fn bad_optional_fields_are_reported() {
        let form = CheckoutForm {
            email: "bad".to_string(),
            phone: Some("123".to_string()),
            name: Some("A".to_string()),
        };
        let result = validate_checkout_form(&form);
        assert_eq!(result.errors.len(), 3);
        assert!(result.has_field_error("phone"));
        assert!(result.has_field_error("name"));
        assert_eq!(
            result.field_error("email"),
            Some("Please enter a valid email address")
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Sanitization
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn sanitize_escapes_html() {
        assert_eq!(
            sanitize_input(r#"<a href="/x">'&'</a>"#),
            "&lt;a href=&quot;&#x2F;x&quot;&gt;&#x27;&amp;&#x27;&lt;&#x2F;a&gt;"
        );
    }

    #[test]
    fn sanitize_email_normalizes() {
        assert_eq!(
            validate_and_sanitize_email("  Ada@Example.COM "),
            Some("ada@example.com".to_string())
        );
        assert_eq!(validate_and_sanitize_email("nope"), None);
    }
}
