//! Classification of webhook event names.

use std::fmt;

/// What the checkout flow does with a given event name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEventKind {
    PaymentSucceeded,
    PaymentFailed,
    /// Acknowledged without side effects.
    Unhandled(String),
}

impl WebhookEventKind {
    pub fn classify(event: &str) -> Self {
        match event {
            "charge.success" | "payment.success" => WebhookEventKind::PaymentSucceeded,
            "charge.failed" | "payment.failed" | "invoice.payment_failed" => {
                WebhookEventKind::PaymentFailed
            }
            other => WebhookEventKind::Unhandled(other.to_string()),
        }
    }

    pub fn is_handled(&self) -> bool {
        !matches!(self, WebhookEventKind::Unhandled(_))
    }
}

impl fmt::Display for WebhookEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookEventKind::PaymentSucceeded => f.write_str("payment_succeeded"),
            WebhookEventKind::PaymentFailed => f.write_str("payment_failed"),
            WebhookEventKind::Unhandled(name) => write!(f, "unhandled({})", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_events() {
        for name in ["charge.success", "payment.success"] {
            assert_eq!(
                WebhookEventKind::classify(name),
                WebhookEventKind::PaymentSucceeded
            );
        }
    }

    #[test]
    fn failure_events() {
        for name in ["charge.failed", "payment.failed", "invoice.payment_failed"] {
            assert_eq!(
                WebhookEventKind::classify(name),
                WebhookEventKind::PaymentFailed
            );
        }
    }

    #[test]
    fn other_events_are_unhandled() {
        let kind = WebhookEventKind::classify("transfer.success");
        assert_eq!(
            kind,
            WebhookEventKind::Unhandled("transfer.success".to_string())
        );
        assert!(!kind.is_handled());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!WebhookEventKind::classify("Charge.Success").is_handled());
    }
}
