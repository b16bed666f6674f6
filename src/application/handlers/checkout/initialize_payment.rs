//! InitializePaymentHandler - Command handler starting a hosted payment.

use std::sync::Arc;

use crate::application::history::PaymentHistoryService;
use crate::domain::foundation::{messages, CheckoutError, OrderId, ValidationError};
use crate::domain::history::{NewPaymentRecord, PaymentRecordStatus};
use crate::domain::order::{InitializePaymentRequest, InitializePaymentResponse};
use crate::domain::validation::{validate_checkout_form, CheckoutForm};
use crate::ports::PaymentApi;

/// Command to start a payment for an order.
#[derive(Debug, Clone)]
pub struct InitializePaymentCommand {
    pub order_id: String,
    pub form: CheckoutForm,
    /// Currency recorded in payment history; defaults to NGN.
    pub currency: Option<String>,
}

/// Starts a payment and returns the hosted checkout URL.
///
/// Initialization is not retried here; the payment service deduplicates on
/// its idempotency key and the customer can resubmit.
pub struct InitializePaymentHandler {
    payments: Arc<dyn PaymentApi>,
    history: Option<Arc<PaymentHistoryService>>,
}

impl InitializePaymentHandler {
    pub fn new(payments: Arc<dyn PaymentApi>) -> Self {
        Self {
            payments,
            history: None,
        }
    }

    pub fn with_history(mut self, history: Arc<PaymentHistoryService>) -> Self {
        self.history = Some(history);
        self
    }

    pub async fn handle(
        &self,
        cmd: InitializePaymentCommand,
    ) -> Result<InitializePaymentResponse, CheckoutError> {
        let email = cmd.form.email.trim().to_string();
        let form = CheckoutForm {
            email: email.clone(),
            ..cmd.form.clone()
        };
        let validation = validate_checkout_form(&form);
        if let Some(first) = validation.errors.first() {
            return Err(ValidationError::invalid_format(&first.field, &first.message).into());
        }
        let order_id = OrderId::new(cmd.order_id.trim())?;

        let request = InitializePaymentRequest {
            order_id: order_id.to_string(),
            email: email.clone(),
        };
        let response = self.payments.initialize_payment(&request).await.map_err(|e| {
            tracing::error!(order_id = %order_id, error = %e, "Payment initialization failed");
            CheckoutError::from(e)
        })?;

        if response.checkout_url.trim().is_empty() {
            tracing::error!(order_id = %order_id, "Payment service returned no checkout URL");
            return Err(CheckoutError::payment(messages::PAYMENT_INITIALIZATION_FAILED));
        }

        tracing::info!(
            order_id = %order_id,
            session_id = %response.session_id,
            amount = response.amount,
            "Payment initialized"
        );

        self.record_pending(&order_id, &email, &cmd, &response).await;
        Ok(response)
    }

    async fn record_pending(
        &self,
        order_id: &OrderId,
        email: &str,
        cmd: &InitializePaymentCommand,
        response: &InitializePaymentResponse,
    ) {
        let Some(history) = &self.history else {
            return;
        };
        let record = NewPaymentRecord {
            order_id: order_id.to_string(),
            amount: response.amount,
            currency: cmd.currency.clone().unwrap_or_else(|| "NGN".to_string()),
            status: PaymentRecordStatus::Pending,
            reference: response
                .paystack_reference
                .clone()
                .unwrap_or_else(|| response.session_id.clone()),
            customer_email: email.to_string(),
            customer_name: cmd.form.name.clone().filter(|n| !n.trim().is_empty()),
            payment_method: "paystack".to_string(),
            metadata: Some(serde_json::json!({
                "sessionId": response.session_id,
                "idempotencyKey": response.idempotency_key,
            })),
        };
        if let Err(e) = history.add_record(record).await {
            tracing::warn!(order_id = %order_id, error = %e, "Failed to record pending payment");
        }
    }
}
