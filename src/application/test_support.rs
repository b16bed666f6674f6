//! Scripted upstream API doubles shared by application tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::foundation::OrderId;
use crate::domain::order::{
    fixtures, InitializePaymentRequest, InitializePaymentResponse, Order, PaymentLinkResponse,
    PaymentStatus, PaymentStatusPollingResponse, PaymentStatusResponse, VerifyOrderRequest,
    VerifyOrderResponse,
};
use crate::ports::{ApiError, OrderApi, PaymentApi};

pub fn status(order_id: &str, status: &str) -> PaymentStatusPollingResponse {
    PaymentStatusPollingResponse {
        order_id: order_id.to_string(),
        status: PaymentStatus::from(status.to_string()),
        amount: 5375.0,
        completed_at: None,
    }
}

pub fn server_error() -> ApiError {
    ApiError::from_status(503, "Service unavailable")
}

// ════════════════════════════════════════════════════════════════════════════
// Payment API
// ════════════════════════════════════════════════════════════════════════════

/// Answers status fetches from a script; the last entry repeats forever.
pub struct ScriptedPaymentApi {
    script: Mutex<VecDeque<Result<PaymentStatusPollingResponse, ApiError>>>,
    latency: Duration,
    status_calls: AtomicU32,
    requested: Mutex<Vec<String>>,
    pub init_response: Mutex<Result<InitializePaymentResponse, ApiError>>,
    pub init_calls: AtomicU32,
}

impl ScriptedPaymentApi {
    pub fn new(script: Vec<Result<PaymentStatusPollingResponse, ApiError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            latency: Duration::ZERO,
            status_calls: AtomicU32::new(0),
            requested: Mutex::new(Vec::new()),
            init_response: Mutex::new(Ok(init_response("https://checkout.paystack.com/abc"))),
            init_calls: AtomicU32::new(0),
        }
    }

    pub fn always(status_value: &str) -> Self {
        Self::new(vec![Ok(status("o1", status_value))])
    }

    /// Each status fetch takes `latency` of (tokio) time.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn requested_orders(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    fn next_status(&self) -> Result<PaymentStatusPollingResponse, ApiError> {
        let mut script = self.script.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap()
        }
    }
}

pub fn init_response(checkout_url: &str) -> InitializePaymentResponse {
    InitializePaymentResponse {
        checkout_url: checkout_url.to_string(),
        session_id: "sess_1".to_string(),
        amount: 5375.0,
        idempotency_key: "idem_1".to_string(),
        paystack_reference: Some("ref_abc".to_string()),
        paystack_access_code: Some("acc_1".to_string()),
    }
}

#[async_trait]
impl PaymentApi for ScriptedPaymentApi {
    async fn initialize_payment(
        &self,
        _request: &InitializePaymentRequest,
    ) -> Result<InitializePaymentResponse, ApiError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        self.init_response.lock().unwrap().clone()
    }

    async fn get_payment_status(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentStatusPollingResponse, ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(order_id.to_string());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.next_status().map(|mut s| {
            s.order_id = order_id.to_string();
            s
        })
    }

    async fn verify_order(
        &self,
        request: &VerifyOrderRequest,
    ) -> Result<VerifyOrderResponse, ApiError> {
        Ok(valid_order(&request.order_id))
    }
}

pub fn valid_order(order_id: &str) -> VerifyOrderResponse {
    VerifyOrderResponse {
        valid: true,
        order_id: Some(order_id.to_string()),
        organization_id: Some("org-1".to_string()),
        total: Some(5375.0),
        status: Some("OPEN".to_string()),
        organization: None,
        error: None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Order API
// ════════════════════════════════════════════════════════════════════════════

/// Order API that fails `failures` times with `error`, then succeeds.
pub struct StubOrderApi {
    order: Order,
    failures: AtomicU32,
    error: ApiError,
    pub calls: AtomicU32,
    pub last_call: Mutex<Option<String>>,
}

impl StubOrderApi {
    pub fn new(order: Order) -> Self {
        Self {
            order,
            failures: AtomicU32::new(0),
            error: server_error(),
            calls: AtomicU32::new(0),
            last_call: Mutex::new(None),
        }
    }

    pub fn paid() -> Self {
        Self::new(fixtures::order("PAYMENT_COMPLETED"))
    }

    pub fn pending() -> Self {
        Self::new(fixtures::order("PENDING"))
    }

    pub fn failing(mut self, times: u32, error: ApiError) -> Self {
        self.failures = AtomicU32::new(times);
        self.error = error;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<String> {
        self.last_call.lock().unwrap().clone()
    }

    fn attempt(&self, call: String) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_call.lock().unwrap() = Some(call);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(self.error.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl OrderApi for StubOrderApi {
    async fn get_order(&self, order_id: &OrderId) -> Result<Order, ApiError> {
        self.attempt(format!("get_order:{}", order_id))?;
        Ok(self.order.clone())
    }

    async fn get_public_order(&self, encrypted_id: &str) -> Result<Order, ApiError> {
        self.attempt(format!("get_public_order:{}", encrypted_id))?;
        Ok(self.order.clone())
    }

    async fn verify_order(
        &self,
        request: &VerifyOrderRequest,
    ) -> Result<VerifyOrderResponse, ApiError> {
        self.attempt(format!("verify_order:{}", request.order_id))?;
        Ok(valid_order(&request.order_id))
    }

    async fn get_payment_status(
        &self,
        order_id: &OrderId,
    ) -> Result<PaymentStatusResponse, ApiError> {
        self.attempt(format!("get_payment_status:{}", order_id))?;
        Ok(PaymentStatusResponse {
            order_id: order_id.to_string(),
            payment_status: self.order.payment_status.clone(),
            payment_method: Some("card".to_string()),
            amount: self.order.total,
            paystack_reference: Some("ref_abc".to_string()),
            initialized_at: None,
            completed_at: None,
            organization_amount: None,
            platform_amount: None,
            webhook_verified: Some(false),
            webhook_verified_at: None,
        })
    }

    async fn get_payment_link(&self, order_id: &OrderId) -> Result<PaymentLinkResponse, ApiError> {
        self.attempt(format!("get_payment_link:{}", order_id))?;
        Ok(PaymentLinkResponse {
            order_id: order_id.to_string(),
            payment_link: format!("https://pay.ordaro.test/{}", order_id),
            qr_code_url: format!("https://pay.ordaro.test/{}/qr.png", order_id),
            expires_at: "2024-01-16T10:30:00Z".to_string(),
            status: "ACTIVE".to_string(),
        })
    }
}
