//! Ordaro checkout server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use ordaro_checkout::adapters::http::{build_router, CheckoutAppState, RouterSettings, WebhookAppState};
use ordaro_checkout::adapters::{
    spawn_sweeper, FileHistoryStore, InMemoryHistoryStore, InMemoryRateLimiter,
    LoggingPaymentEventSink, OrderApiClient, PaymentServiceClient,
};
use ordaro_checkout::application::{PaymentHistoryService, ProcessWebhookHandler};
use ordaro_checkout::config::AppConfig;
use ordaro_checkout::domain::webhook::PaystackWebhookVerifier;
use ordaro_checkout::ports::{PaymentHistoryStore, RateLimiter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config);
    config.validate().context("Invalid configuration")?;

    let addr = config.server.socket_addr()?;

    // Upstream clients
    let orders = Arc::new(
        OrderApiClient::new(&config.api.ordaro_api_url, config.api.order_timeout())
            .context("Failed to build order API client")?,
    );
    let payments = Arc::new(
        PaymentServiceClient::new(&config.api.payment_service_url, config.api.payment_timeout())
            .context("Failed to build payment service client")?,
    );
    let cipher = Arc::new(config.encryption.cipher().context("Invalid encryption settings")?);

    // Payment history
    let store: Arc<dyn PaymentHistoryStore> = match &config.history.file_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using file-backed payment history");
            Arc::new(FileHistoryStore::new(path))
        }
        None => Arc::new(InMemoryHistoryStore::new()),
    };
    let history = Arc::new(PaymentHistoryService::new(store));

    // Rate limiting
    let rate_limiting = config.features.enable_rate_limiting;
    let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new(
        config.rate_limit.limiter_config(rate_limiting),
    ));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = rate_limiting.then(|| {
        spawn_sweeper(
            limiter.clone(),
            config.rate_limit.limiter_config(true).sweep_interval(),
            shutdown_rx,
        )
    });

    // Webhooks
    let webhook_handler = ProcessWebhookHandler::new(
        PaystackWebhookVerifier::new(config.payment.webhook_secret()),
        limiter.clone(),
        Arc::new(LoggingPaymentEventSink::new()),
    )
    .with_history(history.clone());

    let checkout_state = CheckoutAppState {
        orders,
        payments,
        cipher: Some(cipher),
        history,
        features: config.features.clone(),
    };
    let settings = RouterSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
        checkout_rate_limiter: rate_limiting.then(|| limiter.clone()),
    };
    let app = build_router(
        checkout_state,
        WebhookAppState::new(Arc::new(webhook_handler)),
        settings,
    );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        test_mode = config.payment.is_test_mode(),
        rate_limiting,
        "Checkout server listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    let _ = shutdown_tx.send(true);
    if let Some(sweeper) = sweeper {
        if let Err(e) = sweeper.await {
            tracing::warn!(error = %e, "Rate limit sweeper ended abnormally");
        }
    }
    tracing::info!("Checkout server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level; production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
