use {
    axum::{
        Router,
        extract::DefaultBodyLimit,
        routing::{get, post},
    },
    paygate::{
        AppState,
        config::GatewayConfig,
        infra::memory::{
            InMemoryCardTokenRepository, InMemoryInvoiceRepository,
            InMemoryTransactionStatusRepository,
        },
        infra::publisher::LoggingEventPublisher,
        services::PaymentService,
    },
    std::{sync::Arc, time::Duration},
    tokio::signal,
    tower_http::timeout::TimeoutLayer,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();
    let config = GatewayConfig::from_env().expect("gateway configuration must be set");

    let invoices = Arc::new(InMemoryInvoiceRepository::new());
    let transactions = Arc::new(InMemoryTransactionStatusRepository::new());
    let card_tokens = Arc::new(InMemoryCardTokenRepository::new());
    let publisher = Arc::new(LoggingEventPublisher);

    let service = Arc::new(PaymentService::new(
        invoices.clone(),
        transactions,
        card_tokens,
        publisher,
        config,
    ));

    let state = AppState {
        service,
        invoices,
    };

    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .route(
            "/payment/notification",
            post(paygate::adapters::webhook::notification_handler),
        )
        .route(
            "/payment/tokens",
            post(paygate::adapters::tokens::store_tokens_handler),
        )
        .route(
            "/payment/tokens/{user_id}",
            get(paygate::adapters::tokens::list_tokens_handler),
        )
        .route(
            "/invoices",
            post(paygate::adapters::checkout::create_invoice_handler),
        )
        .route(
            "/invoices/{number}/charge",
            post(paygate::adapters::checkout::charge_handler),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(10)))
        .layer(DefaultBodyLimit::max(64 * 1024)) // provider notifications are small JSON bodies
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    tracing::info!("listening on 0.0.0.0:3000");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
