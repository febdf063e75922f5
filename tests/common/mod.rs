#![allow(dead_code)]

use {
    chrono::{Duration, Utc},
    paygate::config::GatewayConfig,
    paygate::domain::invoice::{BillingAddress, Invoice, LineItem},
    paygate::domain::method::PaymentMethod,
    paygate::domain::money::{Currency, MoneyAmount},
    paygate::domain::ports::InvoiceRepository,
    paygate::domain::transaction::{ProviderNotification, sign_key},
    paygate::infra::memory::{
        InMemoryCardTokenRepository, InMemoryInvoiceRepository,
        InMemoryTransactionStatusRepository,
    },
    paygate::infra::publisher::RecordingEventPublisher,
    paygate::services::PaymentService,
    std::sync::Arc,
};

pub const SERVER_KEY: &str = "test-server-key";
pub const CALLBACK_BASE: &str = "https://api.merchant.test";
pub const REDIRECT_BASE: &str = "https://shop.merchant.test";

pub fn test_config() -> GatewayConfig {
    GatewayConfig::new(CALLBACK_BASE, REDIRECT_BASE, SERVER_KEY)
}

/// Service wired to in-memory ports, with handles kept on every port so tests
/// can inspect what the service persisted and published.
pub struct Harness {
    pub service: Arc<PaymentService>,
    pub invoices: Arc<InMemoryInvoiceRepository>,
    pub transactions: Arc<InMemoryTransactionStatusRepository>,
    pub card_tokens: Arc<InMemoryCardTokenRepository>,
    pub publisher: Arc<RecordingEventPublisher>,
}

pub fn setup() -> Harness {
    let invoices = Arc::new(InMemoryInvoiceRepository::new());
    let transactions = Arc::new(InMemoryTransactionStatusRepository::new());
    let card_tokens = Arc::new(InMemoryCardTokenRepository::new());
    let publisher = Arc::new(RecordingEventPublisher::new());

    let service = Arc::new(PaymentService::new(
        invoices.clone(),
        transactions.clone(),
        card_tokens.clone(),
        publisher.clone(),
        test_config(),
    ));

    Harness {
        service,
        invoices,
        transactions,
        card_tokens,
        publisher,
    }
}

/// Invoice with one 10_000 IDR line item, due in 24 hours.
pub fn make_invoice(number: &str, method: PaymentMethod) -> Invoice {
    let now = Utc::now();
    let item = LineItem::new(
        "Monthly Donation",
        "donation",
        "Yayasan Merchant",
        MoneyAmount::new(10_000).unwrap(),
        Currency::Idr,
    )
    .with_description("recurring support");

    Invoice::new(
        number,
        BillingAddress {
            full_name: "Rini Hartono".into(),
            email: "rini@example.test".into(),
            phone_number: "+628120001111".into(),
        },
        Some(item),
        now,
        now + Duration::hours(24),
        method,
    )
}

pub async fn seed_invoice(harness: &Harness, number: &str, method: PaymentMethod) {
    harness
        .invoices
        .save(&make_invoice(number, method))
        .await
        .unwrap();
}

/// Bank-transfer notification with a valid sign key for `SERVER_KEY`.
pub fn make_notification(
    order_id: &str,
    status: &str,
    transaction_id: &str,
    gross_amount: &str,
) -> ProviderNotification {
    ProviderNotification {
        order_id: order_id.to_string(),
        transaction_id: transaction_id.to_string(),
        transaction_status: status.to_string(),
        transaction_time: "2025-11-03 14:20:01".to_string(),
        status_code: "200".to_string(),
        status_message: "success".to_string(),
        signature_key: sign_key(order_id, "200", gross_amount, SERVER_KEY),
        gross_amount: gross_amount.to_string(),
        currency: "IDR".to_string(),
        payment_type: "bank_transfer".to_string(),
        fraud_status: String::new(),
        bank: "bca".to_string(),
        masked_card: String::new(),
        card_type: String::new(),
    }
}

/// Credit-card notification; `fraud_status` is the interesting knob.
pub fn make_card_notification(
    order_id: &str,
    status: &str,
    transaction_id: &str,
    fraud_status: &str,
) -> ProviderNotification {
    let mut notification = make_notification(order_id, status, transaction_id, "10000");
    notification.payment_type = "credit_card".to_string();
    notification.fraud_status = fraud_status.to_string();
    notification.masked_card = "481111-1114".to_string();
    notification.card_type = "credit".to_string();
    notification.bank = String::new();
    notification
}
