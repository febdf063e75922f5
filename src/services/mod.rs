pub mod lifecycle;
pub mod notification;
pub mod tokens;

use {
    crate::config::GatewayConfig,
    crate::domain::error::PaymentError,
    crate::domain::ports::{
        CardTokenRepository, EventPublisher, InvoiceRepository, TransactionStatusRepository,
    },
    crate::gateway::{self, GatewayRequest},
    std::collections::HashMap,
    std::sync::{Arc, Mutex},
};

/// The payment core. Owns transaction-status and card-token storage through
/// its ports, drives the invoice lifecycle through the invoicing collaborator,
/// and translates invoices into provider-shaped requests.
pub struct PaymentService {
    invoices: Arc<dyn InvoiceRepository>,
    transactions: Arc<dyn TransactionStatusRepository>,
    card_tokens: Arc<dyn CardTokenRepository>,
    publisher: Arc<dyn EventPublisher>,
    config: GatewayConfig,
    order_locks: OrderLocks,
}

impl PaymentService {
    pub fn new(
        invoices: Arc<dyn InvoiceRepository>,
        transactions: Arc<dyn TransactionStatusRepository>,
        card_tokens: Arc<dyn CardTokenRepository>,
        publisher: Arc<dyn EventPublisher>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            invoices,
            transactions,
            card_tokens,
            publisher,
            config,
            order_locks: OrderLocks::default(),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Builds the provider request for an invoice. Pure translation; the
    /// transport collaborator does the sending.
    pub async fn charge_request(&self, invoice_number: &str) -> Result<GatewayRequest, PaymentError> {
        let invoice = self.invoices.find_by_number(invoice_number).await?;
        gateway::build_request(&invoice, &self.config)
    }
}

/// Serializes notification processing per order id. Stands in for the
/// persistence collaborator's row-level lock when the stores are in-process;
/// a multi-instance deployment owes the same guarantee at its storage layer.
#[derive(Default)]
struct OrderLocks {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl OrderLocks {
    fn acquire(&self, order_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.inner.lock().expect("order lock map poisoned");
        locks
            .entry(order_id.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}
