use {
    super::error::PaymentError,
    super::invoice::Invoice,
    super::token::CardToken,
    super::transaction::TransactionStatus,
    async_trait::async_trait,
    uuid::Uuid,
};

/// Seam to the invoicing collaborator. The three lifecycle mutators must be
/// idempotent and safe under concurrent invocation for the same invoice;
/// terminal states win.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn find_by_number(&self, number: &str) -> Result<Invoice, PaymentError>;

    async fn save(&self, invoice: &Invoice) -> Result<(), PaymentError>;

    async fn mark_paid(&self, number: &str, transaction_id: &str)
    -> Result<Invoice, PaymentError>;

    async fn mark_failed(&self, number: &str) -> Result<Invoice, PaymentError>;

    async fn mark_processing(&self, number: &str) -> Result<Invoice, PaymentError>;
}

/// Store owned by the payment core: one live record per provider order id.
#[async_trait]
pub trait TransactionStatusRepository: Send + Sync {
    /// Absence is the normal first-notification case, so it is `Ok(None)`
    /// rather than an error.
    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<TransactionStatus>, PaymentError>;

    /// Create-or-replace keyed by order id. Must be atomic per record.
    async fn save(&self, status: &TransactionStatus) -> Result<(), PaymentError>;
}

#[async_trait]
pub trait CardTokenRepository: Send + Sync {
    /// Upsert keyed by the token's own id.
    async fn save(&self, token: &CardToken) -> Result<(), PaymentError>;

    async fn find_all_by_user_id(&self, user_id: &str) -> Result<Vec<CardToken>, PaymentError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceEventKind {
    Paid {
        number: String,
        transaction_id: String,
    },
    Failed {
        number: String,
    },
    Processing {
        number: String,
    },
}

/// Downstream notification emitted after a lifecycle transition actually
/// changed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceEvent {
    pub id: Uuid,
    pub kind: InvoiceEventKind,
}

impl InvoiceEvent {
    pub fn paid(number: impl Into<String>, transaction_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind: InvoiceEventKind::Paid {
                number: number.into(),
                transaction_id: transaction_id.into(),
            },
        }
    }

    pub fn failed(number: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind: InvoiceEventKind::Failed {
                number: number.into(),
            },
        }
    }

    pub fn processing(number: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            kind: InvoiceEventKind::Processing {
                number: number.into(),
            },
        }
    }

    pub fn invoice_number(&self) -> &str {
        match &self.kind {
            InvoiceEventKind::Paid { number, .. }
            | InvoiceEventKind::Failed { number }
            | InvoiceEventKind::Processing { number } => number,
        }
    }
}

/// Publish failures are logged by the caller and never roll back the
/// already-committed transition.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: InvoiceEvent) -> Result<(), PaymentError>;
}
