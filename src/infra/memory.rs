use {
    crate::domain::error::PaymentError,
    crate::domain::invoice::Invoice,
    crate::domain::ports::{CardTokenRepository, InvoiceRepository, TransactionStatusRepository},
    crate::domain::token::CardToken,
    crate::domain::transaction::TransactionStatus,
    async_trait::async_trait,
    chrono::Utc,
    std::collections::HashMap,
    std::sync::Arc,
    tokio::sync::RwLock,
};

/// In-memory invoice store keyed by invoice number. The lifecycle mutators
/// hold the write lock across read-modify-write, which gives the idempotent,
/// terminal-state-wins behavior the port requires.
#[derive(Default, Clone)]
pub struct InMemoryInvoiceRepository {
    invoices: Arc<RwLock<HashMap<String, Invoice>>>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn find_by_number(&self, number: &str) -> Result<Invoice, PaymentError> {
        let invoices = self.invoices.read().await;
        invoices
            .get(number)
            .cloned()
            .ok_or_else(|| PaymentError::not_found(format!("invoice {number} not found")))
    }

    async fn save(&self, invoice: &Invoice) -> Result<(), PaymentError> {
        let mut invoices = self.invoices.write().await;
        invoices.insert(invoice.number().to_string(), invoice.clone());
        Ok(())
    }

    async fn mark_paid(
        &self,
        number: &str,
        transaction_id: &str,
    ) -> Result<Invoice, PaymentError> {
        let mut invoices = self.invoices.write().await;
        let invoice = invoices
            .get_mut(number)
            .ok_or_else(|| PaymentError::not_found(format!("invoice {number} not found")))?;
        invoice.pay(transaction_id, Utc::now());
        Ok(invoice.clone())
    }

    async fn mark_failed(&self, number: &str) -> Result<Invoice, PaymentError> {
        let mut invoices = self.invoices.write().await;
        let invoice = invoices
            .get_mut(number)
            .ok_or_else(|| PaymentError::not_found(format!("invoice {number} not found")))?;
        invoice.fail();
        Ok(invoice.clone())
    }

    async fn mark_processing(&self, number: &str) -> Result<Invoice, PaymentError> {
        let mut invoices = self.invoices.write().await;
        let invoice = invoices
            .get_mut(number)
            .ok_or_else(|| PaymentError::not_found(format!("invoice {number} not found")))?;
        invoice.process();
        Ok(invoice.clone())
    }
}

/// In-memory transaction-status store keyed by provider order id. Save is
/// create-or-replace under one write lock, so a record is never observed
/// half-merged.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStatusRepository {
    records: Arc<RwLock<HashMap<String, TransactionStatus>>>,
}

impl InMemoryTransactionStatusRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl TransactionStatusRepository for InMemoryTransactionStatusRepository {
    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<TransactionStatus>, PaymentError> {
        let records = self.records.read().await;
        Ok(records.get(order_id).cloned())
    }

    async fn save(&self, status: &TransactionStatus) -> Result<(), PaymentError> {
        let mut records = self.records.write().await;
        records.insert(status.order_id().to_string(), status.clone());
        Ok(())
    }
}

/// In-memory card-token store keyed by token id, so re-saving a token is an
/// upsert rather than a duplicate.
#[derive(Default, Clone)]
pub struct InMemoryCardTokenRepository {
    tokens: Arc<RwLock<HashMap<String, CardToken>>>,
}

impl InMemoryCardTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CardTokenRepository for InMemoryCardTokenRepository {
    async fn save(&self, token: &CardToken) -> Result<(), PaymentError> {
        let mut tokens = self.tokens.write().await;
        tokens.insert(token.token_id.clone(), token.clone());
        Ok(())
    }

    async fn find_all_by_user_id(&self, user_id: &str) -> Result<Vec<CardToken>, PaymentError> {
        let tokens = self.tokens.read().await;
        let mut found: Vec<CardToken> = tokens
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.token_id.cmp(&b.token_id));
        Ok(found)
    }
}
