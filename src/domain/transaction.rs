use {
    super::error::PaymentError,
    chrono::{DateTime, FixedOffset, NaiveDateTime, Utc},
    serde::{Deserialize, Serialize},
    sha2::{Digest, Sha512},
};

/// Wall-clock format providers use for `transaction_time`.
pub const TRANSACTION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Provider timestamps carry no zone marker; they are wall-clock times in the
/// provider's reference zone (UTC+7, Jakarta).
pub fn provider_time_zone() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).expect("static offset is in range")
}

/// One status notification as delivered by the provider's webhook. Schema only;
/// transport framing stays outside the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderNotification {
    pub order_id: String,
    pub transaction_id: String,
    pub transaction_status: String,
    pub transaction_time: String,
    pub status_code: String,
    #[serde(default)]
    pub status_message: String,
    pub signature_key: String,
    pub gross_amount: String,
    pub currency: String,
    #[serde(default)]
    pub payment_type: String,
    #[serde(default)]
    pub fraud_status: String,
    #[serde(default)]
    pub bank: String,
    #[serde(default)]
    pub masked_card: String,
    #[serde(default)]
    pub card_type: String,
}

/// Parse and normalize a provider transaction timestamp. A notification with an
/// unparseable timestamp cannot be trusted, so failure is classified Internal.
pub fn parse_transaction_time(raw: &str) -> Result<DateTime<FixedOffset>, PaymentError> {
    let naive = NaiveDateTime::parse_from_str(raw, TRANSACTION_TIME_FORMAT)
        .map_err(|e| PaymentError::internal(format!("cannot parse transaction time: {e}")))?;
    naive
        .and_local_timezone(provider_time_zone())
        .single()
        .ok_or_else(|| PaymentError::internal("ambiguous transaction time"))
}

/// Durable snapshot of the latest known provider status for one order. Created
/// on the first notification, overwritten field-by-field on every later one;
/// `order_id` and `created_at` never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    order_id: String,
    created_at: DateTime<Utc>,
    pub status_code: String,
    pub status_message: String,
    pub signature_key: String,
    pub bank: String,
    pub fraud_status: String,
    pub payment_type: String,
    pub transaction_id: String,
    pub transaction_time: DateTime<FixedOffset>,
    pub transaction_status: String,
    pub gross_amount: String,
    pub masked_card: String,
    pub currency: String,
    pub card_type: String,
}

impl TransactionStatus {
    pub fn from_notification(
        notification: &ProviderNotification,
        transaction_time: DateTime<FixedOffset>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id: notification.order_id.clone(),
            created_at,
            status_code: notification.status_code.clone(),
            status_message: notification.status_message.clone(),
            signature_key: notification.signature_key.clone(),
            bank: notification.bank.clone(),
            fraud_status: notification.fraud_status.clone(),
            payment_type: notification.payment_type.clone(),
            transaction_id: notification.transaction_id.clone(),
            transaction_time,
            transaction_status: notification.transaction_status.clone(),
            gross_amount: notification.gross_amount.clone(),
            masked_card: notification.masked_card.clone(),
            currency: notification.currency.clone(),
            card_type: notification.card_type.clone(),
        }
    }

    /// Overwrites every mutable field from a later notification for the same
    /// order. The merge key (`order_id`) and `created_at` are left alone.
    pub fn merge(
        &mut self,
        notification: &ProviderNotification,
        transaction_time: DateTime<FixedOffset>,
    ) {
        self.status_code = notification.status_code.clone();
        self.status_message = notification.status_message.clone();
        self.signature_key = notification.signature_key.clone();
        self.bank = notification.bank.clone();
        self.fraud_status = notification.fraud_status.clone();
        self.payment_type = notification.payment_type.clone();
        self.transaction_id = notification.transaction_id.clone();
        self.transaction_time = transaction_time;
        self.transaction_status = notification.transaction_status.clone();
        self.gross_amount = notification.gross_amount.clone();
        self.masked_card = notification.masked_card.clone();
        self.currency = notification.currency.clone();
        self.card_type = notification.card_type.clone();
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Recomputes the expected sign key from the configured server key and
    /// compares it against the one the provider sent. The caller learns only
    /// that verification failed, not why.
    pub fn verify_signature(&self, server_key: &str) -> Result<(), PaymentError> {
        let expected = sign_key(&self.order_id, &self.status_code, &self.gross_amount, server_key);
        if self.signature_key != expected {
            return Err(PaymentError::unauthenticated(
                "signature verification failed",
            ));
        }
        Ok(())
    }
}

/// sign_key = hex(sha512(order_id || status_code || gross_amount || server_key))
pub fn sign_key(order_id: &str, status_code: &str, gross_amount: &str, server_key: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(order_id.as_bytes());
    hasher.update(status_code.as_bytes());
    hasher.update(gross_amount.as_bytes());
    hasher.update(server_key.as_bytes());
    hex::encode(hasher.finalize())
}
