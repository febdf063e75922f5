use {
    crate::domain::money::{Currency, MoneyAmount},
    serde::{Deserialize, Serialize},
};

/// Direct e-wallet charge, pushed to the payer's wallet app. The request is
/// handed to the transport collaborator as-is; the core never sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EwalletChargeRequest {
    pub external_id: String,
    pub amount: MoneyAmount,
    pub currency: Currency,
    pub phone: String,
    /// Provider's e-wallet type code (OVO, DANA, LINKAJA).
    pub ewallet_type: String,
    pub callback_url: String,
    pub redirect_url: String,
}

/// Hosted checkout page request covering every non-push method: the provider
/// renders a payment page restricted to the enabled methods list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub external_id: String,
    pub amount: MoneyAmount,
    pub currency: Currency,
    pub payer_email: String,
    pub description: String,
    /// Seconds the payer has before the checkout page expires.
    pub invoice_duration: i64,
    pub callback_url: String,
    pub success_redirect_url: String,
    pub failure_redirect_url: String,
    pub payment_methods: Vec<String>,
    pub should_send_email: bool,
}
