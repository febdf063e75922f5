pub mod checkout;
pub mod ewallet;
pub mod requests;

use {
    crate::config::GatewayConfig,
    crate::domain::error::PaymentError,
    crate::domain::invoice::Invoice,
    crate::domain::method::PaymentMethod,
    crate::domain::money::MoneyAmount,
    requests::{CheckoutRequest, EwalletChargeRequest},
    serde::{Deserialize, Serialize},
};

/// Provider-shaped request produced for one invoice, ready to be handed to the
/// transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GatewayRequest {
    Ewallet(EwalletChargeRequest),
    Checkout(CheckoutRequest),
}

impl GatewayRequest {
    pub fn external_id(&self) -> &str {
        match self {
            Self::Ewallet(r) => &r.external_id,
            Self::Checkout(r) => &r.external_id,
        }
    }

    pub fn amount(&self) -> MoneyAmount {
        match self {
            Self::Ewallet(r) => r.amount,
            Self::Checkout(r) => r.amount,
        }
    }
}

pub(crate) fn payment_method_of(invoice: &Invoice) -> Result<PaymentMethod, PaymentError> {
    invoice
        .payment_method()
        .ok_or_else(|| PaymentError::bad_request("invoice has no payment attached"))
}

/// Routes the invoice to the right request family: e-wallet brands get a
/// direct charge, everything else a hosted checkout page.
pub fn build_request(
    invoice: &Invoice,
    config: &GatewayConfig,
) -> Result<GatewayRequest, PaymentError> {
    let method = payment_method_of(invoice)?;
    if method.is_ewallet() {
        Ok(GatewayRequest::Ewallet(ewallet::ewallet_request(
            invoice, config,
        )?))
    } else {
        Ok(GatewayRequest::Checkout(checkout::checkout_request(
            invoice, config,
        )?))
    }
}
