use {
    super::payment_method_of,
    super::requests::EwalletChargeRequest,
    crate::config::GatewayConfig,
    crate::domain::error::PaymentError,
    crate::domain::invoice::Invoice,
    crate::domain::method::PaymentMethod,
    crate::domain::money::{Currency, MoneyAmount},
};

/// Build capability for the direct-charge family. One implementor per e-wallet
/// brand; each fills only its own provider-specific fields.
trait EwalletBuild {
    fn build(self: Box<Self>) -> Result<EwalletChargeRequest, PaymentError>;
}

/// Shared chained steps for e-wallet charges. Steps are order-independent and
/// individually testable; `build` comes last.
#[derive(Debug)]
pub struct EwalletRequestBuilder {
    request: EwalletChargeRequest,
}

impl EwalletRequestBuilder {
    pub fn from_invoice(invoice: &Invoice) -> Self {
        let builder = Self {
            request: EwalletChargeRequest {
                external_id: invoice.number().to_string(),
                amount: MoneyAmount::zero(),
                currency: Currency::Idr,
                phone: String::new(),
                ewallet_type: String::new(),
                callback_url: String::new(),
                redirect_url: String::new(),
            },
        };
        builder.set_price(invoice).set_customer_data(invoice)
    }

    pub fn set_price(mut self, invoice: &Invoice) -> Self {
        let total = invoice.total();
        self.request.amount = total.amount();
        self.request.currency = total.currency();
        self
    }

    pub fn set_customer_data(mut self, invoice: &Invoice) -> Self {
        self.request.phone = invoice.billing_address().phone_number.clone();
        self
    }

    pub fn set_method(mut self, code: &str) -> Self {
        self.request.ewallet_type = code.to_string();
        self
    }

    pub fn set_callback(mut self, url: String) -> Self {
        self.request.callback_url = url;
        self
    }

    pub fn set_redirect(mut self, url: String) -> Self {
        self.request.redirect_url = url;
        self
    }

    pub fn build(self) -> Result<EwalletChargeRequest, PaymentError> {
        Ok(self.request)
    }
}

pub struct OvoCharge {
    rb: EwalletRequestBuilder,
}

impl OvoCharge {
    pub fn new(rb: EwalletRequestBuilder, config: &GatewayConfig) -> Self {
        let rb = rb
            .set_method(PaymentMethod::Ovo.checkout_code())
            .set_callback(format!(
                "{}/payment/ewallet/ovo/callback",
                config.callback_base_url
            ))
            .set_redirect(format!("{}/payment/finish", config.redirect_base_url));
        Self { rb }
    }
}

impl EwalletBuild for OvoCharge {
    fn build(self: Box<Self>) -> Result<EwalletChargeRequest, PaymentError> {
        self.rb.build()
    }
}

pub struct DanaCharge {
    rb: EwalletRequestBuilder,
}

impl DanaCharge {
    pub fn new(rb: EwalletRequestBuilder, config: &GatewayConfig) -> Self {
        let rb = rb
            .set_method(PaymentMethod::Dana.checkout_code())
            .set_callback(format!(
                "{}/payment/ewallet/dana/callback",
                config.callback_base_url
            ))
            .set_redirect(format!("{}/payment/finish", config.redirect_base_url));
        Self { rb }
    }
}

impl EwalletBuild for DanaCharge {
    fn build(self: Box<Self>) -> Result<EwalletChargeRequest, PaymentError> {
        self.rb.build()
    }
}

pub struct LinkAjaCharge {
    rb: EwalletRequestBuilder,
}

impl LinkAjaCharge {
    pub fn new(rb: EwalletRequestBuilder, config: &GatewayConfig) -> Self {
        let rb = rb
            .set_method(PaymentMethod::LinkAja.checkout_code())
            .set_callback(format!(
                "{}/payment/ewallet/linkaja/callback",
                config.callback_base_url
            ))
            .set_redirect(format!("{}/payment/finish", config.redirect_base_url));
        Self { rb }
    }
}

impl EwalletBuild for LinkAjaCharge {
    fn build(self: Box<Self>) -> Result<EwalletChargeRequest, PaymentError> {
        self.rb.build()
    }
}

/// Selects the e-wallet charge builder for the invoice's payment method.
/// Methods outside the e-wallet family fail closed.
pub fn ewallet_request(
    invoice: &Invoice,
    config: &GatewayConfig,
) -> Result<EwalletChargeRequest, PaymentError> {
    let method = payment_method_of(invoice)?;
    let rb = EwalletRequestBuilder::from_invoice(invoice);

    let builder: Box<dyn EwalletBuild> = match method {
        PaymentMethod::Ovo => Box::new(OvoCharge::new(rb, config)),
        PaymentMethod::Dana => Box::new(DanaCharge::new(rb, config)),
        PaymentMethod::LinkAja => Box::new(LinkAjaCharge::new(rb, config)),
        other => {
            return Err(PaymentError::unsupported(format!(
                "payment type is not known: {other}"
            )));
        }
    };

    builder.build()
}
