use {
    super::payment_method_of,
    super::requests::CheckoutRequest,
    crate::config::GatewayConfig,
    crate::domain::error::PaymentError,
    crate::domain::invoice::Invoice,
    crate::domain::method::PaymentMethod,
    crate::domain::money::{Currency, MoneyAmount},
};

trait CheckoutBuild {
    fn build(self: Box<Self>) -> Result<CheckoutRequest, PaymentError>;
}

/// Shared chained steps for hosted-checkout requests. Mirrors the invoice
/// aggregate into the provider's checkout shape; each step touches one field
/// group and nothing else.
#[derive(Debug)]
pub struct CheckoutRequestBuilder {
    request: CheckoutRequest,
}

impl CheckoutRequestBuilder {
    pub fn from_invoice(invoice: &Invoice, config: &GatewayConfig) -> Self {
        let builder = Self {
            request: CheckoutRequest {
                external_id: invoice.number().to_string(),
                amount: MoneyAmount::zero(),
                currency: Currency::Idr,
                payer_email: String::new(),
                description: String::new(),
                invoice_duration: 0,
                callback_url: format!("{}/payment/checkout/callback", config.callback_base_url),
                success_redirect_url: format!("{}/payment/finish", config.redirect_base_url),
                failure_redirect_url: format!("{}/payment/error", config.redirect_base_url),
                payment_methods: Vec::new(),
                should_send_email: true,
            },
        };

        builder
            .set_price(invoice)
            .set_customer_data(invoice)
            .set_item_details(invoice)
            .set_expiration(invoice)
    }

    pub fn set_price(mut self, invoice: &Invoice) -> Self {
        let total = invoice.total();
        self.request.amount = total.amount();
        self.request.currency = total.currency();
        self
    }

    pub fn set_customer_data(mut self, invoice: &Invoice) -> Self {
        self.request.payer_email = invoice.billing_address().email.clone();
        self
    }

    /// No-op when the invoice has no line item yet; an empty description is
    /// not an error.
    pub fn set_item_details(mut self, invoice: &Invoice) -> Self {
        if let Some(item) = invoice.line_item() {
            self.request.description = format!(
                "{} ({}x): {}",
                item.name(),
                item.qty(),
                item.description()
            );
        }
        self
    }

    pub fn set_expiration(mut self, invoice: &Invoice) -> Self {
        self.request.invoice_duration = invoice.duration_secs();
        self
    }

    pub fn add_payment_method(mut self, method: PaymentMethod) -> Self {
        self.request
            .payment_methods
            .push(method.checkout_code().to_string());
        self
    }

    pub fn build(self) -> Result<CheckoutRequest, PaymentError> {
        Ok(self.request)
    }
}

macro_rules! checkout_variant {
    ($(#[$doc:meta])* $name:ident, $method:expr) => {
        $(#[$doc])*
        pub struct $name {
            rb: CheckoutRequestBuilder,
        }

        impl $name {
            pub fn new(rb: CheckoutRequestBuilder) -> Self {
                Self {
                    rb: rb.add_payment_method($method),
                }
            }
        }

        impl CheckoutBuild for $name {
            fn build(self: Box<Self>) -> Result<CheckoutRequest, PaymentError> {
                self.rb.build()
            }
        }
    };
}

checkout_variant!(OvoCheckout, PaymentMethod::Ovo);
checkout_variant!(DanaCheckout, PaymentMethod::Dana);
checkout_variant!(LinkAjaCheckout, PaymentMethod::LinkAja);
checkout_variant!(BcaVaCheckout, PaymentMethod::BcaVa);
checkout_variant!(BriVaCheckout, PaymentMethod::BriVa);
checkout_variant!(BniVaCheckout, PaymentMethod::BniVa);
checkout_variant!(PermataVaCheckout, PaymentMethod::PermataVa);
checkout_variant!(MandiriVaCheckout, PaymentMethod::MandiriVa);
checkout_variant!(CreditCardCheckout, PaymentMethod::CreditCard);
checkout_variant!(AlfamartCheckout, PaymentMethod::Alfamart);

/// Selects the hosted-checkout builder for the invoice's payment method. The
/// match is exhaustive over the method enum, so adding a method without a
/// builder refuses to compile instead of falling back.
pub fn checkout_request(
    invoice: &Invoice,
    config: &GatewayConfig,
) -> Result<CheckoutRequest, PaymentError> {
    let rb = CheckoutRequestBuilder::from_invoice(invoice, config);

    let builder: Box<dyn CheckoutBuild> = match payment_method_of(invoice)? {
        PaymentMethod::Ovo => Box::new(OvoCheckout::new(rb)),
        PaymentMethod::Dana => Box::new(DanaCheckout::new(rb)),
        PaymentMethod::LinkAja => Box::new(LinkAjaCheckout::new(rb)),
        PaymentMethod::BcaVa => Box::new(BcaVaCheckout::new(rb)),
        PaymentMethod::BriVa => Box::new(BriVaCheckout::new(rb)),
        PaymentMethod::BniVa => Box::new(BniVaCheckout::new(rb)),
        PaymentMethod::PermataVa => Box::new(PermataVaCheckout::new(rb)),
        PaymentMethod::MandiriVa => Box::new(MandiriVaCheckout::new(rb)),
        PaymentMethod::CreditCard => Box::new(CreditCardCheckout::new(rb)),
        PaymentMethod::Alfamart => Box::new(AlfamartCheckout::new(rb)),
    };

    builder.build()
}
