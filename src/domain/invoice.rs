use {
    super::error::PaymentError,
    super::method::PaymentMethod,
    super::money::{Currency, Money, MoneyAmount},
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceState {
    Created,
    Processing,
    Paid,
    Failed,
}

impl InvoiceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Processing => "processing",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }

    /// Paid and Failed are terminal: nothing moves an invoice out of them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Failed)
    }

    pub fn can_transition_to(&self, next: &InvoiceState) -> bool {
        matches!(
            (self, next),
            (Self::Created, Self::Processing)
                | (Self::Created, Self::Paid)
                | (Self::Created, Self::Failed)
                | (Self::Processing, Self::Paid)
                | (Self::Processing, Self::Failed)
        )
    }
}

impl fmt::Display for InvoiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for InvoiceState {
    type Error = PaymentError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "created" => Ok(Self::Created),
            "processing" => Ok(Self::Processing),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            other => Err(PaymentError::bad_request(format!(
                "unknown invoice state: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
}

/// A single billed item. Quantity starts at 1 and can never go below 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    name: String,
    category: String,
    merchant_name: String,
    description: String,
    currency: Currency,
    unit_price: MoneyAmount,
    qty: u32,
}

impl LineItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        merchant_name: impl Into<String>,
        unit_price: MoneyAmount,
        currency: Currency,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            merchant_name: merchant_name.into(),
            description: String::new(),
            currency,
            unit_price,
            qty: 1,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn merchant_name(&self) -> &str {
        &self.merchant_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn unit_price(&self) -> MoneyAmount {
        self.unit_price
    }

    pub fn qty(&self) -> u32 {
        self.qty
    }

    pub fn increase_qty(&mut self) {
        self.qty += 1;
    }

    pub fn decrease_qty(&mut self) -> Result<(), PaymentError> {
        if self.qty == 0 {
            return Err(PaymentError::bad_request(
                "invalid minimum quantity of the item",
            ));
        }
        self.qty -= 1;
        Ok(())
    }

    pub fn sub_total(&self) -> MoneyAmount {
        self.unit_price
            .checked_mul(self.qty)
            .expect("line item subtotal overflow")
    }
}

/// The payment choice attached to an invoice, plus the provider correlation
/// recorded once the invoice is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetail {
    method: PaymentMethod,
    transaction_id: Option<String>,
    paid_at: Option<DateTime<Utc>>,
}

impl PaymentDetail {
    pub fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            transaction_id: None,
            paid_at: None,
        }
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.paid_at
    }
}

/// Provider-agnostic billing aggregate. The payment core reads it to build
/// gateway requests and drives its state through the lifecycle methods; line
/// items and pricing are owned by the invoicing side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    number: String,
    billing_address: BillingAddress,
    line_item: Option<LineItem>,
    invoice_date: DateTime<Utc>,
    due_date: DateTime<Utc>,
    state: InvoiceState,
    payment: Option<PaymentDetail>,
}

impl Invoice {
    pub fn new(
        number: impl Into<String>,
        billing_address: BillingAddress,
        line_item: Option<LineItem>,
        invoice_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
        method: PaymentMethod,
    ) -> Self {
        Self {
            number: number.into(),
            billing_address,
            line_item,
            invoice_date,
            due_date,
            state: InvoiceState::Created,
            payment: Some(PaymentDetail::new(method)),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn billing_address(&self) -> &BillingAddress {
        &self.billing_address
    }

    pub fn line_item(&self) -> Option<&LineItem> {
        self.line_item.as_ref()
    }

    pub fn line_item_mut(&mut self) -> Option<&mut LineItem> {
        self.line_item.as_mut()
    }

    pub fn invoice_date(&self) -> DateTime<Utc> {
        self.invoice_date
    }

    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    pub fn state(&self) -> InvoiceState {
        self.state
    }

    pub fn payment(&self) -> Option<&PaymentDetail> {
        self.payment.as_ref()
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment.as_ref().map(|p| p.method)
    }

    pub fn total(&self) -> Money {
        match &self.line_item {
            Some(item) => Money::new(item.sub_total(), item.currency()),
            None => Money::new(MoneyAmount::zero(), Currency::Idr),
        }
    }

    /// Window the payer has to settle, in whole seconds.
    pub fn duration_secs(&self) -> i64 {
        (self.due_date - self.invoice_date).num_seconds()
    }

    /// Marks the invoice paid and records the provider correlation. Returns
    /// false without touching anything when the invoice is already terminal.
    pub fn pay(&mut self, transaction_id: &str, paid_at: DateTime<Utc>) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = InvoiceState::Paid;
        if let Some(payment) = self.payment.as_mut() {
            payment.transaction_id = Some(transaction_id.to_string());
            payment.paid_at = Some(paid_at);
        }
        true
    }

    /// Marks the invoice failed. No-op once terminal.
    pub fn fail(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = InvoiceState::Failed;
        true
    }

    /// Moves the invoice into the processing state. Terminal states win; an
    /// invoice already processing stays put.
    pub fn process(&mut self) -> bool {
        if self.state.is_terminal() || self.state == InvoiceState::Processing {
            return false;
        }
        self.state = InvoiceState::Processing;
        true
    }
}
