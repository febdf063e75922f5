use {
    super::error::PaymentError,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Closed set of payment sources the gateway can charge. Each member maps to
/// exactly one request builder; dispatch fails closed for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Ovo,
    Dana,
    #[serde(rename = "linkaja")]
    LinkAja,
    BcaVa,
    BriVa,
    BniVa,
    PermataVa,
    MandiriVa,
    CreditCard,
    Alfamart,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 10] = [
        Self::Ovo,
        Self::Dana,
        Self::LinkAja,
        Self::BcaVa,
        Self::BriVa,
        Self::BniVa,
        Self::PermataVa,
        Self::MandiriVa,
        Self::CreditCard,
        Self::Alfamart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ovo => "ovo",
            Self::Dana => "dana",
            Self::LinkAja => "linkaja",
            Self::BcaVa => "bca_va",
            Self::BriVa => "bri_va",
            Self::BniVa => "bni_va",
            Self::PermataVa => "permata_va",
            Self::MandiriVa => "mandiri_va",
            Self::CreditCard => "credit_card",
            Self::Alfamart => "alfamart",
        }
    }

    /// Method code in the provider's checkout vocabulary, used for the
    /// enabled-methods list and the e-wallet type field.
    pub fn checkout_code(&self) -> &'static str {
        match self {
            Self::Ovo => "OVO",
            Self::Dana => "DANA",
            Self::LinkAja => "LINKAJA",
            Self::BcaVa => "BCA",
            Self::BriVa => "BRI",
            Self::BniVa => "BNI",
            Self::PermataVa => "PERMATA",
            Self::MandiriVa => "MANDIRI",
            Self::CreditCard => "CREDIT_CARD",
            Self::Alfamart => "ALFAMART",
        }
    }

    pub fn is_ewallet(&self) -> bool {
        matches!(self, Self::Ovo | Self::Dana | Self::LinkAja)
    }

    pub fn is_virtual_account(&self) -> bool {
        matches!(
            self,
            Self::BcaVa | Self::BriVa | Self::BniVa | Self::PermataVa | Self::MandiriVa
        )
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = PaymentError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "ovo" => Ok(Self::Ovo),
            "dana" => Ok(Self::Dana),
            "linkaja" => Ok(Self::LinkAja),
            "bca_va" => Ok(Self::BcaVa),
            "bri_va" => Ok(Self::BriVa),
            "bni_va" => Ok(Self::BniVa),
            "permata_va" => Ok(Self::PermataVa),
            "mandiri_va" => Ok(Self::MandiriVa),
            "credit_card" => Ok(Self::CreditCard),
            "alfamart" => Ok(Self::Alfamart),
            other => Err(PaymentError::unsupported(format!(
                "payment method is not known: {other}"
            ))),
        }
    }
}
