use crate::domain::error::PaymentError;

/// Process-wide gateway configuration, read once at startup and passed by
/// reference everywhere it is needed. Builders never touch the environment
/// themselves.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL the provider calls back with payment results.
    pub callback_base_url: String,
    /// Base URL the payer is sent back to after checkout.
    pub redirect_base_url: String,
    /// Server-side key used to verify notification sign keys.
    pub server_key: String,
}

impl GatewayConfig {
    pub fn new(
        callback_base_url: impl Into<String>,
        redirect_base_url: impl Into<String>,
        server_key: impl Into<String>,
    ) -> Self {
        Self {
            callback_base_url: callback_base_url.into(),
            redirect_base_url: redirect_base_url.into(),
            server_key: server_key.into(),
        }
    }

    pub fn from_env() -> Result<Self, PaymentError> {
        Ok(Self {
            callback_base_url: require_env("CALLBACK_BASE_URL")?,
            redirect_base_url: require_env("REDIRECT_BASE_URL")?,
            server_key: require_env("GATEWAY_SERVER_KEY")?,
        })
    }
}

fn require_env(name: &str) -> Result<String, PaymentError> {
    std::env::var(name).map_err(|_| PaymentError::internal(format!("{name} must be set")))
}
