use serde::{Deserialize, Serialize};

/// Reusable card instrument saved against a provider-issued user id. The id
/// comes from the provider's client SDK and is opaque to the merchant's own
/// user space. Tokens are written once and only ever listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardToken {
    pub user_id: String,
    pub token_id: String,
    pub card_hash: String,
}
