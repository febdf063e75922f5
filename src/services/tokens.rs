use {
    super::PaymentService,
    crate::domain::error::PaymentError,
    crate::domain::token::CardToken,
    serde::{Deserialize, Serialize},
};

/// One saved-card token as the provider's client SDK submits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTokenInput {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status_code: String,
    #[serde(rename = "cardhash")]
    pub card_hash: String,
    #[serde(rename = "token_id")]
    pub token_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCardTokensCommand {
    pub user_id: String,
    pub tokens: Vec<CardTokenInput>,
}

impl PaymentService {
    /// Stores every token in the batch against the provider-issued user id.
    /// An empty batch is a no-op, not an error.
    pub async fn store_card_tokens(
        &self,
        command: StoreCardTokensCommand,
    ) -> Result<(), PaymentError> {
        if command.tokens.is_empty() {
            return Ok(());
        }

        for token in &command.tokens {
            self.card_tokens
                .save(&CardToken {
                    user_id: command.user_id.clone(),
                    token_id: token.token_id.clone(),
                    card_hash: token.card_hash.clone(),
                })
                .await?;
        }

        tracing::info!(user_id = %command.user_id, count = command.tokens.len(), "card tokens stored");
        Ok(())
    }

    /// All tokens saved for the user; an unknown user simply has none.
    pub async fn card_tokens(&self, user_id: &str) -> Result<Vec<CardToken>, PaymentError> {
        self.card_tokens.find_all_by_user_id(user_id).await
    }
}
