mod common;

use common::*;
use paygate::services::tokens::{CardTokenInput, StoreCardTokensCommand};

fn token_input(token_id: &str, card_hash: &str) -> CardTokenInput {
    CardTokenInput {
        status_code: "200".to_string(),
        card_hash: card_hash.to_string(),
        token_id: token_id.to_string(),
    }
}

#[tokio::test]
async fn stores_and_lists_tokens_for_a_user() {
    let h = setup();

    h.service
        .store_card_tokens(StoreCardTokensCommand {
            user_id: "mid-user-1".to_string(),
            tokens: vec![token_input("tok-a", "hash-a"), token_input("tok-b", "hash-b")],
        })
        .await
        .unwrap();

    let tokens = h.service.card_tokens("mid-user-1").await.unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].token_id, "tok-a");
    assert_eq!(tokens[1].token_id, "tok-b");
    assert!(tokens.iter().all(|t| t.user_id == "mid-user-1"));
}

#[tokio::test]
async fn empty_batch_is_a_noop() {
    let h = setup();

    h.service
        .store_card_tokens(StoreCardTokensCommand {
            user_id: "mid-user-2".to_string(),
            tokens: Vec::new(),
        })
        .await
        .unwrap();

    assert!(h.service.card_tokens("mid-user-2").await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_user_lists_empty_not_error() {
    let h = setup();
    let tokens = h.service.card_tokens("nobody").await.unwrap();
    assert!(tokens.is_empty());
}

#[tokio::test]
async fn resaving_a_token_id_upserts() {
    let h = setup();

    for hash in ["hash-old", "hash-new"] {
        h.service
            .store_card_tokens(StoreCardTokensCommand {
                user_id: "mid-user-3".to_string(),
                tokens: vec![token_input("tok-1", hash)],
            })
            .await
            .unwrap();
    }

    let tokens = h.service.card_tokens("mid-user-3").await.unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].card_hash, "hash-new");
}
