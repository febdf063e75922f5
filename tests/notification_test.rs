mod common;

use common::*;
use paygate::domain::invoice::InvoiceState;
use paygate::domain::method::PaymentMethod;
use paygate::domain::ports::{InvoiceEventKind, InvoiceRepository, TransactionStatusRepository};

// ── 1. settlement pays a processing invoice ────────────────────────────────

#[tokio::test]
async fn settlement_marks_processing_invoice_paid() {
    let h = setup();
    seed_invoice(&h, "INV-1", PaymentMethod::BcaVa).await;
    h.service.process_invoice("INV-1").await.unwrap();

    let n = make_notification("INV-1", "settlement", "TX-9", "10000");
    h.service.handle_notification(n).await.unwrap();

    let invoice = h.invoices.find_by_number("INV-1").await.unwrap();
    assert_eq!(invoice.state(), InvoiceState::Paid);
    assert_eq!(invoice.payment().unwrap().transaction_id(), Some("TX-9"));

    let record = h
        .transactions
        .find_by_order_id("INV-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.transaction_status, "settlement");
    assert_eq!(h.transactions.len().await, 1);
}

// ── 2. pending on a brand-new order ────────────────────────────────────────

#[tokio::test]
async fn pending_creates_record_and_moves_invoice_to_processing() {
    let h = setup();
    seed_invoice(&h, "INV-2", PaymentMethod::BniVa).await;

    let n = make_notification("INV-2", "pending", "TX-2", "10000");
    h.service.handle_notification(n).await.unwrap();

    let invoice = h.invoices.find_by_number("INV-2").await.unwrap();
    assert_eq!(invoice.state(), InvoiceState::Processing);

    let record = h
        .transactions
        .find_by_order_id("INV-2")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.transaction_status, "pending");
}

// ── 3. expire fails the invoice, idempotent on redelivery ──────────────────

#[tokio::test]
async fn expire_fails_invoice_and_redelivery_is_a_noop() {
    let h = setup();
    seed_invoice(&h, "INV-3", PaymentMethod::Alfamart).await;

    let n = make_notification("INV-3", "expire", "TX-3", "10000");
    h.service.handle_notification(n.clone()).await.unwrap();
    h.service.handle_notification(n).await.unwrap();

    let invoice = h.invoices.find_by_number("INV-3").await.unwrap();
    assert_eq!(invoice.state(), InvoiceState::Failed);
    assert_eq!(h.transactions.len().await, 1);

    let failed_events = h
        .publisher
        .events()
        .await
        .into_iter()
        .filter(|e| matches!(e.kind, InvoiceEventKind::Failed { .. }))
        .count();
    assert_eq!(failed_events, 1, "redelivery must not publish again");
}

// ── 4. duplicate settlement: one record, one effective transition ──────────

#[tokio::test]
async fn duplicate_settlement_applies_once() {
    let h = setup();
    seed_invoice(&h, "INV-4", PaymentMethod::BriVa).await;

    let n = make_notification("INV-4", "settlement", "TX-4", "10000");
    h.service.handle_notification(n.clone()).await.unwrap();
    h.service.handle_notification(n).await.unwrap();

    assert_eq!(h.transactions.len().await, 1);
    let invoice = h.invoices.find_by_number("INV-4").await.unwrap();
    assert_eq!(invoice.state(), InvoiceState::Paid);
    assert_eq!(h.publisher.events().await.len(), 1);
}

// ── 5. signature mismatch leaves prior state untouched ─────────────────────

#[tokio::test]
async fn bad_signature_aborts_without_touching_stored_status() {
    let h = setup();
    seed_invoice(&h, "INV-5", PaymentMethod::BcaVa).await;

    h.service
        .handle_notification(make_notification("INV-5", "pending", "TX-5", "10000"))
        .await
        .unwrap();

    let mut forged = make_notification("INV-5", "settlement", "TX-5b", "10000");
    forged.signature_key = "deadbeef".to_string();
    let err = h.service.handle_notification(forged).await.unwrap_err();
    assert!(err.is_unauthenticated());

    let record = h
        .transactions
        .find_by_order_id("INV-5")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.transaction_status, "pending", "prior record intact");

    let invoice = h.invoices.find_by_number("INV-5").await.unwrap();
    assert_eq!(invoice.state(), InvoiceState::Processing, "no transition ran");
}

// ── 6. capture + credit_card + accept pays ─────────────────────────────────

#[tokio::test]
async fn accepted_credit_card_capture_pays_invoice() {
    let h = setup();
    seed_invoice(&h, "INV-6", PaymentMethod::CreditCard).await;

    let n = make_card_notification("INV-6", "capture", "TX-6", "accept");
    h.service.handle_notification(n).await.unwrap();

    let invoice = h.invoices.find_by_number("INV-6").await.unwrap();
    assert_eq!(invoice.state(), InvoiceState::Paid);
}

// ── 7. capture under fraud review: logged, persisted, no transition ────────

#[tokio::test]
async fn challenged_capture_is_persisted_but_not_applied() {
    let h = setup();
    seed_invoice(&h, "INV-7", PaymentMethod::CreditCard).await;

    let n = make_card_notification("INV-7", "capture", "TX-7", "challenge");
    h.service.handle_notification(n).await.unwrap();

    let invoice = h.invoices.find_by_number("INV-7").await.unwrap();
    assert_eq!(invoice.state(), InvoiceState::Created);
    assert!(h.publisher.events().await.is_empty());

    let record = h
        .transactions
        .find_by_order_id("INV-7")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.fraud_status, "challenge");
}

// ── 8. unrecognized status: success, no transition ─────────────────────────

#[tokio::test]
async fn unknown_status_is_recorded_and_swallowed() {
    let h = setup();
    seed_invoice(&h, "INV-8", PaymentMethod::BcaVa).await;

    let n = make_notification("INV-8", "refund", "TX-8", "10000");
    h.service.handle_notification(n).await.unwrap();

    let invoice = h.invoices.find_by_number("INV-8").await.unwrap();
    assert_eq!(invoice.state(), InvoiceState::Created);
    assert_eq!(h.transactions.len().await, 1);
}

// ── 9. unparseable timestamp: internal error, nothing persisted ────────────

#[tokio::test]
async fn bad_timestamp_is_internal_and_aborts_before_persistence() {
    let h = setup();
    seed_invoice(&h, "INV-9", PaymentMethod::BcaVa).await;

    let mut n = make_notification("INV-9", "settlement", "TX-9", "10000");
    n.transaction_time = "03/11/2025 14:20".to_string();
    let err = h.service.handle_notification(n).await.unwrap_err();

    assert!(err.is_internal());
    assert!(h.transactions.is_empty().await);
}

// ── 10. lifecycle failure propagates after persistence; redelivery succeeds ─

#[tokio::test]
async fn lifecycle_failure_keeps_record_so_redelivery_can_succeed() {
    let h = setup();

    let n = make_notification("INV-10", "settlement", "TX-10", "10000");
    let err = h.service.handle_notification(n.clone()).await.unwrap_err();
    assert!(err.is_not_found(), "no invoice yet for this order");
    assert_eq!(h.transactions.len().await, 1, "merge already persisted");

    seed_invoice(&h, "INV-10", PaymentMethod::PermataVa).await;
    h.service.handle_notification(n).await.unwrap();

    let invoice = h.invoices.find_by_number("INV-10").await.unwrap();
    assert_eq!(invoice.state(), InvoiceState::Paid);
}

// ── 11. later notification overwrites mutable fields, keeps identity ───────

#[tokio::test]
async fn merge_overwrites_mutable_fields_and_keeps_creation() {
    let h = setup();
    seed_invoice(&h, "INV-11", PaymentMethod::MandiriVa).await;

    h.service
        .handle_notification(make_notification("INV-11", "pending", "TX-11a", "10000"))
        .await
        .unwrap();
    let first = h
        .transactions
        .find_by_order_id("INV-11")
        .await
        .unwrap()
        .unwrap();

    let mut later = make_notification("INV-11", "settlement", "TX-11b", "10000");
    later.transaction_time = "2025-11-03 15:00:00".to_string();
    h.service.handle_notification(later).await.unwrap();

    let second = h
        .transactions
        .find_by_order_id("INV-11")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.transaction_status, "settlement");
    assert_eq!(second.transaction_id, "TX-11b");
    assert_eq!(
        second.transaction_time.format("%H:%M:%S").to_string(),
        "15:00:00",
        "second application's timestamp is the one retained"
    );
    assert_eq!(second.order_id(), first.order_id());
    assert_eq!(second.created_at(), first.created_at());
}
