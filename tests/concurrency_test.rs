mod common;

use common::*;
use paygate::domain::invoice::InvoiceState;
use paygate::domain::method::PaymentMethod;
use paygate::domain::ports::InvoiceRepository;

// Notifications for one order id must serialize: the per-order lock turns the
// read-merge-verify-save sequence into a critical section.

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_settlements_for_one_order_apply_once() {
    let h = setup();
    seed_invoice(&h, "INV-C1", PaymentMethod::BcaVa).await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = h.service.clone();
        handles.push(tokio::spawn(async move {
            let n = make_notification("INV-C1", "settlement", &format!("TX-C{i}"), "10000");
            service.handle_notification(n).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(h.transactions.len().await, 1);
    let invoice = h.invoices.find_by_number("INV-C1").await.unwrap();
    assert_eq!(invoice.state(), InvoiceState::Paid);
    assert_eq!(
        h.publisher.events().await.len(),
        1,
        "only the first settlement transitions the invoice"
    );
}

// Different orders have no ordering requirement and may interleave freely.

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn independent_orders_process_in_parallel() {
    let h = setup();
    for i in 0..6 {
        seed_invoice(&h, &format!("INV-P{i}"), PaymentMethod::BriVa).await;
    }

    let mut handles = Vec::new();
    for i in 0..6 {
        let service = h.service.clone();
        handles.push(tokio::spawn(async move {
            let order = format!("INV-P{i}");
            let n = make_notification(&order, "settlement", &format!("TX-P{i}"), "10000");
            service.handle_notification(n).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(h.transactions.len().await, 6);
    for i in 0..6 {
        let invoice = h.invoices.find_by_number(&format!("INV-P{i}")).await.unwrap();
        assert_eq!(invoice.state(), InvoiceState::Paid);
    }
}
