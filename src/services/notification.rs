use {
    super::PaymentService,
    super::lifecycle::PayInvoiceCommand,
    crate::domain::error::PaymentError,
    crate::domain::transaction::{ProviderNotification, TransactionStatus, parse_transaction_time},
    chrono::Utc,
};

impl PaymentService {
    /// Reconciles one inbound provider notification into the per-order
    /// transaction record and the invoice lifecycle.
    ///
    /// The sign key is re-verified against the merged record before anything
    /// is persisted; a mismatch leaves any prior stored status untouched.
    /// Once the record is saved, a lifecycle failure propagates so the
    /// provider redelivers — re-running the mapping is idempotent.
    #[tracing::instrument(
        name = "notification",
        skip_all,
        fields(
            order_id = %notification.order_id,
            transaction_id = %notification.transaction_id,
            gross_amount = %notification.gross_amount,
            transaction_status = %notification.transaction_status,
        )
    )]
    pub async fn handle_notification(
        &self,
        notification: ProviderNotification,
    ) -> Result<(), PaymentError> {
        let lock = self.order_locks.acquire(&notification.order_id);
        let _guard = lock.lock().await;

        // Absence just means this is the first notification for the order.
        let stored = self
            .transactions
            .find_by_order_id(&notification.order_id)
            .await?;

        let transaction_time = match parse_transaction_time(&notification.transaction_time) {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(raw = %notification.transaction_time, "cannot parse transaction time");
                return Err(e);
            }
        };

        let status = match stored {
            None => TransactionStatus::from_notification(&notification, transaction_time, Utc::now()),
            Some(mut existing) => {
                existing.merge(&notification, transaction_time);
                existing
            }
        };

        if let Err(e) = status.verify_signature(&self.config.server_key) {
            tracing::warn!("notification sign key mismatch");
            return Err(e);
        }

        self.transactions.save(&status).await?;

        if let Err(e) = self.apply_transaction(&status).await {
            tracing::error!(error = %e, "lifecycle dispatch failed");
            return Err(e);
        }

        Ok(())
    }

    /// Maps the merged provider status onto an invoice lifecycle action. A
    /// captured-but-not-accepted payment and an unrecognized status both log a
    /// warning and succeed without a transition.
    async fn apply_transaction(&self, status: &TransactionStatus) -> Result<(), PaymentError> {
        match status.transaction_status.as_str() {
            "capture" => {
                if status.payment_type == "credit_card" && status.fraud_status == "accept" {
                    self.pay_invoice(
                        status.order_id(),
                        PayInvoiceCommand {
                            transaction_id: status.transaction_id.clone(),
                        },
                    )
                    .await?;
                } else {
                    tracing::warn!(
                        payment_type = %status.payment_type,
                        fraud_status = %status.fraud_status,
                        "transaction captured, potentially fraud"
                    );
                }
            }
            "settlement" => {
                self.pay_invoice(
                    status.order_id(),
                    PayInvoiceCommand {
                        transaction_id: status.transaction_id.clone(),
                    },
                )
                .await?;
            }
            "deny" | "expire" | "cancel" => {
                self.fail_invoice(status.order_id()).await?;
            }
            "pending" => {
                self.process_invoice(status.order_id()).await?;
            }
            other => {
                tracing::warn!(transaction_status = %other, "payment status type is unidentified");
            }
        }

        Ok(())
    }
}
