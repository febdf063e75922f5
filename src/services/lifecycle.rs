use {
    super::PaymentService,
    crate::domain::error::PaymentError,
    crate::domain::invoice::{Invoice, InvoiceState},
    crate::domain::ports::InvoiceEvent,
};

#[derive(Debug, Clone)]
pub struct PayInvoiceCommand {
    /// Provider transaction id recorded on the invoice as correlation.
    pub transaction_id: String,
}

impl PaymentService {
    /// Transitions the invoice to paid. Re-applying on an already-paid
    /// invoice returns it unchanged without publishing anything; an invoice
    /// that already failed stays failed.
    pub async fn pay_invoice(
        &self,
        number: &str,
        command: PayInvoiceCommand,
    ) -> Result<Invoice, PaymentError> {
        let current = self.invoices.find_by_number(number).await?;
        if current.state() == InvoiceState::Paid {
            tracing::info!(invoice = %number, "invoice already paid");
            return Ok(current);
        }
        if current.state().is_terminal() {
            tracing::warn!(invoice = %number, state = %current.state(), "terminal invoice, payment ignored");
            return Ok(current);
        }

        let invoice = self
            .invoices
            .mark_paid(number, &command.transaction_id)
            .await?;
        tracing::info!(invoice = %number, transaction_id = %command.transaction_id, "invoice paid");
        self.publish(InvoiceEvent::paid(number, command.transaction_id))
            .await;
        Ok(invoice)
    }

    /// Transitions the invoice to failed. No-op once terminal.
    pub async fn fail_invoice(&self, number: &str) -> Result<Invoice, PaymentError> {
        let current = self.invoices.find_by_number(number).await?;
        if current.state().is_terminal() {
            tracing::info!(invoice = %number, state = %current.state(), "invoice already terminal");
            return Ok(current);
        }

        let invoice = self.invoices.mark_failed(number).await?;
        tracing::info!(invoice = %number, "invoice failed");
        self.publish(InvoiceEvent::failed(number)).await;
        Ok(invoice)
    }

    /// Moves the invoice to processing. Terminal states win; re-applying on
    /// an invoice already processing changes nothing.
    pub async fn process_invoice(&self, number: &str) -> Result<Invoice, PaymentError> {
        let current = self.invoices.find_by_number(number).await?;
        if current.state().is_terminal() || current.state() == InvoiceState::Processing {
            return Ok(current);
        }

        let invoice = self.invoices.mark_processing(number).await?;
        tracing::info!(invoice = %number, "invoice processing");
        self.publish(InvoiceEvent::processing(number)).await;
        Ok(invoice)
    }

    /// Event publication never rolls back a committed transition; failures
    /// are logged and dropped.
    async fn publish(&self, event: InvoiceEvent) {
        if let Err(e) = self.publisher.publish(event.clone()).await {
            tracing::error!(
                error = %e,
                invoice = %event.invoice_number(),
                "event publish failed"
            );
        }
    }
}
