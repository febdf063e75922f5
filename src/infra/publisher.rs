use {
    crate::domain::error::PaymentError,
    crate::domain::ports::{EventPublisher, InvoiceEvent},
    async_trait::async_trait,
    std::sync::Arc,
    tokio::sync::RwLock,
};

/// Publisher for deployments without a broker: every event becomes one
/// structured log line.
#[derive(Default, Clone)]
pub struct LoggingEventPublisher;

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: InvoiceEvent) -> Result<(), PaymentError> {
        tracing::info!(
            event_id = %event.id,
            invoice = %event.invoice_number(),
            kind = ?event.kind,
            "invoice event"
        );
        Ok(())
    }
}

/// Captures published events for inspection in tests.
#[derive(Default, Clone)]
pub struct RecordingEventPublisher {
    events: Arc<RwLock<Vec<InvoiceEvent>>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<InvoiceEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: InvoiceEvent) -> Result<(), PaymentError> {
        self.events.write().await.push(event);
        Ok(())
    }
}
