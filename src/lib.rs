pub mod adapters;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod infra;
pub mod services;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<services::PaymentService>,
    pub invoices: Arc<dyn domain::ports::InvoiceRepository>,
}
