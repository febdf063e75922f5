use {
    super::api_errors::ApiError,
    crate::AppState,
    crate::domain::invoice::{BillingAddress, Invoice, LineItem},
    crate::domain::method::PaymentMethod,
    crate::domain::money::{Currency, MoneyAmount},
    crate::gateway::GatewayRequest,
    axum::{
        Json,
        extract::{Path, State},
    },
    chrono::{Duration, Utc},
    serde::Deserialize,
};

#[derive(Debug, Deserialize)]
pub struct LineItemRequest {
    pub name: String,
    pub category: String,
    pub merchant_name: String,
    #[serde(default)]
    pub description: String,
    pub currency: Currency,
    pub unit_price: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub number: String,
    pub payer: BillingAddress,
    pub item: Option<LineItemRequest>,
    /// Seconds until the invoice is due.
    pub duration_secs: i64,
    pub payment_method: PaymentMethod,
}

/// Development-host route: seeds an invoice so the charge and notification
/// flows have something to act on. Real deployments own invoices elsewhere.
pub async fn create_invoice_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<Json<Invoice>, ApiError> {
    let line_item = match request.item {
        Some(item) => Some(
            LineItem::new(
                item.name,
                item.category,
                item.merchant_name,
                MoneyAmount::new(item.unit_price)?,
                item.currency,
            )
            .with_description(item.description),
        ),
        None => None,
    };

    let now = Utc::now();
    let invoice = Invoice::new(
        request.number,
        request.payer,
        line_item,
        now,
        now + Duration::seconds(request.duration_secs),
        request.payment_method,
    );

    state.invoices.save(&invoice).await?;
    Ok(Json(invoice))
}

/// Translates a stored invoice into its provider-shaped request.
pub async fn charge_handler(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<GatewayRequest>, ApiError> {
    let request = state.service.charge_request(&number).await?;
    Ok(Json(request))
}
