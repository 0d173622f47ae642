use axum::Json;
use axum::extract::{Path, State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::application::checkout::CaptureRequest;
use crate::domain::order::{LineItem, Order};
use crate::error::Result;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentRequest {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub total: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub success: bool,
    /// Provider intent id; the client-side payment UI consumes it.
    pub order_id: String,
    pub status: String,
}

/// `orderId` is the provider intent id the payer approved; the order record
/// itself does not exist until capture succeeds.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOrderRequest {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub total: Decimal,
}

impl From<CaptureOrderRequest> for CaptureRequest {
    fn from(request: CaptureOrderRequest) -> Self {
        Self {
            intent_id: request.order_id,
            user_id: request.user_id,
            items: request.items,
            total: request.total,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CaptureOrderResponse {
    pub success: bool,
    pub order: Order,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn create_intent(
    State(state): State<AppState>,
    Json(request): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>> {
    let handle = state
        .engine
        .create_intent(&request.items, request.total)
        .await?;

    Ok(Json(CreateIntentResponse {
        success: true,
        order_id: handle.id,
        status: handle.status,
    }))
}

pub async fn capture_order(
    State(state): State<AppState>,
    Json(request): Json<CaptureOrderRequest>,
) -> Result<Json<CaptureOrderResponse>> {
    let order = state.engine.capture(request.into()).await?;

    Ok(Json(CaptureOrderResponse {
        success: true,
        order,
    }))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    Ok(Json(state.engine.order(&id).await?))
}

pub async fn user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.engine.orders_for_user(&user_id).await?))
}
