//! Order placement, verification, listing, and status endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::{Money, OrderId, UserId};
use gateway::PaymentGateway;
use orders::{OrderService, PlaceOrder, Verification};
use serde::{Deserialize, Serialize};
use store::{Order, OrderItem, OrderStore, UserStore};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: OrderStore + UserStore, G: PaymentGateway> {
    pub order_service: OrderService<S, G>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub items: Vec<ItemRequest>,
    pub amount: i64,
    pub address: serde_json::Value,
    #[serde(default)]
    pub discount: i64,
    #[serde(default)]
    pub delivery: i64,
}

/// One line item, priced in major currency units on the wire.
#[derive(Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub price: i64,
    pub quantity: u32,
}

#[derive(Deserialize)]
pub struct VerifyRequest {
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
    pub success: bool,
}

#[derive(Deserialize)]
pub struct UserOrdersRequest {
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
    pub status: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub session_url: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct DataResponse {
    pub success: bool,
    pub data: Vec<Order>,
}

// -- Handlers --

/// POST /api/order/place — create an order and open its checkout session.
#[tracing::instrument(skip(state, req))]
pub async fn place<S, G>(
    State(state): State<Arc<AppState<S, G>>>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<Json<SessionResponse>, ApiError>
where
    S: OrderStore + UserStore + 'static,
    G: PaymentGateway + 'static,
{
    let items = req
        .items
        .into_iter()
        .map(|item| OrderItem::new(item.name, Money::from_major(item.price), item.quantity))
        .collect();

    let cmd = PlaceOrder {
        user_id: req.user_id,
        items,
        amount: Money::from_major(req.amount),
        address: req.address,
        discount: Money::from_major(req.discount),
        delivery: Money::from_major(req.delivery),
    };

    let session = state
        .order_service
        .place_order(cmd)
        .await
        .map_err(|e| ApiError::internal("Error placing order", e))?;

    Ok(Json(SessionResponse {
        success: true,
        session_url: session.url,
    }))
}

/// POST /api/order/verify — apply the payment callback for an order.
#[tracing::instrument(skip(state, req), fields(order_id = %req.order_id, success = req.success))]
pub async fn verify<S, G>(
    State(state): State<Arc<AppState<S, G>>>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<MessageResponse>, ApiError>
where
    S: OrderStore + UserStore + 'static,
    G: PaymentGateway + 'static,
{
    let outcome = state
        .order_service
        .verify_order(req.order_id, req.success)
        .await
        .map_err(|e| ApiError::internal("Error verifying order", e))?;

    let response = match outcome {
        Verification::Confirmed => MessageResponse {
            success: true,
            message: "Payment successful",
        },
        Verification::Discarded => MessageResponse {
            success: false,
            message: "Payment failed, order deleted",
        },
    };

    Ok(Json(response))
}

/// POST /api/order/userorders — list the calling user's orders.
#[tracing::instrument(skip(state, req), fields(user_id = %req.user_id))]
pub async fn user_orders<S, G>(
    State(state): State<Arc<AppState<S, G>>>,
    Json(req): Json<UserOrdersRequest>,
) -> Result<Json<DataResponse>, ApiError>
where
    S: OrderStore + UserStore + 'static,
    G: PaymentGateway + 'static,
{
    let data = state
        .order_service
        .user_orders(req.user_id)
        .await
        .map_err(|e| ApiError::internal("Error retrieving user orders", e))?;

    Ok(Json(DataResponse {
        success: true,
        data,
    }))
}

/// GET /api/order/list — list every order, for the admin panel.
#[tracing::instrument(skip(state))]
pub async fn list<S, G>(
    State(state): State<Arc<AppState<S, G>>>,
) -> Result<Json<DataResponse>, ApiError>
where
    S: OrderStore + UserStore + 'static,
    G: PaymentGateway + 'static,
{
    let data = state
        .order_service
        .list_orders()
        .await
        .map_err(|e| ApiError::internal("Error listing orders", e))?;

    Ok(Json(DataResponse {
        success: true,
        data,
    }))
}

/// POST /api/order/status — overwrite an order's status text.
#[tracing::instrument(skip(state, req), fields(order_id = %req.order_id))]
pub async fn status<S, G>(
    State(state): State<Arc<AppState<S, G>>>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<MessageResponse>, ApiError>
where
    S: OrderStore + UserStore + 'static,
    G: PaymentGateway + 'static,
{
    state
        .order_service
        .update_status(req.order_id, req.status)
        .await
        .map_err(|e| ApiError::internal("Error updating order status", e))?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Order status updated",
    }))
}
