//! Checkout Handler
//!
//! Carts live on the client, so the whole cart is posted with the contact details and the
//! server answers with the composed message and deep link for the client to open.

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use bakehouse::{
    cart::Cart,
    orders::{CheckoutError, SubmittedOrder},
};
use tracing::{error, info};

use crate::{extensions::*, state::State};

/// Checkout Request
#[derive(Debug, Deserialize)]
pub(crate) struct CheckoutRequest {
    #[serde(default)]
    pub cart: Cart,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub phone: String,
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// Rendered order message
    pub message: String,

    /// Deep link opening a chat with the message prefilled
    pub url: String,

    /// Order total
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub total: rust_decimal::Decimal,
}

impl From<SubmittedOrder> for CheckoutResponse {
    fn from(order: SubmittedOrder) -> Self {
        Self {
            message: order.message,
            url: order.url,
            total: order.total,
        }
    }
}

/// Checkout Handler
///
/// Validates the cart and contact details and composes the order message.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Order composed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed body"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Cart or contact details incomplete"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let request: CheckoutRequest = req
        .parse_json()
        .await
        .or_400("Expected a cart with name and phone")?;

    let order = state
        .checkout
        .submit(&request.cart, &request.name, &request.phone, || {
            info!(lines = request.cart.len(), "order composed");
        })
        .map_err(|err| match err {
            CheckoutError::Invalid(reason) => {
                StatusError::unprocessable_entity().brief(reason.to_string())
            }
            CheckoutError::Open(source) => {
                error!("failed to hand off order link: {source}");

                StatusError::internal_server_error()
            }
        })?;

    Ok(Json(order.into()))
}
