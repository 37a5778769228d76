//! Customer Open Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{self, get::CartEnvelope},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Customer Open Cart Handler
///
/// Returns the customer's open cart. A customer has no open cart until they
/// first add to cart, and none again after checkout until the next add.
#[endpoint(
    tags("customers", "carts"),
    summary = "Get Customer Open Cart",
    responses(
        (status_code = StatusCode::OK, description = "Open cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer or open cart not found"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .get_open_cart(customer.into_inner().into())
        .await
        .map_err(carts::into_api_error)?;

    Ok(Json(CartEnvelope {
        message: "Cart retrieved successfully".to_string(),
        data: cart.into(),
    }))
}
