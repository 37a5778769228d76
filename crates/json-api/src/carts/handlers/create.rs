//! Add To Cart Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storefront_app::domain::carts::data::AddToCart;

use crate::{
    carts::{get::CartEnvelope, into_api_error},
    errors::{ApiError, Field, Validator},
    extensions::*,
    observability::record_cart_line_added,
    state::State,
};

const MAX_VARIANT_LENGTH: usize = 50;

/// Add To Cart Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct AddToCartRequest {
    pub customer_id: Field<Uuid>,
    pub product_id: Field<Uuid>,
    pub quantity: Field<u32>,
    pub color: Field<String>,
    pub size: Field<String>,
}

impl AddToCartRequest {
    fn into_item(self) -> Result<AddToCart, ApiError> {
        let mut validator = Validator::new();

        let customer_id = validator.take(self.customer_id, "customer_id");
        let product_id = validator.take(self.product_id, "product_id");
        let quantity = match self.quantity {
            Field::Value(quantity) => {
                validator.check(
                    quantity >= 1,
                    "quantity",
                    "The quantity field must be at least 1.",
                );

                quantity
            }
            missing_or_invalid => validator.take(missing_or_invalid, "quantity"),
        };
        let color = validator.take(self.color, "color");
        let size = validator.take(self.size, "size");

        validator
            .required(&color, "color")
            .max_length(&color, MAX_VARIANT_LENGTH, "color")
            .required(&size, "size")
            .max_length(&size, MAX_VARIANT_LENGTH, "size")
            .finish()?;

        Ok(AddToCart {
            customer_uuid: customer_id.into(),
            product_uuid: product_id.into(),
            quantity,
            color: color.trim().to_string(),
            size: size.trim().to_string(),
        })
    }
}

/// Add To Cart Handler
///
/// Adds a product to the customer's open cart, opening one if needed. Adding
/// the same product, color and size again increases the existing line's
/// quantity at the price it was first added at.
#[endpoint(
    tags("carts"),
    summary = "Add To Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Product added to cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer or product not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let item = json.into_inner().into_item()?;

    let cart = state
        .app
        .carts
        .add_to_cart(item)
        .await
        .map_err(into_api_error)?;

    record_cart_line_added();

    info!(
        cart_uuid = %cart.uuid,
        customer_uuid = %cart.customer_uuid,
        total_price = cart.total_price,
        "product added to cart"
    );

    res.add_header(LOCATION, format!("/carts/{}", cart.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CartEnvelope {
        message: "Product added to cart successfully".to_string(),
        data: cart.into(),
    }))
}
