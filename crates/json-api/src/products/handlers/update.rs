//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use storefront_app::domain::products::data::ProductUpdate;

use crate::{
    errors::{ApiError, Field},
    extensions::*,
    products::{get::ProductEnvelope, into_api_error},
    state::State,
};

use super::{ValidProduct, validate_product};

/// Update Product Request
///
/// Lines already in carts and orders keep the values they were priced with.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct UpdateProductRequest {
    pub name: Field<String>,
    pub image: Field<String>,

    /// Price in minor units
    pub price: Field<u64>,
}

impl From<ValidProduct> for ProductUpdate {
    fn from(product: ValidProduct) -> Self {
        ProductUpdate {
            name: product.name,
            image: product.image,
            price: product.price,
        }
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let update = validate_product(request.name, request.image, request.price)?;

    let product = state
        .app
        .products
        .update_product(product.into_inner().into(), update.into())
        .await
        .map_err(into_api_error)?;

    info!(product_uuid = %product.uuid, price = product.price, "updated product");

    Ok(Json(ProductEnvelope {
        message: "Product updated successfully".to_string(),
        data: product.into(),
    }))
}
