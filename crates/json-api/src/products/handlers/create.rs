//! Create Product Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_app::domain::products::{data::NewProduct, records::ProductUuid};

use crate::{
    errors::{ApiError, Field},
    extensions::*,
    products::{get::ProductEnvelope, into_api_error},
    state::State,
};

use super::{ValidProduct, validate_product};

/// Create Product Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CreateProductRequest {
    pub name: Field<String>,
    pub image: Field<String>,

    /// Price in minor units
    pub price: Field<u64>,
}

impl From<ValidProduct> for NewProduct {
    fn from(product: ValidProduct) -> Self {
        NewProduct {
            uuid: ProductUuid::new(),
            name: product.name,
            image: product.image,
            price: product.price,
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let product = validate_product(request.name, request.image, request.price)?;

    let product = state
        .app
        .products
        .create_product(product.into())
        .await
        .map_err(into_api_error)?;

    info!(product_uuid = %product.uuid, price = product.price, "created product");

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductEnvelope {
        message: "Product created successfully".to_string(),
        data: product.into(),
    }))
}
