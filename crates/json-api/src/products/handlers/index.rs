//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ApiError,
    extensions::*,
    products::{get::ProductResponse, into_api_error},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsEnvelope {
    pub message: String,

    /// The catalog, excluding deleted products
    pub data: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Returns a list of products.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products()
        .await
        .map_err(into_api_error)?;

    Ok(Json(ProductsEnvelope {
        message: "Products retrieved successfully".to_string(),
        data: products.into_iter().map(Into::into).collect(),
    }))
}
