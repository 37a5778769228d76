//! Product Errors

use tracing::error;

use storefront_app::domain::products::ProductsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: ProductsServiceError) -> ApiError {
    match error {
        ProductsServiceError::AlreadyExists => ApiError::conflict("Product already exists"),
        ProductsServiceError::NotFound => ApiError::not_found("Product not found"),
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => ApiError::bad_request("Invalid product payload"),
        ProductsServiceError::Sql(ref source) => {
            error!("products service failed: {source}");

            ApiError::internal(error)
        }
    }
}
