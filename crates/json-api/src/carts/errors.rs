//! Cart Errors

use std::collections::BTreeMap;

use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    match error {
        CartsServiceError::CustomerNotFound => ApiError::not_found("Customer not found"),
        CartsServiceError::ProductNotFound => ApiError::not_found("Product not found"),
        CartsServiceError::NotFound => ApiError::not_found("Cart not found"),
        CartsServiceError::LineNotFound => ApiError::not_found("Cart item not found"),
        CartsServiceError::InvalidQuantity => ApiError::unprocessable(BTreeMap::from([(
            "quantity".to_string(),
            vec!["The quantity field must be at least 1.".to_string()],
        )])),
        CartsServiceError::AlreadyExists => ApiError::conflict("Cart already exists"),
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => ApiError::bad_request("Invalid cart payload"),
        CartsServiceError::Sql(ref source) => {
            error!("carts service failed: {source}");

            ApiError::internal(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn lookup_failures_map_to_404() {
        for error in [
            CartsServiceError::CustomerNotFound,
            CartsServiceError::ProductNotFound,
            CartsServiceError::NotFound,
            CartsServiceError::LineNotFound,
        ] {
            assert_eq!(into_api_error(error).status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn zero_quantity_is_a_field_error() {
        let error = into_api_error(CartsServiceError::InvalidQuantity);

        assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(
            error
                .body()
                .errors
                .as_ref()
                .is_some_and(|errors| errors.contains_key("quantity")),
            "quantity should be reported"
        );
    }
}
