//! Order Errors

use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    match error {
        OrdersServiceError::CustomerNotFound => ApiError::not_found("Customer not found"),
        OrdersServiceError::CartNotFound => ApiError::not_found("Cart not found"),
        OrdersServiceError::NotFound => ApiError::not_found("Order not found"),
        OrdersServiceError::EmptyCart => ApiError::bad_request("No items in cart to checkout"),
        OrdersServiceError::InvalidDiscount => {
            ApiError::bad_request("Discount exceeds order total")
        }
        OrdersServiceError::InvalidTransition { from, to } => {
            ApiError::bad_request(format!("Cannot move order from {from} to {to}"))
        }
        OrdersServiceError::AlreadyExists => ApiError::conflict("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => ApiError::bad_request("Invalid order payload"),
        OrdersServiceError::OrderCreationFailed(ref source) => {
            error!("checkout rolled back: {source}");

            ApiError::internal(error)
        }
        OrdersServiceError::Sql(ref source) => {
            error!("orders service failed: {source}");

            ApiError::internal(error)
        }
    }
}
