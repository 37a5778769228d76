//! Customer Errors

use tracing::error;

use storefront_app::domain::customers::CustomersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CustomersServiceError) -> ApiError {
    match error {
        CustomersServiceError::AlreadyExists => ApiError::conflict("Customer already exists"),
        CustomersServiceError::NotFound => ApiError::not_found("Customer not found"),
        CustomersServiceError::MissingRequiredData | CustomersServiceError::InvalidData => {
            ApiError::bad_request("Invalid customer payload")
        }
        CustomersServiceError::Sql(ref source) => {
            error!("customers service failed: {source}");

            ApiError::internal(error)
        }
    }
}
