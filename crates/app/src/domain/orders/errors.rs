//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::orders::records::OrderStatus;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("customer not found")]
    CustomerNotFound,

    #[error("cart not found")]
    CartNotFound,

    #[error("order not found")]
    NotFound,

    #[error("no items in cart to checkout")]
    EmptyCart,

    #[error("discount exceeds order total")]
    InvalidDiscount,

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The order could not be written; nothing was committed.
    #[error("failed to create order")]
    OrderCreationFailed(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if matches!(error, Error::Encode(_)) {
            return Self::InvalidData;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_names_both_statuses() {
        let error = OrdersServiceError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        };

        assert_eq!(
            error.to_string(),
            "cannot move order from delivered to pending"
        );
    }
}
