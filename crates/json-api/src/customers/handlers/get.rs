//! Get Customer Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::customers::records::CustomerRecord;

use crate::{customers::into_api_error, errors::ApiError, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    /// The unique identifier of the customer
    pub id: Uuid,

    pub name: String,

    pub email: String,

    /// The date and time the customer was created
    pub created_at: String,

    /// The date and time the customer was last updated
    pub updated_at: String,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(customer: CustomerRecord) -> Self {
        CustomerResponse {
            id: customer.uuid.into(),
            name: customer.name,
            email: customer.email,
            created_at: customer.created_at.to_string(),
            updated_at: customer.updated_at.to_string(),
        }
    }
}

/// Customer Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerEnvelope {
    pub message: String,
    pub data: CustomerResponse,
}

/// Get Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Get Customer",
    responses(
        (status_code = StatusCode::OK, description = "Customer found"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CustomerEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = state
        .app
        .customers
        .get_customer(customer.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(CustomerEnvelope {
        message: "Customer retrieved successfully".to_string(),
        data: customer.into(),
    }))
}
