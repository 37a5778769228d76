//! Create Customer Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_app::domain::customers::{data::NewCustomer, records::CustomerUuid};

use crate::{
    customers::{get::CustomerEnvelope, into_api_error},
    errors::{ApiError, Field, Validator},
    extensions::*,
    state::State,
};

/// Create Customer Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CreateCustomerRequest {
    pub name: Field<String>,
    pub email: Field<String>,
}

impl CreateCustomerRequest {
    fn into_customer(self) -> Result<NewCustomer, ApiError> {
        let mut validator = Validator::new();

        let name = validator.take(self.name, "name");
        let email = validator.take(self.email, "email");

        validator
            .required(&name, "name")
            .max_length(&name, 255, "name")
            .required(&email, "email")
            .max_length(&email, 255, "email")
            .check(
                email.is_empty() || is_plausible_email(&email),
                "email",
                "The email field must be a valid email address.",
            )
            .finish()?;

        Ok(NewCustomer {
            uuid: CustomerUuid::new(),
            name: name.trim().to_string(),
            email: email.trim().to_lowercase(),
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}

/// Create Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Create Customer",
    responses(
        (status_code = StatusCode::CREATED, description = "Customer created"),
        (status_code = StatusCode::CONFLICT, description = "Customer already exists"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Validation failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCustomerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CustomerEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = json.into_inner().into_customer()?;

    let customer = state
        .app
        .customers
        .create_customer(customer)
        .await
        .map_err(into_api_error)?;

    info!(customer_uuid = %customer.uuid, "created customer");

    res.add_header(LOCATION, format!("/customers/{}", customer.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CustomerEnvelope {
        message: "Customer created successfully".to_string(),
        data: customer.into(),
    }))
}
