//! API Errors
//!
//! Every failed request renders the same envelope as a successful one, minus
//! `data`: a `message`, plus field-level `errors` for validation failures or
//! an `error` description for server faults.

use std::{collections::BTreeMap, fmt::Display};

use salvo::{
    FlowCtrl, Response, handler,
    http::{ResBody, StatusCode},
    oapi::{
        Components, Content, EndpointOutRegister, Operation, RefOr, Schema, ToSchema,
        Response as OapiResponse,
    },
    writing::{Json, Scribe},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned};

const VALIDATION_MESSAGE: &str = "The given data was invalid.";
const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    /// Human-readable summary
    pub message: String,

    /// Validation failures keyed by request field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,

    /// Description of an unexpected failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An HTTP error rendered as an [`ErrorBody`].
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                message: message.into(),
                errors: None,
                error: None,
            },
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub(crate) fn unprocessable(errors: BTreeMap<String, Vec<String>>) -> Self {
        let mut error = Self::new(StatusCode::UNPROCESSABLE_ENTITY, VALIDATION_MESSAGE);

        error.body.errors = Some(errors);

        error
    }

    /// A 500 carrying `error` as its description. Callers log the source.
    pub(crate) fn internal(error: impl Display) -> Self {
        let mut api_error = Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE);

        api_error.body.error = Some(error.to_string());

        api_error
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    pub(crate) fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(self.body));
    }
}

/// Catcher hoop that renders errors raised outside the handlers (body or
/// path extraction failures, unmatched routes) as an [`ErrorBody`].
#[handler]
pub(crate) async fn error_envelope(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res
        .status_code
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match res.take_body() {
        ResBody::Error(error) if !error.brief.is_empty() => error.brief,
        _ => status
            .canonical_reason()
            .unwrap_or(INTERNAL_MESSAGE)
            .to_string(),
    };

    res.render(ApiError::new(status, message));
    ctrl.skip_rest();
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        let schema = ErrorBody::to_schema(components);

        operation.responses.insert(
            "default",
            OapiResponse::new("Error envelope")
                .add_content("application/json", Content::new(schema)),
        );
    }
}

/// A request body field whose absence or wrong JSON type is reported as a
/// validation failure instead of rejecting the whole body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Field<T> {
    Missing,
    Invalid,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        if value.is_null() {
            return Ok(Self::Missing);
        }

        Ok(serde_json::from_value(value).map_or(Self::Invalid, Self::Value))
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Missing | Self::Invalid => serializer.serialize_none(),
        }
    }
}

impl<T: ToSchema> ToSchema for Field<T> {
    fn to_schema(components: &mut Components) -> RefOr<Schema> {
        T::to_schema(components)
    }
}

/// Collects field-level validation failures for a request body.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    errors: BTreeMap<String, Vec<String>>,
}

impl Validator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `valid` holds.
    pub(crate) fn check(&mut self, valid: bool, field: &str, message: &str) -> &mut Self {
        if !valid {
            let messages = self.errors.entry(field.to_string()).or_default();

            if !messages.iter().any(|existing| existing == message) {
                messages.push(message.to_string());
            }
        }

        self
    }

    pub(crate) fn required(&mut self, value: &str, field: &str) -> &mut Self {
        self.check(
            !value.trim().is_empty(),
            field,
            &format!("The {field} field is required."),
        )
    }

    pub(crate) fn max_length(&mut self, value: &str, max: usize, field: &str) -> &mut Self {
        self.check(
            value.chars().count() <= max,
            field,
            &format!("The {field} field must not be greater than {max} characters."),
        )
    }

    /// Unwrap a required `value`, recording a failure against `field` when
    /// it is absent or has the wrong type.
    pub(crate) fn take<T: Default>(&mut self, value: Field<T>, field: &str) -> T {
        match value {
            Field::Value(value) => return value,
            Field::Missing => {
                self.check(false, field, &format!("The {field} field is required."));
            }
            Field::Invalid => {
                self.check(false, field, &format!("The {field} field is invalid."));
            }
        }

        T::default()
    }

    /// Like [`Validator::take`] for a field that may be left out.
    pub(crate) fn take_optional<T>(&mut self, value: Field<T>, field: &str) -> Option<T> {
        match value {
            Field::Value(value) => Some(value),
            Field::Missing => None,
            Field::Invalid => {
                self.check(false, field, &format!("The {field} field is invalid."));

                None
            }
        }
    }

    pub(crate) fn finish(&mut self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            return Ok(());
        }

        Err(ApiError::unprocessable(std::mem::take(&mut self.errors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validator_without_failures_passes() {
        let result = Validator::new()
            .required("cod", "payment_method")
            .max_length("cod", 10, "payment_method")
            .finish();

        assert!(result.is_ok(), "expected validation to pass");
    }

    #[test]
    fn validator_groups_messages_by_field() {
        let result = Validator::new()
            .required("  ", "color")
            .max_length("  ", 1, "color")
            .required("M", "size")
            .finish();

        let error = result.err();

        assert_eq!(
            error.as_ref().map(ApiError::status),
            Some(StatusCode::UNPROCESSABLE_ENTITY)
        );
        assert_eq!(
            error.as_ref().map(|error| error.body().message.as_str()),
            Some(VALIDATION_MESSAGE)
        );

        let errors = error
            .and_then(|error| error.body.errors)
            .unwrap_or_default();

        assert_eq!(errors.len(), 1, "only color should fail");
        assert_eq!(
            errors.get("color").map(Vec::len),
            Some(2),
            "both color checks should be reported"
        );
    }

    #[derive(Debug, Deserialize)]
    struct Quantity {
        #[serde(default)]
        quantity: Field<u32>,
    }

    fn quantity(json: &str) -> Option<Field<u32>> {
        serde_json::from_str::<Quantity>(json)
            .ok()
            .map(|body| body.quantity)
    }

    #[test]
    fn fields_defer_type_errors() {
        assert_eq!(quantity(r#"{"quantity": 3}"#), Some(Field::Value(3)));
        assert_eq!(quantity("{}"), Some(Field::Missing));
        assert_eq!(quantity(r#"{"quantity": null}"#), Some(Field::Missing));
        assert_eq!(quantity(r#"{"quantity": -1}"#), Some(Field::Invalid));
        assert_eq!(quantity(r#"{"quantity": "two"}"#), Some(Field::Invalid));
    }

    #[test]
    fn take_reports_missing_and_invalid_fields() {
        let mut validator = Validator::new();

        let cart = validator.take(Field::<u32>::Missing, "cart_id");
        let quantity = validator.take(Field::<u32>::Invalid, "quantity");
        let discount = validator.take_optional(Field::<u64>::Missing, "discount");
        let color = validator.take(Field::Value("red".to_string()), "color");

        assert_eq!((cart, quantity, discount), (0, 0, None));
        assert_eq!(color, "red");

        let errors = validator
            .finish()
            .err()
            .and_then(|error| error.body.errors)
            .unwrap_or_default();

        assert_eq!(
            errors.get("cart_id"),
            Some(&vec!["The cart_id field is required.".to_string()])
        );
        assert_eq!(
            errors.get("quantity"),
            Some(&vec!["The quantity field is invalid.".to_string()])
        );
        assert!(!errors.contains_key("discount"), "optional fields may be absent");
    }

    #[test]
    fn internal_error_carries_description_only() {
        let error = ApiError::internal("storage error");

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.body().error.as_deref(), Some("storage error"));
        assert!(error.body().errors.is_none(), "no field errors on a 500");
    }
}
