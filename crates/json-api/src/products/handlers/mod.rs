//! Product Handlers

use crate::errors::{ApiError, Field, Validator};

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

/// Prices are stored as signed 64-bit minor units.
const MAX_PRICE: u64 = i64::MAX.unsigned_abs();

/// Product fields accepted by create and update.
pub(crate) struct ValidProduct {
    name: String,
    image: Option<String>,
    price: u64,
}

/// Checks shared by create and update payloads.
fn validate_product(
    name: Field<String>,
    image: Field<String>,
    price: Field<u64>,
) -> Result<ValidProduct, ApiError> {
    let mut validator = Validator::new();

    let name = validator.take(name, "name");
    let image = validator.take_optional(image, "image");
    let price = validator.take(price, "price");

    validator
        .required(&name, "name")
        .max_length(&name, 255, "name")
        .max_length(image.as_deref().unwrap_or_default(), 2_048, "image")
        .check(
            price <= MAX_PRICE,
            "price",
            "The price field is too large.",
        )
        .finish()?;

    Ok(ValidProduct {
        name: name.trim().to_string(),
        image: image
            .map(|image| image.trim().to_string())
            .filter(|image| !image.is_empty()),
        price,
    })
}
