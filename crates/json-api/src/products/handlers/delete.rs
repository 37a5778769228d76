//! Delete Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{errors::ApiError, extensions::*, products::into_api_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeletedProduct {
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDeletedEnvelope {
    pub message: String,
    pub data: DeletedProduct,
}

/// Delete Product Handler
///
/// Soft-deletes the product. It disappears from the catalog and can no longer
/// be added to carts.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductDeletedEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();

    state
        .app
        .products
        .delete_product(product.into())
        .await
        .map_err(into_api_error)?;

    info!(product_uuid = %product, "deleted product");

    Ok(Json(ProductDeletedEnvelope {
        message: "Product deleted successfully".to_string(),
        data: DeletedProduct { id: product },
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::products::{ProductsServiceError, records::ProductUuid};

    use crate::test_helpers::{Mocks, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("products/{product}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_product_success() -> TestResult {
        let uuid = ProductUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_delete_product()
            .once()
            .withf(move |product| *product == uuid)
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete(format!("http://example.com/products/{uuid}"))
            .send(&make_service(mocks))
            .await;

        let envelope: ProductDeletedEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(envelope.data.id, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_twice_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_delete_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/products/{}",
            ProductUuid::new()
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
