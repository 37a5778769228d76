//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .repository
            .find_product(&mut tx, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_uuid = %product.uuid, price = product.price),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, update),
        fields(product_uuid = %product, price = update.price),
        err
    )]
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, update)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self),
        fields(product_uuid = %product),
        err
    )]
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all live products.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces a product's name, image and price.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product; existing cart lines and orders keep their copies.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{SpanCapture, TestContext};

    use super::*;

    fn new_product(uuid: ProductUuid, price: u64) -> NewProduct {
        NewProduct {
            uuid,
            name: "Linen Shirt".to_string(),
            image: Some("products/linen-shirt.png".to_string()),
            price,
        }
    }

    #[tokio::test]
    async fn create_product_returns_correct_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        let product = ctx.products.create_product(new_product(uuid, 999)).await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.name, "Linen Shirt");
        assert_eq!(product.image.as_deref(), Some("products/linen-shirt.png"));
        assert_eq!(product.price, 999);
        assert!(product.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products.create_product(new_product(uuid, 1500)).await?;

        let product = ctx.products.get_product(uuid).await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.price, 1500);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_returns_created_products() -> TestResult {
        let ctx = TestContext::new().await;

        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        ctx.products.create_product(new_product(uuid_a, 100)).await?;
        ctx.products.create_product(new_product(uuid_b, 200)).await?;

        let products = ctx.products.list_products().await?;

        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![uuid_a, uuid_b]);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_reflects_new_price() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products.create_product(new_product(uuid, 500)).await?;

        let updated = ctx
            .products
            .update_product(
                uuid,
                ProductUpdate {
                    name: "Linen Shirt (Sale)".to_string(),
                    image: None,
                    price: 750,
                },
            )
            .await?;

        assert_eq!(updated.uuid, uuid);
        assert_eq!(updated.name, "Linen Shirt (Sale)");
        assert!(updated.image.is_none());
        assert_eq!(updated.price, 750);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                ProductUuid::new(),
                ProductUpdate {
                    name: "Ghost".to_string(),
                    image: None,
                    price: 100,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_hides_it_from_lookup_and_list() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products.create_product(new_product(uuid, 300)).await?;
        ctx.products.delete_product(uuid).await?;

        let result = ctx.products.get_product(uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let products = ctx.products.list_products().await?;

        assert!(
            !products.iter().any(|p| p.uuid == uuid),
            "deleted product should not appear in list"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products.create_product(new_product(uuid, 300)).await?;
        ctx.products.delete_product(uuid).await?;

        let result = ctx.products.delete_product(uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products.create_product(new_product(uuid, 100)).await?;

        let result = ctx.products.create_product(new_product(uuid, 200)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_with_unrepresentable_price_returns_invalid_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(new_product(ProductUuid::new(), u64::MAX))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn catalog_writes_record_product_uuid_on_their_spans() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();
        let (spans, _guard) = SpanCapture::install();

        ctx.products.create_product(new_product(uuid, 500)).await?;
        ctx.products
            .update_product(
                uuid,
                ProductUpdate {
                    name: "Linen Shirt".to_string(),
                    image: None,
                    price: 650,
                },
            )
            .await?;
        ctx.products.delete_product(uuid).await?;

        let output = spans.output();

        for operation in ["create_product", "update_product", "delete_product"] {
            assert!(
                output.contains(&format!("products.service.{operation}{{product_uuid={uuid}")),
                "{operation} span should carry the product uuid:\n{output}"
            );
        }

        Ok(())
    }
}
