//! Test Helpers

use crate::{
    domain::{
        customers::{
            CustomersService, CustomersServiceError, data::NewCustomer, records::CustomerUuid,
        },
        products::{
            ProductsService, ProductsServiceError, data::NewProduct, records::ProductUuid,
        },
    },
    test::TestContext,
};

impl TestContext {
    pub(crate) async fn create_customer(
        &self,
        email: &str,
    ) -> Result<CustomerUuid, CustomersServiceError> {
        let customer = self
            .customers
            .create_customer(NewCustomer {
                uuid: CustomerUuid::new(),
                name: "Test Customer".to_string(),
                email: email.to_string(),
            })
            .await?;

        Ok(customer.uuid)
    }

    pub(crate) async fn create_product(
        &self,
        name: &str,
        price: u64,
    ) -> Result<ProductUuid, ProductsServiceError> {
        let product = self
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: name.to_string(),
                image: None,
                price,
            })
            .await?;

        Ok(product.uuid)
    }
}
