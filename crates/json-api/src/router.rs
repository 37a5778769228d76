//! App Router

use salvo::Router;

use crate::{carts, customers, orders, products};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("customers")
                .post(customers::create::handler)
                .push(
                    Router::with_path("{customer}")
                        .get(customers::get::handler)
                        .push(Router::with_path("cart").get(customers::cart::handler))
                        .push(Router::with_path("orders").get(customers::orders::handler)),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("carts")
                .post(carts::create::handler)
                .push(Router::with_path("{cart}").get(carts::get::handler)),
        )
        .push(Router::with_path("cart-details/{line}").delete(carts::remove_line::handler))
        .push(
            Router::with_path("orders")
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("status").put(orders::status::handler)),
                ),
        )
}
