use clap::Args;
use storefront_app::domain::products::{
    PgProductsService, ProductsService, data::NewProduct, records::ProductUuid,
};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Price in minor currency units, e.g. 1999 for 19.99
    #[arg(long)]
    price: u64,

    /// Optional image path or URL
    #[arg(long)]
    image: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let product = PgProductsService::new(db)
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: args.name,
            image: args.image,
            price: args.price,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_name: {}", product.name);
    println!("product_price: {}", product.price);

    Ok(())
}
