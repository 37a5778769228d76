use clap::Args;
use storefront_app::domain::customers::{
    CustomersService, PgCustomersService, data::NewCustomer, records::CustomerUuid,
};

#[derive(Debug, Args)]
pub(crate) struct CreateCustomerArgs {
    /// Customer display name
    #[arg(long)]
    name: String,

    /// Customer email address; unique, case-insensitive
    #[arg(long)]
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateCustomerArgs) -> Result<(), String> {
    if args.name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }

    let db = crate::cli::connect(&args.database_url).await?;

    let customer = PgCustomersService::new(db)
        .create_customer(NewCustomer {
            uuid: CustomerUuid::new(),
            name: args.name,
            email: args.email,
        })
        .await
        .map_err(|error| format!("failed to create customer: {error}"))?;

    println!("customer_uuid: {}", customer.uuid);
    println!("customer_name: {}", customer.name);
    println!("customer_email: {}", customer.email);

    Ok(())
}
