use clap::{Parser, Subcommand};
use storefront_app::database::{self, Db};

mod customer;
mod db;
mod product;

#[derive(Debug, Parser)]
#[command(name = "storefront-app", about = "Storefront admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Customer(customer::CustomerCommand),
    Product(product::ProductCommand),
    Db(db::DbCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Customer(command) => customer::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Db(command) => db::run(command).await,
        }
    }
}

async fn connect(database_url: &str) -> Result<Db, String> {
    database::connect(database_url)
        .await
        .map(Db::new)
        .map_err(|error| format!("failed to connect to database: {error}"))
}
