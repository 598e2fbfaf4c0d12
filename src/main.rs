//! Storefront CLI - cached, coalescing client for the storefront REST API

use clap::{CommandFactory, Parser};
use log::debug;

mod cli;
mod models;
mod output;

use cli::args::GlobalOptions;
use cli::{
    CartCommands, CategoryCommands, ChatCommands, Cli, Commands, OrderCommands, PageCommands,
    ProductCommands, WishlistCommands,
};
use storefront::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug for this crate with `--debug`.
fn init_logging(debug: bool) {
    let default_filter = if debug { "storefront=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);
    debug!("Running {:?}", cli.command);

    match cli.command {
        Commands::Status => cli::status::run(&opts),
        Commands::Product(cmd) => match cmd {
            ProductCommands::List {
                category,
                search,
                all,
                pagination,
            } => cli::catalog::list_products(&opts, category, search, all, &pagination).await,
            ProductCommands::Get { id } => cli::catalog::get_product(&opts, &id).await,
            ProductCommands::Featured => cli::catalog::featured_products(&opts).await,
        },
        Commands::Category(cmd) => match cmd {
            CategoryCommands::List => cli::catalog::list_categories(&opts).await,
            CategoryCommands::Get { id } => cli::catalog::get_category(&opts, &id).await,
        },
        Commands::Cart(cmd) => match cmd {
            CartCommands::Show => cli::cart::show(&opts).await,
            CartCommands::Add { product_id, qty } => cli::cart::add(&opts, &product_id, qty).await,
            CartCommands::Update { item_id, qty } => {
                cli::cart::update(&opts, &item_id, qty).await
            }
            CartCommands::Remove { item_id } => cli::cart::remove(&opts, &item_id).await,
            CartCommands::Clear => cli::cart::clear(&opts).await,
        },
        Commands::Wishlist(cmd) => match cmd {
            WishlistCommands::Show => cli::wishlist::show(&opts).await,
            WishlistCommands::Add { product_id } => cli::wishlist::add(&opts, &product_id).await,
            WishlistCommands::Remove { product_id } => {
                cli::wishlist::remove(&opts, &product_id).await
            }
        },
        Commands::Order(cmd) => match cmd {
            OrderCommands::List => cli::order::list(&opts).await,
            OrderCommands::Get { id } => cli::order::get(&opts, &id).await,
        },
        Commands::Page(cmd) => match cmd {
            PageCommands::List => cli::page::list(&opts).await,
            PageCommands::Get { slug } => cli::page::get(&opts, &slug).await,
        },
        Commands::Chat(cmd) => match cmd {
            ChatCommands::Send { message } => cli::chat::send(&opts, &message).await,
            ChatCommands::Poll { since } => cli::chat::poll(&opts, since).await,
        },
        Commands::Bench(args) => cli::bench::run(&opts, &args).await,
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "storefront", &mut std::io::stdout());
            Ok(())
        }
    }
}
