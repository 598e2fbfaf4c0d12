//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};

pub mod args;
pub mod bench;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod context;
pub mod handlers;
pub mod order;
pub mod page;
pub mod status;
pub mod wishlist;

pub use args::{OutputFormat, PaginationArgs};
pub use clap_complete::Shell;
pub use context::CommandContext;

/// Storefront CLI - cached, coalescing client for the storefront REST API
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "STOREFRONT_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "STOREFRONT_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the API base URL
    #[arg(long, global = true, env = "STOREFRONT_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Bearer token for authenticated endpoints
    #[arg(long, global = true, env = "STOREFRONT_TOKEN", hide_env = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(long, global = true, env = "STOREFRONT_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass the response cache
    #[arg(long, global = true, env = "STOREFRONT_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show resolved configuration
    Status,

    /// Browse the catalog
    #[command(subcommand)]
    Product(ProductCommands),

    /// Browse categories
    #[command(subcommand)]
    Category(CategoryCommands),

    /// View and change the cart
    #[command(subcommand)]
    Cart(CartCommands),

    /// View and change the wishlist
    #[command(subcommand)]
    Wishlist(WishlistCommands),

    /// View order history
    #[command(subcommand)]
    Order(OrderCommands),

    /// Read content pages
    #[command(subcommand)]
    Page(PageCommands),

    /// Talk to support
    #[command(subcommand)]
    Chat(ChatCommands),

    /// Fire identical concurrent requests and report latency and cache state
    Bench(BenchArgs),

    /// Generate shell completions
    #[command(long_about = "Generate shell completion scripts.

Examples:
  bash:   storefront completion bash > ~/.local/share/bash-completion/completions/storefront
  zsh:    storefront completion zsh > ~/.zfunc/_storefront
  fish:   storefront completion fish > ~/.config/fish/completions/storefront.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Product subcommands
#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products
    List {
        /// Filter by category ID or slug
        #[arg(long)]
        category: Option<String>,

        /// Free-text search
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Fetch every page
        #[arg(long, conflicts_with = "page")]
        all: bool,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Show one product
    Get {
        /// Product ID
        id: String,
    },

    /// List featured products
    Featured,
}

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List categories
    List,

    /// Show one category
    Get {
        /// Category ID
        id: String,
    },
}

/// Cart subcommands
#[derive(Subcommand, Debug)]
pub enum CartCommands {
    /// Show the cart
    Show,

    /// Add a product
    Add {
        /// Product ID
        product_id: String,

        /// Quantity to add
        #[arg(long, short = 'q', default_value_t = 1)]
        qty: u32,
    },

    /// Set the quantity of a cart line
    Update {
        /// Cart line ID (see `cart show`)
        item_id: String,

        /// New quantity
        qty: u32,
    },

    /// Remove a cart line
    Remove {
        /// Cart line ID (see `cart show`)
        item_id: String,
    },

    /// Empty the cart
    Clear,
}

/// Wishlist subcommands
#[derive(Subcommand, Debug)]
pub enum WishlistCommands {
    /// Show the wishlist
    Show,

    /// Save a product
    Add {
        /// Product ID
        product_id: String,
    },

    /// Remove a saved product
    Remove {
        /// Product ID
        product_id: String,
    },
}

/// Order subcommands
#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// List your orders
    List,

    /// Show one order
    Get {
        /// Order ID
        id: String,
    },
}

/// Content page subcommands
#[derive(Subcommand, Debug)]
pub enum PageCommands {
    /// List pages
    List,

    /// Print a page
    Get {
        /// Page slug, e.g. "shipping"
        slug: String,
    },
}

/// Chat subcommands
#[derive(Subcommand, Debug)]
pub enum ChatCommands {
    /// Send a message to support
    Send {
        /// Message text
        message: String,
    },

    /// Fetch new messages
    Poll {
        /// Only messages after this message ID
        #[arg(long)]
        since: Option<String>,
    },
}

/// Arguments for the bench command
#[derive(Args, Debug, Clone)]
pub struct BenchArgs {
    /// API path to GET, e.g. /products
    pub path: String,

    /// Identical requests fired at once per round
    #[arg(long, short = 'c', default_value_t = 5)]
    pub concurrency: usize,

    /// Number of rounds
    #[arg(long, short = 'r', default_value_t = 3)]
    pub rounds: usize,
}
