use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stockroom::model::SortKey;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "stockroom", bin_name = "stockroom", version = get_version())]
#[command(about = "Keep a small product inventory in a JSON file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data file to use instead of the configured one
    #[arg(long, global = true, env = "STOCKROOM_DATA", value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every item with its index
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Add an item, or merge its quantity into an item with the same name
    #[command(alias = "a", display_order = 2)]
    Add {
        /// Product number (must be unique)
        #[arg(long, short = 'p', visible_alias = "pn")]
        product: String,

        /// Item name
        #[arg(long, short = 'n')]
        name: String,

        /// Quantity (whole number, zero or more)
        #[arg(long, short = 'q', visible_alias = "qty", allow_negative_numbers = true)]
        quantity: String,

        /// Category
        #[arg(long, short = 'c', default_value = "")]
        category: String,

        /// Merge into an existing item with the same name without asking
        #[arg(long, conflicts_with = "no_merge")]
        merge: bool,

        /// Never merge; leave the inventory untouched if the name exists
        #[arg(long)]
        no_merge: bool,
    },

    /// Change fields of one item; omitted fields are kept
    #[command(alias = "u", display_order = 3)]
    Update {
        /// Index, product number or name of the item
        selector: String,

        #[arg(long, short = 'p', visible_alias = "pn")]
        product: Option<String>,

        #[arg(long, short = 'n')]
        name: Option<String>,

        #[arg(long, short = 'c')]
        category: Option<String>,

        #[arg(long, short = 'q', visible_alias = "qty", allow_negative_numbers = true)]
        quantity: Option<String>,
    },

    /// Delete one item
    #[command(alias = "rm", display_order = 4)]
    Delete {
        /// Index, product number or name of the item
        selector: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Sort the inventory and save the new order
    #[command(display_order = 5)]
    Sort {
        /// name, product-number, quantity or category
        key: SortKey,
    },

    /// Show items whose name or product number contains a keyword
    #[command(alias = "s", display_order = 6)]
    Search { keyword: String },

    /// Show items in a category, or list categories
    #[command(alias = "cat", display_order = 7)]
    Category { name: Option<String> },

    /// Write the inventory to the data file
    #[command(display_order = 10)]
    Save,

    /// Reload the inventory from the data file
    #[command(display_order = 11)]
    Load,

    /// Write a summary report with the full inventory
    #[command(display_order = 12)]
    Export { path: PathBuf },

    /// Remove every item
    #[command(display_order = 13)]
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (data-file or merge)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("stockroom").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_command_means_list() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn add_takes_named_fields() {
        let cli = parse(&["add", "-p", "P1", "--name", "Wax A", "--qty", "5", "--merge"]);
        match cli.command {
            Some(Commands::Add {
                product,
                name,
                quantity,
                category,
                merge,
                no_merge,
            }) => {
                assert_eq!(product, "P1");
                assert_eq!(name, "Wax A");
                assert_eq!(quantity, "5");
                assert_eq!(category, "");
                assert!(merge);
                assert!(!no_merge);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn negative_quantity_reaches_validation() {
        let cli = parse(&["add", "-p", "P1", "-n", "Wax", "-q", "-4"]);
        assert!(matches!(cli.command, Some(Commands::Add { quantity, .. }) if quantity == "-4"));

        let cli = parse(&["update", "P1", "--qty", "-1"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Update { quantity: Some(q), .. }) if q == "-1"
        ));
    }

    #[test]
    fn merge_flags_conflict() {
        let args = [
            "stockroom", "add", "-p", "P1", "-n", "A", "-q", "1", "--merge", "--no-merge",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn sort_accepts_aliases() {
        let cli = parse(&["sort", "qty"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Sort {
                key: SortKey::Quantity
            })
        ));
        let cli = parse(&["sort", "product-number"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Sort {
                key: SortKey::ProductNumber
            })
        ));
        assert!(Cli::try_parse_from(["stockroom", "sort", "price"]).is_err());
    }

    #[test]
    fn data_option_is_global() {
        let cli = parse(&["search", "wax", "--data", "/tmp/x.json", "-v"]);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x.json")));
        assert!(cli.verbose);
    }
}
