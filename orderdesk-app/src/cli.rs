use clap::{Parser, Subcommand};

/// Command-line arguments for the order console.
#[derive(Parser, Debug)]
#[command(name = "orderdesk", version, about = "Terminal console for the order service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch and display all orders
    List,
    /// Submit a new order
    Add {
        /// Number of items to order, at least 1
        item_count: u32,
    },
    /// Display a single order
    Show {
        /// Order id as shown by `list`
        id: i64,
    },
    /// Keep the order list on screen and re-render it as it changes
    Watch {
        /// Seconds between refreshes
        #[arg(short, long, default_value_t = 5)]
        interval: u64,
    },
    /// Check whether the order service is reachable
    Health,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_takes_a_positional_item_count() {
        let cli = Cli::parse_from(["orderdesk", "add", "501"]);
        match cli.command {
            Command::Add { item_count } => assert_eq!(item_count, 501),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_watch_interval_defaults_to_five_seconds() {
        let cli = Cli::parse_from(["orderdesk", "watch"]);
        match cli.command {
            Command::Watch { interval } => assert_eq!(interval, 5),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
