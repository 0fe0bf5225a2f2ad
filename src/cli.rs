use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Weekly menu planner: turns a menu and a pantry into a priced shopping list.
#[derive(Parser, Debug)]
#[command(name = "menu_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to a TOML settings file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use the REST backend at this URL, overriding the settings file.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Log debug output to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk through the weekly plan: edit the menu, check the pantry, shop.
    Plan {
        /// Also write the final shopping list to this CSV file.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Print the saved shopping list.
    Show,

    /// Clear every purchased mark on the saved shopping list.
    ResetPurchased,

    /// Search catalog products by name.
    Search {
        /// Part of a product name; accents and case are ignored.
        query: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan { export: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_plan() {
        let cli = Cli::parse_from(["menu_planner"]);
        assert!(matches!(
            cli.command.unwrap_or_default(),
            Command::Plan { export: None }
        ));
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::parse_from([
            "menu_planner",
            "--base-url",
            "http://localhost:8080/api",
            "-v",
            "search",
            "creme",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080/api"));
        assert!(matches!(cli.command, Some(Command::Search { ref query }) if query == "creme"));
    }
}
