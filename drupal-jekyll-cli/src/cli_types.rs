//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "drupal-jekyll")]
#[command(about = "Import Drupal 7 content into a Jekyll site", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Read settings from this file instead of the default config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Database connection and query options shared by commands that read Drupal.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct ConnectionArgs {
    /// Database driver (default: mysql)
    #[arg(long, value_parser = ["mysql", "sqlite"])]
    pub driver: Option<String>,

    /// Database name (file path for the sqlite driver)
    #[arg(long)]
    pub dbname: Option<String>,

    /// Database user name
    #[arg(long)]
    pub user: Option<String>,

    /// Database user's password (default: "")
    #[arg(long)]
    pub password: Option<String>,

    /// Database host name, optionally with ":port" (default: "localhost")
    #[arg(long)]
    pub host: Option<String>,

    /// Table prefix name
    #[arg(long)]
    pub prefix: Option<String>,

    /// The Drupal content types to be imported (e.g., blog,story,article)
    #[arg(long, value_delimiter = ',')]
    pub types: Option<Vec<String>>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import content into _posts and _drafts, laid out by menu position
    Import {
        #[command(flatten)]
        conn: ConnectionArgs,

        /// Site root to write into (defaults to current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show the files that would be written without touching disk
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Print the menu hierarchy with the directory each link maps to
    Menu {
        #[command(flatten)]
        conn: ConnectionArgs,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and where each value comes from
    Show {
        #[command(flatten)]
        conn: ConnectionArgs,
    },

    /// Print the config file path
    Path,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn types_split_on_commas() {
        let cli = Cli::parse_from([
            "drupal-jekyll",
            "import",
            "--dbname",
            "site.sqlite",
            "--user",
            "drupal",
            "--types",
            "page,blog",
        ]);
        match cli.command {
            Commands::Import { conn, dry_run, .. } => {
                assert_eq!(conn.types, Some(vec!["page".to_string(), "blog".to_string()]));
                assert_eq!(conn.dbname.as_deref(), Some("site.sqlite"));
                assert!(!dry_run);
            }
            _ => panic!("expected import command"),
        }
    }

    #[test]
    fn driver_is_restricted() {
        let cli = Cli::parse_from(["drupal-jekyll", "menu", "--driver", "sqlite"]);
        match cli.command {
            Commands::Menu { conn } => assert_eq!(conn.driver.as_deref(), Some("sqlite")),
            _ => panic!("expected menu command"),
        }
        assert!(Cli::try_parse_from(["drupal-jekyll", "menu", "--driver", "oracle"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["drupal-jekyll", "menu", "--quiet", "--dbname", "x"]);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Menu { .. }));
    }
}
