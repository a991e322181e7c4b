//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// coursedb - Schema, batch transactions and tabular load/unload on SQLite
#[derive(Parser, Debug)]
#[command(name = "coursedb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full walkthrough on a fresh database
    Demo {
        /// Working database (deleted and recreated)
        #[arg(short, long, value_name = "DATABASE")]
        database: Option<PathBuf>,

        /// Existing database to inspect at the end
        #[arg(long, value_name = "INSPECT")]
        inspect: Option<PathBuf>,
    },

    /// Recreate the catalog schema
    Schema {
        /// Database to (re)create the tables in
        #[arg(short, long, value_name = "DATABASE")]
        database: Option<PathBuf>,

        /// Also load the walkthrough data
        #[arg(long)]
        seed: bool,
    },

    /// Run a query and print the result as a table
    Query {
        /// SQL query
        #[arg(value_name = "SQL")]
        sql: String,

        /// Database to query
        #[arg(short, long, value_name = "DATABASE")]
        database: Option<PathBuf>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Write the rows of a frame file into a table
    Load {
        /// Target table
        #[arg(value_name = "TABLE")]
        table: String,

        /// JSON frame file: {"columns": [...], "data": [[...], ...]}
        #[arg(value_name = "FRAME_FILE")]
        frame_file: PathBuf,

        /// Database to write to
        #[arg(short, long, value_name = "DATABASE")]
        database: Option<PathBuf>,

        /// Policy when the table exists: append, replace, fail
        #[arg(long, default_value = "append")]
        if_exists: String,
    },

    /// Inspect the schema of an existing database
    Inspect {
        /// Database to inspect
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Table to aggregate
        #[arg(long, requires = "group_by")]
        table: Option<String>,

        /// Column to group by
        #[arg(long, requires = "table")]
        group_by: Option<String>,

        /// Column to sum within each group
        #[arg(long, requires = "group_by")]
        sum: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_load() {
        let cli = Cli::parse_from([
            "coursedb",
            "load",
            "enrollment",
            "extra.json",
            "--if-exists",
            "replace",
        ]);
        match cli.command {
            Commands::Load {
                table, if_exists, database, ..
            } => {
                assert_eq!(table, "enrollment");
                assert_eq!(if_exists, "replace");
                assert!(database.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_inspect_sum_requires_group_by() {
        let result = Cli::try_parse_from(["coursedb", "inspect", "eia.db", "--sum", "mw"]);
        assert!(result.is_err());
    }
}
