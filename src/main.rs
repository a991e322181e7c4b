//! coursedb CLI
//!
//! A command-line walkthrough of schema definition, atomic batches and
//! tabular load/unload on an embedded SQLite database.

use clap::Parser;
use coursedb::cli::{
    args::{Cli, Commands},
    commands::{demo, inspect, load, query, schema},
};
use coursedb::core::inspect::Aggregate;
use coursedb::models::config::{self, Config};
use coursedb::preflight;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = config::load_config();

    // Run the appropriate command
    match cli.command {
        Commands::Demo { database, inspect } => {
            let database = database.unwrap_or(config.database.clone());
            if !cli.skip_preflight {
                run_preflight_checks(&database)?;
            }
            let inspect_path = inspect.unwrap_or(config.inspect.database.clone());
            demo::run(&database, &inspect_path, configured_aggregate(&config))?;
        }

        Commands::Schema { database, seed } => {
            let database = database.unwrap_or(config.database);
            if !cli.skip_preflight {
                run_preflight_checks(&database)?;
            }
            schema::recreate(&database, seed)?;
        }

        Commands::Query { sql, database, format } => {
            let database = database.unwrap_or(config.database);
            query::run_query(&database, &sql, &format)?;
        }

        Commands::Load {
            table,
            frame_file,
            database,
            if_exists,
        } => {
            let database = database.unwrap_or(config.database);
            load::load(&database, &table, &frame_file, &if_exists)?;
        }

        Commands::Inspect {
            path,
            table,
            group_by,
            sum,
        } => {
            let path = path.unwrap_or(config.inspect.database.clone());
            let aggregate = match (table, group_by) {
                (Some(table), Some(group_by)) => Some(Aggregate {
                    table,
                    group_by,
                    sum,
                }),
                _ => configured_aggregate(&config),
            };
            inspect::inspect(&path, aggregate)?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("coursedb=debug")
    } else {
        EnvFilter::new("coursedb=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Aggregate named in the config file, if complete.
fn configured_aggregate(config: &Config) -> Option<Aggregate> {
    let inspect = &config.inspect;
    Some(Aggregate {
        table: inspect.table.clone()?,
        group_by: inspect.group_by.clone()?,
        sum: inspect.sum.clone(),
    })
}

/// Run preflight checks and exit if any fail.
fn run_preflight_checks(database: &Path) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(database);
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
