use chrono::{Local, NaiveDate};
use clap::Parser;
use std::str::FromStr;
use weightlog::application::{
    init::init, ConfigService, DashboardService, ImportBiometricsService, ImportMode,
    WeightService,
};
use weightlog::cli::{format_dashboard, format_import_summary, format_weight_table, Cli, Commands};
use weightlog::domain::TimeRange;
use weightlog::error::WeightlogError;
use weightlog::infrastructure::logging::init_logging;
use weightlog::infrastructure::{FileSystemRepository, LogRepository};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&log_level(&cli)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let today = Local::now().date_naive();

    match run(cli, today) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// `--verbose` wins, then the configured level of the discovered log
fn log_level(cli: &Cli) -> String {
    if cli.verbose {
        return "debug".to_string();
    }
    FileSystemRepository::discover()
        .and_then(|repo| repo.load_config())
        .map(|config| config.log_level)
        .unwrap_or_else(|_| "warn".to_string())
}

fn parse_range(value: &str) -> Result<TimeRange, WeightlogError> {
    TimeRange::from_str(value).map_err(|_| WeightlogError::InvalidRange(value.to_string()))
}

fn run(cli: Cli, today: NaiveDate) -> Result<(), WeightlogError> {
    match cli.command {
        Some(Commands::Init { path, range }) => {
            let range = parse_range(&range)?;
            let repo = init(&path, range)?;
            println!("Initialized weightlog at {}", repo.root().display());
            println!("Default range: {}", range);
            Ok(())
        }
        Some(Commands::Add { weight, date }) => {
            let repo = FileSystemRepository::discover()?;
            let record = WeightService::new(repo.store()).add(&date, weight, today)?;
            println!(
                "Recorded {:.2} kg for {}",
                record.weight,
                record.date.format("%Y-%m-%d")
            );
            Ok(())
        }
        Some(Commands::List { limit }) => {
            let repo = FileSystemRepository::discover()?;
            let limit = match limit {
                Some(n) => n,
                None => repo.load_config()?.history_limit,
            };
            let records = WeightService::new(repo.store()).list(limit)?;
            println!("{}", format_weight_table(&records).trim_end());
            Ok(())
        }
        Some(Commands::Delete { date, weight }) => {
            let repo = FileSystemRepository::discover()?;
            if WeightService::new(repo.store()).delete(&date, weight, today)? {
                println!("Deleted {:.2} kg entry for {}", weight, date);
                Ok(())
            } else {
                Err(WeightlogError::EntryNotFound(format!(
                    "{} with {} kg",
                    date, weight
                )))
            }
        }
        Some(Commands::Import { file, merge }) => {
            let repo = FileSystemRepository::discover()?;
            let mode = if merge {
                ImportMode::Merge
            } else {
                ImportMode::Replace
            };

            let mut service = ImportBiometricsService::new(repo.store());
            service.subscribe(|summary| println!("{}", format_import_summary(summary)));
            service.import_file(&file, mode)?;
            Ok(())
        }
        Some(Commands::Stats { range, limit }) => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let range = match range {
                Some(r) => parse_range(&r)?,
                None => config.default_range,
            };
            let limit = limit.unwrap_or(config.history_limit);

            let dashboard = DashboardService::new(repo.store()).build(range, limit, today)?;
            print!("{}", format_dashboard(&dashboard));
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("default_range = {}", config.default_range);
                println!("history_limit = {}", config.history_limit);
                println!("log_level = {}", config.log_level);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    println!("{}", service.get(&k)?);
                    Ok(())
                }
            } else {
                println!("Usage: weightlog config [--list | <key> [<value>]]");
                println!("Valid keys: default_range, history_limit, log_level, created");
                Ok(())
            }
        }
        None => {
            println!("weightlog - Personal weight and biometric tracker");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
