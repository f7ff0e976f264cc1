pub mod cli;
pub mod config;
pub mod display;
pub mod field;
pub mod filter;
pub mod kind;
pub mod registry;
pub mod value;

use anyhow::Context;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

pub use cli::{ColorMode, Commands, OutputFormat, cli_parse};
pub use config::{ConfigError, RegistryConfig, load_config, load_config_from_path};
pub use field::{Field, FieldType, Predicate};
pub use filter::{
    ApplyFilter, BooleanFilter, Comparison, Condition, DateTimeFilter, FilterDescriptor,
    FilterKind, GridFilter, NumberFilter, StringContainsFilter, StringEndsWithFilter,
    StringEqualsFilter, StringNotEqualsFilter, StringStartsWithFilter,
};
pub use kind::{DeclaredType, DeclaredTypeError, ScalarKind, TypeKey};
pub use registry::{
    BuiltinFilter, FilterConstructor, FilterDispatcher, FilterRegistry, RegistryEntry,
    SharedFilters,
};
pub use value::{FieldValue, ParseValueError, Scalar, ScalarValue, parse_typed, parse_value};

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> anyhow::Result<ExitCode> {
    let cli = cli_parse();
    init_tracing(cli.verbose);
    cli.color.apply();

    let config = load_config(cli.config.as_deref()).context("Failed to load config")?;
    let registry = config
        .build_registry()
        .context("Failed to apply filter registrations")?;

    match &cli.command {
        Commands::List { declared, format } => {
            let entries: Vec<RegistryEntry> = match declared {
                Some(declared) => {
                    let type_key = declared.canonical().to_string();
                    registry
                        .entries()
                        .into_iter()
                        .filter(|entry| entry.type_key == type_key)
                        .collect()
                }
                None => registry.entries(),
            };

            match format {
                OutputFormat::Text => print!("{}", display::format_entries_text(&entries)),
                OutputFormat::Json => println!(
                    "{}",
                    display::format_entries_json(&entries)
                        .context("Failed to serialize registrations")?
                ),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Parse {
            kind,
            values,
            format,
        } => {
            let outcomes: Vec<display::ParseOutcome> = values
                .iter()
                .map(|raw| display::ParseOutcome::new(raw, parse_value(*kind, Some(raw.as_str()))))
                .collect();
            let failed = outcomes.iter().any(display::ParseOutcome::is_error);

            match format {
                OutputFormat::Text => {
                    for outcome in &outcomes {
                        println!("{}", display::format_parse_outcome(*kind, outcome));
                    }
                }
                OutputFormat::Json => println!(
                    "{}",
                    display::format_parse_outcomes_json(&outcomes)
                        .context("Failed to serialize parse results")?
                ),
            }
            Ok(if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Resolve { declared, method } => {
            let Some(constructor) = registry.get(declared, method) else {
                println!("No filter registered for {} {}", declared, method.to_lowercase());
                return Ok(ExitCode::FAILURE);
            };
            let dispatcher = registry.dispatcher();
            let filter = dispatcher
                .get_filter(declared, method)
                .context("Registered filter disappeared during lookup")?;

            println!(
                "{} {} -> {}",
                declared.canonical(),
                filter.method(),
                constructor.name()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}
