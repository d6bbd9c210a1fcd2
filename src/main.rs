use clap::Parser;
use flexi_logger::{Logger, LoggerHandle};
use notexml::application::{NoteStats, ReadNotesService};
use notexml::cli::{format_note_list, format_stats, Cli, Commands};
use notexml::error::NoteError;
use notexml::infrastructure::{Dialect, ReaderConfig};
use std::str::FromStr;

fn main() {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose);

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr; RUST_LOG wins over the -v count
fn init_logging(verbose: u8) -> Option<LoggerHandle> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    match Logger::try_with_env_or_str(level).and_then(|logger| logger.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: failed to start logger: {}", e);
            None
        }
    }
}

fn run(cli: Cli) -> Result<(), NoteError> {
    let config = match &cli.config {
        Some(path) => ReaderConfig::load(path)?,
        None => ReaderConfig::from_env()?,
    };

    match cli.command {
        Commands::List {
            files,
            dialect,
            comments,
        } => {
            let dialect = resolve_dialect(dialect.as_deref(), &config)?;
            let store = ReadNotesService::new(dialect, config).execute(&files)?;
            print!("{}", format_note_list(store.iter(), comments));
            if store.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Stats { files, dialect } => {
            let dialect = resolve_dialect(dialect.as_deref(), &config)?;
            let store = ReadNotesService::new(dialect, config).execute(&files)?;
            print!("{}", format_stats(&NoteStats::collect(store.iter())));
            Ok(())
        }
    }
}

/// Command line first, then the config file, then the API dialect
fn resolve_dialect(arg: Option<&str>, config: &ReaderConfig) -> Result<Dialect, NoteError> {
    match arg {
        Some(name) => Dialect::from_str(name),
        None => Ok(config.dialect.unwrap_or_default()),
    }
}
