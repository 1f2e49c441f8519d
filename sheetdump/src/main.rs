use anyhow::{Context, Result};
use clap::Parser;
use sheetdump_core::config::DEFAULT_CONFIG_FILE;
use sheetdump_core::{ExtractConfig, Extractor, SheetErrorPolicy, report_failure};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetdump")]
#[command(about = "Print every sheet of a workbook as a table", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Excel/ODS file (defaults to "FASE DE GRUPOS.xlsx")
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write all sheets as JSON records to this file
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Only process these sheets
    #[arg(short, long = "sheet", value_name = "SHEET")]
    sheets: Vec<String>,

    /// Continue with the next sheet when one cannot be read
    #[arg(long)]
    skip_failed_sheets: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let extractor = Extractor::with_config(config);
    log::info!("Reading {}", extractor.config().path.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = extractor.run(&mut out) {
        log::debug!("Run failed: {:?}", e);
        report_failure(&mut out, &e)?;
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_config(cli: &Cli) -> Result<ExtractConfig> {
    let mut config = if let Some(config_path) = &cli.config {
        ExtractConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_config_path.exists() {
            ExtractConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            ExtractConfig::default()
        }
    };

    // Command line flags override the file
    if let Some(file) = &cli.file {
        config.path = file.clone();
    }
    if let Some(output) = &cli.output {
        config.output = Some(output.clone());
    }
    if !cli.sheets.is_empty() {
        config.sheets = cli.sheets.clone();
    }
    if cli.skip_failed_sheets {
        config.on_sheet_error = SheetErrorPolicy::Skip;
    }

    Ok(config)
}
