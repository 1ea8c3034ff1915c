use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sheetgraph_model::{GraphConfig, ModelBuilder};
use sheetgraph_workbook::{
    CalamineAdapter, CsvAdapter, IoError, JsonAdapter, LoaderOptions, Spreadsheet,
    SpreadsheetLoader, SpreadsheetReader,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sheetgraph", version, about = "Build a graph model from a spreadsheet")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the model and print it as JSON.
    Build(InputArgs),
    /// Print how each sheet name is classified.
    Classify(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Workbook file, or a directory of CSV files.
    path: PathBuf,

    /// Naming conventions as YAML or JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
    format: InputFormat,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Single-line JSON.
    #[arg(long)]
    compact: bool,

    /// Leave out sheets the workbook marks as hidden.
    #[arg(long)]
    skip_hidden: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Auto,
    Json,
    Csv,
    Xlsx,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Backend {
    Json,
    Csv,
    Calamine,
}

impl InputFormat {
    fn backend_for(self, path: &Path) -> Result<Backend> {
        match self {
            InputFormat::Json => Ok(Backend::Json),
            InputFormat::Csv => Ok(Backend::Csv),
            InputFormat::Xlsx => Ok(Backend::Calamine),
            InputFormat::Auto => detect(path),
        }
    }
}

fn detect(path: &Path) -> Result<Backend> {
    if path.is_dir() {
        return Ok(Backend::Csv);
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "json" => Ok(Backend::Json),
        "csv" => Ok(Backend::Csv),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Backend::Calamine),
        _ => bail!(
            "cannot tell the format of {}; pass --format",
            path.display()
        ),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build(args) => {
            let config = load_config(args.config.as_deref())?;
            let spreadsheet = load_spreadsheet(&args)?;
            let model = ModelBuilder::with_config(config).build(&spreadsheet);
            write_json(&model, &args)
        }
        Command::Classify(args) => {
            let config = load_config(args.config.as_deref())?;
            let spreadsheet = load_spreadsheet(&args)?;
            let classification = ModelBuilder::with_config(config).classify(&spreadsheet);
            write_json(&classification, &args)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<GraphConfig> {
    match path {
        Some(path) => GraphConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(GraphConfig::default()),
    }
}

fn load_spreadsheet(args: &InputArgs) -> Result<Spreadsheet> {
    let path = args.path.as_path();
    if !path.exists() {
        bail!("{} does not exist", path.display());
    }
    let backend = args.format.backend_for(path)?;
    tracing::debug!(path = %path.display(), ?backend, "opening workbook");

    let options = LoaderOptions {
        skip_hidden: args.skip_hidden,
    };
    let loaded = match backend {
        Backend::Json => open_and_load::<JsonAdapter>(path, options),
        Backend::Csv => open_and_load::<CsvAdapter>(path, options),
        Backend::Calamine => open_and_load::<CalamineAdapter>(path, options),
    };
    loaded.with_context(|| format!("failed to read {}", path.display()))
}

fn open_and_load<B>(path: &Path, options: LoaderOptions) -> Result<Spreadsheet>
where
    B: SpreadsheetReader,
    IoError: From<B::Error>,
{
    let backend = B::open_path(path)?;
    let mut loader = SpreadsheetLoader::with_options(backend, options);
    let spreadsheet = loader.load()?;
    let stats = loader.stats();
    tracing::info!(
        sheets = stats.sheets_loaded,
        skipped = stats.sheets_skipped,
        rows = stats.rows_loaded,
        cells = stats.cells_loaded,
        ms = stats.load_time_ms,
        "loaded spreadsheet"
    );
    Ok(spreadsheet)
}

fn write_json<T: Serialize>(value: &T, args: &InputArgs) -> Result<()> {
    let mut json = if args.compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    json.push('\n');

    match &args.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_backend_from_extension() {
        assert_eq!(detect(Path::new("book.JSON")).unwrap(), Backend::Json);
        assert_eq!(detect(Path::new("people.csv")).unwrap(), Backend::Csv);
        assert_eq!(detect(Path::new("book.xlsx")).unwrap(), Backend::Calamine);
        assert_eq!(detect(Path::new("book.ods")).unwrap(), Backend::Calamine);
        assert!(detect(Path::new("book.pdf")).is_err());
        assert!(detect(Path::new("no-extension")).is_err());
    }

    #[test]
    fn directory_means_csv() {
        let dir = std::env::temp_dir();
        assert_eq!(detect(&dir).unwrap(), Backend::Csv);
    }

    #[test]
    fn explicit_format_wins() {
        let path = Path::new("data.bin");
        assert_eq!(
            InputFormat::Json.backend_for(path).unwrap(),
            Backend::Json
        );
        assert!(InputFormat::Auto.backend_for(path).is_err());
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::try_parse_from([
            "sheetgraph",
            "-vv",
            "build",
            "book.json",
            "--compact",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert!(args.compact);
        assert_eq!(args.format, InputFormat::Json);
        assert_eq!(args.path, PathBuf::from("book.json"));
    }
}
