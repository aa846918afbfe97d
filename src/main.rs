use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use trial_balance_tools::io::excel_write::DEFAULT_SHEET_LABEL;
use trial_balance_tools::model::Role;
use trial_balance_tools::sync;
use trial_balance_tools::{ExtractOptions, Result, ToolError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Sheets(args) => {
            ensure_exists(&args.input)?;
            for name in sync::list_sheets(&args.input)? {
                println!("{name}");
            }
            Ok(())
        }
        Command::Extract(args) => {
            ensure_exists(&args.input)?;
            let options = args.source.load_options()?;
            sync::excel_to_document(
                &args.input,
                &args.output,
                args.source.sheet.as_deref(),
                args.source.role.into(),
                &options,
            )
        }
        Command::Export(args) => {
            ensure_exists(&args.input)?;
            sync::document_to_excel(&args.input, &args.output, &args.sheet_label)
        }
        Command::Normalize(args) => {
            ensure_exists(&args.input)?;
            let options = args.source.load_options()?;
            sync::normalize_excel(
                &args.input,
                &args.output,
                args.source.sheet.as_deref(),
                args.source.role.into(),
                &options,
                &args.sheet_label,
            )
        }
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ToolError::MissingInput(path.to_path_buf()))
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Extract trial balances from Excel sheets and export them as clean workbooks."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the worksheets of a workbook.
    Sheets(SheetsArgs),
    /// Extract a trial balance sheet into a JSON document.
    Extract(ExtractArgs),
    /// Write a JSON trial balance document as a formatted workbook.
    Export(ExportArgs),
    /// Extract a trial balance and write it straight back out as a workbook.
    Normalize(NormalizeArgs),
}

#[derive(clap::Args)]
struct SheetsArgs {
    /// Input workbook path.
    #[arg(long)]
    input: PathBuf,
}

/// Options shared by every command that reads a source trial balance.
#[derive(clap::Args)]
struct SourceArgs {
    /// Worksheet to extract; defaults to the first sheet named like "trial".
    #[arg(long)]
    sheet: Option<String>,

    /// Role of the user running the extraction.
    #[arg(long, value_enum)]
    role: RoleArg,

    /// Optional JSON file overriding the heuristic scan windows.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl SourceArgs {
    fn load_options(&self) -> Result<ExtractOptions> {
        match &self.config {
            Some(path) => {
                ensure_exists(path)?;
                ExtractOptions::from_path(path)
            }
            None => Ok(ExtractOptions::default()),
        }
    }
}

#[derive(clap::Args)]
struct ExtractArgs {
    /// Input workbook path.
    #[arg(long)]
    input: PathBuf,

    /// Output JSON document path.
    #[arg(long)]
    output: PathBuf,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Input JSON document path.
    #[arg(long)]
    input: PathBuf,

    /// Output workbook path.
    #[arg(long)]
    output: PathBuf,

    /// Name of the exported worksheet.
    #[arg(long, default_value = DEFAULT_SHEET_LABEL)]
    sheet_label: String,
}

#[derive(clap::Args)]
struct NormalizeArgs {
    /// Input workbook path.
    #[arg(long)]
    input: PathBuf,

    /// Output workbook path.
    #[arg(long)]
    output: PathBuf,

    #[command(flatten)]
    source: SourceArgs,

    /// Name of the exported worksheet.
    #[arg(long, default_value = DEFAULT_SHEET_LABEL)]
    sheet_label: String,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RoleArg {
    DocSpecialist,
    TeamLead,
    Manager,
    Ca,
}

impl From<RoleArg> for Role {
    fn from(kind: RoleArg) -> Self {
        match kind {
            RoleArg::DocSpecialist => Role::DocSpecialist,
            RoleArg::TeamLead => Role::TeamLead,
            RoleArg::Manager => Role::Manager,
            RoleArg::Ca => Role::Ca,
        }
    }
}
