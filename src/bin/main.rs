use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colloc_core::core::resolver::SenseKeyUniverse;
use colloc_core::core::rows::{RowPair, SheetLayout};
use colloc_core::core::scan::scan_model;
use colloc_core::persistence::{
    save_snapshot, save_source, snapshot_parts, write_report, ModelSource,
};
use colloc_core::sheet::open_sheet;
use colloc_core::{CollocationEngine, EngineOptions, WordnetModel};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "collocations")]
#[command(author, version, about = "Audit and merge sense collocations into a WordNet model")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report reflexive and duplicate rows in a collocation sheet.
    Wfness {
        sheet: PathBuf,
        #[command(flatten)]
        sheet_args: SheetArgs,
        /// Leave reflexive pairs out of the counted set
        #[arg(long)]
        drop_reflexive: bool,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Report sheet sense keys that the model does not know.
    Resolve {
        sheet: PathBuf,
        model: PathBuf,
        #[command(flatten)]
        sheet_args: SheetArgs,
        #[command(flatten)]
        model_args: ModelArgs,
        /// Leave reflexive pairs out before resolving
        #[arg(long)]
        drop_reflexive: bool,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Add the sheet's collocations to the model and save it to OUT.
    Merge {
        sheet: PathBuf,
        model: PathBuf,
        out: PathBuf,
        #[command(flatten)]
        sheet_args: SheetArgs,
        #[command(flatten)]
        model_args: ModelArgs,
        /// Do not add collocation_inv relations on the second sense
        #[arg(long)]
        no_inverse: bool,
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Count collocation relations already in a model.
    Scan {
        model: PathBuf,
        #[command(flatten)]
        model_args: ModelArgs,
        /// Count relations as loaded, without materializing derived reverses
        #[arg(long)]
        no_extend: bool,
        /// Save a binary snapshot after loading
        #[arg(long)]
        write_snapshot: Option<PathBuf>,
        #[command(flatten)]
        report: ReportArgs,
    },
}

#[derive(Args)]
struct SheetArgs {
    /// 0-based column of the first sense key
    #[arg(long, default_value_t = 0)]
    key1_col: usize,
    /// 0-based column of the second sense key
    #[arg(long, default_value_t = 1)]
    key2_col: usize,
    /// Field delimiter of the sheet export
    #[arg(long, default_value_t = ',')]
    delimiter: char,
}

impl SheetArgs {
    fn layout(&self) -> SheetLayout {
        SheetLayout { sensekey1_col: self.key1_col, sensekey2_col: self.key2_col }
    }

    fn delimiter(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("delimiter {:?} is not ASCII", self.delimiter))
    }
}

#[derive(Args)]
struct ModelArgs {
    /// MODEL is a binary snapshot file (fast load)
    #[arg(long)]
    snapshot: bool,
    /// Materialize derived reverse relations after a canonical load
    #[arg(long, conflicts_with = "snapshot")]
    extend: bool,
}

impl ModelArgs {
    fn source(&self, model: &Path) -> ModelSource {
        if self.snapshot {
            ModelSource::snapshot_file(model)
        } else {
            ModelSource::Source { path: model.to_path_buf(), extend: self.extend }
        }
    }
}

#[derive(Args)]
struct ReportArgs {
    /// Also write a JSON summary of the run
    #[arg(long)]
    report: Option<PathBuf>,
}

impl ReportArgs {
    fn write(&self, summary: &impl Serialize) -> Result<()> {
        if let Some(path) = &self.report {
            write_report(summary, path)
                .with_context(|| format!("writing report {}", path.display()))?;
            tracing::info!("report written to {}", path.display());
        }
        Ok(())
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

/// Reads the sheet and closes it before anything touches the model.
fn read_rows(engine: &CollocationEngine, sheet: &Path, args: &SheetArgs) -> Result<Vec<RowPair>> {
    tracing::info!("making collocations from {}", sheet.display());
    let sheet_data = open_sheet(sheet, args.delimiter()?)
        .with_context(|| format!("reading sheet {}", sheet.display()))?;
    let rows = engine.rows(&sheet_data)?;
    tracing::debug!("{} rows read", rows.len());
    Ok(rows)
}

fn load_model(source: &ModelSource) -> Result<WordnetModel> {
    tracing::info!("loading from {source}");
    let wn = source.load().with_context(|| format!("loading model from {source}"))?;
    tracing::info!("loaded {} senses", wn.senses.len());
    Ok(wn)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Wfness { sheet, sheet_args, drop_reflexive, report } => {
            let engine = CollocationEngine::new(EngineOptions {
                layout: sheet_args.layout(),
                drop_reflexive_in_audit: drop_reflexive,
                ..Default::default()
            });
            let rows = read_rows(&engine, &sheet, &sheet_args)?;
            let audit = engine.audit(&rows);
            report.write(&audit)?;
        }
        Commands::Resolve { sheet, model, sheet_args, model_args, drop_reflexive, report } => {
            let engine = CollocationEngine::new(EngineOptions {
                layout: sheet_args.layout(),
                drop_reflexive_in_audit: drop_reflexive,
                ..Default::default()
            });
            let rows = read_rows(&engine, &sheet, &sheet_args)?;
            let wn = load_model(&model_args.source(&model))?;
            let universe = SenseKeyUniverse::from_sink(&wn);
            let resolved = engine.resolve(&rows, &universe);
            report.write(&resolved)?;
        }
        Commands::Merge { sheet, model, out, sheet_args, model_args, no_inverse, report } => {
            let engine = CollocationEngine::new(EngineOptions {
                layout: sheet_args.layout(),
                inverse: !no_inverse,
                ..Default::default()
            });
            let rows = read_rows(&engine, &sheet, &sheet_args)?;
            let mut wn = load_model(&model_args.source(&model))?;

            tracing::info!("processing");
            let merged = engine.merge(&rows, &mut wn);

            tracing::info!("saving to {}", out.display());
            save_source(&wn, &out).with_context(|| format!("saving model to {}", out.display()))?;
            tracing::info!("saved to {}", out.display());
            report.write(&merged)?;
        }
        Commands::Scan { model, model_args, no_extend, write_snapshot, report } => {
            let source = model_args.source(&model);
            let mut wn = load_model(&source)?;
            let counts = scan_model(&mut wn, !no_extend);

            if let Some(path) = &write_snapshot {
                if model_args.snapshot {
                    tracing::warn!("model already loaded from a snapshot, not rewriting it");
                } else {
                    let (dir, filename) = snapshot_parts(path);
                    save_snapshot(&wn, &dir, &filename)
                        .with_context(|| format!("saving snapshot {}", path.display()))?;
                    tracing::info!("snapshot saved to {}", path.display());
                }
            }
            tracing::info!("{} collocations {} inverses", counts.collocations, counts.inverses);
            report.write(&counts)?;
        }
    }
    Ok(())
}
