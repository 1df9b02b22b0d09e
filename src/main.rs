use clap::{Args, Parser, Subcommand};
use fleetprint::batch::write_report_batch;
use fleetprint::request::{TableRequest, load_invoice, load_summary};
use fleetprint::{
    Margins, PageGeometry, PageSize, PageUnit, PipelineError, ReportEngine, ReportHeader, WrapStrategy,
};
use itertools::Itertools;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Lay out tabular reports and invoices as positioned page instructions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a table report from a JSON table request
    Report {
        input: PathBuf,
        /// Report title; overrides the title in the request
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        table: TableArgs,
        /// Write pages here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Lay out a single-page invoice from a JSON invoice document
    Invoice {
        input: PathBuf,
        #[command(flatten)]
        page: PageArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Lay out a sectioned summary report from a JSON summary document
    Summary {
        input: PathBuf,
        #[command(flatten)]
        page: PageArgs,
        /// Leave the report date out of the title band
        #[arg(long)]
        no_date: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Lay out several table reports in parallel
    Batch {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        table: TableArgs,
        /// Directory receiving one `<input stem>.pages.json` per input; repeated stems get a `-2`, `-3`, ... suffix
        #[arg(long)]
        output_dir: PathBuf,
    },
}

#[derive(Args, Debug)]
struct PageArgs {
    /// A4, Letter, Legal
    #[arg(long, default_value = "A4")]
    page_size: String,
    /// Unit of every length in the output: mm or pt
    #[arg(long, default_value = "mm")]
    unit: String,
    /// CSS-style margin shorthand, e.g. "10mm" or "10mm 10mm 20mm 10mm"
    #[arg(long)]
    margins: Option<String>,
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Minimum column width in the page unit
    #[arg(long)]
    min_col_width: Option<f32>,
    /// Break cell text into lines instead of estimating the line count
    #[arg(long)]
    word_wrap: bool,
    /// Prepend a numbered "SL No" column
    #[arg(long)]
    serial_numbers: bool,
    /// Leave the report date out of the title band
    #[arg(long)]
    no_date: bool,
}

impl PageArgs {
    fn geometry(&self) -> Result<PageGeometry, PipelineError> {
        let size = PageSize::parse(&self.page_size).map_err(PipelineError::Config)?;
        let unit = PageUnit::parse(&self.unit).map_err(PipelineError::Config)?;
        let mut geometry = PageGeometry::from_page_size(size, unit);
        if let Some(margins) = &self.margins {
            geometry = geometry
                .with_margins(Margins::parse_shorthand(margins, unit).map_err(PipelineError::Config)?);
        }
        Ok(geometry)
    }
}

impl TableArgs {
    fn engine(&self, mut geometry: PageGeometry) -> ReportEngine {
        if let Some(min) = self.min_col_width {
            geometry = geometry.with_min_col_width(min);
        }
        let wrap = if self.word_wrap {
            WrapStrategy::WordWrap
        } else {
            WrapStrategy::Estimate
        };
        ReportEngine::new(geometry)
            .with_wrap(wrap)
            .with_serial_numbers(self.serial_numbers)
    }

    fn header(&self, title: Option<String>) -> ReportHeader {
        let header = ReportHeader::new(title.unwrap_or_default());
        if self.no_date {
            header
        } else {
            header.dated(chrono::Local::now().date_naive())
        }
    }
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<(), PipelineError> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, json)?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    match cli.command {
        Command::Report {
            input,
            title,
            page,
            table,
            output,
        } => {
            let request = TableRequest::from_file(&input)?;
            let header = table.header(title.or(request.title.clone()));
            let engine = table.engine(page.geometry()?);
            let pages = engine.report(request.into_table(), &header)?;
            write_json(&pages, output.as_deref())
        }
        Command::Invoice {
            input,
            page,
            output,
        } => {
            let document = load_invoice(&input)?;
            let page = ReportEngine::new(page.geometry()?).invoice(&document)?;
            write_json(&page, output.as_deref())
        }
        Command::Summary {
            input,
            page,
            no_date,
            output,
        } => {
            let mut document = load_summary(&input)?;
            if !no_date && document.header.generated_on.is_none() {
                document.header.generated_on = Some(chrono::Local::now().date_naive());
            }
            let pages = ReportEngine::new(page.geometry()?).summary(&document)?;
            write_json(&pages, output.as_deref())
        }
        Command::Batch {
            inputs,
            page,
            table,
            output_dir,
        } => {
            log::info!(
                "Laying out {} reports: {}",
                inputs.len(),
                inputs.iter().map(|p| p.display()).join(", ")
            );
            let engine = table.engine(page.geometry()?);
            let written = write_report_batch(&engine, &inputs, &output_dir, |title| table.header(title))?;
            log::info!("Wrote {} reports to {}", written.len(), output_dir.display());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
