use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tote_report::config::{AppConfig, LogConfig};
use tote_report::report::Report;
use tote_report::session;
use tote_report::store::RecordStore;
use tote_report::types::{SortKey, SortOrder};
use tote_report::view::TableView;

/// Browse the tote summaries of a packing simulation report.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Report JSON produced by the packing simulation.
    report: PathBuf,

    /// Show only totes holding a SKU that contains this text.
    #[arg(short, long)]
    filter: Option<String>,

    /// Sort key: id, itemCount or volumeUtilization.
    #[arg(short, long)]
    sort: Option<SortKey>,

    /// Sort direction: asc or desc.
    #[arg(short, long)]
    order: Option<SortOrder>,

    /// Decimal places for the utilization column.
    #[arg(long)]
    decimals: Option<usize>,

    /// List hidden totes too, marked as hidden.
    #[arg(long)]
    show_hidden: bool,

    /// Read filter/sort commands from stdin after loading.
    #[arg(short, long)]
    interactive: bool,
}

fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_new(config.filter())
        .unwrap_or_else(|_| EnvFilter::new(LogConfig::DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn main() -> ExitCode {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound)
        {
            eprintln!("⚠️ Could not load .env: {}", err);
        }
    }

    let args = Args::parse();
    let app_config = AppConfig::from_env();
    init_tracing(&app_config.log);

    let report_config = app_config.report.with_overrides(
        args.sort,
        args.order,
        args.decimals,
        args.show_hidden,
    );

    let store = match RecordStore::load(&args.report) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("❌ {err}");
            return ExitCode::FAILURE;
        }
    };
    if store.is_empty() {
        eprintln!("ℹ️ {} contains no totes.", args.report.display());
    }

    let mut report = Report::new(store, TableView::new(report_config.table_options()));
    if let Some(filter) = &args.filter {
        report.apply_filter(filter);
    }
    if let Some(spec) = report_config.initial_sort() {
        report.apply_sort(spec.key, spec.order);
    }

    let result = if args.interactive {
        let stdin = io::stdin();
        session::run(&mut report, stdin.lock(), io::stdout().lock())
    } else {
        print!("{}", report.view().render(report.store()));
        println!("{}", report.summary());
        Ok(())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {err}");
            ExitCode::FAILURE
        }
    }
}
