use clap::Parser;
use tracing_subscriber::EnvFilter;

use tenderwatch::cli::Cli;
use tenderwatch::config::Config;
use tenderwatch::domain::AggregateReport;
use tenderwatch::errors::TenderResult;
use tenderwatch::services::{AggregateService, ReportWriter};
use tenderwatch::sources::SourceRegistry;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tenderwatch=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> TenderResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(output) = cli.output {
        config.output_path = output;
    }

    let registry = SourceRegistry::from_config(&config);
    let service = AggregateService::new(registry);

    println!("Fetching tenders...\n");

    let report = service.run();
    print_summary(&report);

    if cli.dry_run {
        println!(
            "\nDry run complete. Would write {} tenders to {}.",
            report.total_energy_tenders,
            config.output_path.display()
        );
        return Ok(());
    }

    ReportWriter::new(&config.output_path).write(&report)?;

    println!(
        "\nDone! {} battery/energy tenders found.",
        report.total_energy_tenders
    );

    Ok(())
}

fn print_summary(report: &AggregateReport) {
    for (source, stats) in report.stats.iter() {
        match (&stats.error, stats.total_fetched, stats.energy_related) {
            (Some(error), _, _) => println!("  {}: FAILED ({})", source, error),
            (None, Some(fetched), Some(related)) => {
                println!("  {}: {} fetched, {} energy-related", source, fetched, related)
            }
            _ => println!("  {}: no data", source),
        }
    }
}
