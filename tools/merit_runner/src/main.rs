mod config;

use clap::Parser;
use config::Args;
use merit_core::export::{render_top_table, MeritExporter};
use merit_core::run::MeritPipeline;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(&args);

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(2);
    }

    info!("Marksheets: {}", args.marksheets.display());
    info!("Certificates: {}", args.certificates.display());
    info!("Output: {}", args.output_dir.display());
    if let Some(course) = &args.course {
        info!("Course filter: {}", course);
    }

    let pipeline = MeritPipeline::new(MeritExporter::new(args.export_config()))
        .with_course_filter(args.course.clone());
    let outcome = pipeline.run(&args.marksheets, &args.certificates)?;
    let summary = &outcome.summary;

    for report in [&summary.marksheets, &summary.certificates] {
        if report.skipped_failures > 0 {
            warn!(
                "{} {} extraction(s) failed and were skipped",
                report.skipped_failures, report.document_kind
            );
        }
        if !report.fallback_identities.is_empty() {
            warn!(
                "{} {} result(s) were attributed by fallback identity",
                report.fallback_identities.len(),
                report.document_kind
            );
        }
    }

    info!("Results saved to {}", summary.outputs.store_json.display());
    info!("Merit list saved to {}", summary.outputs.merit_list_json.display());
    info!("Merit list CSV saved to {}", summary.outputs.merit_list_csv.display());

    if args.summary_json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!("{}", "=".repeat(80));
        println!("MERIT LIST");
        println!("{}", "=".repeat(80));
        print!("{}", render_top_table(&outcome.merit_list, args.top));
    }

    Ok(())
}

fn init_tracing(args: &Args) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "merit_runner={level},merit_core={level}",
            level = args.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    // Logs go to stderr so stdout carries only the table or summary.
    if args.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
