use clap::Parser;
use customer_order_etl::clock::SystemClock;
use customer_order_etl::infra::ReqwestHttp;
use customer_order_etl::{logging, EtlConfig, EtlError, EtlPipeline};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Parser)]
#[command(name = "customer_order_etl")]
#[command(about = "Extract customers and orders from HTTP APIs into validated CSV files")]
#[command(version)]
struct Cli {
    /// TOML file overriding the built-in endpoints and output paths
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the two output files
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

async fn run(cli: Cli) -> Result<(), EtlError> {
    let mut config = EtlConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }

    println!("Starting ETL pipeline");
    let pipeline = EtlPipeline::new(config, Arc::new(ReqwestHttp::new()), Arc::new(SystemClock));
    let summary = pipeline.run().await?;

    println!(
        "   {} customers -> {}",
        summary.customers_written,
        summary.customer_file.display()
    );
    println!(
        "   {} orders -> {}",
        summary.orders_written,
        summary.order_file.display()
    );
    Ok(())
}

/// Exit status and the final status line for a finished run.
fn outcome(result: &Result<(), EtlError>) -> (u8, String) {
    match result {
        Ok(()) => (0, "✅ ETL completed successfully".to_string()),
        Err(e) => {
            if e.is_data_quality() {
                warn!("ETL run rejected: {}", e);
            } else {
                error!("ETL run failed: {}", e);
            }
            (1, format!("❌ {e}"))
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let (code, status_line) = outcome(&run(cli).await);
    println!("{status_line}");
    ExitCode::from(code)
}
