use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use container_exporter::cli::Cli;
use container_exporter::config::StaticConfig;
use container_exporter::errors::ExporterError;
use container_exporter::runtime;
use container_exporter::system::init_logging;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.generate_config {
        print!("{}", StaticConfig::generate_sample_config());
        return ExitCode::SUCCESS;
    }

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    // 保持 guard 存活直到进程退出
    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = runtime::run(config).await {
        error!("{:#}", e);
        match e.downcast_ref::<ExporterError>() {
            Some(exporter_error) => eprintln!("{}", exporter_error.format_colored()),
            None => eprintln!("{:#}", e),
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
