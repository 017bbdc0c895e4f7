use clap::Parser;
use varfish_cli::core::runner::{exit_code, run_cli};
use varfish_cli::utils::logger;
use varfish_cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.global.verbose, cli.global.log_format);

    tracing::info!("Starting varfish-cli");
    if cli.global.verbose {
        tracing::debug!("CLI arguments: {:?}", cli.global);
    }

    let mut stdout = std::io::stdout();
    if let Err(e) = run_cli(&cli, &mut stdout).await {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("Error: {}", e.user_friendly_message());
        eprintln!("Hint: {}", e.recovery_suggestion());

        let code = exit_code(&e);
        if code > 0 {
            std::process::exit(code);
        }
    }
}
