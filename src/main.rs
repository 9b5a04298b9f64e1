use anyhow::Context;
use clap::Parser;
use layer_reorg::utils::report::{self, OutputFormat};
use layer_reorg::utils::{logger, validation::Validate};
use layer_reorg::{CliConfig, LocalFileSystem, Reorganizer};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌，非文字輸出時日誌改寫到 stderr
    match config.format {
        OutputFormat::Text => logger::init_cli_logger(config.verbose, false),
        OutputFormat::Csv => logger::init_cli_logger(config.verbose, true),
        OutputFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("🚀 Starting layer-reorg");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be moved");
    }

    let reorganizer = Reorganizer::from_config(LocalFileSystem::new(), &config);

    match reorganizer.run() {
        Ok(summary) => {
            tracing::info!("✅ Reorganization finished");
            let mut stdout = std::io::stdout().lock();
            report::write_summary(&mut stdout, &summary, config.format)
                .context("failed to write run summary")?;
        }
        Err(e) => {
            tracing::error!(
                "❌ Reorganization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
