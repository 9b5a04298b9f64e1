use anyhow::Context;
use clap::Parser;
use layer_reorg::domain::ports::ConfigProvider;
use layer_reorg::utils::report::{self, OutputFormat};
use layer_reorg::utils::{logger, validation::Validate};
use layer_reorg::{LocalFileSystem, Reorganizer, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-reorg")]
#[command(about = "Layer reorganizer driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "layer-reorg.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output format from config
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Dry run - show what would be moved without touching any file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    // 應用命令列覆蓋設定
    if args.dry_run {
        config.moves.dry_run = Some(true);
    }
    let format = args.format.unwrap_or_else(|| config.output_format());
    let verbose = args.verbose || config.verbose();

    match format {
        OutputFormat::Text => logger::init_cli_logger(verbose, false),
        OutputFormat::Csv => logger::init_cli_logger(verbose, true),
        OutputFormat::Json => logger::init_json_logger(verbose),
    }

    tracing::info!("🚀 Starting TOML-based layer reorganizer");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if format == OutputFormat::Text {
        display_config_summary(&config);
    }

    let reorganizer = Reorganizer::from_config(LocalFileSystem::new(), &config);

    match reorganizer.run() {
        Ok(summary) => {
            tracing::info!("✅ Reorganization finished");
            let mut stdout = std::io::stdout().lock();
            report::write_summary(&mut stdout, &summary, format)
                .context("failed to write run summary")?;
        }
        Err(e) => {
            tracing::error!(
                "❌ Reorganization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!("  Layers: {}", config.layers_dir().display());
    println!("  Extension: .{}", config.extension());
    println!(
        "  Tag: {} -> @{}{}",
        config.color_tag(),
        config.color_name(),
        if config.replace_all() { " (all occurrences)" } else { "" }
    );
    println!("  Delimiter: {}", config.dir_delimiter());

    for replacement in config.extra_replacements() {
        println!("  Replace: {:?} -> {:?}", replacement.from, replacement.to);
    }

    println!("  Create missing folders: {}", config.create_missing_dirs());
    println!("  Overwrite existing: {}", config.overwrite_existing());

    if config.dry_run() {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
