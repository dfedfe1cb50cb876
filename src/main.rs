use clap::Parser;
use outdoor_reno_site::config::Command;
use outdoor_reno_site::domain::ports::ConfigProvider;
use outdoor_reno_site::utils::error::{ErrorSeverity, SiteError};
use outdoor_reno_site::utils::{logger, validation};
use outdoor_reno_site::utils::validation::Validate;
use outdoor_reno_site::{AppState, CliConfig, LocalStorage, Site, SiteConfig, SiteExporter};

fn report_and_exit(context: &str, e: &SiteError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}

async fn run(cli: &CliConfig, config: SiteConfig) -> Result<(), SiteError> {
    let site = Site::from_config(&config)?;

    match &cli.command {
        Command::Serve { .. } => {
            let addr = validation::validate_socket_addr("server.bind", &config.server.bind)?;
            let listener = outdoor_reno_site::app::server::bind(addr).await?;
            let state = AppState::from_config(site, &config);
            outdoor_reno_site::app::server::run(listener, state).await?;
        }
        Command::Export { .. } => {
            let storage = LocalStorage::new(config.output_path().to_string());
            let exporter = SiteExporter::new(site, storage, config.export.archive);
            let report = exporter.export().await?;

            println!("✅ Exported {} pages", report.pages.len());
            for path in &report.skipped {
                println!("⚠️  Skipped {}", path);
            }
            if let Some(archive) = &report.archive {
                println!("📦 Archive: {}/{}", config.output_path(), archive);
            }
            println!("📁 Output saved to: {}", config.output_path());
        }
        Command::Routes => {
            let table = site.route_table().await;
            println!("# services from {}", table.service_origin);
            for path in table.paths() {
                println!("{}", path);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_logger(logger::LogFormat::from_flag(cli.log_json), cli.verbose);

    tracing::info!("Starting outdoor-reno-site");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.site_config() {
        Ok(config) => config,
        Err(e) => report_and_exit("Failed to load configuration", &e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        report_and_exit("Configuration validation failed", &e);
    }

    if let Err(e) = run(&cli, config).await {
        report_and_exit("Command failed", &e);
    }
}
