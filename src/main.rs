use cafe_dashboard::utils::{logger, validation::Validate};
use cafe_dashboard::{
    Anchor, CliConfig, ConfigProvider, Dashboard, DashboardService, Granularity, HttpOrderSource,
    JsonFileOrderSource, LocalStorage, OrderSource, ReportWriter, TomlConfig,
};
use clap::Parser;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting cafe-dashboard CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    // 讀取 TOML 配置,來源與輸出設定以檔案為準,日期與粒度仍由命令列決定
    let toml_config = match config.config.as_deref() {
        Some(path) => {
            let file_config = match TomlConfig::from_file(path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!("❌ Failed to load config file {}: {}", path, e);
                    eprintln!("❌ {}", e);
                    std::process::exit(e.exit_code());
                }
            };
            if let Err(e) = file_config.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                eprintln!("❌ {}", e);
                std::process::exit(e.exit_code());
            }
            Some(file_config)
        }
        None => None,
    };

    let endpoint = toml_config
        .as_ref()
        .map(|c| c.source_endpoint().to_string())
        .unwrap_or_else(|| config.source_endpoint.clone());
    let orders_file = toml_config
        .as_ref()
        .map(|c| c.orders_file().map(str::to_string))
        .unwrap_or_else(|| config.orders_file.clone());
    let output_path = toml_config
        .as_ref()
        .map(|c| c.output_path().to_string())
        .unwrap_or_else(|| config.output_path.clone());
    let timeout_seconds = toml_config
        .as_ref()
        .and_then(|c| c.timeout_seconds())
        .or(config.timeout_seconds);
    let bundle = config.bundle
        || toml_config
            .as_ref()
            .map(|c| c.bundle_enabled())
            .unwrap_or(false);
    let monitor_enabled = config.monitor
        || toml_config
            .as_ref()
            .map(|c| c.monitoring_enabled())
            .unwrap_or(false);

    let granularity = match config.granularity.parse::<Granularity>() {
        Ok(g) => g,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    // 未指定日期時以今天為錨點
    let anchor = match &config.date {
        Some(text) => Anchor::from(text.as_str()),
        None => Anchor::from(chrono::Local::now().date_naive()),
    };
    let date = match anchor.resolve() {
        Ok(d) => d,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    if config.dry_run {
        let window = granularity.window_for(date);
        println!("🔍 {} dashboard window: {}", granularity.as_str(), window);
        return Ok(());
    }

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let result = match orders_file {
        Some(path) => {
            tracing::info!("📁 Reading orders from {}", path);
            build_dashboard(
                JsonFileOrderSource::new(path),
                date,
                granularity,
                timeout_seconds,
                monitor_enabled,
            )
            .await
        }
        None => {
            let mut source = HttpOrderSource::new(endpoint.clone());
            if let Some(headers) = toml_config.as_ref().and_then(|c| c.headers()) {
                for (name, value) in headers {
                    source = source.with_header(name.clone(), value.clone());
                }
            }
            build_dashboard(source, date, granularity, timeout_seconds, monitor_enabled).await
        }
    };

    match result {
        Ok(dashboard) => {
            let summary = dashboard.sales_summary();
            tracing::info!(
                "📊 {} orders, total sales {}",
                summary.total_orders,
                summary.total_sales
            );

            let file_base = toml_config
                .as_ref()
                .map(|c| c.report_filename().to_string())
                .unwrap_or_else(|| "dashboard".to_string());
            let json_name = format!("{}-{}-{}.json", file_base, granularity.as_str(), date);
            let writer = ReportWriter::new(LocalStorage::new(output_path.clone()));

            if let Err(e) = writer.write_json(&dashboard, &json_name).await {
                tracing::error!("❌ Failed to write report: {}", e);
                eprintln!("❌ {}", e);
                std::process::exit(e.exit_code());
            }

            tracing::info!("✅ Dashboard build completed successfully!");
            tracing::info!("📁 Report saved to: {}/{}", output_path, json_name);
            println!("✅ Dashboard build completed successfully!");
            println!("📁 Report saved to: {}/{}", output_path, json_name);

            if bundle {
                let zip_name = format!("{}-{}-{}.zip", file_base, granularity.as_str(), date);
                if let Err(e) = writer.write_bundle(&dashboard, &zip_name).await {
                    tracing::error!("❌ Failed to write bundle: {}", e);
                    eprintln!("❌ {}", e);
                    std::process::exit(e.exit_code());
                }
                println!("📦 Bundle saved to: {}/{}", output_path, zip_name);
            }
        }
        Err(e) => {
            tracing::error!("❌ Dashboard build failed: {} (Kind: {:?})", e, e.kind());
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

async fn build_dashboard<S: OrderSource>(
    source: S,
    date: chrono::NaiveDate,
    granularity: Granularity,
    timeout_seconds: Option<u64>,
    monitor: bool,
) -> cafe_dashboard::Result<Dashboard> {
    let service = DashboardService::new_with_monitoring(source, monitor);
    match timeout_seconds {
        Some(secs) => {
            service
                .build_with_deadline(date, granularity, Duration::from_secs(secs))
                .await
        }
        None => service.build(date, granularity).await,
    }
}
