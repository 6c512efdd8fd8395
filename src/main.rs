// ==========================================
// 采购订单库存差异报表 - 主入口
// ==========================================
// serve  启动 HTTP 服务（默认）
// report 离线处理单个文件，输出 JSON / 可选写出 xlsx
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use po_variance_report::app::{router, AppState};
use po_variance_report::config::{ConfigManager, ReportConfigReader};
use po_variance_report::{logging, PoNormalizer, ReportApi, APP_NAME, VERSION};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Purchase-order stock variance report service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service (default).
    Serve {
        /// Overrides PO_VARIANCE_BIND_ADDR.
        #[arg(long)]
        bind: Option<std::net::SocketAddr>,
    },
    /// Build the variance report for one spreadsheet and print it as JSON.
    Report {
        /// Input spreadsheet (.xlsx/.xls/.xlsm/.xlsb/.ods/.csv).
        input: PathBuf,

        /// Also write the report rows to this .xlsx file.
        #[arg(long)]
        xlsx: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    logging::init();

    let config = ConfigManager::from_env();

    match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => serve(&config, bind).await,
        Commands::Report { input, xlsx } => report(&config, input, xlsx).await,
    }
}

async fn serve(config: &ConfigManager, bind: Option<std::net::SocketAddr>) -> Result<()> {
    tracing::info!("==================================================");
    tracing::info!("{}", APP_NAME);
    tracing::info!("系统版本: {}", VERSION);
    tracing::info!("==================================================");
    tracing::info!("生效配置: {}", config.get_config_snapshot()?);

    let bind_addr = match bind {
        Some(addr) => addr,
        None => config.get_bind_addr()?,
    };
    let state = AppState::from_config(config)?;

    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("无法监听 {}", bind_addr))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("服务已停止");
    Ok(())
}

async fn report(config: &ConfigManager, input: PathBuf, xlsx: Option<PathBuf>) -> Result<()> {
    let api = Arc::new(ReportApi::new(PoNormalizer::new(config.get_exclusion_prefix()?)));

    let worker = Arc::clone(&api);
    let report = tokio::task::spawn_blocking(move || worker.generate_report(&input)).await??;

    println!("{}", serde_json::to_string_pretty(&report.rows)?);

    if let Some(out) = xlsx {
        let bytes = api.export_rows(&serde_json::to_value(&report.rows)?)?;
        std::fs::write(&out, bytes).with_context(|| format!("无法写入 {}", out.display()))?;
        tracing::info!(path = %out.display(), "已写出 Excel");
    }

    eprintln!(
        "records_in={} shortfall_records={} groups_out={} null_dates={}",
        report.summary.records_in,
        report.summary.shortfall_records,
        report.summary.groups_out,
        report.summary.null_dates
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("无法监听 Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("收到退出信号");
}
