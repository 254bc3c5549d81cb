// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use download_center::config::settings::Settings;
use download_center::infrastructure::http::DownloadApiClient;
use download_center::infrastructure::metrics;
use download_center::presentation::routes;
use download_center::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting download-center...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    metrics::init_metrics(&settings.metrics);

    // 3. Backend client
    let client = Arc::new(DownloadApiClient::new(&settings.backend)?);
    info!("Download backend at {}", client.base_url());

    let app = routes::routes(client.clone(), settings.import, client.in_flight());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
