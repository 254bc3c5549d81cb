// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

pub const IMPORT_ROWS_ACCEPTED: &str = "import_rows_accepted_total";
pub const IMPORT_ROWS_REJECTED: &str = "import_rows_rejected_total";
pub const IMPORT_SUBMISSIONS: &str = "import_submissions_total";

/// 初始化指标系统
///
/// 未启用时只注册指标描述，记录调用不会产生任何输出
pub fn init_metrics(settings: &MetricsSettings) {
    if settings.enabled {
        match settings.listen_addr.parse::<SocketAddr>() {
            Ok(addr) => {
                // 端口被占用时只告警，不影响服务启动
                if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
                    warn!("Failed to install Prometheus recorder: {}", e);
                } else {
                    info!("Metrics exporter listening on {}", addr);
                }
            }
            Err(e) => warn!(
                "Invalid metrics listen address {}: {}",
                settings.listen_addr, e
            ),
        }
    }

    describe_counter!(IMPORT_ROWS_ACCEPTED, "Total number of CSV rows accepted by validation");
    describe_counter!(IMPORT_ROWS_REJECTED, "Total number of CSV rows rejected by validation");
    describe_counter!(
        IMPORT_SUBMISSIONS,
        "Total number of task submissions made by imports, labelled by outcome"
    );
}

/// 记录一次校验的行数
pub fn record_validation(accepted: usize, rejected: usize) {
    counter!(IMPORT_ROWS_ACCEPTED).increment(accepted as u64);
    counter!(IMPORT_ROWS_REJECTED).increment(rejected as u64);
}

/// 记录一次提交结果
pub fn record_submission(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!(IMPORT_SUBMISSIONS, "outcome" => outcome).increment(1);
}
