use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::get_config;
use crate::services::LoveTracker;
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub tracker: Arc<LoveTracker>,
}

/// 准备服务器启动的上下文
/// 包括存储连接、数据库迁移与 LoveTracker 服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let tracker = Arc::new(LoveTracker::new(storage.clone()));

    check_component_enabled();

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext { storage, tracker })
}

fn check_component_enabled() {
    let config = get_config();

    // 检查 Admin API 是否启用
    let admin_token = &config.api.admin_token;
    if admin_token.is_empty() {
        info!("Admin API is disabled (admin_token not set)");
    } else {
        info!("Admin API available at: /admin");
        if admin_token.len() < 8 {
            warn!("WARNING: Admin Token is very short. Consider using a stronger token.");
        }
    }

    // tracking 开关只影响事件附带字段，不影响计数本身
    if !config.tracking.store_client_hint && !config.tracking.store_referrer {
        info!("Event enrichment is disabled (client_hint and referrer will not be stored)");
    }
}
