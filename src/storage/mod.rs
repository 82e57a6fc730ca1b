use std::sync::Arc;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{LoveEvent, LoveRecord, LoveStats};

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = backend::SeaOrmStorage::new(database_url, &backend_type).await?;
        Ok(Arc::new(storage))
    }

    /// 以指定 URL 创建存储（测试和 CLI 用，不读全局配置的 database_url）
    pub async fn create_with_url(database_url: &str) -> Result<Arc<SeaOrmStorage>> {
        let backend_type = backend::infer_backend_from_url(database_url)?;
        let storage = backend::SeaOrmStorage::new(database_url, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
