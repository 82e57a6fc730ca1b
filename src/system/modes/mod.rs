//! Mode routing
//!
//! 运行模式的统一入口：
//! - Server 模式（HTTP 服务，默认）
//! - CLI 模式（统计查询与配置管理）

pub mod cli;
pub mod server;

pub use server::run_server;
