//! 系统层：日志初始化、生命周期与运行模式

pub mod lifetime;
pub mod logging;
pub mod modes;
