pub mod admin;
pub mod health;
pub mod love;

pub use admin::{AdminService, admin_routes};
pub use health::{AppStartTime, HealthService, health_routes};
pub use love::{LoveService, love_routes};
