// 分层结构：领域 / 应用 / 基础设施 / 展示
pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

// 重新导出主要类型
pub use domain::{Age, FilterKind, InvalidQuery, User};
pub use application::{load_users, run, Config, LoadError, Outcome};
pub use infrastructure::{Logger, LoggerTrait};
pub use presentation::write_results;
