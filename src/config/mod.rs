// ==========================================
// 工单排程看板 - 配置层
// ==========================================
// 职责: 看板配置默认值与覆写
// 存储: config_kv 表
// ==========================================

pub mod board_config;
pub mod config_manager;

// 重导出核心配置
pub use board_config::{config_keys, BoardConfig};
pub use config_manager::ConfigManager;
