// ==========================================
// 工单排程看板 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 工作中心 × 时间轴的工单排程看板（无重叠约束）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 看板配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{PanelMode, WorkOrderStatus, ZoomLevel};

// 领域实体
pub use domain::{
    BarView, PointerIntent, SubmitMode, TimelineColumn, TrackRect, WorkCenter, WorkOrder,
    WorkOrderDraft,
};

// 引擎
pub use engine::{
    ColumnBuilder, CoordinateMapper, EngineError, TimelineView, WorkOrderBook,
    OVERLAP_CONFLICT_MESSAGE,
};

// API
pub use api::{ApiError, BoardApi, PanelAction, PanelState};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工单排程看板";
