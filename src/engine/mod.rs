// ==========================================
// 工单排程看板 - 引擎层
// ==========================================
// 职责: 日历算术、列构建、坐标映射、重叠校验、缩放状态
// 红线: Engine 不做持久化，不依赖 UI
// ==========================================

pub mod calendar;
pub mod column_builder;
pub mod coordinate;
pub mod error;
pub mod overlap;
pub mod zoom;

// 重导出核心引擎
pub use column_builder::ColumnBuilder;
pub use coordinate::{center_scroll_left, CoordinateMapper};
pub use error::{EngineError, EngineResult, OVERLAP_CONFLICT_MESSAGE};
pub use overlap::{normalize_draft, ranges_overlap, WorkOrderBook};
pub use zoom::TimelineView;
