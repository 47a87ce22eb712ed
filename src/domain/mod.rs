// ==========================================
// 工单排程看板 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、视图数据契约
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod seed;
pub mod timeline;
pub mod types;
pub mod work_order;

// 重导出核心类型
pub use seed::{seed_work_centers, seed_work_orders};
pub use timeline::{
    BarGeometry, BarView, GridColumn, HeaderColumn, PointerIntent, TimelineColumn, TrackRect,
};
pub use types::{PanelMode, WorkOrderStatus, ZoomLevel};
pub use work_order::{find_invariant_violation, SubmitMode, WorkCenter, WorkOrder, WorkOrderDraft};
