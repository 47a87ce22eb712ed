// ==========================================
// 工单排程看板 - API 层
// ==========================================
// 职责: 提供看板 API，供外部界面调用
// ==========================================

pub mod board_api;
pub mod error;
pub mod panel;
pub mod view_state;

// 重导出核心类型
pub use board_api::BoardApi;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use panel::{reduce, PanelAction, PanelDraft, PanelErrors, PanelState};
pub use view_state::ViewState;
