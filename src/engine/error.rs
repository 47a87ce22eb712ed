// ==========================================
// 工单排程看板 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 所有错误均可恢复，仅代表单次提交被拒绝
// ==========================================

use thiserror::Error;

/// 重叠冲突的固定提示文案
pub const OVERLAP_CONFLICT_MESSAGE: &str = "Work orders cannot overlap on the same work center.";

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    // ===== 输入格式错误 =====
    #[error("日期格式错误（应为YYYY-MM-DD）: {input}")]
    InvalidDateFormat { input: String },

    #[error("无效的点击位置: x={x}, pixels_per_day={pixels_per_day}")]
    InvalidPointer { x: String, pixels_per_day: String },

    // ===== 校验错误 =====
    #[error("工单名称不能为空")]
    EmptyName,

    // ===== 排程冲突 =====
    #[error("排程冲突: {message}")]
    OverlapConflict {
        message: String,
        conflicting_id: String,
    },

    #[error("工单未找到: id={id}")]
    WorkOrderNotFound { id: String },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
