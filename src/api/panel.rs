// ==========================================
// 工单排程看板 - 工单面板状态
// ==========================================
// 职责: 新建/编辑面板的不可变表单状态 + 纯函数 reducer
// 说明: 表单校验与控件框架解耦；日期倒置只做提示，提交时由引擎交换
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::{PanelMode, WorkOrderStatus};
use crate::domain::work_order::{SubmitMode, WorkOrder, WorkOrderDraft};
use crate::engine::calendar::format_date_dotted;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// PanelDraft - 表单字段
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelDraft {
    pub work_center_id: String,
    pub name: String,
    pub status: WorkOrderStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// ==========================================
// PanelAction - 表单动作
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    SetName(String),
    SetStatus(WorkOrderStatus),
    SetStartDate(Option<NaiveDate>),
    SetEndDate(Option<NaiveDate>),
    /// 点击提交（开始显示校验提示）
    SubmitAttempted,
    /// 外部业务错误（如重叠冲突）
    ExternalError(String),
    /// 清除校验提示（取消/关闭时）
    ResetValidation,
}

/// 表单校验结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelErrors {
    pub name_required: bool,
    pub start_required: bool,
    pub end_required: bool,
    /// 结束日期早于开始日期
    pub date_order: bool,
}

impl PanelErrors {
    pub fn any(&self) -> bool {
        self.name_required || self.start_required || self.end_required || self.date_order
    }
}

// ==========================================
// PanelState - 面板状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelState {
    pub mode: PanelMode,
    pub editing_id: Option<String>,
    pub draft: PanelDraft,
    pub external_error: Option<String>,
    pub submitted: bool,
}

impl PanelState {
    /// 新建面板
    pub fn create(work_center_id: &str, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            mode: PanelMode::Create,
            editing_id: None,
            draft: PanelDraft {
                work_center_id: work_center_id.to_string(),
                name: String::new(),
                status: WorkOrderStatus::Open,
                start_date: Some(start_date),
                end_date: Some(end_date),
            },
            external_error: None,
            submitted: false,
        }
    }

    /// 编辑面板（以现有工单为初值）
    pub fn edit(order: &WorkOrder) -> Self {
        Self {
            mode: PanelMode::Edit,
            editing_id: Some(order.id.clone()),
            draft: PanelDraft {
                work_center_id: order.work_center_id.clone(),
                name: order.name.clone(),
                status: order.status,
                start_date: Some(order.start_date),
                end_date: Some(order.end_date),
            },
            external_error: None,
            submitted: false,
        }
    }

    /// 当前字段的校验结果（不论是否已提交）
    pub fn errors(&self) -> PanelErrors {
        PanelErrors {
            name_required: self.draft.name.trim().is_empty(),
            start_required: self.draft.start_date.is_none(),
            end_required: self.draft.end_date.is_none(),
            date_order: matches!(
                (self.draft.start_date, self.draft.end_date),
                (Some(start), Some(end)) if end < start
            ),
        }
    }

    /// 需要展示的校验提示（提交前全部隐藏）
    pub fn visible_errors(&self) -> PanelErrors {
        if self.submitted {
            self.errors()
        } else {
            PanelErrors::default()
        }
    }

    pub fn title(&self) -> &'static str {
        "Work Order Details"
    }

    pub fn primary_cta(&self) -> &'static str {
        self.mode.primary_cta()
    }

    pub fn start_display(&self) -> String {
        self.draft.start_date.map(format_date_dotted).unwrap_or_default()
    }

    pub fn end_display(&self) -> String {
        self.draft.end_date.map(format_date_dotted).unwrap_or_default()
    }

    pub fn submit_mode(&self) -> SubmitMode {
        match (&self.mode, &self.editing_id) {
            (PanelMode::Edit, Some(id)) => SubmitMode::Edit { id: id.clone() },
            _ => SubmitMode::Create,
        }
    }

    /// 转换为提交候选
    ///
    /// # 错误
    /// - 名称为空 → EmptyName
    /// - 缺少开始/结束日期 → InvalidInput
    pub fn to_draft(&self) -> ApiResult<WorkOrderDraft> {
        let errors = self.errors();
        if errors.name_required {
            return Err(ApiError::EmptyName);
        }
        let (start_date, end_date) = match (self.draft.start_date, self.draft.end_date) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(ApiError::InvalidInput("开始日期和结束日期为必填项".to_string())),
        };

        Ok(WorkOrderDraft {
            work_center_id: self.draft.work_center_id.clone(),
            name: self.draft.name.clone(),
            status: self.draft.status,
            start_date,
            end_date,
        })
    }
}

/// 面板 reducer: (state, action) -> state
///
/// 任何字段编辑都会清除外部错误提示
pub fn reduce(state: PanelState, action: PanelAction) -> PanelState {
    let mut next = state;
    match action {
        PanelAction::SetName(name) => {
            next.draft.name = name;
            next.external_error = None;
        }
        PanelAction::SetStatus(status) => {
            next.draft.status = status;
            next.external_error = None;
        }
        PanelAction::SetStartDate(date) => {
            next.draft.start_date = date;
            next.external_error = None;
        }
        PanelAction::SetEndDate(date) => {
            next.draft.end_date = date;
            next.external_error = None;
        }
        PanelAction::SubmitAttempted => {
            next.submitted = true;
        }
        PanelAction::ExternalError(message) => {
            next.external_error = Some(message);
        }
        PanelAction::ResetValidation => {
            next.submitted = false;
        }
    }
    next
}
