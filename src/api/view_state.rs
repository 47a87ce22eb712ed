// ==========================================
// 工单排程看板 - 界面状态
// ==========================================
// 职责: 菜单展开、面板开关等界面状态，由顶层控制器持有并向下传递
// ==========================================

use crate::api::panel::{reduce, PanelAction, PanelState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub open_menu_bar_id: Option<String>,
    pub panel: Option<PanelState>,
}

impl ViewState {
    /// 切换工单条菜单：已展开则收起，否则展开
    pub fn toggle_menu(&mut self, bar_id: &str) {
        if self.open_menu_bar_id.as_deref() == Some(bar_id) {
            self.open_menu_bar_id = None;
        } else {
            self.open_menu_bar_id = Some(bar_id.to_string());
        }
    }

    pub fn close_menu(&mut self) {
        self.open_menu_bar_id = None;
    }

    pub fn is_menu_open(&self, bar_id: &str) -> bool {
        self.open_menu_bar_id.as_deref() == Some(bar_id)
    }

    /// 打开面板（同时收起菜单）
    pub fn open_panel(&mut self, panel: PanelState) {
        self.close_menu();
        self.panel = Some(panel);
    }

    pub fn close_panel(&mut self) {
        self.panel = None;
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel.is_some()
    }

    /// 对已打开的面板应用动作
    ///
    /// # 返回
    /// - true: 已应用
    /// - false: 面板未打开
    pub fn apply(&mut self, action: PanelAction) -> bool {
        match self.panel.take() {
            Some(panel) => {
                self.panel = Some(reduce(panel, action));
                true
            }
            None => false,
        }
    }
}
