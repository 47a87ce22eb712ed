// ==========================================
// 工单排程看板 - 看板 API
// ==========================================
// 职责: 顶层控制器，持有工单集合、时间轴视图与界面状态
// 流程: 用户动作（点击新建/编辑/删除）→ 重叠引擎 → 修改集合 → 持久化
// 红线: 工单集合只由本控制器修改
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::panel::{PanelAction, PanelState};
use crate::api::view_state::ViewState;
use crate::config::BoardConfig;
use crate::domain::timeline::{BarView, GridColumn, HeaderColumn, PointerIntent, TimelineColumn};
use crate::domain::types::ZoomLevel;
use crate::domain::work_order::{SubmitMode, WorkCenter, WorkOrder, WorkOrderDraft};
use crate::engine::overlap::WorkOrderBook;
use crate::engine::zoom::TimelineView;
use crate::repository::kv_store::KvStore;
use crate::repository::work_order_repo::WorkOrderRepository;

// ==========================================
// BoardApi - 看板 API
// ==========================================

/// 看板API
///
/// 职责：
/// 1. 时间轴列与工单条视图模型
/// 2. 新建/编辑/删除工单（经重叠校验）
/// 3. 菜单与面板界面状态
/// 4. 变更后保存工单列表
pub struct BoardApi {
    config: BoardConfig,
    work_centers: Vec<WorkCenter>,
    book: WorkOrderBook,
    timeline: TimelineView,
    view_state: ViewState,
    repo: WorkOrderRepository,
}

impl BoardApi {
    /// 创建新的BoardApi实例
    ///
    /// # 参数
    /// - store: 键值存储（读取/保存工单列表）
    /// - config: 看板配置
    /// - work_centers: 工作中心参考列表
    /// - today: 当天日期（锚点 = today - anchor_offset_days）
    pub fn new(
        store: Arc<dyn KvStore>,
        config: BoardConfig,
        work_centers: Vec<WorkCenter>,
        today: NaiveDate,
    ) -> Self {
        let repo = WorkOrderRepository::new(store, &config.storage_key);
        let book = WorkOrderBook::new(repo.load_or_seed());
        let timeline = TimelineView::new(config.anchor_for(today), today, config.initial_zoom);

        info!(
            work_centers = work_centers.len(),
            work_orders = book.len(),
            anchor = %timeline.anchor(),
            zoom = %timeline.zoom(),
            "看板初始化完成"
        );

        Self {
            config,
            work_centers,
            book,
            timeline,
            view_state: ViewState::default(),
            repo,
        }
    }

    // ==========================================
    // 只读访问
    // ==========================================

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn work_centers(&self) -> &[WorkCenter] {
        &self.work_centers
    }

    pub fn work_orders(&self) -> &[WorkOrder] {
        self.book.orders()
    }

    pub fn timeline(&self) -> &TimelineView {
        &self.timeline
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn panel(&self) -> Option<&PanelState> {
        self.view_state.panel.as_ref()
    }

    // ==========================================
    // 缩放与时间轴
    // ==========================================

    /// 切换缩放级别（同级别为空操作）
    pub fn set_timescale(&mut self, zoom: ZoomLevel) -> bool {
        self.timeline.set_timescale(zoom)
    }

    /// 渲染完成后消费延迟居中，返回需要设置的 scroll_left
    pub fn after_render(&mut self, viewport_width_px: f64) -> Option<f64> {
        self.timeline.after_render(viewport_width_px)
    }

    pub fn columns(&self) -> &[TimelineColumn] {
        self.timeline.columns()
    }

    pub fn header_columns(&self) -> Vec<HeaderColumn> {
        self.timeline.header_columns()
    }

    pub fn grid_columns(&self) -> Vec<GridColumn> {
        self.timeline.grid_columns()
    }

    pub fn total_width_px(&self) -> f64 {
        self.timeline.total_width_px()
    }

    pub fn today_line_offset_px(&self) -> f64 {
        self.timeline.today_line_offset_px()
    }

    /// 某工作中心的工单条视图模型（插入顺序）
    pub fn bars_for(&self, work_center_id: &str) -> Vec<BarView> {
        let ppd = self.timeline.pixels_per_day();
        let mapper = self.timeline.mapper();
        self.book
            .for_work_center(work_center_id)
            .map(|o| {
                let geometry = mapper
                    .bar_geometry(o.start_date, o.end_date, ppd)
                    .inset(self.config.bar_inset_px);
                BarView {
                    id: o.id.clone(),
                    name: o.name.clone(),
                    status: o.status,
                    left_px: geometry.left_px,
                    width_px: geometry.width_px,
                }
            })
            .collect()
    }

    // ==========================================
    // 菜单
    // ==========================================

    pub fn toggle_menu(&mut self, bar_id: &str) {
        self.view_state.toggle_menu(bar_id);
    }

    pub fn close_menu(&mut self) {
        self.view_state.close_menu();
    }

    /// 全局点击：收起菜单
    pub fn on_global_click(&mut self) {
        self.view_state.close_menu();
    }

    // ==========================================
    // 面板
    // ==========================================

    /// 点击轨道新建：以点击日为起点，默认跨度 default_span_days
    pub fn open_create_from_pointer(
        &mut self,
        work_center_id: &str,
        intent: PointerIntent,
    ) -> ApiResult<&PanelState> {
        self.view_state.close_menu();
        self.ensure_work_center(work_center_id)?;

        let (start, end) = self.timeline.mapper().create_range_from_pointer(
            intent,
            self.timeline.pixels_per_day(),
            self.config.default_span_days,
        )?;

        self.view_state
            .open_panel(PanelState::create(work_center_id, start, end));
        self.panel_or_err()
    }

    /// 打开编辑面板
    pub fn open_edit(&mut self, id: &str) -> ApiResult<&PanelState> {
        let order = self
            .book
            .find(id)
            .ok_or_else(|| ApiError::NotFound(format!("工单(id={})不存在", id)))?;
        let panel = PanelState::edit(order);
        self.view_state.open_panel(panel);
        self.panel_or_err()
    }

    /// 对面板应用表单动作
    pub fn update_panel(&mut self, action: PanelAction) -> ApiResult<&PanelState> {
        if !self.view_state.apply(action) {
            return Err(ApiError::InvalidInput("面板未打开".to_string()));
        }
        self.panel_or_err()
    }

    /// 关闭面板（取消 / Esc / 点击遮罩）
    pub fn close_panel(&mut self) {
        self.view_state.close_panel();
    }

    /// 提交面板
    ///
    /// # 返回
    /// - Ok(WorkOrder): 写入成功，面板已关闭
    /// - Err(OverlapConflict): 冲突文案写入面板 external_error，面板保持打开
    /// - Err(其他): 校验失败，面板保持打开
    pub fn submit_panel(&mut self) -> ApiResult<WorkOrder> {
        if !self.view_state.apply(PanelAction::SubmitAttempted) {
            return Err(ApiError::InvalidInput("面板未打开".to_string()));
        }
        let (draft, mode) = {
            let panel = self.panel_or_err()?;
            (panel.to_draft()?, panel.submit_mode())
        };

        match self.submit(draft, mode) {
            Ok(order) => {
                self.view_state.close_panel();
                Ok(order)
            }
            Err(err) => {
                if let ApiError::OverlapConflict { message, .. } = &err {
                    self.view_state
                        .apply(PanelAction::ExternalError(message.clone()));
                }
                Err(err)
            }
        }
    }

    // ==========================================
    // 工单增删改
    // ==========================================

    /// 新建工单
    pub fn create(&mut self, draft: WorkOrderDraft) -> ApiResult<WorkOrder> {
        self.submit(draft, SubmitMode::Create)
    }

    /// 编辑工单（保留ID）
    pub fn update(&mut self, id: &str, draft: WorkOrderDraft) -> ApiResult<WorkOrder> {
        self.submit(draft, SubmitMode::Edit { id: id.to_string() })
    }

    /// 提交候选（经重叠校验），成功后保存
    pub fn submit(&mut self, draft: WorkOrderDraft, mode: SubmitMode) -> ApiResult<WorkOrder> {
        self.ensure_work_center(&draft.work_center_id)?;
        let order = self.book.submit(draft, mode)?;
        self.persist();
        Ok(order)
    }

    /// 删除工单（无条件；不存在时静默）
    pub fn delete(&mut self, id: &str) -> Option<WorkOrder> {
        self.view_state.close_menu();
        let removed = self.book.delete(id);
        if removed.is_some() {
            self.persist();
        }
        removed
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn persist(&self) {
        self.repo.save(self.book.orders());
    }

    fn ensure_work_center(&self, work_center_id: &str) -> ApiResult<()> {
        if self.work_centers.iter().any(|wc| wc.id == work_center_id) {
            Ok(())
        } else {
            warn!(work_center_id, "未知工作中心");
            Err(ApiError::InvalidInput(format!(
                "工作中心不存在: {}",
                work_center_id
            )))
        }
    }

    fn panel_or_err(&self) -> ApiResult<&PanelState> {
        self.view_state
            .panel
            .as_ref()
            .ok_or_else(|| ApiError::InternalError("面板状态缺失".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::{seed_work_centers, seed_work_orders};
    use crate::domain::types::WorkOrderStatus;
    use crate::repository::kv_store::MemoryKvStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn board() -> BoardApi {
        BoardApi::new(
            Arc::new(MemoryKvStore::new()),
            BoardConfig::default(),
            seed_work_centers(),
            date(2026, 1, 15),
        )
    }

    #[test]
    fn test_starts_from_seed() {
        let b = board();
        assert_eq!(b.work_orders(), seed_work_orders().as_slice());
        assert_eq!(b.timeline().anchor(), date(2026, 1, 1));
        assert_eq!(b.columns().len(), 29);
    }

    #[test]
    fn test_bars_for_work_center() {
        let b = board();
        let bars = b.bars_for("wc-1");
        assert_eq!(bars.len(), 2);
        // wo-1: 1/10..1/14 → day 9, 5 天
        assert_eq!(bars[0].id, "wo-1");
        assert_eq!(bars[0].left_px, 9.0 * 56.0);
        assert_eq!(bars[0].width_px, 5.0 * 56.0);
        assert!(b.bars_for("wc-2").is_empty());
    }

    #[test]
    fn test_update_panel_requires_open_panel() {
        let mut b = board();
        assert!(matches!(
            b.update_panel(PanelAction::SetName("x".to_string())),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(b.submit_panel(), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_work_center_rejected() {
        let mut b = board();
        let draft = WorkOrderDraft::new("wc-404", "X", WorkOrderStatus::Open, date(2026, 3, 1), date(2026, 3, 1));
        assert!(matches!(b.create(draft), Err(ApiError::InvalidInput(_))));
        assert_eq!(b.work_orders().len(), 3);
    }

    #[test]
    fn test_delete_closes_menu() {
        let mut b = board();
        b.toggle_menu("wo-2");
        assert!(b.delete("wo-2").is_some());
        assert_eq!(b.view_state().open_menu_bar_id, None);
        assert!(b.delete("wo-2").is_none());
    }
}
