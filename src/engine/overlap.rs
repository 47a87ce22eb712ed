// ==========================================
// 工单排程看板 - 重叠校验与排程引擎
// ==========================================
// 红线: 同一工作中心不得存在闭区间相交的两张工单
// ==========================================
// 提交协议:
// 1) 规范化: start > end 时交换；名称 trim 后不得为空
// 2) 重叠检测: 同工作中心、排除自身ID，闭区间求交
// 3) 写入: 新建追加（新ID），编辑原位替换（保留ID）
// 删除无条件执行，不做重叠检测
// ==========================================
// 并发: 校验与写入非原子，共享使用时调用方需串行化 submit/delete
// ==========================================

use crate::domain::work_order::{SubmitMode, WorkOrder, WorkOrderDraft};
use crate::engine::error::{EngineError, EngineResult, OVERLAP_CONFLICT_MESSAGE};
use chrono::NaiveDate;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 闭区间相交判定（首尾同日也算相交）
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// 规范化候选: 交换倒置日期、trim 名称
///
/// # 错误
/// - trim 后名称为空 → EmptyName
pub fn normalize_draft(draft: WorkOrderDraft) -> EngineResult<WorkOrderDraft> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(EngineError::EmptyName);
    }

    let (start_date, end_date) = if draft.start_date > draft.end_date {
        (draft.end_date, draft.start_date)
    } else {
        (draft.start_date, draft.end_date)
    };

    Ok(WorkOrderDraft {
        name: name.to_string(),
        start_date,
        end_date,
        ..draft
    })
}

// ==========================================
// WorkOrderBook - 工单集合
// ==========================================
// 顺序: 插入顺序，不做排序
#[derive(Debug, Clone, Default)]
pub struct WorkOrderBook {
    orders: Vec<WorkOrder>,
}

impl WorkOrderBook {
    pub fn new(orders: Vec<WorkOrder>) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &[WorkOrder] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&WorkOrder> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// 某工作中心的工单（按插入顺序）
    pub fn for_work_center<'a>(&'a self, work_center_id: &'a str) -> impl Iterator<Item = &'a WorkOrder> + 'a {
        self.orders
            .iter()
            .filter(move |o| o.work_center_id == work_center_id)
    }

    /// 查找第一张与候选区间相交的工单
    pub fn find_conflict(
        &self,
        work_center_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<&str>,
    ) -> Option<&WorkOrder> {
        self.orders
            .iter()
            .filter(|o| o.work_center_id == work_center_id)
            .filter(|o| Some(o.id.as_str()) != exclude_id)
            .find(|o| ranges_overlap(start, end, o.start_date, o.end_date))
    }

    pub fn has_overlap(
        &self,
        work_center_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<&str>,
    ) -> bool {
        self.find_conflict(work_center_id, start, end, exclude_id)
            .is_some()
    }

    /// 提交新建/编辑
    ///
    /// # 返回
    /// - Ok(WorkOrder): 写入后的工单
    /// - Err(EmptyName / WorkOrderNotFound / OverlapConflict): 集合保持不变
    #[instrument(skip(self, draft), fields(work_center_id = %draft.work_center_id))]
    pub fn submit(&mut self, draft: WorkOrderDraft, mode: SubmitMode) -> EngineResult<WorkOrder> {
        let draft = normalize_draft(draft)?;

        let edit_position = match &mode {
            SubmitMode::Create => None,
            SubmitMode::Edit { id } => Some(
                self.orders
                    .iter()
                    .position(|o| &o.id == id)
                    .ok_or_else(|| EngineError::WorkOrderNotFound { id: id.clone() })?,
            ),
        };

        if let Some(conflict) = self.find_conflict(
            &draft.work_center_id,
            draft.start_date,
            draft.end_date,
            mode.exclude_id(),
        ) {
            warn!(
                conflicting_id = %conflict.id,
                start = %draft.start_date,
                end = %draft.end_date,
                "工单区间重叠，拒绝写入"
            );
            return Err(EngineError::OverlapConflict {
                message: OVERLAP_CONFLICT_MESSAGE.to_string(),
                conflicting_id: conflict.id.clone(),
            });
        }

        match (mode, edit_position) {
            (SubmitMode::Edit { id }, Some(pos)) => {
                let order = draft.into_work_order(id);
                self.orders[pos] = order.clone();
                info!(id = %order.id, "工单已更新");
                Ok(order)
            }
            _ => {
                let order = draft.into_work_order(self.generate_id());
                self.orders.push(order.clone());
                info!(id = %order.id, "工单已创建");
                Ok(order)
            }
        }
    }

    /// 删除工单（不存在时静默忽略）
    pub fn delete(&mut self, id: &str) -> Option<WorkOrder> {
        let pos = self.orders.iter().position(|o| o.id == id)?;
        let removed = self.orders.remove(pos);
        info!(id = %removed.id, "工单已删除");
        Some(removed)
    }

    // 新 ID，与现有ID不重复
    fn generate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.find(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::WorkOrderStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(id: &str, wc: &str, start: NaiveDate, end: NaiveDate) -> WorkOrder {
        WorkOrder {
            id: id.to_string(),
            work_center_id: wc.to_string(),
            name: format!("Order {}", id),
            status: WorkOrderStatus::Open,
            start_date: start,
            end_date: end,
        }
    }

    fn draft(wc: &str, name: &str, start: NaiveDate, end: NaiveDate) -> WorkOrderDraft {
        WorkOrderDraft::new(wc, name, WorkOrderStatus::Open, start, end)
    }

    fn book_with_wc1() -> WorkOrderBook {
        WorkOrderBook::new(vec![order("wo-a", "wc-1", date(2026, 1, 3), date(2026, 1, 6))])
    }

    #[test]
    fn test_find_conflict_outlives_lookup_key() {
        let book = book_with_wc1();
        let conflict = {
            let wc = String::from("wc-1");
            book.find_conflict(&wc, date(2026, 1, 6), date(2026, 1, 9), None)
        };
        assert_eq!(conflict.map(|o| o.id.as_str()), Some("wo-a"));
        assert!(!book.has_overlap("wc-1", date(2026, 1, 7), date(2026, 1, 9), None));
        assert!(!book.has_overlap("wc-1", date(2026, 1, 3), date(2026, 1, 6), Some("wo-a")));
    }

    #[test]
    fn test_touching_endpoint_is_overlap() {
        let mut book = book_with_wc1();
        let result = book.submit(
            draft("wc-1", "Next", date(2026, 1, 6), date(2026, 1, 8)),
            SubmitMode::Create,
        );
        match result {
            Err(EngineError::OverlapConflict { message, conflicting_id }) => {
                assert_eq!(message, OVERLAP_CONFLICT_MESSAGE);
                assert_eq!(conflicting_id, "wo-a");
            }
            other => panic!("Expected OverlapConflict, got {:?}", other),
        }
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_adjacent_day_is_accepted() {
        let mut book = book_with_wc1();
        let created = book
            .submit(draft("wc-1", "Next", date(2026, 1, 7), date(2026, 1, 8)), SubmitMode::Create)
            .unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.orders()[1], created);
        assert_ne!(created.id, "wo-a");
    }

    #[test]
    fn test_other_work_center_never_conflicts() {
        let mut book = book_with_wc1();
        assert!(book
            .submit(draft("wc-2", "Other", date(2026, 1, 3), date(2026, 1, 6)), SubmitMode::Create)
            .is_ok());
    }

    #[test]
    fn test_inverted_range_normalized_before_check() {
        let mut book = WorkOrderBook::default();
        let created = book
            .submit(draft("wc-1", "Swap", date(2026, 2, 10), date(2026, 2, 1)), SubmitMode::Create)
            .unwrap();
        assert_eq!(created.start_date, date(2026, 2, 1));
        assert_eq!(created.end_date, date(2026, 2, 10));
    }

    #[test]
    fn test_inverted_range_overlap_detected_after_normalization() {
        let mut book = book_with_wc1();
        // 倒置后为 [1/1, 1/4]，与 [1/3, 1/6] 相交
        let result = book.submit(
            draft("wc-1", "Swap", date(2026, 1, 4), date(2026, 1, 1)),
            SubmitMode::Create,
        );
        assert!(matches!(result, Err(EngineError::OverlapConflict { .. })));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut book = WorkOrderBook::default();
        let result = book.submit(draft("wc-1", "   ", date(2026, 1, 1), date(2026, 1, 1)), SubmitMode::Create);
        assert_eq!(result, Err(EngineError::EmptyName));
        assert!(book.is_empty());
    }

    #[test]
    fn test_name_is_trimmed() {
        let mut book = WorkOrderBook::default();
        let created = book
            .submit(draft("wc-1", "  Batch 7 ", date(2026, 1, 1), date(2026, 1, 1)), SubmitMode::Create)
            .unwrap();
        assert_eq!(created.name, "Batch 7");
    }

    #[test]
    fn test_edit_excludes_self_and_replaces_in_place() {
        let mut book = WorkOrderBook::new(vec![
            order("wo-a", "wc-1", date(2026, 1, 3), date(2026, 1, 6)),
            order("wo-b", "wc-1", date(2026, 1, 10), date(2026, 1, 12)),
        ]);

        let mut edited = draft("wc-1", "Moved", date(2026, 1, 4), date(2026, 1, 8));
        edited.status = WorkOrderStatus::Blocked;
        let updated = book
            .submit(edited, SubmitMode::Edit { id: "wo-a".to_string() })
            .unwrap();

        assert_eq!(book.len(), 2);
        assert_eq!(updated.id, "wo-a");
        assert_eq!(book.orders()[0], updated);
        assert_eq!(book.orders()[0].status, WorkOrderStatus::Blocked);
        assert_eq!(book.orders()[1].id, "wo-b");
    }

    #[test]
    fn test_edit_conflicting_with_other_order_rejected() {
        let mut book = WorkOrderBook::new(vec![
            order("wo-a", "wc-1", date(2026, 1, 3), date(2026, 1, 6)),
            order("wo-b", "wc-1", date(2026, 1, 10), date(2026, 1, 12)),
        ]);
        let before = book.orders().to_vec();

        let result = book.submit(
            draft("wc-1", "Grow", date(2026, 1, 3), date(2026, 1, 10)),
            SubmitMode::Edit { id: "wo-a".to_string() },
        );
        match result {
            Err(EngineError::OverlapConflict { conflicting_id, .. }) => assert_eq!(conflicting_id, "wo-b"),
            other => panic!("Expected OverlapConflict, got {:?}", other),
        }
        assert_eq!(book.orders(), before.as_slice());
    }

    #[test]
    fn test_edit_unknown_id() {
        let mut book = book_with_wc1();
        let result = book.submit(
            draft("wc-1", "Ghost", date(2026, 3, 1), date(2026, 3, 2)),
            SubmitMode::Edit { id: "wo-missing".to_string() },
        );
        assert_eq!(
            result,
            Err(EngineError::WorkOrderNotFound { id: "wo-missing".to_string() })
        );
    }

    #[test]
    fn test_move_to_other_work_center_checks_target() {
        let mut book = WorkOrderBook::new(vec![
            order("wo-a", "wc-1", date(2026, 1, 3), date(2026, 1, 6)),
            order("wo-b", "wc-2", date(2026, 1, 5), date(2026, 1, 5)),
        ]);
        let result = book.submit(
            draft("wc-2", "Move", date(2026, 1, 3), date(2026, 1, 6)),
            SubmitMode::Edit { id: "wo-a".to_string() },
        );
        assert!(matches!(result, Err(EngineError::OverlapConflict { .. })));
    }

    #[test]
    fn test_single_day_orders() {
        let mut book = WorkOrderBook::default();
        book.submit(draft("wc-1", "A", date(2026, 1, 5), date(2026, 1, 5)), SubmitMode::Create)
            .unwrap();
        assert!(book
            .submit(draft("wc-1", "B", date(2026, 1, 5), date(2026, 1, 5)), SubmitMode::Create)
            .is_err());
        assert!(book
            .submit(draft("wc-1", "C", date(2026, 1, 6), date(2026, 1, 6)), SubmitMode::Create)
            .is_ok());
    }

    #[test]
    fn test_delete_is_unconditional() {
        let mut book = book_with_wc1();
        assert!(book.delete("wo-missing").is_none());
        assert_eq!(book.len(), 1);
        let removed = book.delete("wo-a").unwrap();
        assert_eq!(removed.id, "wo-a");
        assert!(book.is_empty());
    }

    #[test]
    fn test_generated_ids_unique() {
        let mut book = WorkOrderBook::default();
        for i in 0..20 {
            let start = date(2026, 1, 1) + chrono::Duration::days(i * 2);
            book.submit(draft("wc-1", "Batch", start, start), SubmitMode::Create)
                .unwrap();
        }
        let mut ids: Vec<&str> = book.orders().iter().map(|o| o.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_ranges_overlap_symmetry() {
        let (a, b, c, d) = (date(2026, 1, 1), date(2026, 1, 5), date(2026, 1, 5), date(2026, 1, 9));
        assert!(ranges_overlap(a, b, c, d));
        assert!(ranges_overlap(c, d, a, b));
        assert!(!ranges_overlap(a, date(2026, 1, 4), c, d));
    }
}
