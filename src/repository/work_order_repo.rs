// ==========================================
// 工单排程看板 - 工单持久化仓储
// ==========================================
// 存储格式: 单个键下的 JSON 数组，元素为 WorkOrder（日期为 YYYY-MM-DD）
// 读取: 缺失/非数组/元素无法解析/违反集合约束 → 回退内置种子列表，不向上抛错
// 写入: 失败只记日志，内存状态仍为本次会话的权威数据
// ==========================================

use crate::domain::seed::seed_work_orders;
use crate::domain::work_order::{find_invariant_violation, WorkOrder};
use crate::repository::error::{PersistenceReadError, RepositoryResult};
use crate::repository::kv_store::KvStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// 默认存储键
pub const DEFAULT_STORAGE_KEY: &str = "work_orders";

/// 解析持久化负载
///
/// # 错误
/// - 顶层不是数组 → NotAnArray
/// - JSON 损坏、元素结构不符或日期非 YYYY-MM-DD → Malformed
/// - 违反集合约束（ID 重复、名称为空、start > end、同中心重叠）→ Malformed
pub fn decode_work_orders(raw: &str) -> RepositoryResult<Vec<WorkOrder>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| PersistenceReadError::Malformed(e.to_string()))?;
    if !value.is_array() {
        return Err(PersistenceReadError::NotAnArray.into());
    }
    let orders: Vec<WorkOrder> = serde_json::from_value(value)
        .map_err(|e| PersistenceReadError::Malformed(e.to_string()))?;
    if let Some(reason) = find_invariant_violation(&orders) {
        return Err(PersistenceReadError::Malformed(reason).into());
    }
    Ok(orders)
}

/// 序列化为持久化负载（保持顺序）
pub fn encode_work_orders(orders: &[WorkOrder]) -> RepositoryResult<String> {
    Ok(serde_json::to_string(orders)?)
}

// ==========================================
// WorkOrderRepository - 工单仓储
// ==========================================
pub struct WorkOrderRepository {
    store: Arc<dyn KvStore>,
    storage_key: String,
}

impl WorkOrderRepository {
    pub fn new(store: Arc<dyn KvStore>, storage_key: &str) -> Self {
        Self {
            store,
            storage_key: storage_key.to_string(),
        }
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// 读取已保存工单，失败原因原样返回
    pub fn try_load(&self) -> RepositoryResult<Vec<WorkOrder>> {
        let raw = self
            .store
            .get(&self.storage_key)?
            .ok_or_else(|| PersistenceReadError::Absent(self.storage_key.clone()))?;
        decode_work_orders(&raw)
    }

    /// 读取已保存工单，任何失败都回退种子列表
    pub fn load_or_seed(&self) -> Vec<WorkOrder> {
        match self.try_load() {
            Ok(orders) => {
                debug!(count = orders.len(), key = %self.storage_key, "已加载保存的工单");
                orders
            }
            Err(e) => {
                warn!(key = %self.storage_key, error = %e, "无可用的保存数据，使用内置种子工单");
                seed_work_orders()
            }
        }
    }

    /// 保存工单，错误返回给调用方
    pub fn try_save(&self, orders: &[WorkOrder]) -> RepositoryResult<()> {
        let payload = encode_work_orders(orders)?;
        self.store.set(&self.storage_key, &payload)
    }

    /// 保存工单，失败只记日志
    pub fn save(&self, orders: &[WorkOrder]) {
        if let Err(e) = self.try_save(orders) {
            warn!(key = %self.storage_key, error = %e, "工单保存失败（已忽略）");
        }
    }

    /// 清除已保存数据
    pub fn clear(&self) -> RepositoryResult<()> {
        self.store.remove(&self.storage_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::WorkOrderStatus;
    use crate::repository::error::RepositoryError;
    use crate::repository::kv_store::MemoryKvStore;
    use chrono::NaiveDate;

    fn repo() -> (Arc<MemoryKvStore>, WorkOrderRepository) {
        let store = Arc::new(MemoryKvStore::new());
        let repo = WorkOrderRepository::new(store.clone(), DEFAULT_STORAGE_KEY);
        (store, repo)
    }

    #[test]
    fn test_absent_falls_back_to_seed() {
        let (_store, repo) = repo();
        assert!(matches!(
            repo.try_load(),
            Err(RepositoryError::PersistenceRead(PersistenceReadError::Absent(_)))
        ));
        assert_eq!(repo.load_or_seed(), seed_work_orders());
    }

    #[test]
    fn test_not_an_array_falls_back_to_seed() {
        let (store, repo) = repo();
        store.set(DEFAULT_STORAGE_KEY, "\"not an array\"").unwrap();
        assert!(matches!(
            repo.try_load(),
            Err(RepositoryError::PersistenceRead(PersistenceReadError::NotAnArray))
        ));
        assert_eq!(repo.load_or_seed(), seed_work_orders());
    }

    #[test]
    fn test_corrupt_payload_falls_back_to_seed() {
        let (store, repo) = repo();
        store.set(DEFAULT_STORAGE_KEY, "[{\"id\": 1}").unwrap();
        assert_eq!(repo.load_or_seed(), seed_work_orders());

        store
            .set(DEFAULT_STORAGE_KEY, r#"[{"id":"x","workCenterId":"wc-1","name":"n","status":"open","startDate":"2026-13-01","endDate":"2026-01-02"}]"#)
            .unwrap();
        assert!(matches!(
            repo.try_load(),
            Err(RepositoryError::PersistenceRead(PersistenceReadError::Malformed(_)))
        ));
    }

    #[test]
    fn test_unpadded_date_falls_back_to_seed() {
        let (store, repo) = repo();
        store
            .set(DEFAULT_STORAGE_KEY, r#"[{"id":"x","workCenterId":"wc-1","name":"n","status":"open","startDate":"2026-1-5","endDate":"2026-01-06"}]"#)
            .unwrap();
        assert!(matches!(
            repo.try_load(),
            Err(RepositoryError::PersistenceRead(PersistenceReadError::Malformed(_)))
        ));
        assert_eq!(repo.load_or_seed(), seed_work_orders());
    }

    #[test]
    fn test_invariant_violations_fall_back_to_seed() {
        let (store, repo) = repo();
        let payloads = [
            // ID 重复
            r#"[{"id":"a","workCenterId":"wc-1","name":"A","status":"open","startDate":"2026-01-01","endDate":"2026-01-02"},
                {"id":"a","workCenterId":"wc-2","name":"B","status":"open","startDate":"2026-01-01","endDate":"2026-01-02"}]"#,
            // 同中心重叠
            r#"[{"id":"a","workCenterId":"wc-1","name":"A","status":"open","startDate":"2026-01-01","endDate":"2026-01-05"},
                {"id":"b","workCenterId":"wc-1","name":"B","status":"open","startDate":"2026-01-05","endDate":"2026-01-06"}]"#,
            // 名称为空
            r#"[{"id":"a","workCenterId":"wc-1","name":"  ","status":"open","startDate":"2026-01-01","endDate":"2026-01-02"}]"#,
            // start > end
            r#"[{"id":"a","workCenterId":"wc-1","name":"A","status":"open","startDate":"2026-01-09","endDate":"2026-01-02"}]"#,
        ];

        for payload in payloads {
            store.set(DEFAULT_STORAGE_KEY, payload).unwrap();
            assert!(
                matches!(
                    repo.try_load(),
                    Err(RepositoryError::PersistenceRead(PersistenceReadError::Malformed(_)))
                ),
                "payload should be rejected: {}",
                payload
            );
            assert_eq!(repo.load_or_seed(), seed_work_orders());
        }
    }

    #[test]
    fn test_empty_array_is_valid_saved_state() {
        let (store, repo) = repo();
        store.set(DEFAULT_STORAGE_KEY, "[]").unwrap();
        assert!(repo.load_or_seed().is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let (_store, repo) = repo();
        let mut orders = seed_work_orders();
        orders.reverse();
        orders.push(WorkOrder {
            id: "wo-9".to_string(),
            work_center_id: "wc-5".to_string(),
            name: "Pack".to_string(),
            status: WorkOrderStatus::Blocked,
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        });

        repo.try_save(&orders).unwrap();
        assert_eq!(repo.try_load().unwrap(), orders);
    }
}
