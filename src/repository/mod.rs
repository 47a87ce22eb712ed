// ==========================================
// 工单排程看板 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供持久化接口,屏蔽存储细节
// ==========================================

pub mod error;
pub mod kv_store;
pub mod work_order_repo;

// 重导出核心仓储
pub use error::{PersistenceReadError, RepositoryError, RepositoryResult};
pub use kv_store::{KvStore, MemoryKvStore, SqliteKvStore};
pub use work_order_repo::{
    decode_work_orders, encode_work_orders, WorkOrderRepository, DEFAULT_STORAGE_KEY,
};
