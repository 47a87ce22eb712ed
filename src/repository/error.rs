// ==========================================
// 工单排程看板 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: PersistenceRead 在仓储内部恢复（回退种子数据），不直接暴露给用户
// ==========================================

use thiserror::Error;

/// 持久化数据读取失败的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceReadError {
    #[error("无已保存数据: key={0}")]
    Absent(String),

    #[error("已保存数据不是数组")]
    NotAnArray,

    #[error("已保存数据无法解析: {0}")]
    Malformed(String),
}

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 持久化读取 =====
    #[error("持久化数据读取失败: {0}")]
    PersistenceRead(#[from] PersistenceReadError),

    // ===== 序列化 =====
    #[error("序列化失败: {0}")]
    Serialization(String),

    // ===== 数据库错误 =====
    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => RepositoryError::DatabaseQueryError(msg),
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
