// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、看板构造等功能
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use rusqlite::Connection;
use std::error::Error;
use std::sync::Arc;
use tempfile::NamedTempFile;
use work_order_board::api::BoardApi;
use work_order_board::config::BoardConfig;
use work_order_board::db::open_sqlite_connection;
use work_order_board::domain::seed::seed_work_centers;
use work_order_board::repository::{KvStore, MemoryKvStore};

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    open_sqlite_connection(&db_path)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(open_sqlite_connection(db_path)?)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 固定“今天”= 2026-01-15，锚点 = 2026-01-01
pub fn test_today() -> NaiveDate {
    date(2026, 1, 15)
}

/// 以空工单列表创建看板（内存存储）
pub fn empty_board() -> (BoardApi, Arc<MemoryKvStore>) {
    let store = Arc::new(MemoryKvStore::new());
    store.set("work_orders", "[]").unwrap();
    let board = BoardApi::new(
        store.clone(),
        BoardConfig::default(),
        seed_work_centers(),
        test_today(),
    );
    (board, store)
}

/// 以种子工单创建看板（内存存储为空）
pub fn seeded_board() -> (BoardApi, Arc<MemoryKvStore>) {
    let store = Arc::new(MemoryKvStore::new());
    let board = BoardApi::new(
        store.clone(),
        BoardConfig::default(),
        seed_work_centers(),
        test_today(),
    );
    (board, store)
}
