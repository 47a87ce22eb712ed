// ==========================================
// 工单排程看板 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ApiError, ApiResult, BoardApi};
use crate::config::config_manager::ConfigManager;
use crate::db::open_sqlite_connection;
use crate::domain::seed::seed_work_centers;
use crate::engine::calendar::today;
use crate::repository::kv_store::SqliteKvStore;

/// 应用状态
///
/// 包含看板API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 看板API（单线程修改，Mutex 串行化）
    pub board: Mutex<BoardApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享连接并建表
    /// 2. 读取看板配置（非法值回退默认）
    /// 3. 读取工单列表（缺失/损坏时回退种子数据）
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let board_config = config_manager
            .load_board_config()
            .map_err(|e| format!("无法读取看板配置: {}", e))?;

        let store = Arc::new(
            SqliteKvStore::from_connection(conn)
                .map_err(|e| format!("无法创建SqliteKvStore: {}", e))?,
        );

        let board = BoardApi::new(store, board_config, seed_work_centers(), today());

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            board: Mutex::new(board),
            config_manager,
        })
    }

    /// 在看板锁内执行操作
    pub fn with_board<T>(&self, f: impl FnOnce(&mut BoardApi) -> ApiResult<T>) -> ApiResult<T> {
        let mut board = self
            .board
            .lock()
            .map_err(|e| ApiError::InternalError(format!("看板锁获取失败: {}", e)))?;
        f(&mut board)
    }
}

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 WORK_ORDER_BOARD_DB_PATH 优先
/// - 否则为用户数据目录下的 work-order-board/work_order_board.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("WORK_ORDER_BOARD_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./work_order_board.db");

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("work-order-board-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("work-order-board");
        }

        // 目录创建失败时，Connection::open 会给出明确错误
        std::fs::create_dir_all(&path).ok();
        path = path.join("work_order_board.db");
    }

    path.to_string_lossy().to_string()
}
