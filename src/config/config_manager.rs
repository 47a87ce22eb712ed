// ==========================================
// 工单排程看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)，缺失或非法值回退默认
// ==========================================

use crate::config::board_config::{config_keys, BoardConfig};
use crate::db::{configure_sqlite_connection, ensure_schema, open_sqlite_connection};
use crate::domain::types::ZoomLevel;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 与建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&conn_guard)?;
            ensure_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// 加载看板配置
    ///
    /// 说明：逐项覆写默认值；非法值记 warn 并保留默认
    pub fn load_board_config(&self) -> Result<BoardConfig, Box<dyn Error>> {
        let mut config = BoardConfig::default();

        if let Some(v) = self.get_config_value(config_keys::ANCHOR_OFFSET_DAYS)? {
            match v.trim().parse::<i64>() {
                Ok(days) if days >= 0 => config.anchor_offset_days = days,
                _ => warn!(key = config_keys::ANCHOR_OFFSET_DAYS, value = %v, "配置值非法，使用默认"),
            }
        }

        if let Some(v) = self.get_config_value(config_keys::DEFAULT_SPAN_DAYS)? {
            match v.trim().parse::<u32>() {
                Ok(days) if days >= 1 => config.default_span_days = days,
                _ => warn!(key = config_keys::DEFAULT_SPAN_DAYS, value = %v, "配置值非法，使用默认"),
            }
        }

        if let Some(v) = self.get_config_value(config_keys::BAR_INSET_PX)? {
            match v.trim().parse::<f64>() {
                Ok(px) if px.is_finite() && px >= 0.0 => config.bar_inset_px = px,
                _ => warn!(key = config_keys::BAR_INSET_PX, value = %v, "配置值非法，使用默认"),
            }
        }

        if let Some(v) = self.get_config_value(config_keys::STORAGE_KEY)? {
            let key = v.trim();
            if key.is_empty() {
                warn!(key = config_keys::STORAGE_KEY, "配置值为空，使用默认");
            } else {
                config.storage_key = key.to_string();
            }
        }

        if let Some(v) = self.get_config_value(config_keys::INITIAL_ZOOM)? {
            match v.parse::<ZoomLevel>() {
                Ok(zoom) => config.initial_zoom = zoom,
                Err(e) => warn!(key = config_keys::INITIAL_ZOOM, error = %e, "配置值非法，使用默认"),
            }
        }

        Ok(config)
    }
}
