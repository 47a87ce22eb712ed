// ==========================================
// 工单排程看板 - 主入口
// ==========================================
// 打开默认数据库，装载看板并输出当前排程摘要
// ==========================================

use std::process::ExitCode;

use anyhow::{anyhow, Context};
use work_order_board::app::{get_default_db_path, AppState};
use work_order_board::logging;

fn main() -> ExitCode {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", work_order_board::APP_NAME);
    tracing::info!("系统版本: {}", work_order_board::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    match run(&db_path) {
        Ok(count) => {
            tracing::info!("共 {} 个工单", count);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// 装载看板并记录摘要，返回工单数量
fn run(db_path: &str) -> anyhow::Result<usize> {
    let app_state = AppState::new(db_path.to_string())
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("无法初始化AppState: {}", db_path))?;

    let count = app_state
        .with_board(|board| {
            let timeline = board.timeline();
            tracing::info!(
                anchor = %timeline.anchor(),
                zoom = %timeline.zoom(),
                columns = timeline.columns().len(),
                width_px = timeline.total_width_px(),
                "时间轴"
            );
            for wc in board.work_centers() {
                let bars = board.bars_for(&wc.id);
                tracing::info!(work_center = %wc.name, bars = bars.len(), "工作中心");
                for bar in bars {
                    tracing::info!(
                        "  {} [{}] left={}px width={}px",
                        bar.name,
                        bar.status.label(),
                        bar.left_px,
                        bar.width_px
                    );
                }
            }
            Ok(board.work_orders().len())
        })
        .context("读取看板失败")?;

    Ok(count)
}
