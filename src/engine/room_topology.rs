// ==========================================
// 考场座位编排系统 - 考场拓扑加载引擎
// ==========================================
// 职责: 读取全部可用考场，展开为 rows × cols 的空闲座位矩阵
// 输出: SeatingMatrix { classes, total_seats }
// 红线: 任一查询失败整体失败，不返回部分考场
// ==========================================

use crate::domain::room::{Room, SeatingClass, SeatingMatrix};
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::SeatingStore;
use std::sync::Arc;
use tracing::{info, warn};

pub struct RoomTopologyLoader<S>
where
    S: SeatingStore,
{
    store: Arc<S>,
}

impl<S> RoomTopologyLoader<S>
where
    S: SeatingStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 加载可用考场的座位矩阵
    pub async fn load(&self) -> EngineResult<SeatingMatrix> {
        let rooms = self
            .store
            .find_rooms()
            .await
            .map_err(EngineError::RoomTopology)?;

        let matrix = build_matrix(&rooms);

        info!(
            rooms_count = matrix.classes.len(),
            total_seats = matrix.total_seats,
            "考场座位矩阵加载完成"
        );

        Ok(matrix)
    }
}

/// 将考场列表展开为座位矩阵并累计总座位数
pub fn build_matrix(rooms: &[Room]) -> SeatingMatrix {
    let mut matrix = SeatingMatrix::default();

    for room in rooms {
        if room.seats() == 0 {
            warn!(room_id = room.id, rows = room.rows, cols = room.cols, "考场座位数为0");
        }

        matrix.total_seats += room.seats();
        matrix.classes.push(SeatingClass::from_room(room));
    }

    matrix
}
