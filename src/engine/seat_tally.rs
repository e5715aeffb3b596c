// ==========================================
// 考场座位编排系统 - 座位统计
// ==========================================
// 职责: 汇总全部考场座位矩阵的已占用/空闲座位数
// 守恒: 已占用 + 空闲 == Σ 考场座位数
// ==========================================

use crate::domain::room::{SeatTally, SeatingClass};

pub struct SeatAccounting;

impl SeatAccounting {
    /// 将所有考场的二维矩阵展平后计数
    pub fn tally(classes: &[SeatingClass]) -> SeatTally {
        SeatTally::from_cells(classes.iter().flat_map(|class| class.cells()))
    }
}
