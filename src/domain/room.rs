// ==========================================
// 考场座位编排系统 - 考场领域模型
// ==========================================
// 职责: 教学楼、考场、座位单元格、座位矩阵
// 红线: 座位矩阵恒为 rows × cols，初始全部空闲
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Block - 教学楼
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: i64,
    pub name: String,
}

// ==========================================
// Room - 考场
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub floor: i32,
    pub block: Block,
    pub rows: u32,
    pub cols: u32,
    pub is_available: bool,
}

impl Room {
    /// 座位数 = 行数 × 列数
    pub fn seats(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

// ==========================================
// SeatCell - 座位单元格
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatCell {
    pub occupied: bool,
    pub exam: Option<i64>,
    pub regno: Option<String>,
}

impl SeatCell {
    /// 标记为已占用
    pub fn assign(&mut self, exam_id: i64, regno: impl Into<String>) {
        self.occupied = true;
        self.exam = Some(exam_id);
        self.regno = Some(regno.into());
    }

    /// 恢复为空闲
    pub fn clear(&mut self) {
        *self = SeatCell::default();
    }
}

// ==========================================
// SeatTally - 座位统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatTally {
    pub total_empty_seats: usize,
    pub total_assigned_seats: usize,
}

impl SeatTally {
    pub fn total(&self) -> usize {
        self.total_empty_seats + self.total_assigned_seats
    }

    /// 统计一组单元格
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a SeatCell>) -> Self {
        cells.into_iter().fold(SeatTally::default(), |mut counts, cell| {
            if cell.occupied {
                counts.total_assigned_seats += 1;
            } else {
                counts.total_empty_seats += 1;
            }
            counts
        })
    }
}

// ==========================================
// SeatingClass - 带座位矩阵的考场
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingClass {
    pub id: i64,
    pub floor: i32,
    pub block_id: i64,
    pub block_name: String,
    pub seats: usize,
    pub seating_matrix: Vec<Vec<SeatCell>>,
    /// 本考场已安排的考试ID（由后续排座步骤填充）
    pub exams: Vec<i64>,
}

impl SeatingClass {
    /// 由考场展开为 rows × cols 的空闲座位矩阵
    pub fn from_room(room: &Room) -> Self {
        let seating_matrix = (0..room.rows)
            .map(|_| vec![SeatCell::default(); room.cols as usize])
            .collect();

        Self {
            id: room.id,
            floor: room.floor,
            block_id: room.block.id,
            block_name: room.block.name.clone(),
            seats: room.seats(),
            seating_matrix,
            exams: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.seating_matrix.len()
    }

    /// 按行优先顺序遍历全部单元格
    pub fn cells(&self) -> impl Iterator<Item = &SeatCell> {
        self.seating_matrix.iter().flatten()
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut SeatCell> {
        self.seating_matrix.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// 单个考场的座位统计
    pub fn seat_tally(&self) -> SeatTally {
        SeatTally::from_cells(self.cells())
    }
}

// ==========================================
// SeatingMatrix - 全部可用考场的座位矩阵
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingMatrix {
    pub classes: Vec<SeatingClass>,
    pub total_seats: usize,
}
