// ==========================================
// 考场座位编排系统 - 考生分组领域模型
// ==========================================
// 职责: 分组键、分组、排座方案
// 生命周期: 每次查询重新计算，不持久化
// ==========================================

use crate::domain::room::SeatingMatrix;
use crate::domain::student::RosterEntry;
use crate::domain::types::CourseType;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CohortKey - 分组键
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CohortKey {
    /// 开放/补考课程：按课程分组
    Course {
        #[serde(rename = "courseId")]
        course_id: i64,
    },
    /// 共享课程：每个专业单独成组
    ProgramCourse {
        #[serde(rename = "programId")]
        program_id: i64,
        #[serde(rename = "courseId")]
        course_id: i64,
    },
    /// 未匹配到课程的考生
    Unassigned,
}

impl CohortKey {
    /// 由名单行推导分组键；未匹配的考生返回 None
    pub fn for_entry(entry: &RosterEntry) -> Option<Self> {
        let assignment = entry.assignment.as_ref()?;
        let key = match assignment.course_type {
            CourseType::Common => CohortKey::ProgramCourse {
                program_id: entry.program_id,
                course_id: assignment.course_id,
            },
            CourseType::Open | CourseType::Supplementary => CohortKey::Course {
                course_id: assignment.course_id,
            },
        };
        Some(key)
    }
}

impl fmt::Display for CohortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CohortKey::Course { course_id } => write!(f, "{}", course_id),
            CohortKey::ProgramCourse {
                program_id,
                course_id,
            } => write!(f, "{}-{}", program_id, course_id),
            CohortKey::Unassigned => write!(f, "unassigned"),
        }
    }
}

// ==========================================
// Cohort - 考生分组
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    pub key: CohortKey,
    pub students: Vec<RosterEntry>,
}

impl Cohort {
    pub fn new(key: CohortKey) -> Self {
        Self {
            key,
            students: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

// ==========================================
// SeatingPlan - 排座方案（分组结果）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingPlan {
    /// 按人数降序排列的分组
    pub cohorts: Vec<Cohort>,
    /// 分组前的名单总行数
    pub total_students: usize,
    /// 未进入任何分组的考生（未匹配且策略为 REPORT）
    pub unmatched: Vec<RosterEntry>,
}

impl SeatingPlan {
    /// 分组内考生总数
    pub fn grouped_students(&self) -> usize {
        self.cohorts.iter().map(Cohort::len).sum()
    }

    /// 守恒检查: Σ 分组人数 + 未匹配人数 == 名单总数
    pub fn is_conserved(&self) -> bool {
        self.grouped_students() + self.unmatched.len() == self.total_students
    }
}

// ==========================================
// SeatingSession - 一个场次的完整准备结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingSession {
    pub plan: SeatingPlan,
    pub matrix: SeatingMatrix,
    /// 可用座位 - 待安排考生（负数表示座位不足）
    pub remaining_capacity: i64,
}

impl SeatingSession {
    pub fn new(plan: SeatingPlan, matrix: SeatingMatrix) -> Self {
        let remaining_capacity = matrix.total_seats as i64 - plan.grouped_students() as i64;
        Self {
            plan,
            matrix,
            remaining_capacity,
        }
    }

    pub fn has_enough_seats(&self) -> bool {
        self.remaining_capacity >= 0
    }
}
