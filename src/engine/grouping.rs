// ==========================================
// 考场座位编排系统 - 考生分组与排序引擎
// ==========================================
// 职责: 将已匹配的名单按分组键划分，并按分组人数降序排列
// 分组键:
// - common 课程 → (专业ID, 课程ID)，同一共享课程按专业拆开
// - 其他课程   → 课程ID
// 排序: 人数降序；人数相同保持首次出现顺序（稳定排序）
// ==========================================

use crate::domain::cohort::{Cohort, CohortKey, SeatingPlan};
use crate::domain::student::RosterEntry;
use crate::domain::types::UnmatchedPolicy;
use std::collections::HashMap;
use tracing::{debug, warn};

// ==========================================
// CohortGrouper - 分组与排序引擎
// ==========================================
pub struct CohortGrouper {
    // 无状态引擎,不需要注入依赖
}

impl Default for CohortGrouper {
    fn default() -> Self {
        Self::new()
    }
}

impl CohortGrouper {
    pub fn new() -> Self {
        Self {}
    }

    /// 分组并排序
    ///
    /// # 参数
    /// - `students`: 已匹配的名单
    /// - `policy`: 未匹配考生处理策略
    ///
    /// # 返回
    /// SeatingPlan，其中 total_students 为分组前的名单行数
    pub fn group(&self, students: Vec<RosterEntry>, policy: UnmatchedPolicy) -> SeatingPlan {
        let total_students = students.len();

        let mut cohorts: Vec<Cohort> = Vec::new();
        let mut positions: HashMap<CohortKey, usize> = HashMap::new();
        let mut unmatched: Vec<RosterEntry> = Vec::new();

        for student in students {
            let key = match CohortKey::for_entry(&student) {
                Some(key) => key,
                None => {
                    unmatched.push(student);
                    continue;
                }
            };

            let position = *positions.entry(key).or_insert_with(|| {
                cohorts.push(Cohort::new(key));
                cohorts.len() - 1
            });
            cohorts[position].students.push(student);
        }

        if !unmatched.is_empty() {
            warn!(
                unmatched_count = unmatched.len(),
                policy = %policy,
                "存在未匹配考生"
            );

            if policy == UnmatchedPolicy::UnassignedCohort {
                cohorts.push(Cohort {
                    key: CohortKey::Unassigned,
                    students: std::mem::take(&mut unmatched),
                });
            }
        }

        // sort_by 为稳定排序，人数相同保持首次出现顺序
        cohorts.sort_by(|a, b| b.len().cmp(&a.len()));

        debug!(
            cohorts_count = cohorts.len(),
            total_students,
            "分组排序完成"
        );

        SeatingPlan {
            cohorts,
            total_students,
            unmatched,
        }
    }
}
