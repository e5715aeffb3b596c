// ==========================================
// 考场座位编排系统 - 考生课程匹配引擎
// ==========================================
// 职责: 为尚无课程归属的考生挂接课程/考试
// 规则: 首次匹配生效: 按课程列表顺序，取第一个
//       program_id 与 semester 均相等的课程
// 红线: 纯内存变换，不产生错误；未命中的考生保持未归属
// ==========================================

use crate::domain::course::CatalogEntry;
use crate::domain::student::{AssignmentSource, CourseAssignment, RosterEntry};
use std::collections::HashMap;
use tracing::debug;

// ==========================================
// MatchSummary - 匹配统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub matched: usize,
    /// 已有归属（补考行）而跳过的行数
    pub preassigned: usize,
    pub unmatched: usize,
}

// ==========================================
// CohortMatcher - 考生课程匹配引擎
// ==========================================
pub struct CohortMatcher {
    // 无状态引擎,不需要注入依赖
}

impl Default for CohortMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CohortMatcher {
    pub fn new() -> Self {
        Self {}
    }

    /// 就地为名单行挂接课程
    ///
    /// # 参数
    /// - `students`: 名单（会被修改）
    /// - `courses`: 合并后的课程列表，顺序即优先级
    ///
    /// # 说明
    /// 以 (program_id, semester) 建索引，只保留每个键第一次出现的课程，
    /// 与逐个线性扫描的首次匹配结果一致
    pub fn match_students(
        &self,
        students: &mut [RosterEntry],
        courses: &[CatalogEntry],
    ) -> MatchSummary {
        let mut index: HashMap<(i64, i32), &CatalogEntry> = HashMap::with_capacity(courses.len());
        for course in courses {
            index.entry((course.program_id, course.semester)).or_insert(course);
        }

        let mut summary = MatchSummary::default();

        for student in students.iter_mut() {
            if student.is_assigned() {
                summary.preassigned += 1;
                continue;
            }

            match index.get(&(student.program_id, student.semester)) {
                Some(course) => {
                    student.assignment = Some(CourseAssignment {
                        course_id: course.course_id,
                        course_name: course.course_name.clone(),
                        course_type: course.course_type,
                        exam_id: course.exam_id,
                        course_semester: Some(course.semester),
                        source: AssignmentSource::Matched,
                    });
                    summary.matched += 1;
                }
                None => {
                    debug!(
                        student_id = student.id,
                        roll_number = %student.roll_number,
                        program_id = student.program_id,
                        semester = student.semester,
                        "考生未匹配到课程"
                    );
                    summary.unmatched += 1;
                }
            }
        }

        // 未匹配告警由分组阶段按策略统一输出
        debug!(
            matched = summary.matched,
            preassigned = summary.preassigned,
            unmatched = summary.unmatched,
            "课程匹配完成"
        );

        summary
    }
}
