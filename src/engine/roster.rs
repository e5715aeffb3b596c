// ==========================================
// 考场座位编排系统 - 考生名单解析引擎
// ==========================================
// 职责: 根据考试目录查出全部应考考生
// 输入: ExamCatalog + 排序键
// 输出: 扁平名单 = 正常名单 ++ 补考名单
// ==========================================
// 说明:
// - 正常名单: (专业, 学期) 或 (开放课程, 学期) 任一命中即入选
// - 补考名单: 持有目录内任一考试的补考登记，直接带出课程归属
// - 两部分拼接不去重：同一考生可按不同课程身份出现两次
// ==========================================

use crate::domain::course::ExamCatalog;
use crate::domain::student::{RosterEntry, StudentFilter};
use crate::domain::types::RosterOrderBy;
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::SeatingStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

// ==========================================
// StudentRosterResolver - 考生名单解析引擎
// ==========================================
pub struct StudentRosterResolver<S>
where
    S: SeatingStore,
{
    store: Arc<S>,
}

impl<S> StudentRosterResolver<S>
where
    S: SeatingStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 解析考生名单
    ///
    /// # 参数
    /// - `catalog`: 考试目录
    /// - `order_by`: 排序键；只在各子查询内部生效，拼接边界处不保证全局有序
    ///
    /// # 返回
    /// - Ok(Vec<RosterEntry>): 正常名单在前，补考名单在后
    /// - Err(EngineError::Roster): 任一子查询失败
    pub async fn resolve(
        &self,
        catalog: &ExamCatalog,
        order_by: RosterOrderBy,
    ) -> EngineResult<Vec<RosterEntry>> {
        let filters = build_filters(catalog);
        let exam_ids = catalog.exam_ids();

        debug!(
            filters_count = filters.len(),
            exam_ids_count = exam_ids.len(),
            order_by = %order_by,
            "查询考生名单"
        );

        // 两个子查询互不依赖，并发执行
        let (mut students, supplementary) = futures::try_join!(
            self.store.find_students(&filters, order_by),
            self.store.find_supplementary_students(&exam_ids, order_by),
        )
        .map_err(EngineError::Roster)?;

        info!(
            primary_count = students.len(),
            supplementary_count = supplementary.len(),
            "考生名单解析完成"
        );

        students.extend(supplementary);
        Ok(students)
    }
}

/// 由考试目录构建名单过滤条件（去重，保持首次出现顺序）
///
/// - 非开放课程 → (专业ID, 学期)
/// - 开放课程 → (开放课程ID, 学期)
pub fn build_filters(catalog: &ExamCatalog) -> Vec<StudentFilter> {
    let candidates = catalog
        .non_open_courses
        .iter()
        .map(|c| StudentFilter::ProgramSemester {
            program_id: c.program_id,
            semester: c.semester,
        })
        .chain(
            catalog
                .open_courses
                .iter()
                .map(|c| StudentFilter::OpenCourseSemester {
                    open_course_id: c.course_id,
                    semester: c.semester,
                }),
        );

    let mut seen = HashSet::new();
    candidates.filter(|f| seen.insert(*f)).collect()
}
