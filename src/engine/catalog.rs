// ==========================================
// 考场座位编排系统 - 考试目录解析引擎
// ==========================================
// 职责: 找出某场次下有考试的课程，按课程类型分为开放/非开放两类
// 输入: 考试场次 (日期 + 场次代码)
// 输出: ExamCatalog { open_courses, non_open_courses }
// 红线: 两类列表不合并，下游匹配键不同
// ==========================================

use crate::domain::course::{CatalogEntry, ExamCatalog, ExamSlot, ScheduledCourse};
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::SeatingStore;
use std::sync::Arc;
use tracing::{debug, info};

// ==========================================
// ExamCatalogResolver - 考试目录解析引擎
// ==========================================
pub struct ExamCatalogResolver<S>
where
    S: SeatingStore,
{
    store: Arc<S>,
}

impl<S> ExamCatalogResolver<S>
where
    S: SeatingStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// 解析某场次的考试目录
    ///
    /// # 返回
    /// - Ok(ExamCatalog): 每个 (课程, 专业) 组合一条，恰好落入开放/非开放之一
    /// - Err(EngineError::Catalog): 数据库查询失败
    pub async fn resolve(&self, slot: ExamSlot) -> EngineResult<ExamCatalog> {
        debug!(slot = %slot, "查询场次课程");

        let courses = self
            .store
            .find_courses(slot)
            .await
            .map_err(EngineError::Catalog)?;

        let catalog = classify_courses(&courses);

        info!(
            slot = %slot,
            courses_count = courses.len(),
            open_count = catalog.open_courses.len(),
            non_open_count = catalog.non_open_courses.len(),
            "考试目录解析完成"
        );

        Ok(catalog)
    }
}

/// 按课程类型展开并分类
///
/// 规则:
/// - course_type == open → 每个关联专业一条，进入 open_courses
/// - 其他类型 → 每个关联专业一条，进入 non_open_courses
pub fn classify_courses(courses: &[ScheduledCourse]) -> ExamCatalog {
    let mut catalog = ExamCatalog::default();

    for course in courses {
        let target = if course.course_type.is_open() {
            &mut catalog.open_courses
        } else {
            &mut catalog.non_open_courses
        };

        target.extend(
            course
                .programs
                .iter()
                .map(|program| CatalogEntry::from_course(course, program)),
        );
    }

    catalog
}
