// ==========================================
// 考场座位编排系统 - 课程/考试领域模型
// ==========================================
// 职责: 课程、专业、考试场次及考试目录
// 红线: 不含数据访问逻辑
// ==========================================

use crate::domain::types::{CourseType, TimeCode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Program - 专业
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub name: String,
}

// ==========================================
// ExamSlot - 考试场次 (日期 + 场次代码)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExamSlot {
    pub date: NaiveDate,
    pub time_code: TimeCode,
}

impl ExamSlot {
    pub fn new(date: NaiveDate, time_code: TimeCode) -> Self {
        Self { date, time_code }
    }
}

impl std::fmt::Display for ExamSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.date, self.time_code)
    }
}

// ==========================================
// ScheduledCourse - 已排考的课程 (存储层返回形态)
// ==========================================
// 一门课程在某场次下至多一场考试，关联一个或多个专业
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledCourse {
    pub id: i64,
    pub name: String,
    pub semester: i32,
    pub course_type: CourseType,
    pub exam_id: i64,
    pub programs: Vec<Program>,
}

// ==========================================
// CatalogEntry - 考试目录条目
// ==========================================
// 每个 (课程, 专业) 组合一条
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub course_id: i64,
    pub course_name: String,
    pub semester: i32,
    pub course_type: CourseType,
    pub exam_id: i64,
    pub program_id: i64,
    pub program_name: String,
}

impl CatalogEntry {
    /// 由课程与其中一个关联专业展开
    pub fn from_course(course: &ScheduledCourse, program: &Program) -> Self {
        Self {
            course_id: course.id,
            course_name: course.name.clone(),
            semester: course.semester,
            course_type: course.course_type,
            exam_id: course.exam_id,
            program_id: program.id,
            program_name: program.name.clone(),
        }
    }
}

// ==========================================
// ExamCatalog - 考试目录
// ==========================================
// 开放课程与非开放课程分开保存，下游匹配键不同
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamCatalog {
    pub open_courses: Vec<CatalogEntry>,
    pub non_open_courses: Vec<CatalogEntry>,
}

impl ExamCatalog {
    pub fn is_empty(&self) -> bool {
        self.open_courses.is_empty() && self.non_open_courses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.open_courses.len() + self.non_open_courses.len()
    }

    /// 合并后的课程列表：开放课程在前，非开放课程在后
    ///
    /// 该顺序决定首次匹配优先级
    pub fn combined(&self) -> Vec<CatalogEntry> {
        self.open_courses
            .iter()
            .chain(self.non_open_courses.iter())
            .cloned()
            .collect()
    }

    /// 目录中全部考试ID（去重，保持首次出现顺序）
    pub fn exam_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = Vec::new();
        for entry in self.open_courses.iter().chain(self.non_open_courses.iter()) {
            if !ids.contains(&entry.exam_id) {
                ids.push(entry.exam_id);
            }
        }
        ids
    }
}
