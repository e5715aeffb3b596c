// ==========================================
// 考场座位编排系统 - SQL 构建工具
// ==========================================
// 职责: 名单查询的动态 WHERE 子句构建
// 约束: 只生成占位符，取值全部走参数绑定
// ==========================================

use crate::domain::student::StudentFilter;

/// 将名单过滤条件构建为 OR 连接的 WHERE 片段
///
/// # 返回
/// - WHERE 片段（不含 `WHERE` 关键字）
/// - 与占位符顺序一致的参数列表
///
/// # 示例
/// ```
/// use exam_seating::domain::StudentFilter;
/// use exam_seating::repository::sql_builder::build_student_filter_clause;
///
/// let (clause, params) = build_student_filter_clause(&[
///     StudentFilter::ProgramSemester { program_id: 1, semester: 3 },
///     StudentFilter::OpenCourseSemester { open_course_id: 9, semester: 5 },
/// ]);
/// assert_eq!(
///     clause,
///     "(s.program_id = ? AND s.semester = ?) OR (s.open_course_id = ? AND s.semester = ?)"
/// );
/// assert_eq!(params, vec![1, 3, 9, 5]);
/// ```
pub fn build_student_filter_clause(filters: &[StudentFilter]) -> (String, Vec<i64>) {
    let mut clauses = Vec::with_capacity(filters.len());
    let mut params = Vec::with_capacity(filters.len() * 2);

    for filter in filters {
        match *filter {
            StudentFilter::ProgramSemester {
                program_id,
                semester,
            } => {
                clauses.push("(s.program_id = ? AND s.semester = ?)");
                params.push(program_id);
                params.push(i64::from(semester));
            }
            StudentFilter::OpenCourseSemester {
                open_course_id,
                semester,
            } => {
                clauses.push("(s.open_course_id = ? AND s.semester = ?)");
                params.push(open_course_id);
                params.push(i64::from(semester));
            }
        }
    }

    (clauses.join(" OR "), params)
}

/// 构建 IN 列表占位符
///
/// # 示例
/// ```
/// use exam_seating::repository::sql_builder::build_in_placeholders;
///
/// assert_eq!(build_in_placeholders(3), "?, ?, ?");
/// assert_eq!(build_in_placeholders(0), "");
/// ```
pub fn build_in_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
