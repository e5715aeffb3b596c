// ==========================================
// 排座流水线集成测试
// ==========================================
// 测试目标: 验证 目录解析 → 名单解析 → 课程匹配 → 分组排序 全流程
// 覆盖范围: 开放/共享课程分组、补考路径、未匹配策略、排序与守恒、幂等
// ==========================================

mod test_helpers;

use exam_seating::api::SqliteSeatingApi;
use exam_seating::config::config_keys;
use exam_seating::domain::{AssignmentSource, CohortKey, CourseType};
use exam_seating::logging;
use test_helpers::{create_test_db, seed_two_course_scenario, SeedBuilder, EXAM_DATE};

// ==========================================
// 测试用例 1: 两门课程的分组与排序
// ==========================================

#[tokio::test]
async fn test_open_and_common_courses_form_three_cohorts() {
    logging::init_test();
    println!("\n=== 测试：开放课程 + 共享课程分组 ===");

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let seed = SeedBuilder::open(&db_path);
    seed_two_course_scenario(&seed);

    let api = SqliteSeatingApi::open(&db_path).expect("Failed to open api");
    let plan = api
        .build_seating_plan(EXAM_DATE, "FN", None)
        .await
        .expect("排座方案应构建成功");

    assert_eq!(plan.total_students, 10);
    assert_eq!(plan.cohorts.len(), 3);

    assert_eq!(plan.cohorts[0].key, CohortKey::Course { course_id: 10 });
    assert_eq!(plan.cohorts[0].len(), 5);
    assert_eq!(
        plan.cohorts[1].key,
        CohortKey::ProgramCourse {
            program_id: 1,
            course_id: 20
        }
    );
    assert_eq!(plan.cohorts[1].len(), 3);
    assert_eq!(
        plan.cohorts[2].key,
        CohortKey::ProgramCourse {
            program_id: 2,
            course_id: 20
        }
    );
    assert_eq!(plan.cohorts[2].len(), 2);

    assert!(plan.unmatched.is_empty());
    assert!(plan.is_conserved());
    println!("✓ 分组: {:?}", plan.cohorts.iter().map(|c| c.key.to_string()).collect::<Vec<_>>());
}

// ==========================================
// 测试用例 2: 分组大小非递增 + 组内按学号升序
// ==========================================

#[tokio::test]
async fn test_cohorts_non_increasing_and_roster_ordered() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let seed = SeedBuilder::open(&db_path);
    seed_two_course_scenario(&seed);

    let api = SqliteSeatingApi::open(&db_path).expect("Failed to open api");
    let plan = api.build_seating_plan(EXAM_DATE, "FN", None).await.unwrap();

    assert!(plan.cohorts.windows(2).all(|w| w[0].len() >= w[1].len()));

    for cohort in &plan.cohorts {
        let rolls: Vec<&str> = cohort.students.iter().map(|s| s.roll_number.as_str()).collect();
        let mut sorted = rolls.clone();
        sorted.sort();
        assert_eq!(rolls, sorted, "组内应保持学号升序");
    }
}

// ==========================================
// 测试用例 3: 幂等
// ==========================================

#[tokio::test]
async fn test_build_is_idempotent() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let seed = SeedBuilder::open(&db_path);
    seed_two_course_scenario(&seed);

    let api = SqliteSeatingApi::open(&db_path).expect("Failed to open api");
    let first = api.build_seating_plan(EXAM_DATE, "FN", None).await.unwrap();
    let second = api.build_seating_plan(EXAM_DATE, "fn", None).await.unwrap();

    assert_eq!(first, second);
}

// ==========================================
// 测试用例 4: 补考考生只经补考路径出现一次
// ==========================================

#[tokio::test]
async fn test_supplementary_student_bypasses_matching() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let seed = SeedBuilder::open(&db_path);
    seed_two_course_scenario(&seed);

    // 专业3学期7，不在任何 (专业, 学期) 条件内，补考课程20
    seed.program(3, "Mechanical")
        .student(31, "ME7-00", 7, 3, None)
        .supplementary(31, 200);

    let api = SqliteSeatingApi::open(&db_path).expect("Failed to open api");
    let plan = api.build_seating_plan(EXAM_DATE, "FN", None).await.unwrap();

    assert_eq!(plan.total_students, 11);

    let rows: Vec<_> = plan
        .cohorts
        .iter()
        .flat_map(|c| c.students.iter())
        .filter(|s| s.id == 31)
        .collect();
    assert_eq!(rows.len(), 1);

    let assignment = rows[0].assignment.as_ref().unwrap();
    assert_eq!(assignment.source, AssignmentSource::Supplementary);
    assert_eq!(assignment.course_id, 20);
    assert_eq!(assignment.exam_id, 200);
    assert_eq!(assignment.course_type, CourseType::Common);
    assert_eq!(assignment.course_name, "Mathematics");
    assert_eq!(assignment.course_semester, None);

    // 共享课程按专业分组：补考考生单独成组
    assert!(plan.cohorts.iter().any(|c| c.key
        == CohortKey::ProgramCourse {
            program_id: 3,
            course_id: 20
        }
        && c.len() == 1));
}

// ==========================================
// 测试用例 5: 正常报名 + 补考另一门课程 → 出现两次
// ==========================================

#[tokio::test]
async fn test_regular_and_supplementary_rows_both_kept() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let seed = SeedBuilder::open(&db_path);
    seed_two_course_scenario(&seed);

    // 专业1学期3的考生 11 同时补考开放课程 10
    seed.supplementary(11, 100);

    let api = SqliteSeatingApi::open(&db_path).expect("Failed to open api");
    let plan = api.build_seating_plan(EXAM_DATE, "FN", None).await.unwrap();

    assert_eq!(plan.total_students, 11);

    let course_ids: Vec<i64> = plan
        .cohorts
        .iter()
        .flat_map(|c| c.students.iter())
        .filter(|s| s.id == 11)
        .filter_map(|s| s.course_id())
        .collect();
    assert_eq!(course_ids.len(), 2);
    assert!(course_ids.contains(&10));
    assert!(course_ids.contains(&20));

    // 开放课程分组 = 5 个选修考生 + 1 个补考考生
    assert_eq!(plan.cohorts[0].key, CohortKey::Course { course_id: 10 });
    assert_eq!(plan.cohorts[0].len(), 6);
    assert!(plan.is_conserved());
}

// ==========================================
// 测试用例 6: 未匹配考生 (默认 REPORT 策略)
// ==========================================

#[tokio::test]
async fn test_unmatched_student_reported() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let seed = SeedBuilder::open(&db_path);
    seed_two_course_scenario(&seed);

    // 专业2的考生选修了只关联专业1的开放课程 → 入选名单但匹配不到课程
    seed.student(41, "EC5-00", 5, 2, Some(10));

    let api = SqliteSeatingApi::open(&db_path).expect("Failed to open api");
    let plan = api.build_seating_plan(EXAM_DATE, "FN", None).await.unwrap();

    assert_eq!(plan.total_students, 11);
    assert_eq!(plan.grouped_students(), 10);
    assert_eq!(plan.unmatched.len(), 1);
    assert_eq!(plan.unmatched[0].id, 41);
    assert!(plan.is_conserved());
}

// ==========================================
// 测试用例 7: 未匹配考生 (UNASSIGNED_COHORT 策略)
// ==========================================

#[tokio::test]
async fn test_unmatched_student_as_visible_cohort() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let seed = SeedBuilder::open(&db_path);
    seed_two_course_scenario(&seed);
    seed.student(41, "EC5-00", 5, 2, Some(10))
        .config(config_keys::UNMATCHED_POLICY, "UNASSIGNED_COHORT");

    let api = SqliteSeatingApi::open(&db_path).expect("Failed to open api");
    let plan = api.build_seating_plan(EXAM_DATE, "FN", None).await.unwrap();

    assert!(plan.unmatched.is_empty());
    let unassigned = plan
        .cohorts
        .iter()
        .find(|c| c.key == CohortKey::Unassigned)
        .expect("应存在未分配分组");
    assert_eq!(unassigned.len(), 1);
    assert_eq!(plan.grouped_students(), plan.total_students);
}

// ==========================================
// 测试用例 8: 按姓名排序
// ==========================================

#[tokio::test]
async fn test_order_by_name() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let seed = SeedBuilder::open(&db_path);
    seed.program(1, "Computer Science")
        .course(20, "Mathematics", 3, "common", &[1])
        .slot(1, EXAM_DATE, "AN")
        .exam(200, 20, 1)
        .named_student(1, "Charlie", "R001", 3, 1)
        .named_student(2, "Alice", "R002", 3, 1)
        .named_student(3, "Bob", "R003", 3, 1);

    let api = SqliteSeatingApi::open(&db_path).expect("Failed to open api");

    let by_roll = api.build_seating_plan(EXAM_DATE, "AN", None).await.unwrap();
    let names: Vec<&str> = by_roll.cohorts[0].students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Charlie", "Alice", "Bob"]);

    let by_name = api
        .build_seating_plan(EXAM_DATE, "AN", Some("name"))
        .await
        .unwrap();
    let names: Vec<&str> = by_name.cohorts[0].students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", "Charlie"]);
}

// ==========================================
// 测试用例 9: 无课程的场次
// ==========================================

#[tokio::test]
async fn test_slot_without_exams_yields_empty_plan() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let seed = SeedBuilder::open(&db_path);
    seed_two_course_scenario(&seed);

    let api = SqliteSeatingApi::open(&db_path).expect("Failed to open api");
    let plan = api.build_seating_plan(EXAM_DATE, "AN", None).await.unwrap();

    assert!(plan.cohorts.is_empty());
    assert_eq!(plan.total_students, 0);
}

// ==========================================
// 测试用例 10: 失败时返回 None
// ==========================================

#[tokio::test]
async fn test_storage_failure_returns_none() {
    logging::init_test();

    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let seed = SeedBuilder::open(&db_path);
    seed_two_course_scenario(&seed);
    seed.drop_table("supplementary");

    let api = SqliteSeatingApi::open(&db_path).expect("Failed to open api");
    assert!(api.build_seating_plan(EXAM_DATE, "FN", None).await.is_none());
}

#[tokio::test]
async fn test_invalid_input_returns_none() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let api = SqliteSeatingApi::open(&db_path).expect("Failed to open api");

    assert!(api.build_seating_plan("", "FN", None).await.is_none());
    assert!(api.build_seating_plan(EXAM_DATE, "EVENING", None).await.is_none());
    assert!(api
        .build_seating_plan(EXAM_DATE, "FN", Some("semester"))
        .await
        .is_none());
}

// ==========================================
// 测试用例 11: 整日方案
// ==========================================

#[tokio::test]
async fn test_daily_plans_skip_empty_slots() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let seed = SeedBuilder::open(&db_path);
    seed_two_course_scenario(&seed);
    seed.course(30, "Physics", 3, "common", &[2])
        .slot(2, EXAM_DATE, "AN")
        .exam(300, 30, 2);

    let api = SqliteSeatingApi::open(&db_path).expect("Failed to open api");
    let plans = api.build_daily_plans(EXAM_DATE).await.unwrap();

    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].0, exam_seating::TimeCode::Forenoon);
    assert_eq!(plans[0].1.total_students, 10);
    assert_eq!(plans[1].0, exam_seating::TimeCode::Afternoon);
    assert_eq!(plans[1].1.total_students, 2);

    let empty = api.build_daily_plans("2023-10-26").await.unwrap();
    assert!(empty.is_empty());
}
