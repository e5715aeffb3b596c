// ==========================================
// 考场座位编排系统 - 命令行入口
// ==========================================
// 用法: exam-seating <YYYY-MM-DD> <FN|AN> [order_by]
// 输出: 场次准备结果（JSON，写到 stdout）
// ==========================================

use exam_seating::api::SqliteSeatingApi;
use exam_seating::config::get_default_db_path;
use exam_seating::{db, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("用法: exam-seating <YYYY-MM-DD> <FN|AN> [roll_number|name|id]");
        std::process::exit(2);
    }

    tracing::info!("==================================================");
    tracing::info!("{} v{}", exam_seating::APP_NAME, exam_seating::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    {
        let conn = db::open_sqlite_connection(&db_path)?;
        db::init_schema(&conn)?;

        match db::read_schema_version(&conn)? {
            Some(v) if v == db::CURRENT_SCHEMA_VERSION => {}
            other => tracing::warn!(
                found = ?other,
                expected = db::CURRENT_SCHEMA_VERSION,
                "数据库 schema_version 与程序不一致"
            ),
        }
    }

    let api = SqliteSeatingApi::open(&db_path)?;
    let session = api
        .prepare_session(&args[0], &args[1], args.get(2).map(String::as_str))
        .await?;

    if !session.has_enough_seats() {
        tracing::warn!(
            shortfall = -session.remaining_capacity,
            "可用座位不足以容纳全部考生"
        );
    }

    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}
