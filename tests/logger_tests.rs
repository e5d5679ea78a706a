//! QueryLogger 集成测试
//!
//! 覆盖：
//! - 语句类型与图标
//! - 表名输出
//! - 参数行
//! - 序号、时间、SQL 行与行数
//! - 边界输入

mod common;

use common::{capturing_logger, capturing_logger_with, plain_config};
use sqlquery_logger::{Logger, Param, QueryLogger, params};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

#[test]
fn test_detect_select() {
    let (logger, out) = capturing_logger();
    logger.log_query("SELECT * FROM users", &[]);
    assert!(out.any_line_contains(&["🔍", "SELECT"]));
}

#[test]
fn test_detect_each_kind_icon() {
    let cases: [(&str, Vec<Param>, &str, &str); 7] = [
        ("INSERT INTO users (name) VALUES (?)", params!["John Doe"], "📝", "INSERT"),
        ("UPDATE users SET name = ? WHERE id = ?", params!["Jane", 1], "✏️", "UPDATE"),
        ("DELETE FROM users WHERE id = ?", params![1], "🗑️", "DELETE"),
        ("CREATE TABLE users (id INT)", params![], "🏗️", "CREATE"),
        ("DROP TABLE users", params![], "💥", "DROP"),
        ("ALTER TABLE users ADD COLUMN email VARCHAR(255)", params![], "🔧", "ALTER"),
        ("EXPLAIN SELECT * FROM users", params![], "⚡", "OTHER"),
    ];

    for (sql, params, icon, kind) in cases {
        let (logger, out) = capturing_logger();
        logger.log_query(sql, &params);
        assert!(out.any_line_contains(&[icon, kind]), "{sql}");
    }
}

#[test]
fn test_table_name_in_classification_line() {
    let (logger, out) = capturing_logger_with(plain_config());
    logger.log_query("UPDATE orders SET status = ? WHERE id = ?", &params!["completed", 1]);
    assert_eq!(out.lines()[2], "│  ✏️ UPDATE on orders");

    let (logger, out) = capturing_logger_with(plain_config());
    logger.log_query("SELECT * FROM `users` WHERE id = 1", &[]);
    assert_eq!(out.lines()[2], "│  🔍 SELECT on users");
}

#[test]
fn test_no_identifiable_table() {
    let (logger, out) = capturing_logger();
    logger.log_query("SHOW TABLES", &[]);
    assert_eq!(out.len(), 5);
    assert!(!out.any_line_contains(&[" on "]));
}

#[test]
fn test_parameter_values() {
    let mut metadata = BTreeMap::new();
    metadata.insert("key", "value");

    let cases: Vec<(Vec<Param>, Vec<&str>)> = vec![
        (params!["John Doe"], vec!["\"John Doe\""]),
        (params![123], vec!["123"]),
        (params![true], vec!["true"]),
        (vec![Param::Null], vec!["null"]),
        (vec![Param::structured(metadata)], vec!["key", "value"]),
    ];

    for (params, needles) in cases {
        let (logger, out) = capturing_logger();
        logger.log_query("SELECT * FROM users WHERE x = ?", &params);
        let mut with_label = vec!["Parameters:"];
        with_label.extend(needles.iter().copied());
        assert!(out.any_line_contains(&with_label), "{needles:?}");
    }
}

#[test]
fn test_empty_params_omit_section() {
    let (logger, out) = capturing_logger();
    logger.log_query("SELECT * FROM users", &[]);
    assert!(!out.any_line_contains(&["Parameters:"]));
    assert_eq!(out.len(), 5);
}

#[test]
fn test_param_line_indexes() {
    let (logger, out) = capturing_logger_with(plain_config());
    logger.log_query("SELECT ?, ?", &params!["a", 2]);
    assert_eq!(out.lines()[4], "   ├─ Parameters: $1: \"a\", $2: 2");
}

#[test]
fn test_sequence_numbers() {
    let (logger, out) = capturing_logger();
    logger.log_query("SELECT * FROM users", &[]);
    logger.log_query("SELECT * FROM products", &[]);

    let lines = out.lines();
    assert!(lines[0].contains("#1"));
    assert!(lines[5].contains("#2"));
    assert_eq!(logger.query_count(), 2);
}

#[test]
fn test_frame_sections() {
    let (logger, out) = capturing_logger();
    logger.log_query("SELECT * FROM users", &[]);
    assert!(out.any_line_contains(&["Time:"]));
    assert!(out.any_line_contains(&["SQL:"]));
    assert!(out.lines()[0].contains("╭─ Database Query"));
    assert!(out.lines()[4].contains("╰─"));
}

#[test]
fn test_line_count_with_params() {
    let (logger, out) = capturing_logger();
    logger.log_query("SELECT * FROM users WHERE id = ?", &params![1]);
    assert_eq!(out.len(), 6);
}

#[test]
fn test_highlighted_sql_line() {
    let (logger, out) = capturing_logger();
    logger.log_query("SELECT * FROM users WHERE name = 'John'", &[]);
    assert!(out.any_line_contains(&["SQL:", "'John'"]));

    let (logger, out) = capturing_logger();
    logger.log_query("select * from users where id = 123", &[]);
    assert!(out.any_line_contains(&["SQL:", "\x1b[36m123\x1b[0m", "\x1b[34mWHERE\x1b[0m"]));
}

#[test]
fn test_plain_output_has_no_escapes() {
    let (logger, out) = capturing_logger_with(plain_config());
    logger.log_query("SELECT * FROM users WHERE id = ?", &params![1, "x", true]);
    assert!(out.lines().iter().all(|line| !line.contains('\x1b')));
}

#[test]
fn test_default_logger_does_not_panic() {
    let logger = QueryLogger::new();
    logger.log_query("SELECT 1", &[]);
    assert_eq!(logger.query_count(), 1);
}

#[test]
fn test_logger_trait_object() {
    let (logger, out) = capturing_logger();
    let host: &dyn Logger = &logger;
    host.log_query("SELECT 1", &[]);
    assert_eq!(out.len(), 5);
}

#[test]
fn test_edge_case_inputs() {
    let long_query = format!("SELECT {} id FROM users", "column,".repeat(5000));
    let inputs = [
        long_query.as_str(),
        "SELECT * FROM users WHERE name = 'O''Reilly' AND email LIKE '%@%.com'",
        r#"SELECT * FROM t WHERE a = "say \"hi\"" AND b = 'it\'s'"#,
        "",
        "   \n\t  ",
        "'unterminated",
    ];

    for input in inputs {
        let (logger, out) = capturing_logger();
        logger.log_query(input, &[]);
        assert_eq!(out.len(), 5);
    }
}

#[test]
fn test_unserializable_param() {
    // 元组键无法序列化为 JSON 对象
    let mut pairs = BTreeMap::new();
    pairs.insert((1, 2), "prop");

    let (logger, out) = capturing_logger();
    logger.log_query("SELECT * FROM users WHERE data = ?", &[Param::structured(pairs)]);
    assert_eq!(out.len(), 6);
    assert!(out.any_line_contains(&["Parameters:", "\x1b[31m", "prop"]));
}

#[test]
fn test_concurrent_unique_sequence_numbers() {
    let (logger, out) = capturing_logger_with(plain_config());
    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for _ in 0..25 {
                    logger.log_query("SELECT 1", &[]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(logger.query_count(), 200);
    let mut seqs: Vec<u64> = out
        .lines()
        .iter()
        .filter_map(|line| line.rsplit_once('#'))
        .filter_map(|(_, n)| n.parse().ok())
        .collect();
    seqs.sort_unstable();
    seqs.dedup();
    assert_eq!(seqs.len(), 200);
    assert_eq!(seqs.first(), Some(&1));
    assert_eq!(seqs.last(), Some(&200));
}

#[test]
fn test_concurrent_frames_do_not_interleave() {
    let (logger, out) = capturing_logger_with(plain_config());
    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..25 {
                    logger.log_query(&format!("SELECT {t} FROM t{i}"), &[]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let lines = out.lines();
    assert_eq!(lines.len(), 200 * 5);
    let mut last_seq = 0u64;
    for frame in lines.chunks(5) {
        assert!(frame[0].contains("Database Query #"), "{frame:?}");
        assert!(frame[1].starts_with("│  Time: "), "{frame:?}");
        assert!(frame[2].starts_with("│  🔍 SELECT on t"), "{frame:?}");
        assert!(frame[3].starts_with("│  SQL: SELECT "), "{frame:?}");
        assert!(frame[4].starts_with("╰─"), "{frame:?}");

        // 序号在输出顺序上严格递增
        let seq: u64 = frame[0].rsplit_once('#').unwrap().1.parse().unwrap();
        assert_eq!(seq, last_seq + 1);
        last_seq = seq;
    }
}
