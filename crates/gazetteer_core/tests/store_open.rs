use gazetteer_core::db::{create_store, create_store_in_memory, is_valid_store, open_store};
use rusqlite::Connection;
use std::fs;

#[test]
fn create_store_in_memory_provisions_all_tables() {
    let conn = create_store_in_memory().unwrap();

    assert_table_exists(&conn, "continent");
    assert_table_exists(&conn, "country");
    assert_table_exists(&conn, "region");
}

#[test]
fn opened_connections_enforce_foreign_keys() {
    let conn = create_store_in_memory().unwrap();

    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn created_store_file_reopens_as_valid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gazetteer.db");

    let conn = create_store(&path).unwrap();
    assert!(is_valid_store(&conn));
    drop(conn);

    let reopened = open_store(&path).unwrap();
    assert!(is_valid_store(&reopened));
}

#[test]
fn empty_database_without_continent_table_is_invalid() {
    let conn = Connection::open_in_memory().unwrap();

    assert!(!is_valid_store(&conn));
}

#[test]
fn database_with_unrelated_tables_is_invalid() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT);")
        .unwrap();

    assert!(!is_valid_store(&conn));
}

#[test]
fn non_database_file_is_invalid_without_raising() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-a-store.txt");
    fs::write(&path, "plain text, definitely not sqlite").unwrap();

    // SQLite defers reading the file until the first query; the sniff must
    // swallow that failure and report invalid.
    let conn = open_store(&path).unwrap();
    assert!(!is_valid_store(&conn));
}

#[test]
fn initialize_schema_fails_on_already_provisioned_store() {
    let conn = create_store_in_memory().unwrap();

    assert!(gazetteer_core::db::initialize_schema(&conn).is_err());
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
