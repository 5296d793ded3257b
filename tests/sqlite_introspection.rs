//! End-to-end introspection against an in-memory SQLite database.

use pretty_assertions::assert_eq;
use schema2go::prelude::*;

async fn connect() -> AnyConnection {
    sqlx::any::install_default_drivers();
    AnyConnection::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite")
}

async fn exec(conn: &mut AnyConnection, sql: &str) {
    sqlx::query(sql).execute(&mut *conn).await.expect(sql);
}

async fn shop() -> AnyConnection {
    let mut conn = connect().await;
    exec(
        &mut conn,
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, team_id INTEGER)",
    )
    .await;
    exec(
        &mut conn,
        "CREATE TABLE teams (id INTEGER PRIMARY KEY, title VARCHAR(64) NOT NULL DEFAULT 'x')",
    )
    .await;
    exec(
        &mut conn,
        "CREATE TABLE memberships (id INTEGER PRIMARY KEY, user_id INTEGER, team_id INTEGER)",
    )
    .await;
    conn
}

#[tokio::test]
async fn test_load_schema_builds_model_in_catalog_order() {
    let mut conn = shop().await;
    let schema = load_schema(&mut conn, Dialect::Sqlite, "main").await.unwrap();

    let tables: Vec<&str> = schema.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tables, ["memberships", "teams", "users"]);

    let users = schema.table("users").unwrap();
    assert_eq!(
        users.columns,
        vec![
            Column::new("id", "INTEGER"),
            Column::new("name", "TEXT"),
            Column::new("team_id", "INTEGER"),
            Column::new("team", "table"),
        ]
    );

    let teams = schema.table("teams").unwrap();
    assert_eq!(teams.columns[1], Column::new("title", "VARCHAR(64)"));
    assert_eq!(teams.relation_columns().count(), 0);
}

#[tokio::test]
async fn test_load_schema_for_driver_name() {
    let mut conn = shop().await;
    let schema = load_schema_for_driver(&mut conn, "sqlite3", "main").await.unwrap();
    assert_eq!(schema.tables.len(), 3);
}

#[tokio::test]
async fn test_unknown_driver_fails_before_querying() {
    let mut conn = shop().await;
    let err = load_schema_for_driver(&mut conn, "oracle", "main").await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[tokio::test]
async fn test_catalog_failure_aborts_run() {
    let mut conn = shop().await;
    let err = load_schema(&mut conn, Dialect::Sqlite, "no_such_schema").await.unwrap_err();
    assert!(matches!(err, Error::SchemaQuery { .. }));
}

#[tokio::test]
async fn test_empty_database_yields_empty_schema() {
    let mut conn = connect().await;
    let schema = load_schema(&mut conn, Dialect::Sqlite, "main").await.unwrap();
    assert!(schema.is_empty());
}

#[tokio::test]
async fn test_shadowed_relation_is_skipped() {
    let mut conn = connect().await;
    exec(
        &mut conn,
        "CREATE TABLE posts (id INTEGER, author_id INTEGER, author TEXT)",
    )
    .await;

    let schema = load_schema(&mut conn, Dialect::Sqlite, "main").await.unwrap();
    let posts = schema.table("posts").unwrap();
    let names: Vec<&str> = posts.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["id", "author_id", "author"]);
    assert_eq!(posts.relation_columns().count(), 0);
}

#[tokio::test]
async fn test_generate_users_end_to_end() {
    let mut conn = connect().await;
    exec(
        &mut conn,
        "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, team_id INTEGER)",
    )
    .await;

    let writer = SchemaWriter::new("data");
    let code = schema2go::generate(&mut conn, Dialect::Sqlite, "main", &writer)
        .await
        .unwrap();

    assert_eq!(
        code.types,
        "package data\n\n\
         \n\
         type Users struct {\n\
         \tId      int        `json:\"id\" db:\"id\"`\n\
         \tName    string     `json:\"name\" db:\"name\"`\n\
         \tTeamId  int        `json:\"team_id\" db:\"team_id\"`\n\
         \n\
         \tTeam    *Team      `json:\"team\" db:\"team\"`\n\
         }\n"
    );

    let expected_funcs = r#"package data


func (this Users) Table() string {
    return "users"
}

func (this Users) Get(db Queryer, id int) *Users {
    row := Users{}
    sql := "SELECT * FROM users WHERE id = ? LIMIT 1"
    err := db.Get(&row, sql, id)
    if err != nil {
        if err.Error() == "sql: no rows in result set" {
            return nil
        } else {
            panic(err)
        }
    }
    return &row
}

func (this Users) GetByTeamId(db Queryer, id int) *[]Users {
    rows := []Users{}
    sql := "SELECT * FROM users WHERE team_id = ?"
    err := db.Select(&rows, sql, id)
    if err != nil {
        if err.Error() == "sql: no rows in result set" {
            return nil
        } else {
            panic(err)
        }
    }
    return &rows
}

"#;
    assert_eq!(code.funcs, expected_funcs);
}

#[tokio::test]
async fn test_generate_is_deterministic() {
    let mut conn = shop().await;
    let writer = SchemaWriter::new("data").remove_from_type("Tbl");
    let first = schema2go::generate(&mut conn, Dialect::Sqlite, "main", &writer)
        .await
        .unwrap();
    let second = schema2go::generate(&mut conn, Dialect::Sqlite, "main", &writer)
        .await
        .unwrap();
    assert_eq!(first, second);
    assert!(!first.funcs.contains("func (this Memberships) GetBy"));
}
