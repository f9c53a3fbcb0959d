//! SQLite storage: pool, migrations and per-table queries.
//!
//! Query functions take a plain `&Connection`; a pooled `DbConnection`
//! derefs to one and goes back to the pool when dropped.

pub mod attendance;
pub mod db;
pub mod employees;
pub mod knowledge;
pub mod leave;
pub mod migrations;
pub mod payroll;

// Re-exports for convenience
pub use db::{create_pool, get_connection, DbConnection, DbPool};

#[cfg(test)]
pub(crate) mod testing {
    use rusqlite::Connection;

    use super::employees::{self, NewEmployee};
    use super::migrations::run_migrations;

    pub fn make_conn() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        conn
    }

    /// Inserts an unlinked employee with the given NIK and returns its id.
    pub fn add_employee(conn: &Connection, nik: &str, name: &str) -> i64 {
        employees::insert(
            conn,
            &NewEmployee {
                nik,
                name,
                email: None,
                position: Some("Staff"),
                department: Some("Finance"),
                join_date: None,
                base_salary: 8_000_000.0,
            },
        )
        .unwrap()
    }
}
