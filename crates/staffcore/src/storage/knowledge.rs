use rusqlite::{params, Connection};

use crate::core::error::AppResult;
use crate::core::types::KnowledgeEntry;

fn parse_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<KnowledgeEntry> {
    let tags: String = row.get(4)?;
    Ok(KnowledgeEntry {
        id: row.get(0)?,
        category: row.get(1)?,
        title: row.get(2)?,
        body: row.get(3)?,
        tags: KnowledgeEntry::parse_tags(&tags),
    })
}

/// The whole knowledge base in id order.
pub fn all(conn: &Connection) -> AppResult<Vec<KnowledgeEntry>> {
    let mut stmt = conn.prepare("SELECT id, category, title, body, tags FROM knowledge_base ORDER BY id")?;
    let rows = stmt.query_map([], parse_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn insert(conn: &Connection, category: &str, title: &str, body: &str, tags: &[&str]) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO knowledge_base (category, title, body, tags) VALUES (?1, ?2, ?3, ?4)",
        params![category, title, body, tags.join(",")],
    )?;
    Ok(conn.last_insert_rowid())
}
