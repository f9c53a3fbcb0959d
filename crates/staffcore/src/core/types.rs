//! Domain types shared by storage, scoring and the assistant.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Daily attendance status. Exactly one per attendance row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
    Sick,
}

/// One employee's attendance for one calendar day.
///
/// Created at clock-in and completed once at clock-out.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub clock_in: Option<NaiveDateTime>,
    pub clock_out: Option<NaiveDateTime>,
    pub status: AttendanceStatus,
    pub worked_hours: f64,
}

impl AttendanceRecord {
    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present
    }
}

/// Static FAQ / policy entry used to ground assistant answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: i64,
    pub category: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl KnowledgeEntry {
    /// Splits a comma-separated tag column into trimmed, non-empty tags.
    pub fn parse_tags(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn attendance_status_round_trips_through_its_column_text() {
        assert_eq!(AttendanceStatus::Present.as_ref(), "present");
        assert_eq!(AttendanceStatus::from_str("sick").unwrap(), AttendanceStatus::Sick);
        assert!(AttendanceStatus::from_str("hadir").is_err());
    }

    #[test]
    fn parse_tags_drops_blanks() {
        assert_eq!(
            KnowledgeEntry::parse_tags("leave, request,,  procedure "),
            vec!["leave", "request", "procedure"]
        );
        assert!(KnowledgeEntry::parse_tags("").is_empty());
    }
}
