//! Lexical knowledge-base ranking.
//!
//! Entries are scored by literal substring counts of the query and its
//! keyword-family synonyms. There is no embedding or vector math here.

use std::collections::BTreeSet;

use crate::config::assistant::TITLE_BONUS;
use crate::core::types::KnowledgeEntry;

/// Keyword families: if any key occurs in the query, every synonym joins the term set.
const TERM_FAMILIES: &[(&[&str], &[&str])] = &[
    (
        &["salary", "gaji"],
        &["salary", "payroll", "pay", "wage", "gaji", "penghasilan"],
    ),
    (
        &["leave", "cuti"],
        &["leave", "time off", "vacation", "cuti", "izin", "libur"],
    ),
    (
        &["attendance", "absen"],
        &["attendance", "clock", "presence", "absen", "hadir"],
    ),
    (
        &["allowance", "tunjangan"],
        &["allowance", "benefit", "incentive", "tunjangan"],
    ),
];

/// A knowledge entry with its ranking score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntry {
    pub entry: KnowledgeEntry,
    pub score: u32,
}

/// Lower-cased query plus the synonyms of every family it mentions.
///
/// The query itself is kept as typed, only lower-cased. A blank query
/// expands to nothing.
pub fn expand_query(query: &str) -> BTreeSet<String> {
    let mut terms = BTreeSet::new();
    if query.trim().is_empty() {
        return terms;
    }
    let query = query.to_lowercase();

    for (keys, synonyms) in TERM_FAMILIES {
        if keys.iter().any(|key| query.contains(key)) {
            terms.extend(synonyms.iter().map(|s| s.to_string()));
        }
    }
    terms.insert(query);
    terms
}

fn score_entry(entry: &KnowledgeEntry, terms: &BTreeSet<String>) -> u32 {
    let title = entry.title.to_lowercase();
    let text = format!("{} {} {}", title, entry.body.to_lowercase(), entry.tags.join(",").to_lowercase());

    let hits: usize = terms.iter().map(|term| text.matches(term.as_str()).count()).sum();
    let title_bonus = if terms.iter().any(|term| title.contains(term.as_str())) {
        TITLE_BONUS
    } else {
        0
    };

    u32::try_from(hits).unwrap_or(u32::MAX).saturating_add(title_bonus)
}

/// Scores every entry against `query` and returns the best `top_k`, highest first.
///
/// Zero-score entries are discarded. Equal scores keep the order of `entries`.
pub fn rank_knowledge(query: &str, entries: &[KnowledgeEntry], top_k: usize) -> Vec<ScoredEntry> {
    let terms = expand_query(query);
    if terms.is_empty() || top_k == 0 {
        return Vec::new();
    }

    let mut scored: Vec<ScoredEntry> = entries
        .iter()
        .filter_map(|entry| {
            let score = score_entry(entry, &terms);
            (score > 0).then(|| ScoredEntry {
                entry: entry.clone(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(top_k);

    log::debug!("Ranked {} knowledge entries for query ({} terms)", scored.len(), terms.len());
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(id: i64, title: &str, body: &str, tags: &[&str]) -> KnowledgeEntry {
        KnowledgeEntry {
            id,
            category: "policy".to_string(),
            title: title.to_string(),
            body: body.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn knowledge_base() -> Vec<KnowledgeEntry> {
        vec![
            entry(
                1,
                "Office Hours",
                "Working hours are 08:00 to 17:00. Employees on leave must hand over urgent work.",
                &["hours", "schedule"],
            ),
            entry(
                2,
                "Leave Request Procedure",
                "Submit a request through HR at least three days before the first day.",
                &["procedure"],
            ),
            entry(
                3,
                "Payroll Schedule",
                "Salary is paid on the 25th of each month.",
                &["salary", "payroll"],
            ),
        ]
    }

    #[test]
    fn leave_question_expands_and_prefers_the_titled_entry() {
        let terms = expand_query("How do I request LEAVE");
        for synonym in ["leave", "time off", "vacation", "cuti", "izin", "libur"] {
            assert!(terms.contains(synonym), "missing {}", synonym);
        }
        assert!(terms.contains("how do i request leave"));

        let ranked = rank_knowledge("how do I request leave", &knowledge_base(), 3);
        let ids: Vec<_> = ranked.iter().map(|s| s.entry.id).collect();
        assert_eq!(ids[0], 2);
        assert!(ids.contains(&1));
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn query_term_keeps_surrounding_spaces() {
        let terms = expand_query("  Dress Code ");
        assert!(terms.contains("  dress code "));
        assert!(!terms.contains("dress code"));
        assert!(expand_query(" \t ").is_empty());
    }

    #[test]
    fn indonesian_key_expands_the_same_family() {
        let terms = expand_query("kapan gaji dibayar");
        assert!(terms.contains("payroll"));
        assert!(terms.contains("salary"));
        assert!(!terms.contains("leave"));
    }

    #[test]
    fn term_unique_to_one_title_ranks_that_entry_first() {
        let mut entries = knowledge_base();
        entries.push(entry(4, "Dress Code", "Smart casual from Monday to Thursday.", &[]));
        let ranked = rank_knowledge("dress code", &entries, 3);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].entry.id, 4);
        // the title is part of the searched text, then earns the bonus on top
        assert_eq!(ranked[0].score, 1 + TITLE_BONUS);
    }

    #[test]
    fn nothing_matches_nothing_returned() {
        assert!(rank_knowledge("parking permit", &knowledge_base(), 3).is_empty());
        assert!(rank_knowledge("   ", &knowledge_base(), 3).is_empty());
        assert!(rank_knowledge("salary", &[], 3).is_empty());
    }

    #[test]
    fn top_k_caps_the_result_and_ties_keep_input_order() {
        let entries = vec![
            entry(10, "A", "bonus", &[]),
            entry(11, "B", "bonus", &[]),
            entry(12, "C", "bonus", &[]),
        ];
        let ranked = rank_knowledge("bonus", &entries, 2);
        let ids: Vec<_> = ranked.iter().map(|s| s.entry.id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert!(rank_knowledge("bonus", &entries, 0).is_empty());
    }

    #[test]
    fn tags_count_towards_the_score() {
        let ranked = rank_knowledge("schedule", &knowledge_base(), 3);
        let ids: Vec<_> = ranked.iter().map(|s| s.entry.id).collect();
        // title bonus on the payroll entry outweighs the tag hit on office hours
        assert_eq!(ids, vec![3, 1]);
    }
}
