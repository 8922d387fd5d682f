//! User-extensible gazetteer.
//!
//! Confirmed entity mentions live here and are matched ahead of every rule
//! engine, so a learned name wins its span outright. The default store is
//! in-memory; anything implementing [`KnowledgeBase`] can stand in.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::entity::EntityType;
use crate::error::{Error, Result};
use crate::offset::DocView;
use crate::recognizers::person;
use crate::recognizers::{is_determiner, push_longest, sort_candidates, Candidate, Source};

/// One learned or seeded gazetteer entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Entry surface text, trimmed.
    pub text: String,
    /// Label applied to every match of this entry.
    pub label: EntityType,
    /// How many times the entry has been added or confirmed.
    pub frequency: u64,
    /// Free-form provenance tag (`"user"`, `"import"`, ...).
    pub source: String,
}

impl KnowledgeEntry {
    /// Builds an entry with frequency 1.
    #[must_use]
    pub fn new(text: impl Into<String>, label: EntityType, source: impl Into<String>) -> Self {
        KnowledgeEntry {
            text: text.into(),
            label,
            frequency: 1,
            source: source.into(),
        }
    }
}

/// Store of confirmed entity mentions, consulted before any rule engine.
pub trait KnowledgeBase: Send + Sync {
    /// Snapshot of all entries, in no particular order.
    fn list_entries(&self) -> Result<Vec<KnowledgeEntry>>;

    /// Inserts `text` under `label`, or bumps the frequency of the existing
    /// entry with the same text. Returns `true` when the entry is new.
    ///
    /// The text is trimmed first; an empty result is an
    /// [`Error::InvalidInput`].
    fn add_or_bump(&self, text: &str, label: EntityType, source: &str) -> Result<bool>;
}

/// In-memory [`KnowledgeBase`] keyed by entry text.
///
/// A text keeps the label it was first added under; later additions only
/// bump its frequency.
#[derive(Debug, Default)]
pub struct MemoryKnowledgeBase {
    entries: RwLock<HashMap<String, KnowledgeEntry>>,
}

impl MemoryKnowledgeBase {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        MemoryKnowledgeBase::default()
    }

    /// Store seeded from prepared entries. Entries sharing a text fold
    /// their frequencies into the first occurrence.
    pub fn with_entries(entries: impl IntoIterator<Item = KnowledgeEntry>) -> Self {
        let mut map: HashMap<String, KnowledgeEntry> = HashMap::new();
        for entry in entries {
            map.entry(entry.text.clone())
                .and_modify(|held| {
                    held.frequency = held.frequency.saturating_add(entry.frequency);
                })
                .or_insert(entry);
        }
        MemoryKnowledgeBase {
            entries: RwLock::new(map),
        }
    }
}

impl KnowledgeBase for MemoryKnowledgeBase {
    fn list_entries(&self) -> Result<Vec<KnowledgeEntry>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| Error::knowledge("knowledge base lock poisoned"))?;
        Ok(guard.values().cloned().collect())
    }

    fn add_or_bump(&self, text: &str, label: EntityType, source: &str) -> Result<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::invalid_input("knowledge entry text is empty"));
        }
        let mut guard = self
            .entries
            .write()
            .map_err(|_| Error::knowledge("knowledge base lock poisoned"))?;
        match guard.get_mut(text) {
            Some(held) => {
                held.frequency = held.frequency.saturating_add(1);
                Ok(false)
            }
            None => {
                guard.insert(text.to_owned(), KnowledgeEntry::new(text, label, source));
                Ok(true)
            }
        }
    }
}

/// Scans `doc` for gazetteer entries and returns their spans.
///
/// Confirmed entries are trusted at any length, single chars included.
/// Longer entries match first and claim their span outright; ties fall to
/// the lexicographically smaller text so the batch is deterministic. Short
/// entries behind a determiner are skipped, as are person entries running
/// into a further given-name character (张三 inside 张三丰).
pub(crate) fn gazetteer_candidates(doc: &DocView<'_>, entries: &[KnowledgeEntry]) -> Vec<Candidate> {
    let mut ordered: Vec<&KnowledgeEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| {
        let (la, lb) = (a.text.chars().count(), b.text.chars().count());
        lb.cmp(&la).then_with(|| a.text.cmp(&b.text))
    });

    let chars = doc.chars();
    let mut held: Vec<Candidate> = Vec::new();
    for entry in ordered {
        let len = entry.text.chars().count();
        for (byte_start, _) in doc.text().match_indices(entry.text.as_str()) {
            let start = doc.char_index(byte_start);
            let end = start + len;
            if len <= 3 && start > 0 && is_determiner(chars[start - 1]) {
                continue;
            }
            if entry.label == EntityType::Person {
                if let Some(&next) = chars.get(end) {
                    if person::is_given_name_char(next) {
                        continue;
                    }
                }
            }
            push_longest(
                &mut held,
                Candidate::new(start, end, entry.label, Source::Gazetteer),
            );
        }
    }
    sort_candidates(&mut held);
    held
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_bump() {
        let kb = MemoryKnowledgeBase::new();
        assert!(kb
            .add_or_bump("燕园书店", EntityType::Organization, "user")
            .expect("store accepts writes"));
        assert!(!kb
            .add_or_bump("燕园书店", EntityType::Organization, "user")
            .expect("store accepts writes"));
        let entries = kb.list_entries().expect("store lists entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].frequency, 2);
        assert_eq!(entries[0].label, EntityType::Organization);
    }

    #[test]
    fn text_is_trimmed_and_empty_rejected() {
        let kb = MemoryKnowledgeBase::new();
        kb.add_or_bump("  张小川 ", EntityType::Person, "user")
            .expect("store accepts writes");
        let entries = kb.list_entries().expect("store lists entries");
        assert_eq!(entries[0].text, "张小川");
        assert!(kb.add_or_bump("   ", EntityType::Person, "user").is_err());
    }

    #[test]
    fn label_conflicts_keep_first_label() {
        let kb = MemoryKnowledgeBase::new();
        kb.add_or_bump("凤凰", EntityType::Organization, "user")
            .expect("store accepts writes");
        kb.add_or_bump("凤凰", EntityType::Location, "user")
            .expect("store accepts writes");
        let entries = kb.list_entries().expect("store lists entries");
        assert_eq!(entries[0].label, EntityType::Organization);
        assert_eq!(entries[0].frequency, 2);
    }

    #[test]
    fn seeding_folds_duplicates() {
        let kb = MemoryKnowledgeBase::with_entries([
            KnowledgeEntry::new("老君山", EntityType::Location, "seed"),
            KnowledgeEntry::new("老君山", EntityType::Location, "seed"),
        ]);
        let entries = kb.list_entries().expect("store lists entries");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].frequency, 2);
    }

    #[test]
    fn gazetteer_matches_seeded_phrase() {
        let doc = DocView::new("参观特斯拉上海工厂");
        let entries = vec![KnowledgeEntry::new(
            "特斯拉上海工厂",
            EntityType::Organization,
            "user",
        )];
        let out = gazetteer_candidates(&doc, &entries);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].start, out[0].end), (2, 9));
        assert_eq!(out[0].source, Source::Gazetteer);
    }

    #[test]
    fn longer_entry_claims_span() {
        let doc = DocView::new("燕山大学在秦皇岛");
        let entries = vec![
            KnowledgeEntry::new("燕山", EntityType::Location, "user"),
            KnowledgeEntry::new("燕山大学", EntityType::Organization, "user"),
        ];
        let out = gazetteer_candidates(&doc, &entries);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].start, out[0].end), (0, 4));
        assert_eq!(out[0].label, EntityType::Organization);
    }

    #[test]
    fn short_entry_behind_determiner_skipped() {
        let doc = DocView::new("每当天气转冷");
        let entries = vec![KnowledgeEntry::new("当天", EntityType::Time, "user")];
        assert!(gazetteer_candidates(&doc, &entries).is_empty());
    }

    #[test]
    fn person_entry_yields_to_longer_name() {
        let entries = vec![KnowledgeEntry::new("张三", EntityType::Person, "user")];
        let doc = DocView::new("张三丰到场");
        assert!(gazetteer_candidates(&doc, &entries).is_empty());
        let doc = DocView::new("张三到场");
        let out = gazetteer_candidates(&doc, &entries);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].start, out[0].end), (0, 2));
    }

    #[test]
    fn single_char_entry_matches() {
        let doc = DocView::new("千里马出现了");
        let entries = vec![KnowledgeEntry::new("马", EntityType::Location, "user")];
        let out = gazetteer_candidates(&doc, &entries);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].start, out[0].end), (2, 3));
        assert_eq!(out[0].label, EntityType::Location);
    }
}
