use std::collections::BTreeMap;

use crate::config::ENTRIES_DIR;
use crate::formats::{Category, EntrySummary};

/// Entries collected per category while rows are processed.
#[derive(Debug, Default)]
pub struct ChapterBuckets {
    buckets: BTreeMap<Category, Vec<EntrySummary>>,
}

impl ChapterBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: Category, entry: EntrySummary) {
        self.buckets.entry(category).or_default().push(entry);
    }

    pub(crate) fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Closes the buckets: one chapter per category in book order, including
    /// categories nothing was recorded for, entries sorted by title.
    pub fn finalize(mut self) -> Vec<Chapter> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let mut entries = self.buckets.remove(&category).unwrap_or_default();
                entries.sort_by(|a, b| a.title.cmp(&b.title));
                Chapter { category, entries }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub category: Category,
    pub entries: Vec<EntrySummary>,
}

impl Chapter {
    pub fn file_name(&self) -> String {
        format!("chapter{:02}.tex", self.category.ordinal())
    }

    pub fn render(&self) -> String {
        let mut tex = format!("\\chapter{{{}}}\n", self.category.title());
        for entry in &self.entries {
            tex.push_str(&format!("\\input{{./{ENTRIES_DIR}/{}}}\n", entry.slug));
        }
        tex
    }
}
