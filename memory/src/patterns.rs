//! # Pattern Aggregator
//!
//! Counts second-level headings across the notes dated within the recent
//! window. A heading is any line starting with `## ` followed by text; it is
//! counted in its case-folded, trimmed form (marker included), so
//! `## Decisions Made` and `## decisions made ` are the same pattern.
//!
//! Ordering: descending by count; ties keep first-seen order, where notes
//! are visited newest date first and headings top to bottom.

use mk_core::{Clock, Note, PatternRecord};
use std::collections::HashMap;
use std::sync::Arc;

const HEADING_MARKER: &str = "## ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternReport {
    /// Notes inside the window.
    pub analyzed: usize,
    pub patterns: Vec<PatternRecord>
}

pub struct PatternAggregator {
    clock: Arc<dyn Clock>,
    window_days: i64,
    min_occurrences: usize
}

impl PatternAggregator {
    pub fn new(clock: Arc<dyn Clock>, window_days: i64, min_occurrences: usize) -> Self {
        Self {
            clock,
            window_days,
            min_occurrences
        }
    }

    /// Aggregate headings over `notes`. Unreadable files are skipped.
    pub fn aggregate(&self, notes: &[Note]) -> PatternReport {
        let today = self.clock.today();
        let mut recent: Vec<&Note> = notes
            .iter()
            .filter(|n| {
                n.date_age(today)
                    .is_some_and(|age| (0..=self.window_days).contains(&age))
            })
            .collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));

        let mut counter = HeadingCounter::default();
        for note in &recent {
            match std::fs::read_to_string(&note.path) {
                Ok(content) => counter.add_document(&content),
                Err(e) => tracing::debug!("Skipping {}: {}", note.name, e)
            }
        }

        let patterns = counter.into_patterns(self.min_occurrences);
        tracing::info!(
            analyzed = recent.len(),
            patterns = patterns.len(),
            "Pattern detection finished"
        );
        PatternReport {
            analyzed: recent.len(),
            patterns
        }
    }
}

/// Frequency table that remembers first-seen order.
#[derive(Debug, Default)]
struct HeadingCounter {
    order: Vec<String>,
    counts: HashMap<String, usize>
}

impl HeadingCounter {
    fn add_document(&mut self, content: &str) {
        for heading in content.lines().filter_map(normalize_heading) {
            match self.counts.get_mut(&heading) {
                Some(count) => *count += 1,
                None => {
                    self.counts.insert(heading.clone(), 1);
                    self.order.push(heading);
                }
            }
        }
    }

    fn into_patterns(self, min_occurrences: usize) -> Vec<PatternRecord> {
        let mut patterns: Vec<PatternRecord> = self
            .order
            .into_iter()
            .filter_map(|heading| {
                let count = self.counts.get(&heading).copied().unwrap_or(0);
                (count >= min_occurrences).then_some(PatternRecord { heading, count })
            })
            .collect();
        patterns.sort_by(|a, b| b.count.cmp(&a.count));
        patterns
    }
}

/// `Some("## text")` for a second-level heading line, normalized.
pub fn normalize_heading(line: &str) -> Option<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let rest = line.strip_prefix(HEADING_MARKER)?;
    if rest.trim().is_empty() {
        return None;
    }
    Some(line.to_lowercase().trim().to_string())
}
