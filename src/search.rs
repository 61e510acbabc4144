//! Local search over fetched collections.
//!
//! Matching is plain substring containment after lowercasing both sides.
//! No tokenization, no accent folding, no fuzzy matching.

use crate::domain::visite::{VisitTab, Visite};
use crate::shared::ClientRef;
use std::borrow::Cow;

/// Exposes the designated text fields of an entity.
pub trait Searchable {
    /// Fields the free-text query is matched against. `None` never matches.
    fn search_fields(&self) -> Vec<Option<&str>>;
}

/// Search fields of an optional nested client.
pub(crate) fn nested_client_fields(client: Option<&ClientRef>) -> [Option<&str>; 4] {
    match client {
        Some(c) => c.search_fields().map(Some),
        None => [None; 4],
    }
}

/// Lowercased, trimmed form of a query; `None` when it matches everything.
fn needle(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn matches<T: Searchable>(item: &T, needle: &str) -> bool {
    item.search_fields()
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Filter `items` by `query`.
///
/// A blank query returns the input slice itself. Otherwise the result keeps
/// the original order.
pub fn filter<'a, T: Searchable + Clone>(items: &'a [T], query: &str) -> Cow<'a, [T]> {
    match needle(query) {
        None => Cow::Borrowed(items),
        Some(n) => Cow::Owned(items.iter().filter(|i| matches(*i, &n)).cloned().collect()),
    }
}

/// Filter visits by screen tab, then by `query`.
pub fn filter_visits<'a>(items: &'a [Visite], tab: VisitTab, query: &str) -> Cow<'a, [Visite]> {
    let needle = needle(query);
    match (tab, needle) {
        (VisitTab::History, None) => Cow::Borrowed(items),
        (tab, needle) => Cow::Owned(
            items
                .iter()
                .filter(|v| tab.includes(v))
                .filter(|v| needle.as_deref().map_or(true, |n| matches(*v, n)))
                .cloned()
                .collect(),
        ),
    }
}

/// Memo of the last filter result.
///
/// Keyed by the normalized query and the collection revision, so a changed
/// collection or query always recomputes.
#[derive(Debug, Clone)]
pub struct FilterCache<T> {
    last: Option<(Option<String>, u64, Vec<T>)>,
}

impl<T: Searchable + Clone> FilterCache<T> {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Filtered view of `items` at `revision`.
    pub fn get(&mut self, items: &[T], revision: u64, query: &str) -> &[T] {
        let key = needle(query);
        let fresh = matches!(&self.last, Some((q, r, _)) if *q == key && *r == revision);
        if !fresh {
            let result = filter(items, query).into_owned();
            self.last = Some((key, revision, result));
        }
        match &self.last {
            Some((_, _, result)) => result.as_slice(),
            None => &[],
        }
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

impl<T: Searchable + Clone> Default for FilterCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
