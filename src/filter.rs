//! Free-text search over a loaded collection.
//!
//! [`project`] is the pure projection; [`SearchView`] memoizes it against a
//! store revision so a UI can ask for the filtered rows on every frame.

/// Records that expose text fields to the search box.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match. `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Filter `items` by `query`.
///
/// Blank queries return the items unchanged and in order. The input is
/// never modified.
pub fn project<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.matches(&needle))
        .cloned()
        .collect()
}

/// Memoized projection keyed on `(revision, query)`.
#[derive(Debug, Clone)]
pub struct SearchView<T> {
    query: String,
    cached: Option<(u64, String, Vec<T>)>,
}

impl<T> Default for SearchView<T> {
    fn default() -> Self {
        Self {
            query: String::new(),
            cached: None,
        }
    }
}

impl<T: Searchable + Clone> SearchView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Filtered rows for `items` at `revision`, recomputed only when either
    /// the revision or the query changed since the last call.
    pub fn rows(&mut self, revision: u64, items: &[T]) -> &[T] {
        let stale = match &self.cached {
            Some((rev, query, _)) => *rev != revision || *query != self.query,
            None => true,
        };
        if stale {
            self.cached = Some((revision, self.query.clone(), project(items, &self.query)));
        }
        match &self.cached {
            Some((_, _, rows)) => rows,
            None => &[],
        }
    }
}
