//! Client-side list filtering: a case-insensitive substring match over a
//! fixed per-entity field subset, OR-combined. Recomputed on every
//! keystroke in the original UI, so the filter is a cheap lazy iterator
//! that can be restarted at will.

/// The fixed set of fields a record exposes to the search box.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Whether a record matches the query: the query substring appears,
/// case-insensitively, in at least one search field. An empty query
/// matches everything. Whitespace is significant, as in the original
/// search box: `"ltda "` only matches fields containing `"ltda "`.
pub fn matches_query<T: Searchable>(record: &T, query: &str) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Lazily filter a collection by query. The returned iterator borrows the
/// slice, so the caller can rebuild it on the next keystroke for free.
pub fn filter_records<'a, T: Searchable>(
    records: &'a [T],
    query: &str,
) -> impl Iterator<Item = &'a T> {
    let needle = query.to_lowercase();
    records.iter().filter(move |record| {
        needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    })
}
