//! Shared collection helpers.

use std::hash::Hash;

use indexmap::IndexMap;

/// Split a slice into consecutive chunks of `size` items, the last one possibly shorter.
///
/// A `size` of zero yields no chunks.
pub fn split_by_chunks<T>(items: &[T], size: usize) -> impl Iterator<Item = &[T]> {
    (size > 0).then(|| items.chunks(size)).into_iter().flatten()
}

/// Group items by key, keeping keys in first-seen order and items in input order.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> IndexMap<K, Vec<T>>
where
    K: Hash + Eq,
    F: FnMut(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}
