use std::collections::HashMap;
use std::hash::Hash;

/// Counts each distinct value, keeping the order in which values first appear.
fn first_seen_counts<T, I>(values: I) -> Vec<(T, u64)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, u64)> = Vec::new();

    for value in values {
        match index.get(&value).copied() {
            Some(i) => counts[i].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts
}

/// Most frequent value. Ties go to the value whose first occurrence comes
/// earliest in iteration order. Returns `None` for empty input.
pub fn stable_mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<(T, u64)> = None;

    for (value, count) in first_seen_counts(values) {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value)
}

/// Frequency of each distinct value, highest count first. Equal counts keep
/// first-seen order.
pub fn value_counts<T, I>(values: I) -> Vec<(T, u64)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts = first_seen_counts(values);
    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
