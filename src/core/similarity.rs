use std::collections::HashSet;

/// Comparison key for free-text values: trimmed and lowercased.
///
/// Stored display values are never rewritten; only keys are folded.
#[inline]
pub fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Case-insensitive equality. Blank values never match.
#[inline]
pub fn eq_folded(a: &str, b: &str) -> bool {
    let a = fold(a);
    !a.is_empty() && a == fold(b)
}

/// Case-insensitive substring containment. A blank needle never matches.
#[inline]
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    let needle = fold(needle);
    !needle.is_empty() && fold(haystack).contains(&needle)
}

/// Folded, de-duplicated key set of a list, ignoring blank entries
pub fn folded_set<S: AsRef<str>>(items: &[S]) -> HashSet<String> {
    items
        .iter()
        .map(|s| fold(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Items of `left` that also appear in `right`, compared case-insensitively.
///
/// Order and display casing follow `left`; duplicates (after folding) are
/// reported once.
pub fn overlap<S: AsRef<str>, T: AsRef<str>>(left: &[S], right: &[T]) -> Vec<String> {
    let right = folded_set(right);
    let mut seen = HashSet::new();

    left.iter()
        .map(AsRef::as_ref)
        .filter(|item| {
            let key = fold(item);
            right.contains(&key) && seen.insert(key)
        })
        .map(|item| item.trim().to_string())
        .collect()
}

/// Jaccard index `|A ∩ B| / |A ∪ B|` of two case-folded sets.
///
/// Returns 0.0 when either set is empty.
pub fn jaccard<S: AsRef<str>, T: AsRef<str>>(a: &[S], b: &[T]) -> f64 {
    let a = folded_set(a);
    let b = folded_set(b);

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();

    intersection as f64 / union as f64
}

/// Cosine similarity of two dense vectors, in [-1, 1].
///
/// Returns `None` when the vectors are empty or of different length, i.e.
/// when no meaningful comparison exists. Zero-norm vectors compare as 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.is_empty() || a.len() != b.len() {
        return None;
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Some(0.0);
    }

    Some((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}
