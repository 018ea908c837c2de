//! Place-name comparison.
//!
//! Names are normalized before comparison so that letter case and spacing
//! never count as edits.

/// Normalize a place name for comparison.
///
/// Lowercases, trims both ends and collapses each interior whitespace run
/// to a single space.
///
/// # Examples
///
/// ```
/// use mapcore::compute::levenshtein::normalize_name;
///
/// assert_eq!(normalize_name("  Central   PARK "), "central park");
/// ```
pub fn normalize_name(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut normalized = String::with_capacity(lowered.len());
    for word in lowered.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(word);
    }
    normalized
}

/// Levenshtein edit distance between two strings.
///
/// The minimal number of single-character insertions, deletions or
/// substitutions turning `a` into `b`, each at unit cost. Characters are
/// Unicode scalar values. Runs in `O(m·n)` time and keeps two rows of the
/// table, sized by the shorter string.
///
/// # Examples
///
/// ```
/// use mapcore::compute::levenshtein::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("", "park"), 4);
/// ```
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // Columns follow the shorter string
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut previous: Vec<usize> = (0..=short.len()).collect();
    let mut current = vec![0usize; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        current[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            current[j + 1] = if lc == sc {
                previous[j]
            } else {
                1 + previous[j].min(previous[j + 1]).min(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[short.len()]
}
