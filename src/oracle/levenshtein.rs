//! Levenshtein edit distance, bounded and unbounded.
//!
//! [`bounded_distance`] is the oracle used for membership checks: it only
//! fills the diagonal band of the DP table that can still hold a value within
//! the cutoff, and gives up as soon as a whole row is over it.
//! [`distance`] is the plain two-row computation, kept as the reference the
//! bounded version is checked against.

/// Compute the exact Levenshtein edit distance between two strings.
///
/// Returns the minimum number of single-character edits (insertions,
/// deletions, substitutions) required to transform `a` into `b`.
pub fn distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Use two rows instead of full matrix for O(min(m,n)) space.
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Edit distance between `a` and `b`, capped at `maxd + 1`.
///
/// Returns the exact distance when it is `<= maxd`, otherwise the sentinel
/// `maxd + 1`; the exact value past the cutoff is never computed.
///
/// Row `i` only visits columns `max(1, i - maxd) ..= min(|b|, i + maxd)`.
/// Cells left outside the band keep values from earlier rows; those are
/// always upper bounds of the true cell value that already exceed `maxd`, so
/// they can never pull an in-band cell below its true value. When the
/// minimum of a row exceeds `maxd` the computation stops.
///
/// Each call owns its row buffer, so the function is safe to call from
/// several threads at once.
pub fn bounded_distance(a: &str, b: &str, maxd: usize) -> usize {
    let cutoff = maxd.saturating_add(1);

    if maxd == 0 {
        return usize::from(a != b);
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    // Length difference is a lower bound on the distance.
    if m.abs_diff(n) > maxd {
        return cutoff;
    }

    let mut row: Vec<usize> = (0..=n).collect();

    for i in 1..=m {
        // `diag` holds row[i-1][j-1] while row[j] is overwritten in place.
        let j_start = i.saturating_sub(maxd).max(1);
        let j_end = i.saturating_add(maxd).min(n);
        let mut diag = row[j_start - 1];
        let mut row_min = usize::MAX;
        if j_start == 1 {
            row[0] = i;
            row_min = i;
        }

        for j in j_start..=j_end {
            let above = row[j];
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            let value = (above + 1).min(row[j - 1] + 1).min(diag + cost);
            row[j] = value;
            diag = above;
            row_min = row_min.min(value);
        }

        if row_min > maxd {
            return cutoff;
        }
    }

    row[n].min(cutoff)
}

/// Whether `a` and `b` are within edit distance `maxd` of each other.
pub fn within(a: &str, b: &str, maxd: usize) -> bool {
    bounded_distance(a, b, maxd) <= maxd
}
