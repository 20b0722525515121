//! Ground-truth membership bits for a query list against a word database.

use tracing::debug;

use super::levenshtein;
use crate::bits::BitVector;

/// Compute the expected answer for every query.
///
/// Bit `i` is set when some database word lies within `maxdist` edits of
/// `queries[i]`. The scan over `db` stops at the first hit, so database order
/// only affects speed. Cost is `|queries| x |db|` distance calls by design;
/// this is meant for validation samples, not production volumes.
pub fn expected_bits<Q, D>(queries: &[Q], db: &[D], maxdist: usize) -> BitVector
where
    Q: AsRef<str>,
    D: AsRef<str>,
{
    let bits: BitVector = queries
        .iter()
        .map(|q| {
            let q = q.as_ref();
            db.iter()
                .any(|w| levenshtein::within(q, w.as_ref(), maxdist))
        })
        .collect();

    debug!(
        queries = queries.len(),
        db = db.len(),
        maxdist,
        hits = bits.count_ones(),
        "computed oracle bits"
    );

    bits
}
