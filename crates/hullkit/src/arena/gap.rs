//! Linear-time maximum gap (bucket method), no sorting.
//!
//! With `n` values spanning `[lo, hi]`, the largest gap between neighbours in
//! sorted order is at least `(hi - lo) / (n - 1)`. Splitting the span into
//! `n - 1` buckets of that width means no gap inside a bucket can be the unique
//! maximum, so only bucket boundaries need inspecting: per bucket we keep the
//! local min/max and compare each populated bucket's min with the previous
//! populated bucket's max.

use bytemuck::Pod;

use super::region::Arena;
use super::sequence::Sequence;
use crate::error::SequenceError;

impl<T> Sequence<'_, T>
where
    T: Pod + PartialOrd + Into<f64>,
{
    /// Maximum gap with bucket arrays in a private scratch arena.
    ///
    /// Returns 0 for a single element; `SequenceError::Empty` for none.
    pub fn max_gap(&self) -> Result<f64, SequenceError> {
        let buckets = self.len().saturating_sub(1);
        let scratch = Arena::new(2 * buckets * std::mem::size_of::<f64>());
        self.max_gap_in(&scratch)
    }

    /// Maximum gap with the two bucket arrays allocated from `scratch`.
    ///
    /// `scratch` may be the sequence's own arena; needs `2 * (len - 1)` f64 slots.
    pub fn max_gap_in(&self, scratch: &Arena) -> Result<f64, SequenceError> {
        let n = self.len();
        let lo: f64 = self.min()?.into();
        let hi: f64 = self.max()?.into();
        if n < 2 || hi == lo {
            return Ok(0.0);
        }
        let buckets = n - 1;
        let width = (hi - lo) / buckets as f64;
        let mut bucket_min = Sequence::filled(buckets, f64::INFINITY, scratch)?;
        let mut bucket_max = Sequence::filled(buckets, f64::NEG_INFINITY, scratch)?;

        for i in 0..n {
            let v: f64 = self.get(i)?.into();
            if v == lo || v == hi {
                continue;
            }
            let k = (((v - lo) / width) as usize).min(buckets - 1);
            if v < bucket_min.get(k)? {
                bucket_min.set(k, v)?;
            }
            if v > bucket_max.get(k)? {
                bucket_max.set(k, v)?;
            }
        }

        let mut gap = 0.0f64;
        let mut prev_max = lo;
        for k in 0..buckets {
            let (bmin, bmax) = (bucket_min.get(k)?, bucket_max.get(k)?);
            if bmin == f64::INFINITY {
                continue;
            }
            gap = gap.max(bmin - prev_max);
            prev_max = bmax;
        }
        Ok(gap.max(hi - prev_max))
    }
}
