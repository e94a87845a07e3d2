pub mod math;

use std::fmt::{self, Debug};

use num::Num;
use serde::{Deserialize, Serialize};

/// ZeroSpVec is a sparse vector that treats zero elements as implicit.
/// It holds `inds` and `vals`:
/// `inds` keeps the coordinate of each stored element,
/// `vals` keeps the element value.
///
/// Elements are guaranteed to be sorted by ascending `inds`.
/// `len` is the logical (dense) length of the vector.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroSpVec<N = f64>
where
    N: Num + Copy,
{
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new() -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len: 0,
        }
    }

    /// Zero vector of logical length `len`
    #[inline]
    pub fn zeros(len: usize) -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        ZeroSpVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            len: 0,
        }
    }

    /// Build from (index, value) pairs in any order.
    /// Zero values are dropped; indices must be unique and below `len`.
    pub fn from_pairs(len: usize, mut pairs: Vec<(u32, N)>) -> Self {
        pairs.sort_unstable_by_key(|&(idx, _)| idx);
        debug_assert!(pairs.windows(2).all(|w| w[0].0 < w[1].0), "duplicate index");
        debug_assert!(pairs.last().map_or(true, |&(idx, _)| (idx as usize) < len), "index out of range");
        let (inds, vals) = pairs.into_iter().filter(|(_, val)| !val.is_zero()).unzip();
        ZeroSpVec { inds, vals, len }
    }

    /// Append the next dense coordinate.
    /// Zero values only grow the logical length.
    #[inline]
    pub fn push(&mut self, value: N) {
        if !value.is_zero() {
            self.inds.push(self.len as u32);
            self.vals.push(value);
        }
        self.len += 1;
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// number of stored (non zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    /// Get the value at a dense coordinate.
    /// Out of range returns None, implicit zeros return `N::zero()`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate over stored elements as (index, value)
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, &N)> {
        self.inds.iter().map(|&i| i as usize).zip(self.vals.iter())
    }

    /// Expand into a dense `Vec`
    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (idx, val) in self.raw_iter() {
            dense[idx] = *val;
        }
        dense
    }
}

impl<N> Default for ZeroSpVec<N>
where
    N: Num + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> From<Vec<N>> for ZeroSpVec<N>
where
    N: Num + Copy,
{
    fn from(dense: Vec<N>) -> Self {
        let mut vec = ZeroSpVec::with_capacity(dense.len());
        for value in dense {
            vec.push(value);
        }
        vec.shrink_to_fit();
        vec
    }
}

impl<N> Debug for ZeroSpVec<N>
where
    N: Num + Copy + Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_list().entries(self.to_dense()).finish()
        } else {
            f.debug_struct("ZeroSpVec")
                .field("len", &self.len)
                .field("nnz", &self.nnz())
                .field("elements", &self.raw_iter().collect::<Vec<_>>())
                .finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_zeros_implicit() {
        let vec = ZeroSpVec::from(vec![0.0, 2.0, 0.0, 3.5]);
        assert_eq!(vec.len(), 4);
        assert_eq!(vec.nnz(), 2);
        assert_eq!(vec.get(0), Some(0.0));
        assert_eq!(vec.get(1), Some(2.0));
        assert_eq!(vec.get(3), Some(3.5));
        assert_eq!(vec.get(4), None);
        assert_eq!(vec.to_dense(), vec![0.0, 2.0, 0.0, 3.5]);
    }

    #[test]
    fn from_pairs_sorts_by_index() {
        let vec = ZeroSpVec::from_pairs(5, vec![(3, 1.5), (0, 2.0), (4, 0.0)]);
        assert_eq!(vec.nnz(), 2);
        assert_eq!(vec.to_dense(), vec![2.0, 0.0, 0.0, 1.5, 0.0]);
    }

    #[test]
    fn zeros_has_length_but_no_elements() {
        let vec: ZeroSpVec<f64> = ZeroSpVec::zeros(3);
        assert_eq!(vec.len(), 3);
        assert_eq!(vec.nnz(), 0);
        assert_eq!(vec.to_dense(), vec![0.0; 3]);
    }
}
