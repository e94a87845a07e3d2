use std::cmp::Ordering;

use num::Num;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy + Into<f64>,
{
    /// Dot product
    ///
    /// # Arguments
    /// * `other` - the other vector
    ///
    /// # Returns
    /// * `f64` - dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = 0.0_f64;
        let mut a_it = self.raw_iter();
        let mut b_it = other.raw_iter();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    result += (*va).into() * (*vb).into();
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        result
    }

    /// Squared Euclidean norm
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.raw_iter()
            .map(|(_, val)| {
                let val: f64 = (*val).into();
                val * val
            })
            .sum()
    }

    /// Euclidean norm
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Cosine similarity
    /// cosθ = A・B / (|A||B|)
    ///
    /// Returns 0.0 when either side has zero norm (this includes length-0 vectors).
    /// The result is kept inside [0, 1] so float error cannot disturb ordering.
    #[inline]
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        let norm_sq_a = self.norm_sq();
        let norm_sq_b = other.norm_sq();
        if norm_sq_a == 0.0 || norm_sq_b == 0.0 {
            return 0.0;
        }
        // sqrt(|a|^2 |b|^2) keeps cos(A, A) exactly 1.0
        let score = self.dot(other) / (norm_sq_a * norm_sq_b).sqrt();
        if score.is_nan() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}

impl ZeroSpVec<f64> {
    /// L2 normalize in place.
    /// A vector whose norm is exactly 0 is left untouched.
    #[inline]
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm == 0.0 {
            return;
        }
        for (_, val) in self.raw_iter_mut() {
            *val /= norm;
        }
    }
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    fn raw_iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut N)> {
        self.inds.iter().map(|&i| i as usize).zip(self.vals.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn dot_skips_disjoint_coordinates() {
        let a = ZeroSpVec::from(vec![1.0, 0.0, 2.0, 0.0]);
        let b = ZeroSpVec::from(vec![0.0, 5.0, 3.0, 1.0]);
        assert!(approx(a.dot(&b), 6.0));
        assert!(approx(a.norm_sq(), 5.0));
    }

    #[test]
    fn normalize_gives_unit_norm() {
        let mut a = ZeroSpVec::from(vec![3.0, 0.0, 4.0]);
        a.l2_normalize();
        assert!(approx(a.norm(), 1.0));
        assert_eq!(a.to_dense(), vec![0.6, 0.0, 0.8]);
    }

    #[test]
    fn normalize_leaves_zero_vector_alone() {
        let mut a: ZeroSpVec<f64> = ZeroSpVec::zeros(4);
        a.l2_normalize();
        assert_eq!(a.to_dense(), vec![0.0; 4]);
        assert!(!a.norm().is_nan());
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        let zero: ZeroSpVec<f64> = ZeroSpVec::zeros(3);
        let a = ZeroSpVec::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(zero.cosine_similarity(&a), 0.0);
        assert_eq!(a.cosine_similarity(&zero), 0.0);
        assert_eq!(zero.cosine_similarity(&zero), 0.0);
    }

    #[test]
    fn cosine_of_empty_vectors_is_zero() {
        let a: ZeroSpVec<f64> = ZeroSpVec::new();
        let b: ZeroSpVec<f64> = ZeroSpVec::new();
        assert_eq!(a.cosine_similarity(&b), 0.0);
    }

    #[test]
    fn cosine_self_similarity_is_one() {
        for dense in [vec![1.0, 2.0, 3.0], vec![0.1, 0.0, 0.7, 0.3], vec![1e-3, 5e2]] {
            let a = ZeroSpVec::from(dense);
            assert_eq!(a.cosine_similarity(&a), 1.0);
        }
    }

    #[test]
    fn cosine_stays_in_unit_range() {
        let a = ZeroSpVec::from(vec![0.3, 0.3, 0.3]);
        let b = ZeroSpVec::from(vec![0.3, 0.3, 0.3000000001]);
        let score = a.cosine_similarity(&b);
        assert!(score <= 1.0 && score >= 0.0);
    }
}
