//! Deterministic jitter sequences for area light sampling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A cyclic list of offsets used to jitter area light samples.
///
/// Sampling code takes the sequence as `&mut` so each render thread can
/// carry its own cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    values: Vec<f64>,
    cursor: usize,
}

impl Sequence {
    /// Cycle through `values`. An empty list behaves like `[0.5]`.
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() { vec![0.5] } else { values };
        Self { values, cursor: 0 }
    }

    /// Always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// `len` reproducible pseudo-random values in `[0, 1)`.
    pub fn random(len: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new((0..len).map(|_| rng.gen::<f64>()).collect())
    }

    /// Current value, then advance the cursor, wrapping at the end.
    pub fn next(&mut self) -> f64 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }

    /// Rewind to the first value.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to `position`, wrapping around the end.
    pub fn seek(&mut self, position: usize) {
        self.cursor = position % self.values.len();
    }

    /// Index of the value the next call to [`Sequence::next`] returns.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of distinct values before the sequence repeats.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_wraps() {
        let mut gen = Sequence::new(vec![0.1, 0.5, 1.0]);
        assert_eq!(gen.next(), 0.1);
        assert_eq!(gen.next(), 0.5);
        assert_eq!(gen.next(), 1.0);
        assert_eq!(gen.next(), 0.1);

        gen.reset();
        assert_eq!(gen.next(), 0.1);
    }

    #[test]
    fn test_seek_wraps() {
        let mut gen = Sequence::new(vec![0.1, 0.5, 1.0]);
        gen.seek(4);
        assert_eq!(gen.position(), 1);
        assert_eq!(gen.next(), 0.5);
        assert_eq!(gen.position(), 2);
        gen.seek(2);
        assert_eq!(gen.next(), 1.0);
        assert_eq!(gen.position(), 0);
    }

    #[test]
    fn test_empty_sequence_is_centered() {
        let mut gen = Sequence::new(Vec::new());
        assert_eq!(gen.len(), 1);
        assert_eq!(gen.next(), 0.5);
        assert_eq!(gen.next(), 0.5);
    }

    #[test]
    fn test_random_sequence_is_reproducible() {
        let mut a = Sequence::random(16, 7);
        let mut b = Sequence::random(16, 7);
        for _ in 0..16 {
            let v = a.next();
            assert!((0.0..1.0).contains(&v));
            assert_eq!(v, b.next());
        }
        assert_ne!(Sequence::random(16, 7), Sequence::random(16, 8));
    }
}
