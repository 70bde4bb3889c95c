use std::ops::Range;

/// Evenly spaced sample points of a closed interval.
#[derive(Clone, Debug)]
pub struct Linspace {
    start: f64,
    step: f64,
    indices: Range<usize>,
}

impl Linspace {
    /// `n` points from `min` to `max`, both included when `n > 1`.
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 { (max - min) / (n - 1) as f64 } else { 0. };

        Linspace {
            start: min,
            step,
            indices: 0..n,
        }
    }

    /// Points `min, min + step, ...` that do not exceed `max`.
    ///
    /// A non-positive step or an empty interval yields `min` alone.
    pub fn with_step(min: f64, max: f64, step: f64) -> Self {
        let n = if step > 0. && max >= min {
            // Truncation, matching integer conversion of the point count
            ((max - min) / step).floor() as usize + 1
        } else {
            1
        };

        Linspace {
            start: min,
            step: if n > 1 { step } else { 0. },
            indices: 0..n,
        }
    }

    fn at(&self, i: usize) -> f64 {
        self.start + self.step * i as f64
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        let i = self.indices.next()?;

        Some(self.at(i))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl DoubleEndedIterator for Linspace {
    fn next_back(&mut self) -> Option<f64> {
        let i = self.indices.next_back()?;

        Some(self.at(i))
    }
}

impl ExactSizeIterator for Linspace {}

#[test]
fn test_linspace() {
    assert_eq!(Linspace::new(0., 20., 5).collect::<Vec<_>>(), vec![0., 5., 10., 15., 20.]);
    assert_eq!(Linspace::new(3., 3., 1).collect::<Vec<_>>(), vec![3.]);
    assert_eq!(Linspace::new(0., 1., 0).count(), 0);
}

#[test]
fn test_linspace_with_step() {
    assert_eq!(Linspace::with_step(0., 5000., 100.).len(), 51);
    assert_eq!(Linspace::with_step(0., 5000., 100.).next_back(), Some(5000.));
    assert_eq!(Linspace::with_step(0., 10., 4.).collect::<Vec<_>>(), vec![0., 4., 8.]);
    assert_eq!(Linspace::with_step(2., 1., 1.).collect::<Vec<_>>(), vec![2.]);
    assert_eq!(Linspace::with_step(0., 1., 0.).count(), 1);
}
