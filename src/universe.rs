use std::sync::Arc;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;

/// A sampled real interval that membership functions are evaluated over and
/// that defuzzification integrates across.
///
/// Cloning is cheap: all clones share the same sample grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe(Arc<[f64]>);

impl Universe {
    /// `n` evenly spaced samples over `[min, max]`, both ends included.
    pub fn new(min: f64, max: f64, n: usize) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(FuzzyError::universe(format!("bounds [{min}, {max}] must be finite")));
        }
        if min >= max {
            return Err(FuzzyError::universe(format!("min {min} must be below max {max}")));
        }
        if n < 2 {
            return Err(FuzzyError::universe(format!("need at least 2 samples, got {n}")));
        }

        // Too many samples over a narrow interval round onto each other
        Self::from_points(Linspace::new(min, max, n))
    }

    /// An arbitrarily sampled universe. Points must be finite and strictly increasing.
    pub fn from_points(points: impl IntoIterator<Item = f64>) -> Result<Self> {
        let points: Arc<[f64]> = points.into_iter().collect();

        if points.len() < 2 {
            return Err(FuzzyError::universe(format!(
                "need at least 2 samples, got {}",
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(FuzzyError::universe(format!("sample {bad} is not finite")));
        }
        if let Some(w) = points.windows(2).find(|w| w[0] >= w[1]) {
            return Err(FuzzyError::universe(format!(
                "samples must be strictly increasing, found {} then {}",
                w[0], w[1]
            )));
        }

        Ok(Universe(points))
    }

    pub fn points(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    // A universe always holds at least two samples
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn max(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// Whether `x` lies within the covered interval. NaN never does.
    pub fn contains(&self, x: f64) -> bool {
        self.min() <= x && x <= self.max()
    }

    /// Whether both handles share one sample grid.
    pub fn ptr_eq(&self, other: &Universe) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[test]
fn test_even_universe() {
    let u = Universe::new(0., 100., 101).unwrap();

    assert_eq!(u.len(), 101);
    assert_eq!(u.min(), 0.);
    assert_eq!(u.max(), 100.);
    assert!(u.contains(0.));
    assert!(u.contains(100.));
    assert!(!u.contains(100.5));
    assert!(!u.contains(f64::NAN));
    assert!(u.ptr_eq(&u.clone()));
}

#[test]
fn test_invalid_universe() {
    assert!(matches!(Universe::new(0., 1., 1), Err(FuzzyError::InvalidUniverse { .. })));
    assert!(matches!(Universe::new(5., 1., 10), Err(FuzzyError::InvalidUniverse { .. })));
    assert!(matches!(
        Universe::new(0., f64::INFINITY, 10),
        Err(FuzzyError::InvalidUniverse { .. })
    ));
    assert!(matches!(
        Universe::from_points([0., 2., 2., 3.]),
        Err(FuzzyError::InvalidUniverse { .. })
    ));
    assert!(matches!(Universe::from_points([1.]), Err(FuzzyError::InvalidUniverse { .. })));
}

#[test]
fn test_too_fine_universe() {
    assert!(matches!(
        Universe::new(1., 1. + 1e-13, 1000),
        Err(FuzzyError::InvalidUniverse { .. })
    ));
    assert_eq!(Universe::new(1., 1. + 1e-13, 2).unwrap().len(), 2);
}

#[test]
fn test_arbitrary_universe() {
    let u = Universe::from_points([0., 0.5, 3., 10.]).unwrap();

    assert_eq!(u.points(), &[0., 0.5, 3., 10.]);
    assert_eq!(u.max(), 10.);
}
