use std::sync::Arc;

use crate::error::{FuzzyError, Result};
use crate::math::interp;
use crate::universe::Universe;
#[cfg(test)]
use approx::assert_abs_diff_eq;

/// Shape of a linguistic term. Build through the checked constructors so the
/// parameter ordering invariants hold.
#[derive(Clone, Debug, PartialEq)]
pub enum MembershipFunction {
    /// Feet at `a` and `c`, peak at `b`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Feet at `a` and `d`, plateau over `[b, c]`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    Gaussian { mean: f64, sigma: f64 },
    /// Linear interpolation between `(x, degree)` points, flat beyond the ends.
    Piecewise(Arc<[(f64, f64)]>),
}

fn check_finite(params: &[f64]) -> Result<()> {
    match params.iter().find(|p| !p.is_finite()) {
        Some(p) => Err(FuzzyError::shape(format!("parameter {p} is not finite"))),
        None => Ok(()),
    }
}

impl MembershipFunction {
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        check_finite(&[a, b, c])?;

        if !(a <= b && b <= c) {
            return Err(FuzzyError::shape(format!("triangle requires a <= b <= c, got ({a}, {b}, {c})")));
        }

        Ok(Self::Triangular { a, b, c })
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        check_finite(&[a, b, c, d])?;

        if !(a <= b && b <= c && c <= d) {
            return Err(FuzzyError::shape(format!(
                "trapezoid requires a <= b <= c <= d, got ({a}, {b}, {c}, {d})"
            )));
        }

        Ok(Self::Trapezoidal { a, b, c, d })
    }

    pub fn gaussian(mean: f64, sigma: f64) -> Result<Self> {
        check_finite(&[mean, sigma])?;

        if sigma <= 0. {
            return Err(FuzzyError::shape(format!("gaussian sigma must be positive, got {sigma}")));
        }

        Ok(Self::Gaussian { mean, sigma })
    }

    pub fn piecewise(points: impl IntoIterator<Item = (f64, f64)>) -> Result<Self> {
        let points: Arc<[(f64, f64)]> = points.into_iter().collect();

        if points.is_empty() {
            return Err(FuzzyError::shape("piecewise shape needs at least one point"));
        }
        for &(x, y) in points.iter() {
            check_finite(&[x, y])?;

            if !(0. ..=1.).contains(&y) {
                return Err(FuzzyError::shape(format!("degree {y} at {x} is outside [0, 1]")));
            }
        }
        if let Some(w) = points.windows(2).find(|w| w[0].0 >= w[1].0) {
            return Err(FuzzyError::shape(format!(
                "piecewise x values must be strictly increasing, found {} then {}",
                w[0].0, w[1].0
            )));
        }

        Ok(Self::Piecewise(points))
    }

    /// Degree of membership of `x`, always within `[0, 1]`.
    pub fn degree(&self, x: f64) -> f64 {
        let degree = match *self {
            Self::Triangular { a, b, c } => {
                if x == b {
                    1.
                } else if x <= a || x >= c {
                    0.
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (c - x) / (c - b)
                }
            },
            Self::Trapezoidal { a, b, c, d } => {
                if b <= x && x <= c {
                    1.
                } else if x <= a || x >= d {
                    0.
                } else if x < b {
                    (x - a) / (b - a)
                } else {
                    (d - x) / (d - c)
                }
            },
            Self::Gaussian { mean, sigma } => (-(x - mean).powi(2) / (2. * sigma * sigma)).exp(),
            Self::Piecewise(ref points) => interp(x, points),
        };

        // NaN inputs fall through every comparison above
        if degree.is_nan() {
            0.
        } else {
            degree.clamp(0., 1.)
        }
    }

    /// Degrees at every sample of `universe`, in order.
    pub fn sample(&self, universe: &Universe) -> Vec<f64> {
        universe.points().iter().map(|&x| self.degree(x)).collect()
    }
}

#[test]
fn test_triangle() {
    let tri = MembershipFunction::triangular(30., 50., 70.).unwrap();

    assert_eq!(tri.degree(30.), 0.);
    assert_eq!(tri.degree(50.), 1.);
    assert_eq!(tri.degree(70.), 0.);
    assert_eq!(tri.degree(40.), 0.5);
    assert_eq!(tri.degree(65.), 0.25);
    assert_eq!(tri.degree(-10.), 0.);
    assert_eq!(tri.degree(f64::NAN), 0.);

    let samples: Vec<f64> = (0..=400).map(|i| 30. + i as f64 * 0.1).collect();

    for pair in samples.windows(2) {
        let (lo, hi) = (tri.degree(pair[0]), tri.degree(pair[1]));

        if pair[1] <= 50. {
            assert!(lo <= hi, "rising edge decreased between {} and {}", pair[0], pair[1]);
        } else if pair[0] >= 50. {
            assert!(lo >= hi, "falling edge increased between {} and {}", pair[0], pair[1]);
        }
        assert!(
            (lo - hi).abs() <= 0.1 / 20. + 1e-12,
            "jump between {} and {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_degenerate_triangle() {
    let right = MembershipFunction::triangular(0., 0., 10.).unwrap();

    assert_eq!(right.degree(0.), 1.);
    assert_eq!(right.degree(5.), 0.5);
    assert_eq!(right.degree(-0.1), 0.);

    let left = MembershipFunction::triangular(0., 10., 10.).unwrap();

    assert_eq!(left.degree(10.), 1.);
    assert_eq!(left.degree(10.1), 0.);
    assert_eq!(left.degree(5.), 0.5);

    let spike = MembershipFunction::triangular(4., 4., 4.).unwrap();

    assert_eq!(spike.degree(4.), 1.);
    assert_eq!(spike.degree(4.5), 0.);
}

#[test]
fn test_trapezoid() {
    let trap = MembershipFunction::trapezoidal(48., 70., 100., 100.).unwrap();

    for x in 70..=100 {
        assert_eq!(trap.degree(x as f64), 1.);
    }
    assert_eq!(trap.degree(48.), 0.);
    assert_abs_diff_eq!(trap.degree(50.), 2. / 22., epsilon = 1e-12);
    assert_eq!(trap.degree(40.), 0.);

    let shoulder = MembershipFunction::trapezoidal(0., 0., 20., 40.).unwrap();

    assert_eq!(shoulder.degree(0.), 1.);
    assert_eq!(shoulder.degree(30.), 0.5);
    assert_eq!(shoulder.degree(40.), 0.);
}

#[test]
fn test_invalid_shapes() {
    assert!(matches!(
        MembershipFunction::triangular(5., 1., 10.),
        Err(FuzzyError::InvalidShape { .. })
    ));
    assert!(matches!(
        MembershipFunction::trapezoidal(0., 20., 10., 30.),
        Err(FuzzyError::InvalidShape { .. })
    ));
    assert!(matches!(
        MembershipFunction::triangular(0., f64::NAN, 1.),
        Err(FuzzyError::InvalidShape { .. })
    ));
    assert!(matches!(
        MembershipFunction::gaussian(0., 0.),
        Err(FuzzyError::InvalidShape { .. })
    ));
    assert!(matches!(
        MembershipFunction::piecewise([(0., 0.), (0., 1.)]),
        Err(FuzzyError::InvalidShape { .. })
    ));
    assert!(matches!(
        MembershipFunction::piecewise([(0., 1.5)]),
        Err(FuzzyError::InvalidShape { .. })
    ));
}

#[test]
fn test_gaussian_and_piecewise() {
    let gauss = MembershipFunction::gaussian(5., 2.).unwrap();

    assert_eq!(gauss.degree(5.), 1.);
    assert_abs_diff_eq!(gauss.degree(7.), (-0.5f64).exp(), epsilon = 1e-12);
    assert_abs_diff_eq!(gauss.degree(3.), gauss.degree(7.), epsilon = 1e-12);

    let low = MembershipFunction::piecewise([(155., 1.), (160., 0.8), (165., 0.5), (170., 0.2), (175., 0.)])
        .unwrap();

    assert_eq!(low.degree(150.), 1.);
    assert_abs_diff_eq!(low.degree(162.5), 0.65, epsilon = 1e-12);
    assert_eq!(low.degree(180.), 0.);
}

#[test]
fn test_sample() {
    let universe = Universe::new(0., 4., 5).unwrap();
    let tri = MembershipFunction::triangular(0., 2., 4.).unwrap();

    assert_eq!(tri.sample(&universe), vec![0., 0.5, 1., 0.5, 0.]);
}
