use num::Float;

use crate::math::interp;
#[cfg(test)]
use approx::assert_abs_diff_eq;

/// And operator (t-norm) for combining propositions in a rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator (t-conorm) for combining propositions in a rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }
}

/// Method for aggregating the implied sets of every rule into one output set.
/// Each variant is commutative and associative with zero as identity, so
/// neither rule order nor skipping rules that did not fire changes the result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AggregationOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
}

impl AggregationOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => OrOp::Max.apply(u, v),
            Self::ProbOr => OrOp::ProbOr.apply(u, v),
            Self::BoundedSum => OrOp::BoundedSum.apply(u, v),
        }
    }
}

/// How a rule's firing strength shapes its consequent term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImplicationOp {
    /// Mamdani: clip the term at the firing strength
    #[default]
    Min,
    /// Larsen: scale the term by the firing strength
    Prod,
}

impl ImplicationOp {
    pub fn apply<F: Float>(self, strength: F, degree: F) -> F {
        match self {
            Self::Min => F::min(strength, degree),
            Self::Prod => strength * degree,
        }
    }
}

/// Method for defuzzificating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefuzzificationOp {
    /// Membership-weighted mean of the universe samples
    #[default]
    Centroid,
    /// Center of gravity of the piecewise linear area under the set
    AreaCentroid,
    /// Bisector of area
    Bisector,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Smallest value for which the membership function is maximum
    Som,
    /// Largest value for which the membership function is maximum
    Lom,
}

impl DefuzzificationOp {
    /// Returns `None` when the set is zero everywhere.
    ///
    /// `universe` and `membership` must be the same length, with at least two samples.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Option<F> {
        debug_assert_eq!(universe.len(), membership.len());

        if membership.iter().all(|m| *m == F::zero()) {
            return None;
        }

        let two = F::one() + F::one();
        let three = two + F::one();
        let points = universe.iter().copied().zip(membership.iter().copied());

        match self {
            Self::Centroid => {
                let (num, den) = points.fold((F::zero(), F::zero()), |(num, den), (u, m)| (num + u * m, den + m));

                if den == F::zero() {
                    None
                } else {
                    Some(num / den)
                }
            },
            Self::AreaCentroid => {
                let mut num = F::zero();
                let mut den = F::zero();

                for (u, m) in universe.windows(2).zip(membership.windows(2)) {
                    let base = u[1] - u[0];
                    let area_rect = F::min(m[0], m[1]) * base;
                    let center_rect = u[0] + base / two;
                    let area_tri = base * F::abs(m[1] - m[0]) / two;
                    let center_tri = if m[1] > m[0] {
                        u[0] + two / three * base
                    } else {
                        u[0] + base / three
                    };

                    num = num + area_rect * center_rect + area_tri * center_tri;
                    den = den + area_rect + area_tri;
                }

                if den == F::zero() {
                    // Only a single nonzero sample at an edge of the universe
                    Self::Centroid.call(universe, membership)
                } else {
                    Some(num / den)
                }
            },
            Self::Bisector => {
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two)
                    .collect();
                let total_area = areas.iter().fold(F::zero(), |acc, a| acc + *a);

                if total_area == F::zero() {
                    return Self::Centroid.call(universe, membership);
                }

                let target = total_area / two;
                let mut cum_area = F::zero();

                for (i, area) in areas.iter().copied().enumerate() {
                    let prev = cum_area;
                    cum_area = cum_area + area;

                    if cum_area >= target {
                        return Some(interp(target, &[(prev, universe[i]), (cum_area, universe[i + 1])]));
                    }
                }

                universe.last().copied()
            },
            Self::Mom => {
                let maximum = membership.iter().copied().fold(F::zero(), F::max);
                let (len, sum) = points
                    .filter(|(_, m)| *m == maximum)
                    .fold((F::zero(), F::zero()), |(len, sum), (u, _)| (len + F::one(), sum + u));

                Some(sum / len)
            },
            Self::Som => {
                let maximum = membership.iter().copied().fold(F::zero(), F::max);

                points.filter(|(_, m)| *m == maximum).map(|(u, _)| u).reduce(F::min)
            },
            Self::Lom => {
                let maximum = membership.iter().copied().fold(F::zero(), F::max);

                points.filter(|(_, m)| *m == maximum).map(|(u, _)| u).reduce(F::max)
            },
        }
    }
}

#[cfg(test)]
const UNIVERSE: [f64; 11] = [0., 1., 2., 3., 4., 5., 6., 7., 8., 9., 10.];

#[test]
fn test_and_or_bounds() {
    let samples = [0., 0.1, 0.25, 0.5, 0.8, 1.];

    for &u in &samples {
        for &v in &samples {
            assert!(AndOp::Min.apply(u, v) <= u && AndOp::Min.apply(u, v) <= v);
            assert!(OrOp::Max.apply(u, v) >= u && OrOp::Max.apply(u, v) >= v);
            assert!(AndOp::Prod.apply(u, v) <= AndOp::Min.apply(u, v));
            assert!(OrOp::ProbOr.apply(u, v) >= OrOp::Max.apply(u, v) - 1e-12);
            assert_eq!(OrOp::ProbOr.apply(u, v), OrOp::ProbOr.apply(v, u));
        }
    }

    assert_eq!(AndOp::Prod.apply(0.5, 0.5), 0.25);
    assert_eq!(OrOp::ProbOr.apply(0.5, 0.5), 0.75);
    assert_eq!(AndOp::BoundedProd.apply(0.25, 0.5), 0.);
    assert_eq!(OrOp::BoundedSum.apply(0.75, 0.5), 1.);
    assert_eq!(AndOp::DrasticProd.apply(1., 0.3), 0.3);
    assert_eq!(AndOp::DrasticProd.apply(0.9, 0.3), 0.);
    assert_eq!(OrOp::DrasticSum.apply(0., 0.3), 0.3);
    assert_eq!(OrOp::DrasticSum.apply(0.1, 0.3), 1.);
}

#[test]
fn test_aggregation() {
    for (u, v) in [(0., 0.4), (0.3, 0.), (0.5, 0.5), (0.9, 0.7)] {
        for op in [AggregationOp::Max, AggregationOp::ProbOr, AggregationOp::BoundedSum] {
            assert_eq!(op.apply(u, v), op.apply(v, u));
            assert_eq!(op.apply(u, 0.), u);
        }
    }

    assert_eq!(AggregationOp::Max.apply(0.5, 0.25), 0.5);
    assert_eq!(AggregationOp::ProbOr.apply(0.5, 0.5), 0.75);
    assert_eq!(AggregationOp::BoundedSum.apply(0.75, 0.5), 1.);
    assert_eq!(AggregationOp::default(), AggregationOp::Max);
}

#[test]
fn test_implication() {
    assert_eq!(ImplicationOp::Min.apply(0.3, 0.8), 0.3);
    assert_eq!(ImplicationOp::Min.apply(0.3, 0.1), 0.1);
    assert_eq!(ImplicationOp::Prod.apply(0.5, 0.8), 0.4);
}

#[test]
fn test_spike() {
    let mut spike = [0.; 11];
    spike[7] = 1.;

    for op in [
        DefuzzificationOp::Centroid,
        DefuzzificationOp::AreaCentroid,
        DefuzzificationOp::Bisector,
        DefuzzificationOp::Mom,
        DefuzzificationOp::Som,
        DefuzzificationOp::Lom,
    ] {
        let crisp = op.call(&UNIVERSE, &spike).unwrap();

        assert_abs_diff_eq!(crisp, 7., epsilon = 1e-9);
    }
}

#[test]
fn test_empty_set() {
    let zeros = [0.; 11];

    assert_eq!(DefuzzificationOp::Centroid.call(&UNIVERSE, &zeros), None);
    assert_eq!(DefuzzificationOp::Lom.call(&UNIVERSE, &zeros), None);
}

#[test]
fn test_plateau() {
    // Plateau of 1 over [2, 4], ramps to zero at 0 and 8
    let set = [0., 0.5, 1., 1., 1., 0.75, 0.5, 0.25, 0., 0., 0.];

    assert_eq!(DefuzzificationOp::Som.call(&UNIVERSE, &set), Some(2.));
    assert_eq!(DefuzzificationOp::Lom.call(&UNIVERSE, &set), Some(4.));
    assert_eq!(DefuzzificationOp::Mom.call(&UNIVERSE, &set), Some(3.));
    assert_abs_diff_eq!(
        DefuzzificationOp::Centroid.call(&UNIVERSE, &set).unwrap(),
        18. / 5.,
        epsilon = 1e-12
    );

    // Total area 5.0, half of it is reached half way through [3, 4]
    assert_abs_diff_eq!(
        DefuzzificationOp::Bisector.call(&UNIVERSE, &set).unwrap(),
        3.5,
        epsilon = 1e-12
    );
}

#[test]
fn test_area_centroid_symmetric() {
    let set = [0., 0., 0.5, 1., 1., 1., 1., 1., 0.5, 0., 0.];

    assert_abs_diff_eq!(
        DefuzzificationOp::AreaCentroid.call(&UNIVERSE, &set).unwrap(),
        5.,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(
        DefuzzificationOp::Centroid.call(&UNIVERSE, &set).unwrap(),
        5.,
        epsilon = 1e-12
    );
}
