use num::Float;

/// Piecewise linear interpolation like numpy.interp, for a single point.
///
/// `coords` must be sorted by x. Values left of the first coordinate take the
/// first y, values right of the last take the last y.
pub(crate) fn interp<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let (Some(&(x_first, y_first)), Some(&(x_last, y_last))) = (coords.first(), coords.last()) else {
        return F::zero();
    };

    // Base cases
    if x <= x_first {
        return y_first;
    }
    if x >= x_last {
        return y_last;
    }

    for pair in coords.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);

        if x1 <= x && x <= x2 {
            if x2 == x1 {
                return y2;
            }

            return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
        }
    }

    // Only reachable with NaN
    y_last
}

#[test]
fn test_interp() {
    let xs = [(1., 3.), (2., 2.), (3., 0.)];
    let interped: Vec<f64> = [0., 1., 1.5, 2.72, 3.24].into_iter().map(|x| interp(x, &xs)).collect();

    assert_eq!(interped, vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let xs = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];
    let interped: Vec<f64> = [2.5, -1., 7.5].into_iter().map(|x| interp(x, &xs)).collect();

    assert_eq!(interped, vec![4., 0., 2.]);
}
