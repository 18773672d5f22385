use num::Float;

/// Evenly spaced samples over `[min, max]`, both ends included.
pub struct Linspace<F> {
    start: F,
    end: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub fn new(min: F, max: F, n: usize) -> Self {
        let step = match F::from(n.saturating_sub(1)) {
            Some(num_steps) if n > 1 => (max - min) / num_steps,
            _ => F::zero(),
        };

        Linspace {
            start: min,
            end: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            return None;
        }

        let i = self.index;
        self.index += 1;

        // Pin the last sample so rounding in step * i never overshoots the bound
        if i + 1 == self.len && self.len > 1 {
            return Some(self.end);
        }

        F::from(i).map(|i| self.start + self.step * i)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

#[test]
fn test_linspace() {
    let points: Vec<f64> = Linspace::new(0., 100., 101).collect();

    assert_eq!(points.len(), 101);
    assert_eq!(points[0], 0.);
    assert_eq!(points[37], 37.);
    assert_eq!(points[100], 100.);

    let points: Vec<f64> = Linspace::new(0., 1., 3).collect();

    assert_eq!(points, vec![0., 0.5, 1.]);
    assert_eq!(Linspace::new(0f64, 1., 0).count(), 0);
}
