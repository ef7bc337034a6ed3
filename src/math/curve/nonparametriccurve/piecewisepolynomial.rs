use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{NonparametricCurve, Point2D};

#[derive(Debug, Clone)]
struct Subpolynomial {
    coefs: Vec<f64>,
    deriv_coefs: Vec<f64>,
    lhs_x: f64,
}

impl Subpolynomial {
    fn new(coefs: Vec<f64>, lhs_x: f64) -> Subpolynomial {
        let deriv_coefs = Self::compute_deriv_coefs(&coefs);
        Subpolynomial {
            coefs,
            deriv_coefs,
            lhs_x,
        }
    }

    fn compute_deriv_coefs(coefs: &[f64]) -> Vec<f64> {
        let order = coefs.len() - 1;
        if order == 0 {
            vec![0.0]
        } else {
            (0..order).map(|i| (order - i) as f64 * coefs[i]).collect()
        }
    }

    fn value(&self, x: f64) -> f64 {
        self.evaluate(&self.coefs, x)
    }

    fn derivative(&self, x: f64) -> f64 {
        self.evaluate(&self.deriv_coefs, x)
    }

    /// Horner scheme in `x - lhs_x`, highest order first.
    fn evaluate(&self, coefs: &[f64], x: f64) -> f64 {
        let x_diff = x - self.lhs_x;
        coefs[1..]
            .iter()
            .fold(coefs[0], |result, &beta| f64::mul_add(result, x_diff, beta))
    }
}

fn generate_linear_coef_list(points: &[Point2D]) -> Vec<Vec<f64>> {
    points
        .windows(2)
        .map(|pair| vec![Point2D::slope(&pair[0], &pair[1]), pair[0].y()])
        .collect()
}

/// Piecewise polynomial through a set of knots with strictly increasing `x`.
///
/// Outside `[min_x, max_x]` the first and last pieces are extended, so a
/// linear interpolant extrapolates with its end slopes.
#[derive(Debug, Clone)]
pub struct PiecewisePolynomial {
    max_x: f64,
    max_y: f64,
    subpolynomial_list: Vec<Subpolynomial>,
}

impl PiecewisePolynomial {
    /// Linear interpolant of `points`. `None` with fewer than two knots or
    /// when `x` is not strictly increasing.
    pub fn linear(points: Vec<Point2D>) -> Option<PiecewisePolynomial> {
        if points.len() < 2 || points.windows(2).any(|pair| pair[1].x() <= pair[0].x()) {
            return None;
        }

        let subpolynomial_list = generate_linear_coef_list(&points)
            .into_iter()
            .zip(points.iter())
            .map(|(coefs, pt)| Subpolynomial::new(coefs, pt.x()))
            .collect();

        let last = points.last()?;
        Some(PiecewisePolynomial {
            max_x: last.x(),
            max_y: last.y(),
            subpolynomial_list,
        })
    }

    fn find_segment(&self, x: f64) -> usize {
        // Last piece whose left knot is at or before `x`; the first piece below `min_x`.
        self.subpolynomial_list
            .partition_point(|s| s.lhs_x <= x)
            .saturating_sub(1)
    }
}

impl NonparametricCurve for PiecewisePolynomial {
    fn points(&self) -> Vec<Point2D> {
        let mut pts: Vec<Point2D> = self
            .subpolynomial_list
            .iter()
            .map(|s| Point2D::new(s.lhs_x, s.value(s.lhs_x)))
            .collect();
        pts.push(Point2D::new(self.max_x, self.max_y));
        pts
    }

    fn min_x(&self) -> f64 {
        self.subpolynomial_list[0].lhs_x
    }

    fn max_x(&self) -> f64 {
        self.max_x
    }
}

impl Curve for PiecewisePolynomial {
    fn value(&self, x: f64) -> f64 {
        if x == self.max_x {
            return self.max_y;
        }
        let i = self.find_segment(x);
        self.subpolynomial_list[i].value(x)
    }

    fn derivative(&self, x: f64) -> f64 {
        let i = self.find_segment(x);
        self.subpolynomial_list[i].derivative(x)
    }
}
