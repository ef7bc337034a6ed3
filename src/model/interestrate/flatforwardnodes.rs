use chrono::NaiveDate;

use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{NonparametricCurve, Point2D};
use crate::math::curve::nonparametriccurve::piecewisepolynomial::PiecewisePolynomial;
use crate::model::interestrate::curveerror::CurveError;
use crate::model::interestrate::interestratecurve::DiscountCurve;
use crate::time::daycounter::daycounter::DayCounter;

/// Solved discount factors with flat-forward interpolation between them.
///
/// `ln D` is linear in curve time between nodes, so the instantaneous
/// forward rate is constant on each segment. The first node is always the
/// reference date with `D = 1`.
#[derive(Debug, Clone)]
pub struct FlatForwardNodes {
    reference_date: NaiveDate,
    day_counter: DayCounter,
    dates: Vec<NaiveDate>,
    times: Vec<f64>,
    discounts: Vec<f64>,
    log_discount: PiecewisePolynomial,
    allow_extrapolation: bool,
}

impl FlatForwardNodes {
    /// `dates` must start at the reference date, `discounts[0]` must be `1.0`,
    /// and every node must map to a later curve time than the one before.
    pub fn new(
        day_counter: DayCounter,
        dates: Vec<NaiveDate>,
        discounts: Vec<f64>,
        allow_extrapolation: bool,
    ) -> Result<FlatForwardNodes, CurveError> {
        let reference_date = *dates.first().ok_or(CurveError::NoHelpers)?;
        if dates.len() < 2 || dates.len() != discounts.len() {
            return Err(CurveError::NoHelpers);
        }
        if let Some((&date, &value)) = dates
            .iter()
            .zip(discounts.iter())
            .find(|(_, df)| !(df.is_finite() && **df > 0.0))
        {
            return Err(CurveError::InvalidDiscountFactor { date, value });
        }

        let times: Vec<f64> = dates
            .iter()
            .map(|d| day_counter.year_fraction(reference_date, *d))
            .collect();
        if let Some(i) = times.windows(2).position(|pair| pair[1] <= pair[0]) {
            let (first, second) = (dates[i], dates[i + 1]);
            return Err(if first == second {
                CurveError::DuplicateMaturity { date: second }
            } else {
                CurveError::CoincidentCurveTimes { first, second }
            });
        }

        let points = times
            .iter()
            .zip(discounts.iter())
            .map(|(t, df)| Point2D::new(*t, df.ln()))
            .collect();
        let log_discount = PiecewisePolynomial::linear(points).ok_or(CurveError::NoHelpers)?;

        Ok(FlatForwardNodes {
            reference_date,
            day_counter,
            dates,
            times,
            discounts,
            log_discount,
            allow_extrapolation,
        })
    }

    pub fn day_counter(&self) -> &DayCounter {
        &self.day_counter
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn discounts(&self) -> &[f64] {
        &self.discounts
    }

    pub fn max_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    pub fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    /// `(date, discount)` pairs, reference date first.
    pub fn nodes(&self) -> Vec<(NaiveDate, f64)> {
        self.dates
            .iter()
            .copied()
            .zip(self.log_discount.points().iter().map(|pt| pt.y().exp()))
            .collect()
    }

    /// Continuously-compounded forward rate of each segment, in node order.
    pub fn forward_rates(&self) -> Vec<f64> {
        self.times
            .windows(2)
            .map(|pair| -self.log_discount.derivative(0.5 * (pair[0] + pair[1])))
            .collect()
    }

    pub fn instantaneous_forward(&self, d: NaiveDate) -> Result<f64, CurveError> {
        let t = self.checked_time(d)?;
        Ok(-self.log_discount.derivative(t))
    }

    fn checked_time(&self, d: NaiveDate) -> Result<f64, CurveError> {
        if d < self.reference_date || (!self.allow_extrapolation && d > self.max_date()) {
            return Err(CurveError::DateOutOfRange {
                date: d,
                min: self.reference_date,
                max: if self.allow_extrapolation { NaiveDate::MAX } else { self.max_date() },
            });
        }
        Ok(self.day_counter.year_fraction(self.reference_date, d))
    }
}

impl DiscountCurve for FlatForwardNodes {
    fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    fn discount(&self, d: NaiveDate) -> Result<f64, CurveError> {
        let t = self.checked_time(d)?;
        if t <= self.log_discount.max_x() {
            Ok(self.log_discount.value(t).exp())
        } else {
            // Hold the last forward rate.
            let last_rate = -self.log_discount.derivative(self.log_discount.max_x());
            let last = self.discounts[self.discounts.len() - 1];
            Ok(last * (-last_rate * (t - self.log_discount.max_x())).exp())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::daycounter::daycounter::DayCounterConvention;
    use approx::assert_relative_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn nodes(allow_extrapolation: bool) -> FlatForwardNodes {
        let dc = DayCounter::actual_360();
        FlatForwardNodes::new(
            dc,
            vec![ymd(2002, 1, 1), ymd(2002, 7, 20), ymd(2003, 1, 6)],
            vec![1.0, (-0.04 * 200.0 / 360.0_f64).exp(), (-(0.04 * 200.0 + 0.05 * 170.0) / 360.0_f64).exp()],
            allow_extrapolation,
        )
        .unwrap()
    }

    #[test]
    fn reproduces_nodes_and_segment_forwards() {
        let curve = nodes(false);
        assert_eq!(curve.discount(ymd(2002, 1, 1)).unwrap(), 1.0);
        assert_relative_eq!(curve.discount(ymd(2002, 7, 20)).unwrap(), curve.discounts()[1], epsilon = 1e-15);
        let forwards = curve.forward_rates();
        assert_relative_eq!(forwards[0], 0.04, epsilon = 1e-12);
        assert_relative_eq!(forwards[1], 0.05, epsilon = 1e-12);
        assert_relative_eq!(curve.instantaneous_forward(ymd(2002, 3, 1)).unwrap(), 0.04, epsilon = 1e-12);
    }

    #[test]
    fn interpolates_log_linearly() {
        let curve = nodes(false);
        // 100 days in, on the first segment.
        assert_relative_eq!(
            curve.discount(ymd(2002, 4, 11)).unwrap(),
            (-0.04 * 100.0 / 360.0_f64).exp(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn range_checks() {
        let curve = nodes(false);
        assert!(matches!(
            curve.discount(ymd(2001, 12, 31)),
            Err(CurveError::DateOutOfRange { .. })
        ));
        assert!(matches!(
            curve.discount(ymd(2003, 1, 7)),
            Err(CurveError::DateOutOfRange { .. })
        ));

        let extrapolating = nodes(true);
        let last = extrapolating.discounts()[2];
        assert_relative_eq!(
            extrapolating.discount(ymd(2003, 1, 16)).unwrap(),
            last * (-0.05 * 10.0 / 360.0_f64).exp(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn rejects_bad_nodes() {
        let dc = DayCounter::actual_360();
        assert!(matches!(
            FlatForwardNodes::new(dc.clone(), vec![ymd(2002, 1, 1), ymd(2002, 2, 1)], vec![1.0, -0.5], false),
            Err(CurveError::InvalidDiscountFactor { .. })
        ));
        assert_eq!(
            FlatForwardNodes::new(dc, vec![ymd(2002, 1, 1), ymd(2002, 1, 1)], vec![1.0, 0.9], false).unwrap_err(),
            CurveError::DuplicateMaturity { date: ymd(2002, 1, 1) }
        );

        // 30E/360 maps the 30th and the 31st to the same day count.
        let european = DayCounter::new(DayCounterConvention::Thirty360European);
        assert_eq!(
            FlatForwardNodes::new(
                european,
                vec![ymd(2002, 1, 8), ymd(2002, 5, 30), ymd(2002, 5, 31)],
                vec![1.0, 0.99, 0.98],
                false
            )
            .unwrap_err(),
            CurveError::CoincidentCurveTimes {
                first: ymd(2002, 5, 30),
                second: ymd(2002, 5, 31)
            }
        );
    }
}
