use chrono::NaiveDate;

/// One accrual period, with the full-length period it was cut from when it is a stub.
///
/// For a regular period both pairs of dates coincide. A short stub keeps the
/// dates of the regular period it replaces in `regular_start_date` and
/// `regular_end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationPeriod {
    start_date: NaiveDate,
    end_date: NaiveDate,
    regular_start_date: NaiveDate,
    regular_end_date: NaiveDate,
}

impl CalculationPeriod {
    pub fn regular(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            regular_start_date: start_date,
            regular_end_date: end_date,
        }
    }

    pub fn stub(
        start_date: NaiveDate,
        end_date: NaiveDate,
        regular_start_date: NaiveDate,
        regular_end_date: NaiveDate,
    ) -> Self {
        Self {
            start_date,
            end_date,
            regular_start_date,
            regular_end_date,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn regular_start_date(&self) -> NaiveDate {
        self.regular_start_date
    }

    pub fn regular_end_date(&self) -> NaiveDate {
        self.regular_end_date
    }

    pub fn is_stub(&self) -> bool {
        self.start_date != self.regular_start_date || self.end_date != self.regular_end_date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePeriod {
    fixing_date: NaiveDate,
    calculation_period: CalculationPeriod,
    payment_date: NaiveDate,
}

impl SchedulePeriod {
    pub fn new(
        fixing_date: NaiveDate,
        calculation_period: CalculationPeriod,
        payment_date: NaiveDate,
    ) -> SchedulePeriod {
        SchedulePeriod {
            fixing_date,
            calculation_period,
            payment_date,
        }
    }

    pub fn fixing_date(&self) -> NaiveDate {
        self.fixing_date
    }

    pub fn calculation_period(&self) -> CalculationPeriod {
        self.calculation_period
    }

    pub fn payment_date(&self) -> NaiveDate {
        self.payment_date
    }
}
