use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{midpoint_date, year_label};
use crate::error::ParseError;

/// One normalized survey observation: a state's average resale price over a
/// survey period.
///
/// Records are immutable once built. `date` and `year` are derived from the
/// period and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    index: usize,
    period_start: NaiveDate,
    period_end: NaiveDate,
    date: NaiveDate,
    year: String,
    region: String,
    state: String,
    resale_price: f64,
}

impl PriceRecord {
    /// Builds a record, deriving its representative date and year.
    ///
    /// Fails when the period is inverted, a category is blank, or the price is
    /// negative or not finite.
    pub fn new(
        period_start: NaiveDate,
        period_end: NaiveDate,
        region: impl Into<String>,
        state: impl Into<String>,
        resale_price: f64,
    ) -> Result<Self, ParseError> {
        if period_end < period_start {
            return Err(ParseError::InvertedPeriod {
                start: period_start.to_string(),
                end: period_end.to_string(),
            });
        }
        if !resale_price.is_finite() {
            return Err(ParseError::InvalidPrice(resale_price.to_string()));
        }
        if resale_price < 0.0 {
            return Err(ParseError::NegativePrice(resale_price.to_string()));
        }

        let region = region.into().trim().to_owned();
        if region.is_empty() {
            return Err(ParseError::EmptyCategory("region".to_owned()));
        }
        let state = state.into().trim().to_owned();
        if state.is_empty() {
            return Err(ParseError::EmptyCategory("state".to_owned()));
        }

        let date = midpoint_date(period_start, period_end);
        Ok(Self {
            index: 0,
            period_start,
            period_end,
            date,
            year: year_label(date),
            region,
            state,
            resale_price,
        })
    }

    pub(crate) fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Sequential position in the date-sorted dataset.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn period_start(&self) -> NaiveDate {
        self.period_start
    }

    #[must_use]
    pub fn period_end(&self) -> NaiveDate {
        self.period_end
    }

    /// Representative date (midpoint of the survey period).
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Four-digit year of [`Self::date`].
    #[must_use]
    pub fn year(&self) -> &str {
        &self.year
    }

    #[must_use]
    pub fn year_number(&self) -> i32 {
        self.date.year()
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    #[must_use]
    pub fn resale_price(&self) -> f64 {
        self.resale_price
    }
}

/// Inclusive year window used by the range slider and playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    #[must_use]
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn is_inverted(self) -> bool {
        self.min > self.max
    }

    /// Returns the range with its bounds ordered.
    #[must_use]
    pub fn ordered(self) -> Self {
        if self.is_inverted() {
            Self {
                min: self.max,
                max: self.min,
            }
        } else {
            self
        }
    }

    #[must_use]
    pub fn contains(self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }

    /// Converts the year window to the date window it covers.
    #[must_use]
    pub fn to_date_range(self) -> Option<DateRange> {
        let start = NaiveDate::from_ymd_opt(self.min, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(self.max, 12, 31)?;
        Some(DateRange::new(start, end))
    }
}

/// Inclusive calendar-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a window; swapped bounds are reordered.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// One `(date, price)` sample of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}
