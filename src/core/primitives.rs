use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::ParseError;

/// Date layouts accepted for survey-period columns, tried in order.
pub const DEFAULT_DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];

/// Midpoint of a survey period. Odd day spans resolve to the earlier day.
#[must_use]
pub fn midpoint_date(start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let half_span = (end - start) / 2;
    start + half_span
}

#[must_use]
pub fn year_label(date: NaiveDate) -> String {
    format!("{:04}", date.year())
}

/// Parses a survey date in one of `formats`.
///
/// A trailing time part (`2004-05-09 00:00:00`) is accepted and dropped.
pub fn parse_survey_date<S: AsRef<str>>(
    field: &str,
    raw: &str,
    formats: &[S],
) -> Result<NaiveDate, ParseError> {
    let value = raw.trim();
    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(value, format.as_ref()) {
            return Ok(date);
        }
    }
    if let Ok(date_time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(date_time.date());
    }
    Err(ParseError::InvalidDate {
        field: field.to_owned(),
        value: value.to_owned(),
    })
}

pub fn decimal_to_f64(value: Decimal, raw: &str) -> Result<f64, ParseError> {
    value
        .to_f64()
        .ok_or_else(|| ParseError::InvalidPrice(raw.to_owned()))
}

/// Parses a resale price, accepting either `.` or `,` as decimal separator.
pub fn parse_price(raw: &str) -> Result<f64, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidPrice(raw.to_owned()));
    }
    let normalized = trimmed.replace(',', ".");
    let decimal =
        Decimal::from_str(&normalized).map_err(|_| ParseError::InvalidPrice(raw.to_owned()))?;
    if decimal.is_sign_negative() && !decimal.is_zero() {
        return Err(ParseError::NegativePrice(raw.to_owned()));
    }
    decimal_to_f64(decimal, raw)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    use super::{DEFAULT_DATE_FORMATS, midpoint_date, parse_price, parse_survey_date};
    use crate::error::ParseError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn midpoint_of_weekly_period_is_wednesday() {
        assert_eq!(midpoint_date(date(2004, 5, 9), date(2004, 5, 15)), date(2004, 5, 12));
    }

    #[test]
    fn midpoint_of_odd_span_keeps_earlier_day() {
        assert_eq!(midpoint_date(date(2020, 12, 30), date(2021, 1, 2)), date(2020, 12, 31));
    }

    #[test]
    fn survey_date_accepts_locale_and_iso_layouts() {
        let expected = date(2010, 3, 7);
        for raw in ["07/03/2010", "2010-03-07", " 2010-03-07 00:00:00 "] {
            let parsed = parse_survey_date("DATA INICIAL", raw, &DEFAULT_DATE_FORMATS)
                .expect("date should parse");
            assert_eq!(parsed, expected, "input {raw:?}");
        }
    }

    #[test]
    fn survey_date_reports_field_and_value() {
        let err = parse_survey_date("DATA FINAL", "31/02/2010", &DEFAULT_DATE_FORMATS)
            .expect_err("february 31st must fail");
        assert_eq!(
            err,
            ParseError::InvalidDate {
                field: "DATA FINAL".to_owned(),
                value: "31/02/2010".to_owned(),
            }
        );
    }

    #[test]
    fn price_accepts_comma_decimal_separator() {
        assert_relative_eq!(parse_price("2,459").expect("comma price"), 2.459);
        assert_relative_eq!(parse_price(" 1.999 ").expect("dot price"), 1.999);
    }

    #[test]
    fn price_rejects_negative_and_garbage() {
        assert!(matches!(parse_price("-1.2"), Err(ParseError::NegativePrice(_))));
        assert!(matches!(parse_price("n/a"), Err(ParseError::InvalidPrice(_))));
        assert!(matches!(parse_price(""), Err(ParseError::InvalidPrice(_))));
    }
}
