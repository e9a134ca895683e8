use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::errors::{Error, Result};

/// Today's date in the local timezone.
///
/// Due dates and budget periods are calendar dates owned by the user, so they
/// are evaluated against the local clock rather than UTC.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local wall-clock time, used as the default business date of a transaction.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Returns the first and last calendar day of the given month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::invalid_input(format!("Invalid month {}-{}", year, month)))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| Error::invalid_input(format!("Month out of range: {}-{}", year, month)))?;
    Ok((first, last))
}

/// Adds whole calendar months, clamping to the last day of the target month
/// (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Moves `date` to `day` within its own month, or to the month's last day
/// when the month is shorter.
pub fn on_day_or_month_end(date: NaiveDate, day: u32) -> Option<NaiveDate> {
    let (_, last) = month_bounds(date.year(), date.month()).ok()?;
    date.with_day(day.clamp(1, last.day()))
}

/// Adds whole years, mapping Feb 29 to Feb 28 in non-leap years.
pub fn add_years(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    let target_year = date.year().checked_add(i32::try_from(years).ok()?)?;
    NaiveDate::from_ymd_opt(target_year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(target_year, date.month(), 28))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(2024, 2).unwrap(),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            month_bounds(2025, 12).unwrap(),
            (date(2025, 12, 1), date(2025, 12, 31))
        );
    }

    #[test]
    fn test_month_bounds_rejects_invalid_month() {
        assert!(month_bounds(2025, 13).unwrap_err().is_validation());
        assert!(month_bounds(2025, 0).unwrap_err().is_validation());
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(date(2026, 1, 31), 1), Some(date(2026, 2, 28)));
        assert_eq!(add_months(date(2026, 1, 25), 1), Some(date(2026, 2, 25)));
    }

    #[test]
    fn test_on_day_or_month_end() {
        assert_eq!(on_day_or_month_end(date(2026, 3, 28), 31), Some(date(2026, 3, 31)));
        assert_eq!(on_day_or_month_end(date(2026, 4, 28), 31), Some(date(2026, 4, 30)));
        assert_eq!(on_day_or_month_end(date(2026, 2, 10), 30), Some(date(2026, 2, 28)));
        assert_eq!(on_day_or_month_end(date(2026, 2, 10), 5), Some(date(2026, 2, 5)));
    }

    #[test]
    fn test_add_years_handles_leap_day() {
        assert_eq!(add_years(date(2024, 2, 29), 1), Some(date(2025, 2, 28)));
        assert_eq!(add_years(date(2024, 3, 1), 1), Some(date(2025, 3, 1)));
    }
}
