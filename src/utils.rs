use chrono::{Duration, NaiveDate};

/// Shared utility functions for the prize draw service
///
/// Convert a spreadsheet day-serial into a calendar date
///
/// Serial 0 is the spreadsheet epoch (1899-12-30, which absorbs the
/// 1900 leap-year bug) and each serial unit is one day. Any time-of-day
/// fraction is floored away, so `45000.75` and `45000.0` land on the same date.
///
/// Returns `None` for NaN, infinities, or serials outside chrono's date range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use prize_draw_service::utils::serial_to_calendar_date;
///
/// assert_eq!(serial_to_calendar_date(0.0), NaiveDate::from_ymd_opt(1899, 12, 30));
/// assert_eq!(serial_to_calendar_date(1.0), NaiveDate::from_ymd_opt(1899, 12, 31));
/// assert_eq!(serial_to_calendar_date(45000.0), NaiveDate::from_ymd_opt(2023, 3, 15));
/// assert_eq!(serial_to_calendar_date(f64::NAN), None);
/// ```
pub fn serial_to_calendar_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }

    let days = serial.floor();
    // NaiveDate only spans roughly +/- 262,000 years
    if days.abs() > f64::from(i32::MAX) {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::try_days(days as i64)?)
}

/// Normalize -0.0 to 0.0 for cleaner API responses
pub fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0 // Converts both 0.0 and -0.0 to 0.0
    } else {
        value
    }
}
