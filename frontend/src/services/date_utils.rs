use chrono::NaiveDate;
use js_sys::Date;

/// Today's calendar date in UTC, the default for new expenses
pub fn get_current_date() -> NaiveDate {
    let now = Date::new_0();
    // JavaScript months are 0-indexed
    NaiveDate::from_ymd_opt(
        now.get_utc_full_year() as i32,
        now.get_utc_month() + 1,
        now.get_utc_date(),
    )
    .unwrap_or_default()
}
