use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Next business day after a session date.
///
/// Friday rolls to Monday (+3), Saturday to Monday (+2), every other day
/// to the next calendar day. Exchange holidays are not consulted.
pub fn next_business_day(session: NaiveDate) -> NaiveDate {
    let days = match session.weekday() {
        Weekday::Fri => 3,
        Weekday::Sat => 2,
        _ => 1,
    };
    session + Duration::days(days)
}
