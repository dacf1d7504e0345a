use chrono::NaiveDate;

/// Whole calendar days from `today` until `target`.
///
/// Returns 0 when the target is today, 1 when it is the next calendar
/// day, and a negative count when it has already passed. Time-of-day
/// never enters into it. Callers resolve "today" once per evaluation
/// pass so every plan in a run is judged against the same date.
pub fn days_until(today: NaiveDate, target: NaiveDate) -> i64 {
    (target - today).num_days()
}
