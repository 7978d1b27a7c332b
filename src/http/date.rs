use std::time::{SystemTime, UNIX_EPOCH};

const WEEKDAYS: [&str; 7] = ["Thu", "Fri", "Sat", "Sun", "Mon", "Tue", "Wed"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Create [httpdate][rfc] for current time.
///
/// [rfc]: <https://www.rfc-editor.org/rfc/rfc2616#section-3.3.1>
#[inline]
pub fn httpdate_now() -> String {
    httpdate(SystemTime::now())
}

/// Create [httpdate][rfc] with given time, e.g: `Sun, 06 Nov 1994 08:49:37 GMT`.
///
/// Time before unix epoch is formatted as the epoch.
///
/// [rfc]: <https://www.rfc-editor.org/rfc/rfc2616#section-3.3.1>
pub fn httpdate(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|e| e.as_secs())
        .unwrap_or_default();

    let days = secs / 86400;
    let secs_of_day = secs % 86400;
    let (year, month, day) = civil_from_days(days);

    format!(
        "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
        WEEKDAYS[(days % 7) as usize],
        day,
        MONTHS[(month - 1) as usize],
        year,
        secs_of_day / 3600,
        secs_of_day % 3600 / 60,
        secs_of_day % 60,
    )
}

/// Convert days since unix epoch into `(year, month, day)` of the proleptic gregorian calendar.
///
/// Counted in 400 years eras starting at march 1st, so the leap day is the last day of a year.
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    // 1970-01-01 is 719468 days after 0000-03-01
    let z = days + 719_468;
    let era = z / 146_097;
    let day_of_era = z - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let mp = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = year_of_era + era * 400 + u64::from(month <= 2);
    (year, month, day)
}
