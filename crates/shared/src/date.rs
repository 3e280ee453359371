use time::{Date, OffsetDateTime, Time, format_description::BorrowedFormatItem, macros::format_description};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const HHMM_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Parses a `YYYY-MM-DD` date, rejecting anything else as a user error.
pub fn parse_date(value: &str) -> crate::Result<Date> {
    match Date::parse(value.trim(), DATE_FORMAT) {
        Ok(date) => Ok(date),
        Err(_) => crate::user!("Invalid meal_date format, expected YYYY-MM-DD"),
    }
}

pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).unwrap_or_default()
}

pub fn format_hhmm(time: Time) -> String {
    time.format(HHMM_FORMAT).unwrap_or_default()
}

/// Parses `HH:MM` or `HH:MM:SS`.
pub fn parse_hhmm(value: &str) -> Option<Time> {
    let mut parts = value.trim().split(':');
    let hour = parts.next()?.parse::<u8>().ok()?;
    let minute = parts.next()?.parse::<u8>().ok()?;
    let second = match parts.next() {
        Some(s) => s.parse::<u8>().ok()?,
        None => 0,
    };

    if parts.next().is_some() {
        return None;
    }

    Time::from_hms(hour, minute, second).ok()
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

pub fn today_string() -> String {
    format_date(today())
}

pub fn now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    #[test]
    fn dates() {
        assert_eq!(parse_date("2025-03-09").unwrap(), date!(2025 - 03 - 09));
        assert!(parse_date("2025-3-9").is_err());
        assert!(parse_date("2025-02-30").is_err());
        assert_eq!(format_date(date!(2025 - 12 - 01)), "2025-12-01");
    }

    #[test]
    fn clock_times() {
        assert_eq!(parse_hhmm("07:05"), Some(time!(07:05)));
        assert_eq!(parse_hhmm("17:30:45"), Some(time!(17:30:45)));
        assert_eq!(parse_hhmm("25:00"), None);
        assert_eq!(parse_hhmm("noon"), None);
        assert_eq!(format_hhmm(time!(08:00)), "08:00");
    }
}
