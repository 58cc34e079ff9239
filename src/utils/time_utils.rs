use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_5_MIN: i64 = Self::MS_IN_S * 60 * 5;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_S * 60 * 15;
    pub const MS_IN_30_MIN: i64 = Self::MS_IN_S * 60 * 30;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    pub const INTRADAY_TIME_FORMAT: &str = "%m-%d %H:%M";
}

/// Formats a bar timestamp for axis labels. Intraday bars get the time of day too.
pub fn format_bar_time(timestamp: &DateTime<Utc>, interval_ms: i64) -> String {
    let local = timestamp.with_timezone(&Local);
    if interval_ms < TimeUtils::MS_IN_D {
        local.format(TimeUtils::INTRADAY_TIME_FORMAT).to_string()
    } else {
        local.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
    }
}

pub fn epoch_sec_to_utc(epoch_sec: i64) -> Option<DateTime<Utc>> {
    // Utc.timestamp_opt() safely handles the conversion.
    match Utc.timestamp_opt(epoch_sec, 0) {
        chrono::LocalResult::Single(datetime) => Some(datetime),
        _ => None,
    }
}

/// Start of `date` in UTC, as used for date-range requests.
pub fn date_to_epoch_sec(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

pub fn utc_now_as_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn how_many_seconds_ago(past_timestamp_ms: i64) -> i64 {
    (utc_now_as_timestamp_ms() - past_timestamp_ms) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_round_trips_through_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let secs = date_to_epoch_sec(date);
        let dt = epoch_sec_to_utc(secs).unwrap();
        assert_eq!(dt.date_naive(), date);
    }

    #[test]
    fn out_of_range_epoch_is_none() {
        assert!(epoch_sec_to_utc(i64::MAX).is_none());
    }
}
