use time::Duration;

const MAX_LABEL_SECONDS: f64 = 1.0e12;

/// Formats a playback time as `h:m:ss` from one hour up, otherwise `m:ss`.
///
/// Hours and minutes are unpadded, fractional seconds truncate, and negative
/// input reads as zero.
pub fn format_time_label(seconds: f64) -> String {
    let span = if seconds.is_finite() && seconds > 0.0 {
        Duration::seconds_f64(seconds.min(MAX_LABEL_SECONDS))
    } else {
        Duration::ZERO
    };
    let hours = span.whole_hours();
    let minutes = span.whole_minutes() % 60;
    let secs = span.whole_seconds() % 60;
    if hours > 0 {
        format!("{}:{}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_under_an_hour() {
        assert_eq!(format_time_label(0.0), "0:00");
        assert_eq!(format_time_label(125.0), "2:05");
        assert_eq!(format_time_label(59.99), "0:59");
        assert_eq!(format_time_label(3599.0), "59:59");
    }

    #[test]
    fn labels_with_hours() {
        assert_eq!(format_time_label(3600.0), "1:0:00");
        assert_eq!(format_time_label(3725.0), "1:2:05");
        assert_eq!(format_time_label(7384.5), "2:3:04");
    }

    #[test]
    fn negative_and_nan_read_as_zero() {
        assert_eq!(format_time_label(-3.0), "0:00");
        assert_eq!(format_time_label(f64::NAN), "0:00");
    }
}
