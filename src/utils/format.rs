//! Time and ordinal formatting shared by the display and the export

/// Format seconds as `MM:SS.mmm`. Minutes are not wrapped at 60.
pub fn format_time(seconds: f64) -> String {
    let total_millis = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };
    let minutes = total_millis / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;
    format!("{:02}:{:02}.{:03}", minutes, secs, millis)
}

/// Format an optional personal best, with a placeholder when unset
pub fn format_best(best: Option<f64>) -> String {
    match best {
        Some(seconds) => format_time(seconds),
        None => "--:--.---".to_string(),
    }
}

/// English ordinal suffix for a positive index
fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Index with its ordinal suffix, e.g. `22nd`
pub fn ordinal(n: u32) -> String {
    format!("{}{}", n, ordinal_suffix(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_seconds_millis() {
        assert_eq!(format_time(0.0), "00:00.000");
        assert_eq!(format_time(125.4), "02:05.400");
        assert_eq!(format_time(3600.0), "60:00.000");
        assert_eq!(format_time(59.9996), "01:00.000");
        assert_eq!(format_time(6000.25), "100:00.250");
    }

    #[test]
    fn negative_and_nan_clamp_to_zero() {
        assert_eq!(format_time(-3.0), "00:00.000");
        assert_eq!(format_time(f64::NAN), "00:00.000");
    }

    #[test]
    fn best_placeholder() {
        assert_eq!(format_best(None), "--:--.---");
        assert_eq!(format_best(Some(65.0)), "01:05.000");
    }

    #[test]
    fn ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (101, "st"),
            (111, "th"),
            (112, "th"),
        ];
        for (n, suffix) in cases {
            assert_eq!(ordinal_suffix(n), suffix, "suffix for {}", n);
        }
        assert_eq!(ordinal(23), "23rd");
    }
}
