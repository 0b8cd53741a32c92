//! Elapsed/total time display

/// Format seconds as `M:SS`
///
/// Minutes are not wrapped into hours, so an hour renders as `60:00`.
/// Input is expected to be finite and non-negative; anything else
/// saturates to zero rather than panicking.
pub fn format_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as u64;
    let remaining_seconds = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, remaining_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_reference_points() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(599.0), "9:59");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn truncates_fractional_seconds() {
        assert_eq!(format_time(59.999), "0:59");
        assert_eq!(format_time(61.5), "1:01");
    }
}
