pub mod goal;
pub mod pomodoro;
pub mod stats;
pub mod task;
pub mod timer;

/// Format seconds as `HH:MM:SS`.
pub fn format_hms(seconds: u64) -> String {
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hrs:02}:{mins:02}:{secs:02}")
}

/// Format minutes as `2h 30m` or `45m`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_pads_fields() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(61), "00:01:01");
        assert_eq!(format_hms(3661), "01:01:01");
    }

    #[test]
    fn duration_omits_zero_hours() {
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(150), "2h 30m");
    }
}
