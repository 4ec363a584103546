use crate::controller::PlaybackSpeed;

/// Format a position or duration in seconds the way it is displayed next to the player:
/// `m:ss` under an hour, `h:mm:ss` above.
///
/// Fractions of seconds are truncated. Negative or non-finite values are displayed as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0. {
        seconds.trunc() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format both the current position and the duration, e.g. `1:05 / 3:30`.
pub fn format_progress(current_time: f64, duration: f64) -> String {
    format!("{} / {}", format_time(current_time), format_time(duration))
}

/// Format a playback rate, e.g. `1x`, `0.25x` or `1.5x`.
pub fn format_speed(speed: PlaybackSpeed) -> String {
    format!("{}x", speed.rate())
}

pub fn format_loop_count(loop_count: u32) -> String {
    if loop_count == 1 {
        "1 loop".to_string()
    } else {
        format!("{} loops", loop_count)
    }
}
