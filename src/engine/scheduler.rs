/// Convert a wall-clock timestamp into an audio-clock time.
///
/// * `audio_now` - graph time in seconds
/// * `wall_now_ms` - caller clock in milliseconds
/// * `at_ms` - requested time on the caller clock, `None` for immediately
///
/// Timestamps in the past resolve to `audio_now`, so nothing is ever
/// scheduled behind the audio clock.
pub fn resolve_time(audio_now: f64, wall_now_ms: f64, at_ms: Option<f64>) -> f64 {
    match at_ms {
        Some(at) => audio_now + (at - wall_now_ms).max(0.0) / 1000.0,
        None => audio_now,
    }
}
