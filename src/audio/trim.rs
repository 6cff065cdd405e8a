use super::segment::AudioSegment;

/// Scan a segment for silent runs.
///
/// The segment is walked in fixed windows of `chunk_ms`; a window counts as
/// silent when its loudness falls below `threshold_dbfs`. Adjacent silent
/// windows coalesce into `(start_ms, end_ms)` runs. The final window may be
/// shorter than `chunk_ms` and is still evaluated.
pub fn detect_silence(
    segment: &AudioSegment,
    threshold_dbfs: f64,
    chunk_ms: u64,
) -> Vec<(u64, u64)> {
    let mut ranges = Vec::new();

    if segment.is_empty() || chunk_ms == 0 {
        return ranges;
    }

    let total_ms = segment.duration_ms();
    let mut run_start: Option<u64> = None;
    let mut start_ms = 0u64;

    while start_ms < total_ms {
        let end_ms = (start_ms + chunk_ms).min(total_ms);
        let window = segment.slice_ms(start_ms, end_ms);
        let silent = window.dbfs() < threshold_dbfs;

        match (silent, run_start) {
            (true, None) => run_start = Some(start_ms),
            (false, Some(run)) => {
                ranges.push((run, start_ms));
                run_start = None;
            }
            _ => {}
        }

        start_ms = end_ms;
    }

    if let Some(run) = run_start {
        ranges.push((run, total_ms));
    }

    ranges
}

/// Strip the leading silent prefix from a finished recording.
///
/// Only the first silent run is removed: the returned segment begins at that
/// run's end. A segment with no silent run comes back unchanged, and an
/// all-silent segment comes back empty. Never fails.
pub fn trim_leading_silence(
    segment: AudioSegment,
    threshold_dbfs: f64,
    chunk_ms: u64,
) -> AudioSegment {
    let ranges = detect_silence(&segment, threshold_dbfs, chunk_ms);
    match ranges.first() {
        Some(&(_, end_ms)) => segment.slice_from_ms(end_ms),
        None => segment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = -40.0;

    // 1 kHz mono, one sample per ms, makes window math exact
    fn segment_of(parts: &[(u64, i16)]) -> AudioSegment {
        let mut samples = Vec::new();
        for &(ms, amplitude) in parts {
            samples.extend(std::iter::repeat(amplitude).take(ms as usize));
        }
        AudioSegment::new(samples, 1000, 1)
    }

    #[test]
    fn no_silence_returns_nothing() {
        let segment = segment_of(&[(100, 8000)]);
        assert!(detect_silence(&segment, THRESHOLD, 10).is_empty());
    }

    #[test]
    fn all_silent_is_one_run() {
        let segment = segment_of(&[(100, 0)]);
        assert_eq!(detect_silence(&segment, THRESHOLD, 10), vec![(0, 100)]);
    }

    #[test]
    fn adjacent_silent_windows_coalesce() {
        let segment = segment_of(&[(30, 0), (40, 8000), (30, 0)]);
        assert_eq!(
            detect_silence(&segment, THRESHOLD, 10),
            vec![(0, 30), (70, 100)]
        );
    }

    #[test]
    fn trim_removes_exactly_the_leading_run() {
        let segment = segment_of(&[(30, 0), (70, 8000)]);
        let trimmed = trim_leading_silence(segment.clone(), THRESHOLD, 10);

        assert_eq!(trimmed.samples().len(), 70);
        // Byte-for-byte the tail of the original
        assert_eq!(trimmed.samples(), &segment.samples()[30..]);
    }

    #[test]
    fn trim_without_leading_silence_is_identity() {
        let segment = segment_of(&[(100, 8000)]);
        let trimmed = trim_leading_silence(segment.clone(), THRESHOLD, 10);
        assert_eq!(trimmed, segment);
    }

    #[test]
    fn trim_is_idempotent_after_first_pass() {
        let segment = segment_of(&[(30, 0), (70, 8000)]);
        let once = trim_leading_silence(segment, THRESHOLD, 10);
        let twice = trim_leading_silence(once.clone(), THRESHOLD, 10);
        assert_eq!(once, twice);
    }

    #[test]
    fn trim_only_removes_the_first_run() {
        // A second silent run in the middle stays put
        let segment = segment_of(&[(20, 0), (30, 8000), (20, 0), (30, 8000)]);
        let trimmed = trim_leading_silence(segment, THRESHOLD, 10);

        assert_eq!(trimmed.samples().len(), 80);
        assert_eq!(trimmed.samples()[0], 8000);
        // The interior silence survives
        assert!(trimmed.samples()[30..50].iter().all(|&s| s == 0));
    }

    #[test]
    fn trim_all_silent_yields_empty() {
        let segment = segment_of(&[(100, 0)]);
        let trimmed = trim_leading_silence(segment, THRESHOLD, 10);
        assert!(trimmed.is_empty());
    }
}
