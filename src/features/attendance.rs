/// Highest attendance bucket.
pub const MAX_POINTS: u8 = 5;

/// Lower bounds (inclusive) of buckets 1 through 5.
const THRESHOLDS: [f64; MAX_POINTS as usize] = [75., 80., 85., 90., 95.];

/// Maps an attendance percentage to its point bucket in `0..=5`.
///
/// The same mapping is used at training and prediction time. Values outside `[0, 100]` are not
/// validated here, anything below 75 lands in bucket 0 and anything from 95 up in bucket 5.
pub fn points(percent: f64) -> u8 {
    THRESHOLDS
        .iter()
        .position(|&threshold| percent < threshold)
        .unwrap_or(THRESHOLDS.len()) as u8
}
