// Discretization of continuous musical features into control tokens.
//
// Feature extraction happens outside this crate; callers hand in a raw
// value (tempo in BPM, note density rate, tensile strain, ...) and get back
// the bucket token to look up in a `Vocabulary`.
//
// Each table lists bucket lower edges. A value falls in the bucket of the
// last edge that is <= the value, so values below the first edge land in
// bucket 0 and anything at or past the last edge lands in the last bucket.
// The number of edges therefore equals the number of tokens in the
// category it feeds.

use crate::category::ControlCategory;
use crate::error::{Result, VocabError};
use crate::tokens;

// Edges are written out rather than computed as `i * 0.1`, which drifts
// (3 * 0.1 == 0.30000000000000004) and would drop exact boundary values
// into the bucket below.

/// Generic 0–1 rate buckets: 0.0, 0.1, ..., 0.9.
pub static CONTROL_BINS: [f64; 10] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];

/// Tensile strain: 0.0, 0.2, ..., 2.0, then an overflow edge at 4.0.
pub static TENSILE_BINS: [f64; 12] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0, 1.2, 1.4, 1.6, 1.8, 2.0, 4.0];

/// Cloud diameter: 0.0, 0.4, ..., 4.0, then an overflow edge at 5.0.
pub static DIAMETER_BINS: [f64; 12] = [0.0, 0.4, 0.8, 1.2, 1.6, 2.0, 2.4, 2.8, 3.2, 3.6, 4.0, 5.0];

/// Tempo edges in BPM.
pub const TEMPO_BINS: [f64; 7] = [0.0, 60.0, 90.0, 120.0, 150.0, 180.0, 200.0];

/// Index of the bucket `value` falls in.
pub fn bucket(bins: &[f64], value: f64) -> Result<usize> {
    if !value.is_finite() {
        return Err(VocabError::NonFiniteValue(value));
    }
    Ok(bins
        .partition_point(|&edge| edge <= value)
        .saturating_sub(1))
}

/// Edges used to quantize a numeric control, or `None` for keys.
pub fn bins_for(control: ControlCategory) -> Option<&'static [f64]> {
    match control {
        ControlCategory::Key => None,
        ControlCategory::Density | ControlCategory::Occupation | ControlCategory::Polyphony => {
            Some(CONTROL_BINS.as_slice())
        }
        ControlCategory::Tensile => Some(TENSILE_BINS.as_slice()),
        ControlCategory::Diameter => Some(DIAMETER_BINS.as_slice()),
    }
}

/// Tempo token for a tempo in BPM.
pub fn tempo_bucket_token(bpm: f64) -> Result<&'static str> {
    tokens::tempo_token(bucket(&TEMPO_BINS, bpm)?)
}

/// Control token for a raw feature value, e.g. density 0.35 -> `d_3`.
///
/// Keys are not numeric; use `keys::key_token_for_name` instead.
pub fn control_value_token(control: ControlCategory, value: f64) -> Result<&'static str> {
    let bins = bins_for(control).ok_or(VocabError::NotNumeric(control))?;
    let index = bucket(bins, value)?;
    control
        .token(index)
        .ok_or(VocabError::ControlBucketOutOfRange(control, index))
}
