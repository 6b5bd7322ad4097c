// Error types for vocabulary construction and lookup.
//
// Every lookup in this crate is a pure function over immutable tables, so a
// failure always means the caller passed something the vocabulary does not
// contain. Each case gets its own variant carrying the offending value so
// misuse surfaces at the call site instead of as a silently missing id.
//
// `ConfigError` covers the one place the crate touches the filesystem
// (`VocabConfig::load`) and is kept separate so `VocabError` stays `Clone`.

use crate::category::ControlCategory;
use crate::vocab::TokenId;

/// Result type alias using [`VocabError`].
pub type Result<T> = std::result::Result<T, VocabError>;

/// Lookup and token-construction failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VocabError {
    /// Token string is not in this vocabulary.
    #[error("unknown token {0:?}")]
    UnknownToken(String),

    /// Id is outside the assigned range.
    #[error("unknown token id {0}")]
    UnknownId(TokenId),

    /// Id exists but belongs to no category. Only `<pad>` is ever
    /// uncategorized.
    #[error("token id {0} has no category")]
    Uncategorized(TokenId),

    /// Control category name not recognized.
    #[error("unknown control category {0:?}")]
    UnknownControl(String),

    /// Key name could not be resolved to one of the 24 keys.
    #[error("unknown key {0:?}")]
    UnknownKey(String),

    /// The control category is not quantized from a number (keys).
    #[error("control category {0} does not take a numeric value")]
    NotNumeric(ControlCategory),

    /// NaN or infinite input to a quantizer.
    #[error("cannot quantize non-finite value {0}")]
    NonFiniteValue(f64),

    #[error("MIDI pitch {0} outside the piano range 21..=108")]
    PitchOutOfRange(u8),

    #[error("program {0} outside 0..=127")]
    ProgramOutOfRange(u8),

    #[error("step {0} outside 0..=15")]
    StepOutOfRange(u8),

    #[error("duration of {0} steps outside 1..=32")]
    DurationOutOfRange(u8),

    #[error("track {0} outside 0..=2")]
    TrackOutOfRange(usize),

    #[error("no {0} token for bucket {1}")]
    ControlBucketOutOfRange(ControlCategory, usize),

    #[error("tempo bucket {0} outside 0..=6")]
    TempoBucketOutOfRange(usize),

    #[error("unsupported time signature {0}/{1}")]
    UnsupportedTimeSignature(u8, u8),
}

/// Failures loading a [`VocabConfig`](crate::config::VocabConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
