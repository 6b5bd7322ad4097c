// Symbolic music token vocabulary.
//
// Maps the tokens of a MIDI-like event language (bars, tracks, programs,
// tempos, pitches, step positions, note lengths) and optional control
// attributes (key, track density/occupation/polyphony, tonal tension) to
// dense integer ids for a sequence model, and classifies every id into a
// category for masking and analysis. The model itself lives elsewhere and
// only ever sees the ids.
//
// Architecture:
// - tokens.rs: Fixed base token tables and checked token constructors
// - category.rs: `Category` and the optional `ControlCategory` with its
//   fixed evaluation order
// - keys.rs: The 24 key names, key tokens, enharmonic key-name lookup
// - bins.rs: Bucket edges and quantizers from raw feature values to tokens
// - vocab.rs: `Vocabulary` construction, lookups, encode/decode, masks
// - config.rs: JSON-loadable `VocabConfig`
// - error.rs: `VocabError` and `ConfigError`
//
// Everything is deterministic: the same config always yields the same ids.

pub mod bins;
pub mod category;
pub mod config;
pub mod error;
pub mod keys;
pub mod tokens;
pub mod vocab;

pub use category::{Category, ControlCategory};
pub use config::VocabConfig;
pub use error::{ConfigError, Result, VocabError};
pub use vocab::{EOS_INDEX, PAD_INDEX, TokenEntry, TokenId, Vocabulary};
