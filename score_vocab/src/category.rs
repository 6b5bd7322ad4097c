// Token categories.
//
// Every token except `<pad>` belongs to exactly one `Category`. The base
// categories are always present; the six `ControlCategory` values are opt-in
// per vocabulary and describe discretized track/song attributes used to
// condition generation.
//
// `ControlCategory::ALL` is the order controls are appended to a vocabulary.
// That order is part of the id layout: two vocabularies built from the same
// set of controls get identical ids no matter how the caller listed them.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::VocabError;
use crate::keys::KEY_TOKENS;
use crate::tokens::{self, numbered};

/// A named partition of the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Eos,
    Mask,
    /// `bar` and the per-track markers.
    Structure,
    TimeSignature,
    Tempo,
    /// General MIDI instrument.
    Program,
    Pitch,
    /// Step tokens and note-length tokens.
    Duration,
    Key,
    Density,
    Occupation,
    Polyphony,
    Tensile,
    Diameter,
}

impl Category {
    /// Categories present in every vocabulary, in the order they are recorded.
    pub const BASE: [Category; 8] = [
        Category::Program,
        Category::Tempo,
        Category::TimeSignature,
        Category::Structure,
        Category::Pitch,
        Category::Duration,
        Category::Eos,
        Category::Mask,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Eos => "eos",
            Category::Mask => "mask",
            Category::Structure => "structure",
            Category::TimeSignature => "time_signature",
            Category::Tempo => "tempo",
            Category::Program => "program",
            Category::Pitch => "pitch",
            Category::Duration => "duration",
            Category::Key => "key",
            Category::Density => "density",
            Category::Occupation => "occupation",
            Category::Polyphony => "polyphony",
            Category::Tensile => "tensile",
            Category::Diameter => "diameter",
        }
    }

    /// Member token strings, in vocabulary order.
    pub fn tokens(self) -> Vec<&'static str> {
        let table: &'static [String] = match self {
            Category::Eos => return vec![tokens::EOS],
            Category::TimeSignature => return tokens::TIME_SIGNATURES.to_vec(),
            Category::Mask => tokens::MASK_TOKENS.as_slice(),
            Category::Structure => tokens::STRUCTURE_TOKENS.as_slice(),
            Category::Tempo => tokens::TEMPO_TOKENS.as_slice(),
            Category::Program => tokens::PROGRAM_TOKENS.as_slice(),
            Category::Pitch => tokens::PITCH_TOKENS.as_slice(),
            Category::Duration => tokens::DURATION_TOKENS.as_slice(),
            Category::Key => ControlCategory::Key.tokens(),
            Category::Density => ControlCategory::Density.tokens(),
            Category::Occupation => ControlCategory::Occupation.tokens(),
            Category::Polyphony => ControlCategory::Polyphony.tokens(),
            Category::Tensile => ControlCategory::Tensile.tokens(),
            Category::Diameter => ControlCategory::Diameter.tokens(),
        };
        table.iter().map(String::as_str).collect()
    }

    /// The control this category comes from, if it is optional.
    pub fn control(self) -> Option<ControlCategory> {
        ControlCategory::ALL
            .into_iter()
            .find(|control| control.category() == self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An optional category of control tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlCategory {
    /// One of 24 major/minor keys.
    Key,
    /// Track note density bucket.
    Density,
    /// Track occupation rate bucket (fraction of time with a sounding note).
    Occupation,
    /// Track polyphony rate bucket.
    Polyphony,
    /// Tonal tension "tensile strain" bucket.
    Tensile,
    /// Tonal tension "cloud diameter" bucket.
    Diameter,
}

static DENSITY_TOKENS: LazyLock<Vec<String>> = LazyLock::new(|| numbered("d_", 0..10));
static OCCUPATION_TOKENS: LazyLock<Vec<String>> = LazyLock::new(|| numbered("o_", 0..10));
static POLYPHONY_TOKENS: LazyLock<Vec<String>> = LazyLock::new(|| numbered("y_", 0..10));
static TENSILE_TOKENS: LazyLock<Vec<String>> = LazyLock::new(|| numbered("s_", 0..12));
static DIAMETER_TOKENS: LazyLock<Vec<String>> = LazyLock::new(|| numbered("a_", 0..12));

impl ControlCategory {
    /// Fixed evaluation order used when appending controls to a vocabulary.
    pub const ALL: [ControlCategory; 6] = [
        ControlCategory::Key,
        ControlCategory::Density,
        ControlCategory::Occupation,
        ControlCategory::Polyphony,
        ControlCategory::Tensile,
        ControlCategory::Diameter,
    ];

    pub fn category(self) -> Category {
        match self {
            ControlCategory::Key => Category::Key,
            ControlCategory::Density => Category::Density,
            ControlCategory::Occupation => Category::Occupation,
            ControlCategory::Polyphony => Category::Polyphony,
            ControlCategory::Tensile => Category::Tensile,
            ControlCategory::Diameter => Category::Diameter,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.category().as_str()
    }

    /// Token spelling prefix, e.g. `d_` for `d_0`..`d_9`.
    pub fn prefix(self) -> &'static str {
        match self {
            ControlCategory::Key => "k_",
            ControlCategory::Density => "d_",
            ControlCategory::Occupation => "o_",
            ControlCategory::Polyphony => "y_",
            ControlCategory::Tensile => "s_",
            ControlCategory::Diameter => "a_",
        }
    }

    pub fn tokens(self) -> &'static [String] {
        match self {
            ControlCategory::Key => KEY_TOKENS.as_slice(),
            ControlCategory::Density => DENSITY_TOKENS.as_slice(),
            ControlCategory::Occupation => OCCUPATION_TOKENS.as_slice(),
            ControlCategory::Polyphony => POLYPHONY_TOKENS.as_slice(),
            ControlCategory::Tensile => TENSILE_TOKENS.as_slice(),
            ControlCategory::Diameter => DIAMETER_TOKENS.as_slice(),
        }
    }

    pub fn token_count(self) -> usize {
        self.tokens().len()
    }

    /// Token for bucket `index`, if in range.
    pub fn token(self, index: usize) -> Option<&'static str> {
        self.tokens().get(index).map(String::as_str)
    }
}

impl fmt::Display for ControlCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlCategory {
    type Err = VocabError;

    /// Exact, case-sensitive match on the lowercase name. Misspellings are
    /// rejected rather than guessed at.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ControlCategory::ALL
            .into_iter()
            .find(|control| control.as_str() == s)
            .ok_or_else(|| VocabError::UnknownControl(s.to_string()))
    }
}
