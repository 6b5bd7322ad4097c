// Key names and key tokens.
//
// Keys are spelled the way music21 spells them (`-` for flat), one spelling
// per key. `KEY_NAMES` fixes the `k_i` token order: majors around the circle
// of fifths (sharps then flats), then their relative minors.
//
// `MAJOR_KEY_NAMES` and `MINOR_KEY_NAMES` hold the same 24 names indexed by
// tonic pitch class (majors from C, minors from A). They are used to turn a
// tonic with any enharmonic spelling (`C#`, `Db`, `D-`) into the one name
// that has a token.

use std::sync::LazyLock;

use crate::error::{Result, VocabError};
use crate::tokens::numbered;

/// The 24 key names in `k_0`..`k_23` order.
pub const KEY_NAMES: [&str; 24] = [
    "C major", "G major", "D major", "A major", "E major", "B major", "F major", "B- major",
    "E- major", "A- major", "D- major", "G- major", "A minor", "E minor", "B minor",
    "F# minor", "C# minor", "G# minor", "D minor", "G minor", "C minor", "F minor",
    "B- minor", "E- minor",
];

/// Major key names indexed by tonic pitch class, C = 0.
pub const MAJOR_KEY_NAMES: [&str; 12] = [
    "C major", "D- major", "D major", "E- major", "E major", "F major", "G- major",
    "G major", "A- major", "A major", "B- major", "B major",
];

/// Minor key names indexed from A: entry `i` has tonic pitch class `(9 + i) % 12`.
pub const MINOR_KEY_NAMES: [&str; 12] = [
    "A minor", "B- minor", "B minor", "C minor", "C# minor", "D minor", "E- minor",
    "E minor", "F minor", "F# minor", "G minor", "G# minor",
];

pub static KEY_TOKENS: LazyLock<Vec<String>> =
    LazyLock::new(|| numbered("k_", 0..KEY_NAMES.len() as u32));

/// Major or minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyQuality {
    Major,
    Minor,
}

/// Table spelling of the key with the given tonic pitch class (0 = C).
pub fn key_name_for(tonic_pc: u8, quality: KeyQuality) -> &'static str {
    let pc = usize::from(tonic_pc % 12);
    match quality {
        KeyQuality::Major => MAJOR_KEY_NAMES[pc],
        KeyQuality::Minor => MINOR_KEY_NAMES[(pc + 3) % 12],
    }
}

/// Token for an exactly spelled key name, e.g. `"B- major"` -> `"k_7"`.
pub fn key_to_token(name: &str) -> Result<&'static str> {
    KEY_NAMES
        .iter()
        .position(|&key| key == name)
        .map(|i| KEY_TOKENS[i].as_str())
        .ok_or_else(|| VocabError::UnknownKey(name.to_string()))
}

/// Key name for a `k_i` token.
pub fn token_to_key(token: &str) -> Result<&'static str> {
    KEY_TOKENS
        .iter()
        .position(|t| t == token)
        .map(|i| KEY_NAMES[i])
        .ok_or_else(|| VocabError::UnknownToken(token.to_string()))
}

/// Resolve a key name with any tonic spelling to its table spelling.
///
/// Accepts a tonic letter (either case) followed by any run of `#`, `-` or
/// `b`, a space, and `major` or `minor`: `"C# major"` gives `"D- major"`,
/// `"Bb minor"` gives `"B- minor"`.
pub fn parse_key_name(name: &str) -> Result<&'static str> {
    let unknown = || VocabError::UnknownKey(name.to_string());
    let (tonic, quality) = name.trim().split_once(' ').ok_or_else(unknown)?;
    let quality = match quality.trim() {
        "major" => KeyQuality::Major,
        "minor" => KeyQuality::Minor,
        _ => return Err(unknown()),
    };

    let mut chars = tonic.chars();
    let letter_pc: i32 = match chars.next().map(|c| c.to_ascii_uppercase()) {
        Some('C') => 0,
        Some('D') => 2,
        Some('E') => 4,
        Some('F') => 5,
        Some('G') => 7,
        Some('A') => 9,
        Some('B') => 11,
        _ => return Err(unknown()),
    };
    let mut offset = 0i32;
    for accidental in chars {
        match accidental {
            '#' => offset += 1,
            '-' | 'b' => offset -= 1,
            _ => return Err(unknown()),
        }
    }

    let pc = (letter_pc + offset).rem_euclid(12) as u8;
    Ok(key_name_for(pc, quality))
}

/// Token for a key name with any tonic spelling.
pub fn key_token_for_name(name: &str) -> Result<&'static str> {
    key_to_token(parse_key_name(name)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_tokens_are_bijective() {
        assert_eq!(KEY_TOKENS.len(), 24);
        for (i, name) in KEY_NAMES.iter().enumerate() {
            let token = key_to_token(name).unwrap();
            assert_eq!(token, format!("k_{i}"));
            assert_eq!(token_to_key(token).unwrap(), *name);
        }
    }

    #[test]
    fn first_key_is_c_major() {
        assert_eq!(token_to_key("k_0").unwrap(), "C major");
        assert_eq!(token_to_key("k_12").unwrap(), "A minor");
        assert!(token_to_key("k_24").is_err());
    }

    #[test]
    fn pitch_class_tables_cover_every_key() {
        let mut names: Vec<&str> = MAJOR_KEY_NAMES
            .iter()
            .chain(MINOR_KEY_NAMES.iter())
            .copied()
            .collect();
        names.sort_unstable();
        let mut expected = KEY_NAMES.to_vec();
        expected.sort_unstable();
        assert_eq!(names, expected);
    }

    #[test]
    fn key_name_for_pitch_class() {
        assert_eq!(key_name_for(0, KeyQuality::Major), "C major");
        assert_eq!(key_name_for(6, KeyQuality::Major), "G- major");
        assert_eq!(key_name_for(9, KeyQuality::Minor), "A minor");
        assert_eq!(key_name_for(0, KeyQuality::Minor), "C minor");
        assert_eq!(key_name_for(8, KeyQuality::Minor), "G# minor");
        assert_eq!(key_name_for(14, KeyQuality::Major), "D major");
    }

    #[test]
    fn enharmonic_spellings() {
        assert_eq!(parse_key_name("C# major").unwrap(), "D- major");
        assert_eq!(parse_key_name("Db major").unwrap(), "D- major");
        assert_eq!(parse_key_name("Bb minor").unwrap(), "B- minor");
        assert_eq!(parse_key_name("A# minor").unwrap(), "B- minor");
        assert_eq!(parse_key_name("f# minor").unwrap(), "F# minor");
        assert_eq!(parse_key_name("Cb major").unwrap(), "B major");
        assert_eq!(key_token_for_name("C# major").unwrap(), "k_10");
    }

    #[test]
    fn rejects_malformed_key_names() {
        for bad in ["H major", "C dorian", "C", "C#x major", ""] {
            assert_eq!(
                parse_key_name(bad),
                Err(VocabError::UnknownKey(bad.to_string()))
            );
        }
        assert!(key_to_token("C# major").is_err());
    }
}
