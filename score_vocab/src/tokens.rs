// Fixed token tables for the base vocabulary.
//
// Every token string the vocabulary can contain is defined here (control
// tokens are generated from `ControlCategory` in category.rs, key names live
// in keys.rs). Tables are built lazily on first use and never change, so
// the constructors below can hand out `&'static str`.
//
// Token spelling:
// - `<pad>`, `<eos>`: special tokens, always ids 0 and 1
// - `m_0`: mask token
// - `bar`, `track_0`..`track_2`: structure markers
// - `4/4`, `3/4`, `2/4`, `6/8`: time signatures
// - `t_0`..`t_6`: tempo buckets (see bins.rs for boundaries)
// - `i_0`..`i_127`: General MIDI programs
// - `p_21`..`p_108`: MIDI pitches of the 88 piano keys
// - `e_0`..`e_15`: step (onset position) tokens
// - `n_1`..`n_32`: note lengths in steps

use std::sync::LazyLock;

use crate::error::{Result, VocabError};

pub const PAD: &str = "<pad>";
pub const EOS: &str = "<eos>";
pub const BAR: &str = "bar";

pub static TIME_SIGNATURES: [&str; 4] = ["4/4", "3/4", "2/4", "6/8"];

pub const MASK_COUNT: u32 = 1;
pub const TRACK_COUNT: u32 = 3;
pub const TEMPO_COUNT: u32 = 7;
pub const PROGRAM_COUNT: u32 = 128;
pub const LOWEST_PITCH: u8 = 21;
pub const HIGHEST_PITCH: u8 = 108;
pub const STEP_COUNT: u32 = 16;
pub const MAX_DURATION: u32 = 32;

/// `prefix_n` for each `n` in `range`.
pub(crate) fn numbered(prefix: &str, range: impl Iterator<Item = u32>) -> Vec<String> {
    range.map(|n| format!("{prefix}{n}")).collect()
}

pub static MASK_TOKENS: LazyLock<Vec<String>> = LazyLock::new(|| numbered("m_", 0..MASK_COUNT));

/// `bar` followed by one marker per track.
pub static STRUCTURE_TOKENS: LazyLock<Vec<String>> = LazyLock::new(|| {
    let mut tokens = vec![BAR.to_string()];
    tokens.extend(numbered("track_", 0..TRACK_COUNT));
    tokens
});

pub static TEMPO_TOKENS: LazyLock<Vec<String>> = LazyLock::new(|| numbered("t_", 0..TEMPO_COUNT));

pub static PROGRAM_TOKENS: LazyLock<Vec<String>> =
    LazyLock::new(|| numbered("i_", 0..PROGRAM_COUNT));

pub static PITCH_TOKENS: LazyLock<Vec<String>> = LazyLock::new(|| {
    numbered("p_", u32::from(LOWEST_PITCH)..u32::from(HIGHEST_PITCH) + 1)
});

pub static STEP_TOKENS: LazyLock<Vec<String>> = LazyLock::new(|| numbered("e_", 0..STEP_COUNT));

pub static DURATION_LENGTH_TOKENS: LazyLock<Vec<String>> =
    LazyLock::new(|| numbered("n_", 1..MAX_DURATION + 1));

/// The `duration` category: step tokens, then length tokens.
pub static DURATION_TOKENS: LazyLock<Vec<String>> = LazyLock::new(|| {
    STEP_TOKENS
        .iter()
        .chain(DURATION_LENGTH_TOKENS.iter())
        .cloned()
        .collect()
});

/// Song-level tokens: time signatures, tempos, programs.
pub fn song_tokens() -> impl Iterator<Item = &'static str> {
    TIME_SIGNATURES
        .iter()
        .copied()
        .chain(TEMPO_TOKENS.iter().map(String::as_str))
        .chain(PROGRAM_TOKENS.iter().map(String::as_str))
}

/// Note tokens: pitches, then durations.
pub fn note_tokens() -> impl Iterator<Item = &'static str> {
    PITCH_TOKENS
        .iter()
        .chain(DURATION_TOKENS.iter())
        .map(String::as_str)
}

/// The always-present token list in id-assignment order, specials first.
pub fn base_tokens() -> impl Iterator<Item = &'static str> {
    [PAD, EOS]
        .into_iter()
        .chain(MASK_TOKENS.iter().map(String::as_str))
        .chain(STRUCTURE_TOKENS.iter().map(String::as_str))
        .chain(song_tokens())
        .chain(note_tokens())
}

pub fn pitch_token(pitch: u8) -> Result<&'static str> {
    if !(LOWEST_PITCH..=HIGHEST_PITCH).contains(&pitch) {
        return Err(VocabError::PitchOutOfRange(pitch));
    }
    Ok(PITCH_TOKENS[usize::from(pitch - LOWEST_PITCH)].as_str())
}

pub fn program_token(program: u8) -> Result<&'static str> {
    PROGRAM_TOKENS
        .get(usize::from(program))
        .map(String::as_str)
        .ok_or(VocabError::ProgramOutOfRange(program))
}

/// Onset position within a bar, in sixteenth steps.
pub fn step_token(step: u8) -> Result<&'static str> {
    STEP_TOKENS
        .get(usize::from(step))
        .map(String::as_str)
        .ok_or(VocabError::StepOutOfRange(step))
}

/// Note length in steps, 1..=32.
pub fn duration_token(steps: u8) -> Result<&'static str> {
    if steps == 0 {
        return Err(VocabError::DurationOutOfRange(steps));
    }
    DURATION_LENGTH_TOKENS
        .get(usize::from(steps - 1))
        .map(String::as_str)
        .ok_or(VocabError::DurationOutOfRange(steps))
}

pub fn track_token(track: usize) -> Result<&'static str> {
    // Index 0 is `bar`.
    if track >= TRACK_COUNT as usize {
        return Err(VocabError::TrackOutOfRange(track));
    }
    Ok(STRUCTURE_TOKENS[track + 1].as_str())
}

pub fn tempo_token(bucket: usize) -> Result<&'static str> {
    TEMPO_TOKENS
        .get(bucket)
        .map(String::as_str)
        .ok_or(VocabError::TempoBucketOutOfRange(bucket))
}

pub fn time_signature_token(numerator: u8, denominator: u8) -> Result<&'static str> {
    let wanted = format!("{numerator}/{denominator}");
    TIME_SIGNATURES
        .iter()
        .copied()
        .find(|ts| *ts == wanted)
        .ok_or(VocabError::UnsupportedTimeSignature(numerator, denominator))
}
