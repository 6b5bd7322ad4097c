// The token vocabulary: token <-> id mapping plus category indices.
//
// A `Vocabulary` is built once from a mode string and a set of control
// categories and is immutable afterwards. Construction:
//
// 1. Intern the base tokens (`tokens::base_tokens`) in order. `<pad>` and
//    `<eos>` come first, so they always get ids 0 and 1. Every other token
//    takes the next id the first time it is seen; repeats keep their first
//    id.
// 2. Record the category of every base token (`Category::BASE`).
// 3. Walk `ControlCategory::ALL` in its fixed order and, for each control
//    the caller asked for, intern its tokens, record their category, and
//    append them to the control token sequence. The caller's list is only
//    used for membership, so its order and any repeats have no effect.
//
// `<pad>` is deliberately left without a category. `token_class` reports it
// as `VocabError::Uncategorized`, distinct from `UnknownId`.
//
// Lookups never mutate, so a built vocabulary can be shared across threads
// behind a plain reference or `Arc`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::{Category, ControlCategory};
use crate::config::VocabConfig;
use crate::error::{Result, VocabError};
use crate::tokens;

/// Integer id of a token within one vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u32);

impl TokenId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

pub const PAD_INDEX: TokenId = TokenId(0);
pub const EOS_INDEX: TokenId = TokenId(1);

/// One row of the id table, for inspection and JSON dumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub id: TokenId,
    pub token: String,
    /// `None` only for `<pad>`.
    pub category: Option<Category>,
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    mode: String,
    /// Id -> token. Ids are dense, so the id is the index.
    tokens: Vec<String>,
    ids: BTreeMap<String, TokenId>,
    /// Id -> category, parallel to `tokens`.
    classes: Vec<Option<Category>>,
    /// Category -> member ids in id order.
    members: BTreeMap<Category, Vec<TokenId>>,
    /// Enabled controls, in `ControlCategory::ALL` order.
    controls: Vec<ControlCategory>,
    control_tokens: Vec<TokenId>,
}

impl Vocabulary {
    /// Build a vocabulary with the given controls enabled.
    ///
    /// `mode` is carried along for callers that key behavior on it; it does
    /// not change the token set.
    pub fn new(mode: impl Into<String>, control_list: &[ControlCategory]) -> Self {
        let mut vocab = Vocabulary {
            mode: mode.into(),
            tokens: Vec::new(),
            ids: BTreeMap::new(),
            classes: Vec::new(),
            members: BTreeMap::new(),
            controls: Vec::new(),
            control_tokens: Vec::new(),
        };

        for token in tokens::base_tokens() {
            vocab.intern(token);
        }
        debug_assert_eq!(vocab.ids.get(tokens::PAD), Some(&PAD_INDEX));
        debug_assert_eq!(vocab.ids.get(tokens::EOS), Some(&EOS_INDEX));

        for category in Category::BASE {
            for token in category.tokens() {
                let id = vocab.ids[token];
                vocab.classify(id, category);
            }
        }

        for control in ControlCategory::ALL {
            if !control_list.contains(&control) {
                continue;
            }
            vocab.controls.push(control);
            for token in control.tokens() {
                let id = vocab.intern(token);
                vocab.classify(id, control.category());
                vocab.control_tokens.push(id);
            }
        }

        tracing::debug!(
            mode = %vocab.mode,
            vocab_size = vocab.vocab_size(),
            controls = ?vocab.controls,
            "built vocabulary"
        );
        vocab
    }

    pub fn from_config(config: &VocabConfig) -> Self {
        Vocabulary::new(config.mode.clone(), &config.control_list)
    }

    /// Build from control names as strings. Fails on the first name that is
    /// not one of the six control categories.
    pub fn with_control_names<S: AsRef<str>>(mode: impl Into<String>, names: &[S]) -> Result<Self> {
        let controls = names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<ControlCategory>>>()?;
        Ok(Vocabulary::new(mode, &controls))
    }

    /// Assign the next id to `token` unless it already has one.
    fn intern(&mut self, token: &str) -> TokenId {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }
        let id = TokenId(self.tokens.len() as u32);
        self.tokens.push(token.to_string());
        self.ids.insert(token.to_string(), id);
        self.classes.push(None);
        id
    }

    /// Record `id` as a member of `category`. The first category recorded
    /// for an id wins.
    fn classify(&mut self, id: TokenId, category: Category) {
        let slot = &mut self.classes[id.index()];
        if slot.is_some() {
            return;
        }
        *slot = Some(category);
        self.members.entry(category).or_default().push(id);
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Enabled control categories, in the fixed evaluation order.
    pub fn controls(&self) -> &[ControlCategory] {
        &self.controls
    }

    pub fn pad_index(&self) -> TokenId {
        PAD_INDEX
    }

    pub fn eos_index(&self) -> TokenId {
        EOS_INDEX
    }

    /// Number of distinct ids.
    pub fn vocab_size(&self) -> usize {
        self.tokens.len()
    }

    /// Id of `token`.
    pub fn char_to_index(&self, token: &str) -> Result<TokenId> {
        self.ids
            .get(token)
            .copied()
            .ok_or_else(|| VocabError::UnknownToken(token.to_string()))
    }

    /// Token string of `id`.
    pub fn index_to_char(&self, id: TokenId) -> Result<&str> {
        self.tokens
            .get(id.index())
            .map(String::as_str)
            .ok_or(VocabError::UnknownId(id))
    }

    /// Category of `id`. `<pad>` yields `Uncategorized`.
    pub fn token_class(&self, id: TokenId) -> Result<Category> {
        match self.classes.get(id.index()) {
            Some(Some(category)) => Ok(*category),
            Some(None) => Err(VocabError::Uncategorized(id)),
            None => Err(VocabError::UnknownId(id)),
        }
    }

    /// Category of a token string.
    pub fn class_of(&self, token: &str) -> Result<Category> {
        self.token_class(self.char_to_index(token)?)
    }

    /// Categories present in this vocabulary.
    pub fn class_names(&self) -> BTreeSet<Category> {
        self.members.keys().copied().collect()
    }

    /// Member ids of `category`, in id order. Empty if the category is not
    /// present.
    pub fn indices_of(&self, category: Category) -> &[TokenId] {
        self.members
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Member token strings of `category`, in id order.
    pub fn tokens_of(&self, category: Category) -> Vec<&str> {
        self.indices_of(category)
            .iter()
            .map(|id| self.tokens[id.index()].as_str())
            .collect()
    }

    /// Ids of one control category, or `None` if it was not enabled.
    pub fn control_indices(&self, control: ControlCategory) -> Option<&[TokenId]> {
        if !self.controls.contains(&control) {
            return None;
        }
        Some(self.indices_of(control.category()))
    }

    /// All control token strings, grouped by category in evaluation order.
    pub fn control_tokens(&self) -> Vec<&str> {
        self.control_tokens
            .iter()
            .map(|id| self.tokens[id.index()].as_str())
            .collect()
    }

    pub fn mask_indices(&self) -> &[TokenId] {
        self.indices_of(Category::Mask)
    }

    /// The step (onset position) part of the duration category.
    pub fn step_indices(&self) -> Vec<TokenId> {
        self.ids_for(&tokens::STEP_TOKENS)
    }

    /// The note-length part of the duration category.
    pub fn duration_length_indices(&self) -> Vec<TokenId> {
        self.ids_for(&tokens::DURATION_LENGTH_TOKENS)
    }

    /// Ids of tokens that are all known to be interned.
    fn ids_for(&self, table: &[String]) -> Vec<TokenId> {
        table
            .iter()
            .filter_map(|token| self.ids.get(token).copied())
            .collect()
    }

    /// Map a token sequence to ids, failing on the first unknown token.
    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<TokenId>> {
        tokens
            .iter()
            .map(|token| self.char_to_index(token.as_ref()))
            .collect()
    }

    /// Map an id sequence back to tokens, failing on the first unknown id.
    pub fn decode(&self, ids: &[TokenId]) -> Result<Vec<&str>> {
        ids.iter().map(|&id| self.index_to_char(id)).collect()
    }

    /// One flag per id, set for ids in any of `categories`. Suitable for
    /// building logit or attention masks outside this crate.
    pub fn category_mask(&self, categories: &[Category]) -> Vec<bool> {
        self.classes
            .iter()
            .map(|class| class.is_some_and(|c| categories.contains(&c)))
            .collect()
    }

    /// Every id with its token and category, in id order.
    pub fn entries(&self) -> Vec<TokenEntry> {
        self.tokens
            .iter()
            .zip(&self.classes)
            .enumerate()
            .map(|(i, (token, category))| TokenEntry {
                id: TokenId(i as u32),
                token: token.clone(),
                category: *category,
            })
            .collect()
    }
}
