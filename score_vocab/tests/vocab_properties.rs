// End-to-end checks of vocabulary layout and lookups through the public API.
//
// Builds vocabularies for several control configurations and verifies the
// id layout, category partition, control ordering, and the quantizer /
// key helpers feeding into lookups.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use score_vocab::bins::{control_value_token, tempo_bucket_token};
use score_vocab::keys::{key_token_for_name, token_to_key};
use score_vocab::tokens::{duration_token, pitch_token, program_token, step_token, track_token};
use score_vocab::{
    Category, ControlCategory, EOS_INDEX, PAD_INDEX, TokenId, VocabConfig, VocabError, Vocabulary,
};

const BASE_SIZE: usize = 282;

/// Every subset of the six controls.
fn all_control_subsets() -> Vec<Vec<ControlCategory>> {
    (0..1u32 << ControlCategory::ALL.len())
        .map(|bits| {
            ControlCategory::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| bits & (1 << i) != 0)
                .map(|(_, c)| c)
                .collect()
        })
        .collect()
}

#[test]
fn round_trip_every_id_and_token() {
    for controls in all_control_subsets() {
        let vocab = Vocabulary::new("score", &controls);
        for i in 0..vocab.vocab_size() {
            let id = TokenId(i as u32);
            let token = vocab.index_to_char(id).unwrap();
            assert_eq!(vocab.char_to_index(token).unwrap(), id);
        }
        for entry in vocab.entries() {
            let id = vocab.char_to_index(&entry.token).unwrap();
            assert_eq!(vocab.index_to_char(id).unwrap(), entry.token);
        }
    }
}

#[test]
fn specials_hold_for_every_configuration() {
    for controls in all_control_subsets() {
        let vocab = Vocabulary::new("score", &controls);
        assert_eq!(vocab.index_to_char(PAD_INDEX).unwrap(), "<pad>");
        assert_eq!(vocab.index_to_char(EOS_INDEX).unwrap(), "<eos>");
        assert_eq!(vocab.pad_index(), TokenId(0));
        assert_eq!(vocab.eos_index(), TokenId(1));
    }
}

#[test]
fn size_grows_by_each_control_count() {
    for controls in all_control_subsets() {
        let vocab = Vocabulary::new("score", &controls);
        let expected: usize =
            BASE_SIZE + controls.iter().map(|c| c.token_count()).sum::<usize>();
        assert_eq!(vocab.vocab_size(), expected, "{controls:?}");

        let unique: BTreeSet<String> = vocab.entries().into_iter().map(|e| e.token).collect();
        let non_special = unique.len() - 2;
        assert_eq!(vocab.vocab_size(), 2 + non_special);
    }
}

#[test]
fn repeated_control_is_idempotent() {
    let once = Vocabulary::new("score", &[ControlCategory::Key]);
    let twice = Vocabulary::new("score", &[ControlCategory::Key, ControlCategory::Key]);
    assert_eq!(once.entries(), twice.entries());
    assert_eq!(once.control_tokens(), twice.control_tokens());

    let by_name = Vocabulary::with_control_names("score", &["key", "key"]).unwrap();
    assert_eq!(by_name.entries(), once.entries());
}

#[test]
fn categories_partition_everything_but_pad() {
    let controls = ControlCategory::ALL;
    let vocab = Vocabulary::new("score", &controls);

    let mut seen: BTreeSet<TokenId> = BTreeSet::new();
    for category in vocab.class_names() {
        for &id in vocab.indices_of(category) {
            assert!(seen.insert(id), "{id} appears in two categories");
            assert_eq!(vocab.token_class(id).unwrap(), category);
        }
    }
    assert_eq!(seen.len(), vocab.vocab_size() - 1);
    assert!(!seen.contains(&PAD_INDEX));
    assert_eq!(
        vocab.token_class(PAD_INDEX),
        Err(VocabError::Uncategorized(PAD_INDEX))
    );
    assert_eq!(vocab.class_names().len(), Category::BASE.len() + controls.len());
}

#[test]
fn pitch_and_duration_ranges_classify() {
    let vocab = Vocabulary::new("score", &[]);
    for pitch in 21..=108u8 {
        let id = vocab.char_to_index(pitch_token(pitch).unwrap()).unwrap();
        assert_eq!(vocab.token_class(id).unwrap(), Category::Pitch);
    }
    for step in 0..16u8 {
        let id = vocab.char_to_index(step_token(step).unwrap()).unwrap();
        assert_eq!(vocab.token_class(id).unwrap(), Category::Duration);
    }
    for steps in 1..=32u8 {
        let id = vocab.char_to_index(duration_token(steps).unwrap()).unwrap();
        assert_eq!(vocab.token_class(id).unwrap(), Category::Duration);
    }
    assert_eq!(vocab.indices_of(Category::Pitch).len(), 88);
    assert_eq!(vocab.indices_of(Category::Duration).len(), 48);
}

#[test]
fn base_vocabulary_layout() {
    let vocab = Vocabulary::new("score", &[]);
    assert_eq!(vocab.vocab_size(), BASE_SIZE);
    assert!(vocab.controls().is_empty());
    assert!(vocab.control_tokens().is_empty());

    let pitches = vocab.indices_of(Category::Pitch);
    let p60 = vocab.char_to_index("p_60").unwrap();
    // p_21 is the first pitch token, so p_60 is the 40th.
    assert_eq!(pitches[39], p60);
    assert_eq!(p60, TokenId(185));
    assert_eq!(vocab.token_class(p60).unwrap(), Category::Pitch);

    assert_eq!(vocab.char_to_index("bar").unwrap(), TokenId(3));
    assert_eq!(
        vocab.char_to_index(track_token(0).unwrap()).unwrap(),
        TokenId(4)
    );
    assert_eq!(
        vocab.char_to_index(program_token(0).unwrap()).unwrap(),
        TokenId(18)
    );
}

#[test]
fn key_control() {
    let base = Vocabulary::new("score", &[]);
    let vocab = Vocabulary::new("score", &[ControlCategory::Key]);
    assert_eq!(vocab.vocab_size(), base.vocab_size() + 24);

    let k0 = vocab.char_to_index("k_0").unwrap();
    assert_eq!(vocab.token_class(k0).unwrap(), Category::Key);
    assert_eq!(token_to_key("k_0").unwrap(), "C major");

    let token = key_token_for_name("Db major").unwrap();
    assert_eq!(vocab.class_of(token).unwrap(), Category::Key);
    assert_eq!(
        base.char_to_index("k_0"),
        Err(VocabError::UnknownToken("k_0".into()))
    );
}

#[test]
fn control_tokens_follow_evaluation_order() {
    let vocab = Vocabulary::new(
        "score",
        &[ControlCategory::Tensile, ControlCategory::Density],
    );
    let control_tokens = vocab.control_tokens();
    assert_eq!(control_tokens.len(), 22);
    let expected: Vec<String> = (0..10)
        .map(|i| format!("d_{i}"))
        .chain((0..12).map(|i| format!("s_{i}")))
        .collect();
    assert_eq!(control_tokens, expected);

    let swapped = Vocabulary::with_control_names("score", &["density", "tensile"]).unwrap();
    assert_eq!(swapped.entries(), vocab.entries());
}

#[test]
fn quantized_features_encode() {
    let vocab = Vocabulary::new("score", &ControlCategory::ALL);
    let sequence = vec![
        tempo_bucket_token(128.0).unwrap(),
        key_token_for_name("F# minor").unwrap(),
        control_value_token(ControlCategory::Density, 0.42).unwrap(),
        control_value_token(ControlCategory::Occupation, 0.8).unwrap(),
        control_value_token(ControlCategory::Polyphony, 0.05).unwrap(),
        control_value_token(ControlCategory::Tensile, 1.1).unwrap(),
        control_value_token(ControlCategory::Diameter, 2.1).unwrap(),
        "bar",
        track_token(1).unwrap(),
        program_token(40).unwrap(),
        step_token(4).unwrap(),
        pitch_token(64).unwrap(),
        duration_token(8).unwrap(),
        "<eos>",
    ];
    let ids = vocab.encode(&sequence).unwrap();
    let classes: Vec<Category> = ids.iter().map(|&id| vocab.token_class(id).unwrap()).collect();
    assert_eq!(
        classes,
        vec![
            Category::Tempo,
            Category::Key,
            Category::Density,
            Category::Occupation,
            Category::Polyphony,
            Category::Tensile,
            Category::Diameter,
            Category::Structure,
            Category::Structure,
            Category::Program,
            Category::Duration,
            Category::Pitch,
            Category::Duration,
            Category::Eos,
        ]
    );
    assert_eq!(vocab.decode(&ids).unwrap(), sequence);
}

#[test]
fn config_drives_construction() {
    let config =
        VocabConfig::from_json(r#"{"mode": "score", "control_list": ["diameter", "key"]}"#)
            .unwrap();
    let vocab = Vocabulary::from_config(&config);
    assert_eq!(vocab.controls(), &[ControlCategory::Key, ControlCategory::Diameter]);
    assert_eq!(vocab.vocab_size(), BASE_SIZE + 24 + 12);
}

#[test]
fn shared_across_threads() {
    let vocab = Arc::new(Vocabulary::new("score", &ControlCategory::ALL));
    let handles: Vec<_> = (0..4u8)
        .map(|t| {
            let vocab = Arc::clone(&vocab);
            thread::spawn(move || {
                let token = pitch_token(60 + t).unwrap();
                let id = vocab.char_to_index(token).unwrap();
                (id, vocab.index_to_char(id).unwrap().to_string())
            })
        })
        .collect();
    for (t, handle) in handles.into_iter().enumerate() {
        let (id, token) = handle.join().unwrap();
        assert_eq!(token, format!("p_{}", 60 + t));
        assert_eq!(vocab.token_class(id).unwrap(), Category::Pitch);
    }
}
