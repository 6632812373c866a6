use std::sync::Arc;
use std::thread;
use wordbpe::{
    load_corpus, Corpus, MergePolicy, StopReason, Tokenizer, TokenizerConfig, TokenizerError,
    TrainingConfig,
};

const CORPUS: &str = "low lower lowest. newer newest, wider! the lower newest";

fn trained() -> Tokenizer {
    Tokenizer::builder().num_merges(20).train(CORPUS).unwrap()
}

#[test]
fn roundtrip_in_vocabulary_text() {
    let tokenizer = trained();
    for text in [
        "low lower lowest.",
        "newer, wider!",
        "the newest lower low",
        "wider. newer! lowest",
    ] {
        assert_eq!(tokenizer.decode(&tokenizer.encode(text)), text);
    }
}

#[test]
fn roundtrip_both_policies() {
    let tokenizer = trained();
    let ranked = tokenizer.with_merge_policy(MergePolicy::Ranked);
    let text = "lowest newer, the wider!";
    assert_eq!(ranked.decode(&ranked.encode(text)), text);
    assert_eq!(tokenizer.decode(&tokenizer.encode(text)), text);
}

#[test]
fn empty_input() {
    let tokenizer = trained();
    assert_eq!(tokenizer.encode(""), Vec::<u32>::new());
    assert_eq!(tokenizer.decode(&[]), "");
}

#[test]
fn unknown_characters_and_ids_are_dropped() {
    let tokenizer = trained();
    // 'é' is a word character, so "loéw" stays one word
    assert_eq!(tokenizer.decode(&tokenizer.encode("loéw")), "low");
    // '€' is split off as its own word, which then encodes to bare markers
    assert_eq!(tokenizer.decode(&tokenizer.encode("lo€w")), "lo w");
    assert_eq!(tokenizer.decode(&tokenizer.encode("low qqq wider")), "low wider");

    let mut ids = tokenizer.encode("low");
    ids.push(u32::MAX);
    assert_eq!(tokenizer.decode(&ids), "low");
}

#[test]
fn training_requires_exactly_one_target() {
    let none = Tokenizer::builder().train(CORPUS);
    assert!(matches!(none, Err(TokenizerError::InvalidConfig(_))));

    let both = Tokenizer::builder().vocab_size(50).num_merges(5).train(CORPUS);
    assert!(matches!(both, Err(TokenizerError::InvalidConfig(_))));
}

#[test]
fn vocab_size_target_is_an_upper_bound() {
    let base = 3 + base_chars(CORPUS);
    for target in [base, base + 3, base + 10, base + 100] {
        let tokenizer = Tokenizer::builder().vocab_size(target).train(CORPUS).unwrap();
        assert!(tokenizer.vocab_size() <= target);
    }

    // The vocabulary never shrinks below its base characters.
    let tokenizer = Tokenizer::builder().vocab_size(5).train(CORPUS).unwrap();
    assert_eq!(tokenizer.vocab_size(), base);
    assert_eq!(tokenizer.merge_count(), 0);
}

#[test]
fn merge_target_is_an_upper_bound() {
    for target in [0, 1, 5, 50] {
        let tokenizer = Tokenizer::builder().num_merges(target).train(CORPUS).unwrap();
        assert!(tokenizer.merge_count() <= target);
        assert!(tokenizer.vocab_size() <= 3 + base_chars(CORPUS) + tokenizer.merge_count());
    }
}

#[test]
fn regression_fixture() {
    let (tokenizer, stop) = Tokenizer::train_with_report(
        "ab bc bcd cde",
        &TokenizerConfig {
            training: TrainingConfig::with_num_merges(3),
            merge_policy: MergePolicy::Unordered,
        },
    )
    .unwrap();

    assert_eq!(tokenizer.merge_pairs(), vec![("<", "b"), ("<b", "c")]);
    assert_eq!(stop, StopReason::BelowMinFrequency);

    let tokens: Vec<&str> = (0..tokenizer.vocab_size() as u32)
        .map(|id| tokenizer.id_to_token(id).unwrap())
        .collect();
    assert_eq!(tokens, vec!["<", ">", " ", "a", "b", "c", "d", "e", "<b", "<bc"]);
}

#[test]
fn no_merges_when_every_pair_is_unique() {
    let tokenizer = Tokenizer::builder().num_merges(10).train("abc def").unwrap();
    assert_eq!(tokenizer.merge_count(), 0);
    assert_eq!(tokenizer.vocab_size(), 9);
    assert_eq!(tokenizer.decode(&tokenizer.encode("fed cab")), "fed cab");
}

#[test]
fn save_then_load_is_identity() {
    let tokenizer = trained();
    let dir = tempfile::tempdir().unwrap();
    let paths = tokenizer.save(dir.path().join("model")).unwrap();

    let loaded = Tokenizer::load(&paths.model).unwrap();
    assert_eq!(loaded.vocab(), tokenizer.vocab());
    assert_eq!(loaded.merges(), tokenizer.merges());
    assert_eq!(loaded.merge_pairs(), tokenizer.merge_pairs());

    let text = "the lowest, newer wider!";
    assert_eq!(loaded.encode(text), tokenizer.encode(text));
}

#[test]
fn load_rejects_missing_and_corrupt_files() {
    let dir = tempfile::tempdir().unwrap();

    let missing = Tokenizer::load(dir.path().join("missing.model"));
    assert!(matches!(missing, Err(TokenizerError::Io { .. })));

    let corrupt = dir.path().join("corrupt.model");
    std::fs::write(&corrupt, r#"{"vocab": {"<": 0}, "merges": "#).unwrap();
    assert!(matches!(Tokenizer::load(&corrupt), Err(TokenizerError::Load(_))));

    let bad_merge = dir.path().join("bad_merge.model");
    std::fs::write(
        &bad_merge,
        r#"{"vocab": {"<": 0, ">": 1, " ": 2, "a": 3}, "merges": [["a", "q"]]}"#,
    )
    .unwrap();
    assert!(matches!(
        Tokenizer::load(&bad_merge),
        Err(TokenizerError::InvalidMerge(_))
    ));
}

#[test]
fn train_from_corpus_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.txt");
    std::fs::write(&path, "ab bc\n\n  bcd cde  \n").unwrap();

    let corpus = load_corpus(&path).unwrap();
    assert_eq!(corpus.texts(), vec!["ab bc", "bcd cde"]);

    let from_file = Tokenizer::builder().num_merges(3).train(corpus).unwrap();
    let from_text = Tokenizer::builder()
        .num_merges(3)
        .train(Corpus::from("ab bc bcd cde"))
        .unwrap();
    assert_eq!(from_file.vocab(), from_text.vocab());
    assert_eq!(from_file.merges(), from_text.merges());
}

#[test]
fn shared_across_threads() {
    let tokenizer = Arc::new(trained());
    let expected = tokenizer.encode("lower newest");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tokenizer = Arc::clone(&tokenizer);
            thread::spawn(move || tokenizer.encode("lower newest"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

fn base_chars(text: &str) -> usize {
    let mut chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    chars.sort_unstable();
    chars.dedup();
    chars.len()
}
