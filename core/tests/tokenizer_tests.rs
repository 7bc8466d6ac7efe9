use tfidf_core::tokenizer::{strip_numbers, tokenize};
use tfidf_core::{StopWords, Tokenizer, TokenizerOptions};

#[test]
fn it_normalizes_and_stems() {
    let words = tokenize("Running Runners RUN! The menu.");
    // Stemming to "run" should appear
    assert!(words.contains(&"run".to_string()));
    assert!(words.contains(&"menu".to_string()));
    assert!(!words.contains(&"the".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words, vec!["quick", "brown", "fox", "lazi", "dog"]);
}

#[test]
fn it_drops_bare_numbers_but_keeps_identifiers() {
    let tok = Tokenizer::new(StopWords::empty());
    assert_eq!(tok.tokenize("Sales: 1,200 units, up 15% from 1990."), vec!["sale", "unit", "up", "from"]);
    assert_eq!(tok.tokenize("model A320 and 3com"), vec!["model", "a320", "and", "3com"]);
}

#[test]
fn percent_sign_bounds_a_number_on_either_side() {
    let tok = Tokenizer::new(StopWords::empty());
    assert_eq!(tok.tokenize("rate %15"), vec!["rate"]);
    assert_eq!(tok.tokenize("rate 15%"), vec!["rate"]);
    assert_eq!(tok.tokenize("rate %15x"), vec!["rate", "15x"]);
}

#[test]
fn numbers_are_stripped_before_lowercasing() {
    assert_eq!(strip_numbers("FT 12 MAR 91 / 14:30"), "FT  MAR  / :");
}

#[test]
fn supplied_stop_words_are_case_sensitive() {
    let tok = Tokenizer::new(StopWords::parse("The\nfox"));
    // text is lowercased first, so "The" never matches
    assert_eq!(tok.tokenize("The fox"), vec!["the"]);
}

#[test]
fn unicode_normalization_is_opt_in() {
    let plain = Tokenizer::new(StopWords::empty());
    let nfkc = Tokenizer::with_options(
        StopWords::empty(),
        TokenizerOptions { normalize_unicode: true, ..TokenizerOptions::default() },
    );
    assert_eq!(nfkc.tokenize("\u{FB01}nd"), vec!["find"]);
    assert_ne!(plain.tokenize("\u{FB01}nd"), vec!["find"]);
}
