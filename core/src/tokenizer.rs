use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::borrow::Cow;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

use crate::options::TokenizerOptions;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("valid regex");
    static ref DIGITS: Regex = Regex::new(r"\d+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref ENGLISH: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
    static ref DEFAULT: Tokenizer = Tokenizer::default();
}

/// Words removed before stemming. Membership is case-sensitive, so a list
/// meant to match lowercased text should itself be lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in English list.
    pub fn english() -> Self {
        ENGLISH.iter().map(|w| w.to_string()).collect()
    }

    /// One word per line; leading spaces are stripped, blank lines ignored.
    pub fn parse(list: &str) -> Self {
        list.lines()
            .map(|line| line.trim_start_matches(' ').trim_end_matches('\r'))
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromIterator<String> for StopWords {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self { words: iter.into_iter().collect() }
    }
}

/// Turns raw text into index terms: number stripping, lowercase, word split,
/// stop-word removal, then stemming.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: StopWords,
    options: TokenizerOptions,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(StopWords::english())
    }
}

impl Tokenizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self::with_options(stop_words, TokenizerOptions::default())
    }

    pub fn with_options(stop_words: StopWords, options: TokenizerOptions) -> Self {
        Self { stop_words, options }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text: Cow<str> = if self.options.normalize_unicode {
            Cow::Owned(text.nfkc().collect())
        } else {
            Cow::Borrowed(text)
        };
        let lowered = strip_numbers(&text).to_lowercase();
        WORD.find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(token))
            .map(|token| {
                if self.options.stemming {
                    STEMMER.stem(token).into_owned()
                } else {
                    token.to_string()
                }
            })
            .collect()
    }
}

/// Tokenize with the built-in English stop words and default options.
pub fn tokenize(text: &str) -> Vec<String> {
    DEFAULT.tokenize(text)
}

/// Drop digit runs that stand on their own: bounded on each side by the
/// start or end of the text, whitespace, `.`, `,`, `:` or `%`.
pub fn strip_numbers(text: &str) -> Cow<'_, str> {
    let mut out: Option<String> = None;
    let mut last = 0;
    for m in DIGITS.find_iter(text) {
        let before = text[..m.start()].chars().next_back();
        let after = text[m.end()..].chars().next();
        let left = before.map_or(true, is_number_boundary);
        let right = after.map_or(true, is_number_boundary);
        if left && right {
            let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
            buf.push_str(&text[last..m.start()]);
            last = m.end();
        }
    }
    match out {
        Some(mut buf) => {
            buf.push_str(&text[last..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

fn is_number_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | ',' | ':' | '%')
}
