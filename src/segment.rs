//! Word segmentation and POS-tag adaptation.
//!
//! Segmentation backends sit behind the [`Segmenter`] trait and return
//! `(word, flag)` pairs with no offsets. This module folds the backend's
//! fine-grained flags onto the twelve-tag scheme of [`PosTag`] and
//! reconstructs char offsets by scanning the document forward, since
//! downstream consumers (recognizers, the UI) address everything by char
//! span.

use jieba_rs::Jieba;
use once_cell::sync::Lazy;

use crate::entity::{PosTag, Token};
use crate::error::Result;
use crate::offset::DocView;

/// Shared segmentation engine. Dictionary load is paid once per process.
static JIEBA: Lazy<Jieba> = Lazy::new(Jieba::new);

/// A segmented word as returned by a backend: surface text plus the
/// backend's own fine-grained POS flag, offsets unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWord {
    /// Word surface text.
    pub word: String,
    /// Backend POS flag, e.g. `nr`, `vd`, `eng`.
    pub flag: String,
}

impl RawWord {
    /// Builds a raw word from borrowed parts.
    #[must_use]
    pub fn new(word: impl Into<String>, flag: impl Into<String>) -> Self {
        RawWord {
            word: word.into(),
            flag: flag.into(),
        }
    }
}

/// A word segmentation backend.
///
/// Implementations tokenize a document and tag each word with their own
/// flag inventory; the pipeline adapts flags and recovers offsets. The
/// default implementation is [`JiebaSegmenter`].
pub trait Segmenter: Send + Sync {
    /// Splits `text` into tagged words, in document order.
    fn segment(&self, text: &str) -> Result<Vec<RawWord>>;
}

/// Default segmenter backed by the bundled jieba dictionary, with HMM
/// enabled for out-of-vocabulary words.
#[derive(Debug, Clone, Copy, Default)]
pub struct JiebaSegmenter;

impl JiebaSegmenter {
    /// Creates the default segmenter.
    #[must_use]
    pub fn new() -> Self {
        JiebaSegmenter
    }
}

impl Segmenter for JiebaSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<RawWord>> {
        let tagged = JIEBA.tag(text, true);
        Ok(tagged
            .into_iter()
            .map(|t| RawWord::new(t.word, t.tag))
            .collect())
    }
}

// ============================================================================
// Flag adaptation
// ============================================================================

/// Folds a backend flag onto the twelve-tag scheme.
///
/// Lookup is by lowercased first character. Flags whose first character is
/// already one of the twelve codes map directly; the rest follow a fixed
/// table (`x`/locative/idiom families fold to noun, interjection/auxiliary
/// families to particle, distinguishing/state words to adjective) with noun
/// as the default for anything unknown.
fn fold_flag(flag: &str) -> PosTag {
    let first = match flag.chars().next() {
        Some(c) => c.to_ascii_lowercase(),
        None => return PosTag::Noun,
    };
    match first {
        'n' => PosTag::Noun,
        'v' => PosTag::Verb,
        'a' => PosTag::Adjective,
        'd' => PosTag::Adverb,
        'm' => PosTag::Numeral,
        'q' => PosTag::Measure,
        'r' => PosTag::Pronoun,
        't' => PosTag::Time,
        'p' => PosTag::Preposition,
        'c' => PosTag::Conjunction,
        'u' => PosTag::Particle,
        'w' => PosTag::Punctuation,
        'x' | 'f' | 's' | 'i' | 'l' | 'j' => PosTag::Noun,
        'e' | 'y' | 'o' | 'h' | 'k' | 'g' => PosTag::Particle,
        'b' | 'z' => PosTag::Adjective,
        _ => PosTag::Noun,
    }
}

/// True when every char of `word` is whitespace, punctuation, or a symbol.
fn is_punct_or_space(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_whitespace() || !c.is_alphanumeric())
}

/// Maps a `(word, flag)` pair to its coarse tag.
///
/// Punctuation and whitespace tokens are force-mapped to
/// [`PosTag::Punctuation`] regardless of the backend flag; jieba in
/// particular tags them `x`, which would otherwise fold to noun.
pub(crate) fn coarse_tag(word: &str, flag: &str) -> PosTag {
    if is_punct_or_space(word) {
        PosTag::Punctuation
    } else {
        fold_flag(flag)
    }
}

// ============================================================================
// Offset recovery
// ============================================================================

/// Rebuilds char offsets for a backend's word stream.
///
/// Backends guarantee document order but not offsets, so each word is
/// located by searching forward from the previous word's end. When a word
/// cannot be found (the backend normalized whitespace or folded case), the
/// token is pinned at the current cursor as a best-effort position and the
/// scan continues; offsets after such a token remain anchored to real
/// matches, not to the drifted cursor.
pub(crate) fn align_tokens(doc: &DocView<'_>, raw: &[RawWord]) -> Vec<Token> {
    let text = doc.text();
    let mut tokens = Vec::with_capacity(raw.len());
    let mut cursor = 0usize; // byte offset, always on a char boundary

    for rw in raw {
        if rw.word.is_empty() {
            continue;
        }
        let start_byte = match text[cursor..].find(rw.word.as_str()) {
            Some(rel) => cursor + rel,
            None => {
                log::debug!("segmenter word {:?} not found at byte {cursor}", rw.word);
                cursor
            }
        };
        let start = doc.char_index(start_byte);
        tokens.push(Token::new(
            rw.word.clone(),
            coarse_tag(&rw.word, &rw.flag),
            start,
        ));

        cursor = start_byte.saturating_add(rw.word.len()).min(text.len());
        while cursor < text.len() && !text.is_char_boundary(cursor) {
            cursor += 1;
        }
    }
    tokens
}

/// Fallback tokenization used when the segmentation backend fails: runs of
/// ASCII letters and runs of ASCII digits become one token each (digit runs
/// tagged numeral), every other char becomes its own token, with punctuation
/// and whitespace tagged as such. Coarse, but keeps the rest of the pipeline
/// running.
pub(crate) fn char_class_tokens(doc: &DocView<'_>) -> Vec<Token> {
    let chars = doc.chars();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            let word: String = chars[i..j].iter().collect();
            tokens.push(Token::new(word, PosTag::Numeral, i));
            i = j;
        } else if c.is_ascii_alphabetic() {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_ascii_alphabetic() {
                j += 1;
            }
            let word: String = chars[i..j].iter().collect();
            tokens.push(Token::new(word, PosTag::Noun, i));
            i = j;
        } else {
            let pos = if c.is_whitespace() || !c.is_alphanumeric() {
                PosTag::Punctuation
            } else {
                PosTag::Noun
            };
            tokens.push(Token::new(c.to_string(), pos, i));
            i += 1;
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> Vec<RawWord> {
        pairs.iter().map(|(w, f)| RawWord::new(*w, *f)).collect()
    }

    #[test]
    fn folds_direct_codes() {
        assert_eq!(fold_flag("n"), PosTag::Noun);
        assert_eq!(fold_flag("nr"), PosTag::Noun);
        assert_eq!(fold_flag("vd"), PosTag::Verb);
        assert_eq!(fold_flag("Ng"), PosTag::Noun);
        assert_eq!(fold_flag("t"), PosTag::Time);
    }

    #[test]
    fn folds_extended_families() {
        assert_eq!(fold_flag("x"), PosTag::Noun);
        assert_eq!(fold_flag("f"), PosTag::Noun);
        assert_eq!(fold_flag("l"), PosTag::Noun);
        assert_eq!(fold_flag("eng"), PosTag::Particle);
        assert_eq!(fold_flag("y"), PosTag::Particle);
        assert_eq!(fold_flag("b"), PosTag::Adjective);
        assert_eq!(fold_flag("z"), PosTag::Adjective);
        assert_eq!(fold_flag(""), PosTag::Noun);
        assert_eq!(fold_flag("9"), PosTag::Noun);
    }

    #[test]
    fn punctuation_is_forced() {
        assert_eq!(coarse_tag("。", "x"), PosTag::Punctuation);
        assert_eq!(coarse_tag("，", "n"), PosTag::Punctuation);
        assert_eq!(coarse_tag(" ", "x"), PosTag::Punctuation);
        assert_eq!(coarse_tag("……", "x"), PosTag::Punctuation);
        assert_eq!(coarse_tag("张三", "x"), PosTag::Noun);
    }

    #[test]
    fn aligns_chinese_words() {
        let doc = DocView::new("张三在北京");
        let tokens = align_tokens(
            &doc,
            &raw(&[("张三", "nr"), ("在", "p"), ("北京", "ns")]),
        );
        assert_eq!(tokens.len(), 3);
        assert_eq!((tokens[0].start, tokens[0].end), (0, 2));
        assert_eq!(tokens[0].pos, PosTag::Noun);
        assert_eq!((tokens[1].start, tokens[1].end), (2, 3));
        assert_eq!(tokens[1].pos, PosTag::Preposition);
        assert_eq!((tokens[2].start, tokens[2].end), (3, 5));
    }

    #[test]
    fn aligns_repeated_words_left_to_right() {
        let doc = DocView::new("北京的北京");
        let tokens = align_tokens(&doc, &raw(&[("北京", "ns"), ("的", "u"), ("北京", "ns")]));
        assert_eq!((tokens[0].start, tokens[0].end), (0, 2));
        assert_eq!((tokens[2].start, tokens[2].end), (3, 5));
    }

    #[test]
    fn missing_word_pins_to_cursor() {
        let doc = DocView::new("天气很好");
        let tokens = align_tokens(&doc, &raw(&[("天气", "n"), ("不存在", "n"), ("好", "a")]));
        assert_eq!((tokens[0].start, tokens[0].end), (0, 2));
        // Unfindable word sits at the cursor; the following real word is
        // still located by search, not by accumulated drift.
        assert_eq!(tokens[1].start, 2);
        assert_eq!((tokens[2].start, tokens[2].end), (3, 4));
    }

    #[test]
    fn mixed_script_offsets_count_chars() {
        let doc = DocView::new("GDP增长8%");
        let tokens = align_tokens(
            &doc,
            &raw(&[("GDP", "eng"), ("增长", "v"), ("8", "m"), ("%", "x")]),
        );
        assert_eq!((tokens[0].start, tokens[0].end), (0, 3));
        assert_eq!((tokens[1].start, tokens[1].end), (3, 5));
        assert_eq!((tokens[2].start, tokens[2].end), (5, 6));
        assert_eq!(tokens[3].pos, PosTag::Punctuation);
    }

    #[test]
    fn char_class_fallback_covers_document() {
        let doc = DocView::new("价格abc123。");
        let tokens = char_class_tokens(&doc);
        let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words, vec!["价", "格", "abc", "123", "。"]);
        assert_eq!(tokens[2].pos, PosTag::Noun);
        assert_eq!(tokens[3].pos, PosTag::Numeral);
        assert_eq!(tokens[4].pos, PosTag::Punctuation);
        assert_eq!((tokens[3].start, tokens[3].end), (5, 8));
    }

    #[test]
    fn jieba_backend_segments_real_text() {
        let seg = JiebaSegmenter::new();
        let words = seg.segment("今天天气真好").unwrap();
        assert!(!words.is_empty());
        let joined: String = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(joined, "今天天气真好");
    }
}
