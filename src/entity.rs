//! Core annotation types: POS-tagged tokens, entity spans, and the
//! document-level annotation record.
//!
//! All offsets in this module count Unicode scalar values (chars) of the
//! original document text, inclusive start and exclusive end. JSON output
//! uses the Chinese display labels the annotation UI expects, so the wire
//! shape of an [`Entity`] is `{"text": "...", "label": "人名", ...}` rather
//! than an English variant name.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

// ============================================================================
// Part-of-speech tags
// ============================================================================

/// Coarse part-of-speech tag, one of twelve classes.
///
/// Upstream taggers emit dozens of fine-grained flags; the adapter in
/// [`crate::segment`] folds them onto this fixed scheme by first character,
/// defaulting to [`PosTag::Noun`]. Punctuation and whitespace tokens are
/// force-mapped to [`PosTag::Punctuation`] regardless of tagger output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    /// Noun (名词).
    #[serde(rename = "n")]
    Noun,
    /// Verb (动词).
    #[serde(rename = "v")]
    Verb,
    /// Adjective (形容词).
    #[serde(rename = "a")]
    Adjective,
    /// Adverb (副词).
    #[serde(rename = "d")]
    Adverb,
    /// Numeral (数词).
    #[serde(rename = "m")]
    Numeral,
    /// Measure word (量词).
    #[serde(rename = "q")]
    Measure,
    /// Pronoun (代词).
    #[serde(rename = "r")]
    Pronoun,
    /// Time word (时间词).
    #[serde(rename = "t")]
    Time,
    /// Preposition (介词).
    #[serde(rename = "p")]
    Preposition,
    /// Conjunction (连词).
    #[serde(rename = "c")]
    Conjunction,
    /// Particle (助词).
    #[serde(rename = "u")]
    Particle,
    /// Punctuation (标点).
    #[serde(rename = "w")]
    Punctuation,
}

impl PosTag {
    /// All twelve tags in a fixed order.
    pub const ALL: [PosTag; 12] = [
        PosTag::Noun,
        PosTag::Verb,
        PosTag::Adjective,
        PosTag::Adverb,
        PosTag::Numeral,
        PosTag::Measure,
        PosTag::Pronoun,
        PosTag::Time,
        PosTag::Preposition,
        PosTag::Conjunction,
        PosTag::Particle,
        PosTag::Punctuation,
    ];

    /// One-letter tag code (`n`, `v`, `a`, ...).
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            PosTag::Noun => "n",
            PosTag::Verb => "v",
            PosTag::Adjective => "a",
            PosTag::Adverb => "d",
            PosTag::Numeral => "m",
            PosTag::Measure => "q",
            PosTag::Pronoun => "r",
            PosTag::Time => "t",
            PosTag::Preposition => "p",
            PosTag::Conjunction => "c",
            PosTag::Particle => "u",
            PosTag::Punctuation => "w",
        }
    }

    /// Chinese display label (名词, 动词, ...).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PosTag::Noun => "名词",
            PosTag::Verb => "动词",
            PosTag::Adjective => "形容词",
            PosTag::Adverb => "副词",
            PosTag::Numeral => "数词",
            PosTag::Measure => "量词",
            PosTag::Pronoun => "代词",
            PosTag::Time => "时间词",
            PosTag::Preposition => "介词",
            PosTag::Conjunction => "连词",
            PosTag::Particle => "助词",
            PosTag::Punctuation => "标点",
        }
    }

    /// Parses a one-letter code back into a tag.
    #[must_use]
    pub fn from_code(code: &str) -> Option<PosTag> {
        PosTag::ALL.iter().copied().find(|t| t.code() == code)
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// A segmented word with its coarse POS tag and char span.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Token {
    /// Token text as it appears in the document.
    pub word: String,
    /// Coarse part-of-speech tag.
    pub pos: PosTag,
    /// Char offset of the first char (inclusive).
    pub start: usize,
    /// Char offset one past the last char (exclusive).
    pub end: usize,
}

impl Token {
    /// Builds a token; `end` is derived from `start` and the word's char count.
    #[must_use]
    pub fn new(word: impl Into<String>, pos: PosTag, start: usize) -> Self {
        let word = word.into();
        let end = start + word.chars().count();
        Token {
            word,
            pos,
            start,
            end,
        }
    }

    /// Span length in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for zero-width tokens (never produced by the segmenter).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// Serialized by hand so the JSON carries both the code (`pos`) and the
// display name (`pos_label`) without storing the label twice in memory.
impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Token", 5)?;
        s.serialize_field("word", &self.word)?;
        s.serialize_field("pos", self.pos.code())?;
        s.serialize_field("pos_label", self.pos.label())?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

// ============================================================================
// Entities
// ============================================================================

/// The five entity classes this crate recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// Person name (人名).
    #[serde(rename = "人名")]
    Person,
    /// Place name (地名).
    #[serde(rename = "地名")]
    Location,
    /// Organization or institution (组织机构).
    #[serde(rename = "组织机构")]
    Organization,
    /// Date or time expression (时间日期).
    #[serde(rename = "时间日期")]
    Time,
    /// Quantity or monetary amount (数值金额).
    #[serde(rename = "数值金额")]
    Money,
}

impl EntityType {
    /// All five entity classes in a fixed order.
    pub const ALL: [EntityType; 5] = [
        EntityType::Person,
        EntityType::Location,
        EntityType::Organization,
        EntityType::Time,
        EntityType::Money,
    ];

    /// Chinese display label, identical to the serialized form.
    #[must_use]
    pub fn as_label(self) -> &'static str {
        match self {
            EntityType::Person => "人名",
            EntityType::Location => "地名",
            EntityType::Organization => "组织机构",
            EntityType::Time => "时间日期",
            EntityType::Money => "数值金额",
        }
    }

    /// Parses a Chinese display label back into an entity class.
    #[must_use]
    pub fn from_label(label: &str) -> Option<EntityType> {
        EntityType::ALL.iter().copied().find(|t| t.as_label() == label)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// A recognized entity span in the document.
///
/// The final entity list of a [`DocumentAnnotation`] is sorted by `start`
/// and pairwise non-overlapping; `text` always equals the document chars in
/// `start..end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity surface text.
    pub text: String,
    /// Entity class (serializes as the Chinese label).
    pub label: EntityType,
    /// Char offset of the first char (inclusive).
    pub start: usize,
    /// Char offset one past the last char (exclusive).
    pub end: usize,
}

impl Entity {
    /// Builds an entity; `end` is derived from `start` and the text's char count.
    #[must_use]
    pub fn new(text: impl Into<String>, label: EntityType, start: usize) -> Self {
        let text = text.into();
        let end = start + text.chars().count();
        Entity {
            text,
            label,
            start,
            end,
        }
    }

    /// Span length in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for zero-width spans (never produced by the pipeline).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] @ {}..{}",
            self.text,
            self.label.as_label(),
            self.start,
            self.end
        )
    }
}

// ============================================================================
// Document-level results
// ============================================================================

/// Document sentiment polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// Positive (积极): score above the positive threshold.
    #[serde(rename = "积极")]
    Positive,
    /// Negative (消极): score below the negative threshold.
    #[serde(rename = "消极")]
    Negative,
    /// Neutral (中性): everything in between, and the fallback for unscoreable text.
    #[serde(rename = "中性")]
    Neutral,
}

impl Polarity {
    /// Chinese display label, identical to the serialized form.
    #[must_use]
    pub fn as_label(self) -> &'static str {
        match self {
            Polarity::Positive => "积极",
            Polarity::Negative => "消极",
            Polarity::Neutral => "中性",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// The complete annotation of one document.
///
/// A pure function of the input text and the gazetteer snapshot at call
/// time; callers persist or render it as they see fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnnotation {
    /// Best-scoring category, or the sentinel `其他` when nothing clears
    /// the classification threshold.
    pub category: String,
    /// Document sentiment polarity.
    pub sentiment: Polarity,
    /// Raw sentiment score in `[0, 1]`.
    pub sentiment_score: f64,
    /// Segmented tokens with POS tags, sorted by start offset.
    pub tokens: Vec<Token>,
    /// Final entity spans, sorted by start offset, pairwise non-overlapping.
    pub entities: Vec<Entity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_codes_round_trip() {
        for tag in PosTag::ALL {
            assert_eq!(PosTag::from_code(tag.code()), Some(tag));
        }
        assert_eq!(PosTag::from_code("zz"), None);
    }

    #[test]
    fn pos_labels_are_chinese() {
        assert_eq!(PosTag::Noun.label(), "名词");
        assert_eq!(PosTag::Punctuation.label(), "标点");
        assert_eq!(PosTag::Time.code(), "t");
    }

    #[test]
    fn entity_labels_round_trip() {
        for ty in EntityType::ALL {
            assert_eq!(EntityType::from_label(ty.as_label()), Some(ty));
        }
        assert_eq!(EntityType::from_label("其他"), None);
    }

    #[test]
    fn entity_end_counts_chars_not_bytes() {
        let e = Entity::new("北京", EntityType::Location, 3);
        assert_eq!(e.end, 5);
        assert_eq!(e.len(), 2);
        assert!(!e.is_empty());
    }

    #[test]
    fn token_serializes_with_pos_label() {
        let t = Token::new("研究", PosTag::Verb, 4);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains(r#""pos":"v""#));
        assert!(json.contains(r#""pos_label":"动词""#));
        assert!(json.contains(r#""start":4"#));
        assert!(json.contains(r#""end":6"#));
    }

    #[test]
    fn token_deserializes_ignoring_pos_label() {
        let json = r#"{"word":"研究","pos":"v","pos_label":"动词","start":4,"end":6}"#;
        let t: Token = serde_json::from_str(json).unwrap();
        assert_eq!(t, Token::new("研究", PosTag::Verb, 4));
    }

    #[test]
    fn entity_serializes_with_chinese_label() {
        let e = Entity::new("张三", EntityType::Person, 10);
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains(r#""label":"人名""#));
        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn polarity_serializes_as_chinese_label() {
        assert_eq!(serde_json::to_string(&Polarity::Neutral).unwrap(), r#""中性""#);
        let p: Polarity = serde_json::from_str(r#""积极""#).unwrap();
        assert_eq!(p, Polarity::Positive);
    }
}
