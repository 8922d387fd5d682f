//! The five rule-based entity recognizers.
//!
//! Each recognizer runs an ordered list of rules (literal rosters first,
//! then parameterized patterns) over the whole document and resolves its own
//! overlaps locally: a new match is accepted only if it is strictly longer
//! than every overlapping match already held, in which case it evicts them
//! (longest-match-wins). Recognizers never see each other's output; the
//! cross-recognizer decision happens later in [`crate::merge`].
//!
//! All recognizers are stateless and pure over `(document, tokens)`.

pub(crate) mod amount;
pub(crate) mod location;
pub(crate) mod organization;
pub(crate) mod person;
pub(crate) mod time;

use crate::entity::{EntityType, PosTag, Token};
use crate::error::Result;
use crate::offset::DocView;

/// Minimum accepted span length in chars. Single-char spans are noise for
/// every label this crate recognizes.
pub(crate) const MIN_SPAN_CHARS: usize = 2;

/// Determiner-like chars that signal a match is the tail of a longer noun
/// phrase rather than an entity mention.
pub(crate) const DETERMINER_CHARS: &str = "这那某该本此每各";

/// Function and quantifier chars that terminate a name prefix. The suffix
/// recognizers (location, organization) build their prefix character
/// classes by subtracting this set from the Han block, so a pattern like
/// `XX市` cannot swallow a preceding particle or numeral.
pub(crate) const HAN_STOP_CHARS: &str = "的了是在这那该本每各此某其和与或及就很也还又\
等于从到向往把被对让给为去来回赴离抵过出入进已未不没我你他她它们您咱\
个种项批座一二两三四五六七八九十百千万亿几数半游爬逛登";

/// Provenance of a candidate span. Declaration order is merge priority,
/// gazetteer first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Source {
    Gazetteer,
    Time,
    Amount,
    Person,
    Location,
    Organization,
}

/// A candidate entity span, in char offsets. Text is sliced from the
/// document only after the merge pass settles the final span set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) label: EntityType,
    pub(crate) source: Source,
}

impl Candidate {
    pub(crate) fn new(start: usize, end: usize, label: EntityType, source: Source) -> Self {
        Candidate {
            start,
            end,
            label,
            source,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.end - self.start
    }

    /// Half-open interval overlap.
    pub(crate) fn overlaps(&self, other: &Candidate) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One rule engine producing candidates for a single entity label.
pub(crate) trait Recognizer: Send + Sync {
    /// Stable name used in logs and error reports.
    fn name(&self) -> &'static str;

    /// Runs all rules over the document and returns this recognizer's
    /// locally resolved, sorted, non-overlapping candidates.
    fn recognize(&self, doc: &DocView<'_>, tokens: &[Token]) -> Result<Vec<Candidate>>;
}

/// The five recognizers in merge priority order.
pub(crate) fn all() -> [&'static dyn Recognizer; 5] {
    [
        &time::TimeRecognizer,
        &amount::AmountRecognizer,
        &person::PersonRecognizer,
        &location::LocationRecognizer,
        &organization::OrganizationRecognizer,
    ]
}

/// Inserts `cand` into a recognizer-local result set.
///
/// Accepted only when strictly longer than every overlapping incumbent;
/// acceptance evicts all of them. Equal-length or shorter overlapping
/// candidates are discarded.
pub(crate) fn push_longest(set: &mut Vec<Candidate>, cand: Candidate) {
    if set
        .iter()
        .any(|held| held.overlaps(&cand) && cand.len() <= held.len())
    {
        return;
    }
    set.retain(|held| !held.overlaps(&cand));
    set.push(cand);
}

/// Orders a local result set by start offset for handoff to the merger.
pub(crate) fn sort_candidates(set: &mut Vec<Candidate>) {
    set.sort_unstable_by_key(|c| (c.start, c.end));
}

/// True for chars in the main CJK ideograph blocks.
pub(crate) fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4e00}'..='\u{9fff}' | '\u{3400}'..='\u{4dbf}' | '\u{f900}'..='\u{faff}')
}

/// True for determiner-like chars (see [`DETERMINER_CHARS`]).
pub(crate) fn is_determiner(c: char) -> bool {
    DETERMINER_CHARS.contains(c)
}

/// True when the chars starting at `pos` spell out `needle`.
pub(crate) fn starts_with_at(chars: &[char], pos: usize, needle: &str) -> bool {
    let mut i = pos;
    for c in needle.chars() {
        if chars.get(i) != Some(&c) {
            return false;
        }
        i += 1;
    }
    true
}

/// True when a single-char token tagged as a preposition starts at `pos`.
///
/// The suffix recognizers use this to trim a leading 由/据/经 off a match.
/// Those chars cannot go into [`HAN_STOP_CHARS`] because they also occur
/// inside real names (经济日报, 数据公司, 自由大道), so the prefix class
/// swallows them and the token stream is the only reliable boundary signal.
pub(crate) fn single_char_preposition_at(tokens: &[Token], pos: usize) -> bool {
    tokens
        .iter()
        .any(|t| t.start == pos && t.end == pos + 1 && t.pos == PosTag::Preposition)
}

/// True when `[start, end)` lines up with token boundaries on both sides.
///
/// A location or organization match that starts or ends inside a token is
/// matching inside a longer word: 告 glued from 被告, or a 市 suffix taken
/// out of 市场. With no token stream available every boundary is allowed.
pub(crate) fn aligned_with_tokens(tokens: &[Token], start: usize, end: usize) -> bool {
    tokens.is_empty()
        || (tokens.iter().any(|t| t.start == start) && tokens.iter().any(|t| t.end == end))
}

/// Earliest token start inside `[start, end)`, if any.
pub(crate) fn token_start_within(tokens: &[Token], start: usize, end: usize) -> Option<usize> {
    tokens
        .iter()
        .map(|t| t.start)
        .filter(|&s| s >= start && s < end)
        .min()
}

/// Char length of the longest entry in `suffixes` that `text` ends with.
pub(crate) fn longest_suffix_len(text: &str, suffixes: &[&str]) -> usize {
    suffixes
        .iter()
        .filter(|s| text.ends_with(*s))
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0)
}
