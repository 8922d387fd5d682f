//! Document sentiment scoring.
//!
//! Polarity models sit behind the [`SentimentModel`] trait and return a raw
//! score in `[0, 1]`. The pipeline maps scores onto [`Polarity`] with fixed
//! thresholds and substitutes a neutral fallback when the model fails or
//! the document is empty; scorer trouble never fails an annotation call.

use crate::entity::Polarity;
use crate::error::Result;

/// Scores above this are positive.
const POSITIVE_THRESHOLD: f64 = 0.65;

/// Scores below this are negative.
const NEGATIVE_THRESHOLD: f64 = 0.35;

/// Score reported when a document cannot be scored at all.
pub(crate) const FALLBACK_SCORE: f64 = 0.5;

/// A document polarity model producing a score in `[0, 1]`,
/// where 1.0 is maximally positive.
pub trait SentimentModel: Send + Sync {
    /// Scores `text`; implementations may fail, the pipeline degrades to
    /// a neutral fallback.
    fn score(&self, text: &str) -> Result<f64>;
}

/// Maps a raw score onto a polarity label: `> 0.65` positive, `< 0.35`
/// negative, neutral in between.
#[must_use]
pub fn polarity_of(score: f64) -> Polarity {
    if score > POSITIVE_THRESHOLD {
        Polarity::Positive
    } else if score < NEGATIVE_THRESHOLD {
        Polarity::Negative
    } else {
        Polarity::Neutral
    }
}

/// Scores a document, degrading to `(中性, 0.5)` on empty input or model
/// failure. The failure branch is explicit and logged, never silent.
pub(crate) fn assess(model: &dyn SentimentModel, text: &str) -> (Polarity, f64) {
    if text.is_empty() {
        return (Polarity::Neutral, FALLBACK_SCORE);
    }
    match model.score(text) {
        Ok(score) => (polarity_of(score), score),
        Err(err) => {
            log::warn!("sentiment model failed, falling back to neutral: {err}");
            (Polarity::Neutral, FALLBACK_SCORE)
        }
    }
}

// ============================================================================
// Default lexicon model
// ============================================================================

const POSITIVE_WORDS: &[&str] = &[
    "优秀", "成功", "喜欢", "满意", "高兴", "幸福", "精彩", "出色", "快乐", "兴奋",
    "美好", "顺利", "优质", "可靠", "惊喜", "提升", "突破", "领先", "创新", "温暖",
    "感谢", "支持", "胜利", "开心", "希望", "良好", "好评", "点赞", "很好", "真好",
];

const NEGATIVE_WORDS: &[&str] = &[
    "失败", "糟糕", "讨厌", "失望", "愤怒", "悲伤", "痛苦", "遗憾", "亏损", "危机",
    "事故", "投诉", "批评", "质疑", "困难", "担忧", "恶化", "崩溃", "违规", "处罚",
    "欺诈", "虚假", "污染", "伤害", "损失", "错误", "很差", "太差", "差评", "糟心",
];

/// Default polarity model: counts hits against fixed positive and negative
/// word lists and reports `positive / (positive + negative)`, or 0.5 when
/// neither list matches. Crude, but deterministic and dependency-free.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    /// Creates the default lexicon model.
    #[must_use]
    pub fn new() -> Self {
        LexiconSentiment
    }
}

impl SentimentModel for LexiconSentiment {
    fn score(&self, text: &str) -> Result<f64> {
        let positive: usize = POSITIVE_WORDS.iter().map(|w| text.matches(w).count()).sum();
        let negative: usize = NEGATIVE_WORDS.iter().map(|w| text.matches(w).count()).sum();
        let total = positive + negative;
        if total == 0 {
            return Ok(FALLBACK_SCORE);
        }
        Ok(positive as f64 / total as f64)
    }
}
