//! Quantity and monetary amount recognizer (数值金额).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entity::{EntityType, Token};
use crate::error::Result;
use crate::offset::DocView;
use crate::recognizers::{
    push_longest, sort_candidates, Candidate, Recognizer, Source, MIN_SPAN_CHARS,
};

static CURRENCY_PREFIXED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[¥￥$€£]\s?\d+(?:,\d{3})*(?:\.\d+)?[万亿]?元?").expect("valid regex")
});

static RMB_PREFIXED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"人民币\s?\d+(?:,\d{3})*(?:\.\d+)?[万亿千百]?元?").expect("valid regex")
});

static SCALED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:\.\d+)?(?:多|余)?[万亿](?:元|美元|欧元|英镑|日元|港元|人民币)?")
        .expect("valid regex")
});

static UNIT_SUFFIXED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:,\d{3})*(?:\.\d+)?[万亿千百]?(?:元|美元|欧元|英镑|日元|港元|人民币|块钱|块)")
        .expect("valid regex")
});

static CN_NUMERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[一二两三四五六七八九十百千万亿零点]+(?:多|余)?(?:元|块钱|块|美元|欧元|英镑|日元|港元|人民币)",
    )
    .expect("valid regex")
});

static PERCENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:\.\d+)?%|百分之[一二两三四五六七八九十百千零点]+").expect("valid regex")
});

/// Counted quantities: digit-led heads only, so 三亚/九龙 style numeral-led
/// names stay out of reach. Longer unit spellings come first in the
/// alternation (人次 before 人, 平方米/千米 before 米).
static MEASURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\d+(?:,\d{3})*(?:\.\d+)?(?:多|余)?[万亿]?(?:多|余)?(?:人次|平方米|公里|千米|公斤|千克|吨|台|辆|件|人|米)",
    )
    .expect("valid regex")
});

/// Pattern rules in order: most specific first, though the local
/// longest-match-wins resolution makes containment between them safe in
/// either order.
static PATTERNS: &[&Lazy<Regex>] = &[
    &CURRENCY_PREFIXED,
    &RMB_PREFIXED,
    &SCALED,
    &UNIT_SUFFIXED,
    &CN_NUMERAL,
    &PERCENT,
    &MEASURE,
];

/// Chars that turn a numeral+元 match into ordinary vocabulary
/// (二元论, 一元化, 三元素) rather than an amount.
const UNIT_CONTINUATIONS: &str = "论化素";

/// Recognizes currency amounts, scaled quantities, and percentages.
pub(crate) struct AmountRecognizer;

impl Recognizer for AmountRecognizer {
    fn name(&self) -> &'static str {
        "amount"
    }

    fn recognize(&self, doc: &DocView<'_>, _tokens: &[Token]) -> Result<Vec<Candidate>> {
        let mut held = Vec::new();

        for re in PATTERNS {
            for m in re.find_iter(doc.text()) {
                let start = doc.char_index(m.start());
                let end = doc.char_index(m.end());
                if end - start < MIN_SPAN_CHARS {
                    continue;
                }
                if doc.char_at(end).is_some_and(|c| UNIT_CONTINUATIONS.contains(c)) {
                    continue;
                }
                // 人 as a measure word must not eat into 人民币/人民广场.
                if m.as_str().ends_with('人') && doc.char_at(end) == Some('民') {
                    continue;
                }
                push_longest(
                    &mut held,
                    Candidate::new(start, end, EntityType::Money, Source::Amount),
                );
            }
        }

        sort_candidates(&mut held);
        Ok(held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<(String, usize, usize)> {
        let doc = DocView::new(text);
        AmountRecognizer
            .recognize(&doc, &[])
            .unwrap()
            .into_iter()
            .map(|c| (doc.slice(c.start, c.end), c.start, c.end))
            .collect()
    }

    #[test]
    fn scaled_amount_with_unit() {
        assert_eq!(run("金额为100万元。"), vec![("100万元".to_string(), 3, 8)]);
        assert_eq!(run("投资3.5亿"), vec![("3.5亿".to_string(), 2, 6)]);
        assert_eq!(run("营收200多万元"), vec![("200多万元".to_string(), 2, 8)]);
    }

    #[test]
    fn currency_prefixed() {
        assert_eq!(run("票价¥580"), vec![("¥580".to_string(), 2, 6)]);
        assert_eq!(run("补贴￥3万"), vec![("￥3万".to_string(), 2, 5)]);
        assert_eq!(run("售价$1,299.99"), vec![("$1,299.99".to_string(), 2, 11)]);
    }

    #[test]
    fn currency_prefix_beats_contained_amount() {
        assert_eq!(run("¥100万元整"), vec![("¥100万元".to_string(), 0, 6)]);
    }

    #[test]
    fn unit_suffixed_digits() {
        assert_eq!(run("付了5000元"), vec![("5000元".to_string(), 2, 7)]);
        assert_eq!(run("一共1,234元"), vec![("1,234元".to_string(), 2, 8)]);
    }

    #[test]
    fn chinese_numeral_amounts() {
        assert_eq!(run("预算三百万元"), vec![("三百万元".to_string(), 2, 6)]);
        assert_eq!(run("支付五十块钱"), vec![("五十块钱".to_string(), 2, 6)]);
    }

    #[test]
    fn rmb_prefixed() {
        assert_eq!(run("人民币500万元整"), vec![("人民币500万元".to_string(), 0, 8)]);
        assert_eq!(run("收取人民币1,000元"), vec![("人民币1,000元".to_string(), 2, 11)]);
    }

    #[test]
    fn scale_char_before_unit() {
        assert_eq!(run("花费5千元"), vec![("5千元".to_string(), 2, 5)]);
        assert_eq!(run("五百万人民币到账"), vec![("五百万人民币".to_string(), 0, 6)]);
    }

    #[test]
    fn measure_quantities() {
        assert_eq!(run("现场500人"), vec![("500人".to_string(), 2, 6)]);
        assert_eq!(run("出动120辆消防车"), vec![("120辆".to_string(), 2, 6)]);
        assert_eq!(run("全程120公里"), vec![("120公里".to_string(), 2, 7)]);
        assert_eq!(run("产能3.5万台"), vec![("3.5万台".to_string(), 2, 7)]);
        assert_eq!(run("接待游客3万多人"), vec![("3万多人".to_string(), 4, 8)]);
    }

    #[test]
    fn measure_does_not_eat_into_renminbi() {
        assert_eq!(run("支付100人民币"), vec![("100人民币".to_string(), 2, 8)]);
    }

    #[test]
    fn percentages() {
        assert_eq!(run("上涨8%"), vec![("8%".to_string(), 2, 4)]);
        assert_eq!(run("占百分之五十"), vec![("百分之五十".to_string(), 1, 6)]);
    }

    #[test]
    fn vocabulary_units_are_rejected() {
        assert!(run("二元论的观点").is_empty());
        assert!(run("一元化管理").is_empty());
        assert!(run("多元化战略").is_empty());
    }

    #[test]
    fn plain_numbers_are_not_amounts() {
        assert!(run("编号12345").is_empty());
        assert!(run("他喜欢数学").is_empty());
    }
}
