//! Organization recognizer (组织机构).
//!
//! Two passes over the document: a roster of well-known institutions and
//! companies, then a suffix rule that matches an open prefix in front of an
//! institutional suffix such as 公司, 大学, or 研究院. The suffix rule is the
//! workhorse; the roster catches famous names that carry no suffix in running
//! text (华为, 新华社, 国务院).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entity::{EntityType, Token};
use crate::error::Result;
use crate::offset::DocView;
use crate::recognizers::{
    aligned_with_tokens, is_cjk, is_determiner, location, longest_suffix_len, push_longest,
    single_char_preposition_at, sort_candidates, starts_with_at, token_start_within, Candidate,
    Recognizer, Source, HAN_STOP_CHARS, MIN_SPAN_CHARS,
};

// ==================== Tables ====================

/// Institutional suffixes. Longer variants come first so the alternation
/// prefers the fullest form at a given split point (有限责任公司 over 公司).
pub(crate) const ORG_SUFFIXES: &[&str] = &[
    "有限责任公司",
    "股份有限公司",
    "有限公司",
    "集团",
    "公司",
    "银行",
    "大学",
    "学院",
    "中学",
    "小学",
    "幼儿园",
    // Composite institutional forms leave the prefix run free for the
    // administrative chain in front (浙江省杭州市中级 + 人民法院).
    "人民医院",
    "人民法院",
    "人民检察院",
    "医院",
    "法院",
    "检察院",
    "研究院",
    "研究所",
    "派出所",
    "公安局",
    "委员会",
    "协会",
    "学会",
    "基金会",
    "出版社",
    "电视台",
    "报社",
    "杂志社",
    "通讯社",
    "事务所",
    "俱乐部",
    "合作社",
    "人民政府",
    "政府",
    "厂",
];

/// Institutions and companies usually written without any suffix.
const ORG_LITERALS: &[&str] = &[
    "新华社",
    "中央电视台",
    "人民日报",
    "光明日报",
    "国务院",
    "发改委",
    "证监会",
    "银保监会",
    "教育部",
    "外交部",
    "财政部",
    "公安部",
    "商务部",
    "科技部",
    "国防部",
    "民政部",
    "司法部",
    "联合国",
    "世界卫生组织",
    "世卫组织",
    "国家电网",
    "中国移动",
    "中国联通",
    "中国电信",
    "中国进出口银行",
    "中石油",
    "中石化",
    "腾讯",
    "阿里巴巴",
    "百度",
    "华为",
    "字节跳动",
    "京东",
    "美团",
    "比亚迪",
    "海尔",
    "格力",
    "茅台",
    "五粮液",
    "微软",
    "谷歌",
    "特斯拉",
    "亚马逊",
];

/// Suffix-rule matches ending in one of these are ordinary nouns, not names.
const ORG_EXCLUSIONS: &[&str] = &[
    "子公司",
    "分公司",
    "总公司",
    "母公司",
    "该公司",
    "本公司",
    "贵公司",
    "皮包公司",
    "上市公司",
    "空壳公司",
    "跨国公司",
    "考上大学",
    "上大学",
    "读大学",
    "念大学",
    "住院",
    "出院",
];

/// A suffix-rule span containing any of these is conversational filler
/// rather than a proper name.
const BLACKLIST_CHARS: &str = "这那该或和与最的了是我你他她它们";

static SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    let suffixes = ORG_SUFFIXES.join("|");
    // 家 additionally breaks the prefix run here: it is the measure word in
    // front of company nouns (一家公司) far more often than a name character.
    Regex::new(&format!(
        "[\\p{{Han}}--[{HAN_STOP_CHARS}家]]{{2,8}}(?:{suffixes})"
    ))
    .expect("valid regex")
});

// ==================== Shared helpers ====================

/// True when an institutional suffix starts exactly at `pos`. The person and
/// location recognizers use this to back off from spans that are really the
/// head of an organization name (马云基金会, 北京大学).
pub(crate) fn org_suffix_at(chars: &[char], pos: usize) -> bool {
    ORG_SUFFIXES.iter().any(|s| starts_with_at(chars, pos, s))
}

/// True when a roster organization longer than `end - start` begins at
/// `start`. Lets the location recognizer drop 中国 inside 中国移动.
pub(crate) fn org_literal_extending(chars: &[char], start: usize, end: usize) -> bool {
    ORG_LITERALS
        .iter()
        .any(|l| l.chars().count() > end - start && starts_with_at(chars, start, l))
}

fn has_blacklisted_char(text: &str) -> bool {
    text.chars().any(|c| BLACKLIST_CHARS.contains(c))
}

/// A suffix-rule match must start at a plausible name boundary: document
/// start, a non-CJK character, a function character that the prefix class
/// already refuses, or the tail of a place name (上海浦发银行).
fn valid_preceding(chars: &[char], start: usize) -> bool {
    if start == 0 {
        return true;
    }
    let prev = chars[start - 1];
    if !is_cjk(prev) {
        return true;
    }
    if HAN_STOP_CHARS.contains(prev) || prev == '家' {
        return true;
    }
    location::place_name_ending_at(chars, start)
}

// ==================== Recognizer ====================

/// Rule-based organization recognizer.
pub(crate) struct OrganizationRecognizer;

impl Recognizer for OrganizationRecognizer {
    fn name(&self) -> &'static str {
        "organization"
    }

    fn recognize(&self, doc: &DocView<'_>, tokens: &[Token]) -> Result<Vec<Candidate>> {
        let chars = doc.chars();
        let mut held: Vec<Candidate> = Vec::new();

        for literal in ORG_LITERALS {
            for (byte_start, matched) in doc.text().match_indices(literal) {
                let start = doc.char_index(byte_start);
                let end = start + matched.chars().count();
                if start > 0 && is_determiner(chars[start - 1]) {
                    continue;
                }
                // 华为 inside 才华为人称道 starts mid-token and is no mention.
                if !aligned_with_tokens(tokens, start, end) {
                    continue;
                }
                push_longest(
                    &mut held,
                    Candidate::new(start, end, EntityType::Organization, Source::Organization),
                );
            }
        }

        for m in SUFFIX_RE.find_iter(doc.text()) {
            let matched_start = doc.char_index(m.start());
            let end = doc.char_index(m.end());
            let mut start = matched_start;
            if !tokens.is_empty() {
                // The prefix class can open a match mid-word (被告天合公司
                // opens inside 被告); snap to the first token boundary,
                // then trim any leading preposition token (由恒大集团).
                if let Some(snap) = token_start_within(tokens, start, end) {
                    start = snap;
                }
                while start < end && single_char_preposition_at(tokens, start) {
                    start += 1;
                }
            }
            if end - start < MIN_SPAN_CHARS {
                continue;
            }
            let text = doc.slice(start, end);
            if start > matched_start
                && end - start < longest_suffix_len(&text, ORG_SUFFIXES) + 2
            {
                continue;
            }
            if has_blacklisted_char(&text) {
                continue;
            }
            if ORG_EXCLUSIONS.iter().any(|e| text.ends_with(e)) {
                continue;
            }
            if start == matched_start && !valid_preceding(chars, start) {
                continue;
            }
            if !aligned_with_tokens(tokens, start, end) {
                continue;
            }
            push_longest(
                &mut held,
                Candidate::new(start, end, EntityType::Organization, Source::Organization),
            );
        }

        sort_candidates(&mut held);
        Ok(held)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<(String, usize, usize)> {
        let doc = DocView::new(text);
        OrganizationRecognizer
            .recognize(&doc, &[])
            .expect("organization recognizer is infallible")
            .iter()
            .map(|c| (doc.slice(c.start, c.end), c.start, c.end))
            .collect()
    }

    #[test]
    fn suffix_rule_takes_full_company_name() {
        assert_eq!(
            run("阿里巴巴集团发布了财报"),
            vec![("阿里巴巴集团".to_string(), 0, 6)]
        );
    }

    #[test]
    fn longest_suffix_wins_at_split() {
        assert_eq!(
            run("盛大网络股份有限公司成立"),
            vec![("盛大网络股份有限公司".to_string(), 0, 10)]
        );
    }

    #[test]
    fn university_after_preposition() {
        assert_eq!(run("他在清华大学读书"), vec![("清华大学".to_string(), 2, 6)]);
    }

    #[test]
    fn measure_word_does_not_join_prefix() {
        // 家大 must not be glued onto 公司 as a name prefix.
        assert_eq!(run("一家大公司倒闭了"), Vec::new());
    }

    #[test]
    fn generic_company_nouns_excluded() {
        assert_eq!(run("多家上市公司发布公告"), Vec::new());
        assert_eq!(run("考上大学是好事"), Vec::new());
    }

    #[test]
    fn roster_names_without_suffix() {
        assert_eq!(run("华为发布新手机"), vec![("华为".to_string(), 0, 2)]);
        assert_eq!(run("教育部发布新政策"), vec![("教育部".to_string(), 0, 3)]);
    }

    #[test]
    fn factory_suffix() {
        assert_eq!(run("他在钢铁厂上班"), vec![("钢铁厂".to_string(), 2, 5)]);
    }

    #[test]
    fn prefix_cap_rejects_runaway_span() {
        // Eight prefix characters starting mid-run leave a CJK character
        // before the match, which is not a name boundary.
        assert_eq!(run("天地玄黄宇宙洪荒盛世公司"), Vec::new());
    }

    #[test]
    fn leading_preposition_is_trimmed() {
        use crate::entity::PosTag;

        let doc = DocView::new("由恒大集团开发");
        let tokens = vec![
            Token::new("由", PosTag::Preposition, 0),
            Token::new("恒大", PosTag::Noun, 1),
            Token::new("集团", PosTag::Noun, 3),
            Token::new("开发", PosTag::Verb, 5),
        ];
        let spans: Vec<_> = OrganizationRecognizer
            .recognize(&doc, &tokens)
            .expect("organization recognizer is infallible")
            .iter()
            .map(|c| (doc.slice(c.start, c.end), c.start, c.end))
            .collect();
        assert_eq!(spans, vec![("恒大集团".to_string(), 1, 5)]);
    }

    #[test]
    fn glued_role_noun_snaps_to_token_start() {
        use crate::entity::PosTag;

        // 告 escapes the prefix class after the stop char 被, so the raw
        // match is 告天合公司; the token boundary recovers the real name.
        let doc = DocView::new("被告天合公司败诉");
        let tokens = vec![
            Token::new("被告", PosTag::Noun, 0),
            Token::new("天合", PosTag::Noun, 2),
            Token::new("公司", PosTag::Noun, 4),
            Token::new("败诉", PosTag::Verb, 6),
        ];
        let spans: Vec<_> = OrganizationRecognizer
            .recognize(&doc, &tokens)
            .expect("organization recognizer is infallible")
            .iter()
            .map(|c| (doc.slice(c.start, c.end), c.start, c.end))
            .collect();
        assert_eq!(spans, vec![("天合公司".to_string(), 2, 6)]);
    }

    #[test]
    fn composite_suffix_fits_nested_admin_chain() {
        assert_eq!(
            run("浙江省杭州市中级人民法院宣判"),
            vec![("浙江省杭州市中级人民法院".to_string(), 0, 12)]
        );
    }

    #[test]
    fn place_name_counts_as_boundary() {
        let chars: Vec<char> = "上海浦发银行".chars().collect();
        assert!(valid_preceding(&chars, 2));
        let chars: Vec<char> = "果粒公司".chars().collect();
        assert!(!valid_preceding(&chars, 1));
        assert!(valid_preceding(&chars, 0));
    }

    #[test]
    fn org_suffix_lookup() {
        let chars: Vec<char> = "北京大学".chars().collect();
        assert!(org_suffix_at(&chars, 2));
        assert!(!org_suffix_at(&chars, 0));
        let chars: Vec<char> = "孔子学院".chars().collect();
        assert!(org_suffix_at(&chars, 2));
    }

    #[test]
    fn blacklisted_span_dropped() {
        assert!(has_blacklisted_char("这个公司"));
        assert!(!has_blacklisted_char("格力电器"));
    }

    #[test]
    fn roster_extension_lookup() {
        let chars: Vec<char> = "中国移动宣布".chars().collect();
        assert!(org_literal_extending(&chars, 0, 2));
        let chars: Vec<char> = "中国经济".chars().collect();
        assert!(!org_literal_extending(&chars, 0, 2));
    }
}
