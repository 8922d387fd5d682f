//! Date and time expression recognizer (时间日期).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entity::{EntityType, Token};
use crate::error::Result;
use crate::offset::DocView;
use crate::recognizers::{
    is_determiner, push_longest, sort_candidates, Candidate, Recognizer, Source, MIN_SPAN_CHARS,
};

/// Standalone calendar words, matched literally. Relative-day words like
/// 当天 are only accepted when not preceded by a determiner (每当天气 must
/// not yield 当天).
const TIME_WORDS: &[&str] = &[
    "今天", "明天", "昨天", "前天", "后天", "当天", "今日", "昨日", "明日", "当日",
    "翌日", "近日", "日前", "今早", "今晚", "昨晚", "明晚", "当晚", "晚上", "上午",
    "下午", "中午", "凌晨", "傍晚", "清晨", "深夜", "半夜", "午夜", "今年", "明年",
    "去年", "前年", "后年", "当年", "本月", "上月", "下月", "当月", "上个月",
    "下个月", "本周", "上周", "下周", "周末", "春节", "元旦", "除夕", "元宵节",
    "清明节", "劳动节", "端午节", "儿童节", "中秋节", "国庆节", "重阳节", "春季",
    "夏季", "秋季", "冬季", "春天", "夏天", "秋天", "冬天",
];

static FULL_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}年\d{1,2}月\d{1,2}日").expect("valid regex"));

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}[-/]\d{1,2}[-/]\d{1,2}").expect("valid regex"));

static YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{4}年\d{1,2}月").expect("valid regex"));

static YEAR_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}年").expect("valid regex"));

static MONTH_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}月\d{1,2}日").expect("valid regex"));

static CN_MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[一二三四五六七八九十]{1,3}月[一二三四五六七八九十]{1,3}日").expect("valid regex")
});

static WEEKDAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:星期|礼拜|周)[一二三四五六日天]").expect("valid regex"));

static CLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:上午|下午|中午|凌晨|晚上)?\d{1,2}[点时](?:半|\d{1,2}分(?:\d{1,2}秒)?)?")
        .expect("valid regex")
});

static CLOCK_COLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{1,2}:\d{2}(?::\d{2})?").expect("valid regex"));

static RELATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9一二两三四五六七八九十百千几数]+个?(?:小时|分钟|秒钟|星期|周|月|年|天|日|秒)[前后内]")
        .expect("valid regex")
});

static DECADE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[12]?\d世纪(?:\d{2}年代)?|\d{2}年代").expect("valid regex"));

/// Parameterized patterns in rule order. Local longest-match-wins handles
/// the containment between them (a full date beats its own year part).
static PATTERNS: &[&Lazy<Regex>] = &[
    &FULL_DATE,
    &ISO_DATE,
    &YEAR_MONTH,
    &YEAR_ONLY,
    &MONTH_DAY,
    &CN_MONTH_DAY,
    &WEEKDAY,
    &CLOCK,
    &CLOCK_COLON,
    &RELATIVE,
    &DECADE,
];

/// Recognizes dates, clock times, weekdays, and relative time expressions.
pub(crate) struct TimeRecognizer;

impl Recognizer for TimeRecognizer {
    fn name(&self) -> &'static str {
        "time"
    }

    fn recognize(&self, doc: &DocView<'_>, _tokens: &[Token]) -> Result<Vec<Candidate>> {
        let mut held = Vec::new();

        for word in TIME_WORDS {
            for (byte_start, m) in doc.text().match_indices(word) {
                let start = doc.char_index(byte_start);
                let end = start + m.chars().count();
                if start > 0 && doc.char_at(start - 1).is_some_and(is_determiner) {
                    continue;
                }
                push(&mut held, start, end);
            }
        }

        for re in PATTERNS {
            for m in re.find_iter(doc.text()) {
                let start = doc.char_index(m.start());
                let end = doc.char_index(m.end());
                // A digit right before a digit-led match means we are inside
                // a longer number (e.g. 12024年 must not yield 2024年).
                if start > 0
                    && m.as_str().starts_with(|c: char| c.is_ascii_digit())
                    && doc.char_at(start - 1).is_some_and(|c| c.is_ascii_digit())
                {
                    continue;
                }
                push(&mut held, start, end);
            }
        }

        sort_candidates(&mut held);
        Ok(held)
    }
}

fn push(held: &mut Vec<Candidate>, start: usize, end: usize) {
    if end - start < MIN_SPAN_CHARS {
        return;
    }
    push_longest(held, Candidate::new(start, end, EntityType::Time, Source::Time));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<(String, usize, usize)> {
        let doc = DocView::new(text);
        TimeRecognizer
            .recognize(&doc, &[])
            .unwrap()
            .into_iter()
            .map(|c| (doc.slice(c.start, c.end), c.start, c.end))
            .collect()
    }

    #[test]
    fn full_date_is_one_span() {
        assert_eq!(run("2024年3月1日签约"), vec![("2024年3月1日".to_string(), 0, 9)]);
    }

    #[test]
    fn partial_dates_take_longest_form() {
        assert_eq!(run("2024年3月发布"), vec![("2024年3月".to_string(), 0, 7)]);
        assert_eq!(run("2024年的计划"), vec![("2024年".to_string(), 0, 5)]);
        assert_eq!(run("3月15日开幕"), vec![("3月15日".to_string(), 0, 5)]);
    }

    #[test]
    fn chinese_numeral_dates() {
        assert_eq!(run("十二月三十日"), vec![("十二月三十日".to_string(), 0, 6)]);
    }

    #[test]
    fn weekday_and_literal_are_separate_spans() {
        assert_eq!(
            run("星期三下午"),
            vec![("星期三".to_string(), 0, 3), ("下午".to_string(), 3, 5)]
        );
    }

    #[test]
    fn clock_times() {
        assert_eq!(run("下午3点30分开会"), vec![("下午3点30分".to_string(), 0, 7)]);
        assert_eq!(run("晚上8点半到家"), vec![("晚上8点半".to_string(), 0, 5)]);
        assert_eq!(run("会议13:45开始"), vec![("13:45".to_string(), 2, 7)]);
    }

    #[test]
    fn iso_dates() {
        assert_eq!(run("2024-03-15发布"), vec![("2024-03-15".to_string(), 0, 10)]);
        assert_eq!(run("日期2024/3/5起"), vec![("2024/3/5".to_string(), 2, 10)]);
    }

    #[test]
    fn day_words_overrule_embedded_ones() {
        // 日前 also matches at char 1, but the earlier 昨日 span keeps it out.
        assert_eq!(run("昨日前往上海"), vec![("昨日".to_string(), 0, 2)]);
        assert_eq!(run("三日前立案"), vec![("三日前".to_string(), 0, 3)]);
    }

    #[test]
    fn relative_expressions() {
        assert_eq!(run("三天前发生"), vec![("三天前".to_string(), 0, 3)]);
        assert_eq!(run("两个小时后到达"), vec![("两个小时后".to_string(), 0, 5)]);
        assert_eq!(run("几年内完成"), vec![("几年内".to_string(), 0, 3)]);
    }

    #[test]
    fn decades() {
        assert_eq!(run("20世纪90年代的事"), vec![("20世纪90年代".to_string(), 0, 8)]);
    }

    #[test]
    fn determiner_prefix_rejects_literal() {
        assert!(run("每当天气变化").is_empty());
    }

    #[test]
    fn digit_run_rejects_embedded_year() {
        assert!(run("编号12024年").is_empty());
    }

    #[test]
    fn no_time_in_plain_text() {
        assert!(run("他们在公园散步").is_empty());
    }
}
