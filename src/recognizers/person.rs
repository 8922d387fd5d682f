//! Person name recognizer (人名).
//!
//! Candidates come from four tiers evaluated in order, earlier tiers taking
//! unconditional priority over later ones:
//!
//! (a) redacted names of the 张某/李某某1 convention used in legal documents,
//! (b) a roster of well-known public figures,
//! (c) surname + two-char given name, validated by character class and
//!     boundary checks alone,
//! (d) surname + one-char given name, accepted only next to a contextual
//!     cue token (a role noun or a reporting verb); two-char names without
//!     context are too ambiguous to keep.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entity::{EntityType, Token};
use crate::error::Result;
use crate::offset::DocView;
use crate::recognizers::{
    is_determiner, organization, push_longest, sort_candidates, Candidate, Recognizer, Source,
    MIN_SPAN_CHARS,
};

/// Frequent single-char surnames.
const SURNAME_CHARS: &str = "王李张刘陈杨黄赵吴周徐孙马朱胡郭何高林罗郑梁谢宋唐许韩冯邓\
曹彭曾肖田董袁潘于蒋蔡余杜叶程苏魏吕丁任沈姚卢姜崔钟谭陆汪范金石廖贾夏韦傅方白邹孟熊秦邱\
江尹薛闫段雷侯龙史陶黎贺顾毛郝龚邵万钱严覃武戴莫孔向汤";

/// Two-char compound surnames.
const COMPOUND_SURNAMES: &[&str] = &[
    "欧阳", "司马", "诸葛", "上官", "夏侯", "司徒", "皇甫", "尉迟", "长孙", "慕容",
];

/// Chars that plausibly appear in given names. Function words, suffix heads
/// of organization/location patterns, and similar grammar chars are left
/// out on purpose, so a name candidate cannot leak into the surrounding
/// phrase or into an institution name.
const GIVEN_NAME_CHARS: &str = "伟刚勇毅俊峰强军平保东文辉力明永健世广志义兴良海山仁波宁贵\
福生龙元全国胜祥才发武新利清飞彬富顺信子杰涛昌成康星光天达安岩中茂进林坚彪博诚先敬震振壮\
思群豪心邦承乐绍功松善厚庆磊民友裕河哲江超浩亮政谦亨奇固之轮翰朗伯宏言若鸣朋斌梁栋维启克\
伦翔旭鹏泽晨辰士以建家致树炎德时泰盛雄琛钧冠策腾楠榕风航弘大千丰云金秀娟英华慧巧美娜静淑\
惠珠翠雅芝玉萍红娥玲芬芳燕彩春菊兰凤洁梅琳素莲真环雪荣爱妹霞香月莺媛艳瑞凡佳嘉琼勤珍贞莉\
桂娣璧璐娅琦晶妍茜秋珊莎锦青倩婷姣婉娴瑾颖露瑶怡婵雁蓓纨仪荷丹蓉眉君琴蕊薇菁梦岚苑婕馨瑗\
琰韵融园艺咏卿聪澜纯毓悦昭冰爽琬茗羽希欣飘育滢馥筠柔竹霭凝晓欢霄枫芸菲寒伊亚宜可姬舒影荔\
三四五六";

/// Known public figures matched literally.
const PERSON_ROSTER: &[&str] = &[
    "张三", "李四", "王五", "赵六", "张三丰", "孔子", "孟子", "老子", "李白", "杜甫",
    "苏轼", "曹雪芹", "鲁迅", "老舍", "巴金", "茅盾", "金庸", "莫言", "琼瑶", "钱学森",
    "邓稼先", "华罗庚", "陈景润", "袁隆平", "屠呦呦", "钟南山", "李四光", "茅以升",
    "竺可桢", "诸葛亮", "马云", "马化腾", "李彦宏", "雷军", "任正非", "董明珠",
    "刘强东", "张一鸣", "姚明", "刘翔", "郎平", "李娜", "邓亚萍", "张艺谋", "陈凯歌",
    "巩俐", "章子怡", "成龙", "周杰伦", "王菲", "赵本山", "张学友", "张学良",
];

/// Ordinary vocabulary that happens to decompose as surname + given char.
const PERSON_EXCLUSIONS: &[&str] = &[
    "马上", "王国", "白天", "金额", "高兴", "高度", "方面", "方法", "叶子", "石头",
    "钱包", "武器", "孙子", "江山", "林业", "田地", "雷达", "钟表", "黄金", "白云",
];

/// Role nouns that license a two-char name when adjacent to it.
const ROLE_NOUNS: &[&str] = &[
    "原告", "被告", "法官", "律师", "医生", "护士", "教授", "老师", "教师", "记者",
    "经理", "董事长", "总经理", "总裁", "主任", "主席", "市长", "省长", "县长", "部长",
    "局长", "科长", "队长", "班长", "同学", "先生", "女士", "小姐", "博士", "工程师",
    "设计师", "司机", "警官", "民警", "证人", "嫌疑人", "被害人", "辩护人", "患者",
    "选手", "演员", "歌手", "作家", "导演",
];

/// Reporting verbs that license a two-char name when immediately after it.
const REPORTING_VERBS: &[&str] = &[
    "说", "表示", "认为", "指出", "强调", "称", "介绍", "回应", "透露", "宣布",
    "坦言", "回忆", "补充", "反驳", "解释", "承认", "否认", "主张", "声称", "告诉",
];

static REDACTED: Lazy<Regex> = Lazy::new(|| {
    let compound = COMPOUND_SURNAMES.join("|");
    Regex::new(&format!("(?:{compound}|[{SURNAME_CHARS}])某{{1,2}}[0-9]{{0,2}}"))
        .expect("valid regex")
});

/// True for chars of the given-name character class. Also consulted by the
/// gazetteer matcher to avoid truncating a longer name.
pub(crate) fn is_given_name_char(c: char) -> bool {
    GIVEN_NAME_CHARS.contains(c)
}

/// Recognizes person names through the four-tier scheme.
pub(crate) struct PersonRecognizer;

impl Recognizer for PersonRecognizer {
    fn name(&self) -> &'static str {
        "person"
    }

    fn recognize(&self, doc: &DocView<'_>, tokens: &[Token]) -> Result<Vec<Candidate>> {
        let chars = doc.chars();
        let mut accepted: Vec<Candidate> = Vec::new();

        // Tier (a): redacted names.
        let mut tier = Vec::new();
        for m in REDACTED.find_iter(doc.text()) {
            let start = doc.char_index(m.start());
            let end = doc.char_index(m.end());
            if end - start < MIN_SPAN_CHARS {
                continue;
            }
            if preceded_by_determiner(chars, start) {
                continue;
            }
            push_longest(&mut tier, person(start, end));
        }
        accepted.extend(tier);

        // Tier (b): roster of known figures.
        let mut tier = Vec::new();
        for name in PERSON_ROSTER {
            for (byte_start, m) in doc.text().match_indices(name) {
                let start = doc.char_index(byte_start);
                let end = start + m.chars().count();
                if preceded_by_determiner(chars, start) {
                    continue;
                }
                // A given-name char right after means we are looking at the
                // head of a longer name; an institution suffix means the
                // organization recognizer owns the longer span.
                if doc.char_at(end).is_some_and(is_given_name_char) {
                    continue;
                }
                if organization::org_suffix_at(chars, end) {
                    continue;
                }
                if blocked(&accepted, start, end) {
                    continue;
                }
                push_longest(&mut tier, person(start, end));
            }
        }
        accepted.extend(tier);

        // Tier (c): surname + two-char given name.
        let mut tier = Vec::new();
        for i in 0..chars.len() {
            let Some(sur_len) = surname_len_at(chars, i) else {
                continue;
            };
            let end = i + sur_len + 2;
            if end > chars.len() {
                continue;
            }
            if !is_given_name_char(chars[i + sur_len]) || !is_given_name_char(chars[end - 1]) {
                continue;
            }
            if preceded_by_determiner(chars, i)
                || doc.char_at(end).is_some_and(is_given_name_char)
                || organization::org_suffix_at(chars, end)
                || is_excluded(doc, i, end)
                || blocked(&accepted, i, end)
            {
                continue;
            }
            push_longest(&mut tier, person(i, end));
        }
        accepted.extend(tier);

        // Tier (d): surname + one-char given name, context-gated.
        let mut tier = Vec::new();
        for i in 0..chars.len() {
            let Some(sur_len) = surname_len_at(chars, i) else {
                continue;
            };
            let end = i + sur_len + 1;
            if end > chars.len() || !is_given_name_char(chars[end - 1]) {
                continue;
            }
            if preceded_by_determiner(chars, i)
                || doc.char_at(end).is_some_and(is_given_name_char)
                || organization::org_suffix_at(chars, end)
                || is_excluded(doc, i, end)
                || blocked(&accepted, i, end)
            {
                continue;
            }
            if !has_context_cue(tokens, i, end) {
                continue;
            }
            push_longest(&mut tier, person(i, end));
        }
        accepted.extend(tier);

        sort_candidates(&mut accepted);
        Ok(accepted)
    }
}

fn person(start: usize, end: usize) -> Candidate {
    Candidate::new(start, end, EntityType::Person, Source::Person)
}

/// Surname length (1 or 2 chars) starting at `i`, compounds first.
fn surname_len_at(chars: &[char], i: usize) -> Option<usize> {
    if let (Some(&a), Some(&b)) = (chars.get(i), chars.get(i + 1)) {
        let is_compound = COMPOUND_SURNAMES.iter().any(|s| {
            let mut cs = s.chars();
            cs.next() == Some(a) && cs.next() == Some(b)
        });
        if is_compound {
            return Some(2);
        }
    }
    chars
        .get(i)
        .filter(|c| SURNAME_CHARS.contains(**c))
        .map(|_| 1)
}

fn preceded_by_determiner(chars: &[char], start: usize) -> bool {
    start > 0 && is_determiner(chars[start - 1])
}

fn is_excluded(doc: &DocView<'_>, start: usize, end: usize) -> bool {
    let text = doc.slice(start, end);
    PERSON_EXCLUSIONS.contains(&text.as_str())
}

/// Earlier tiers win unconditionally: any overlap with an already accepted
/// span disqualifies a later-tier candidate, length notwithstanding.
fn blocked(accepted: &[Candidate], start: usize, end: usize) -> bool {
    let cand = person(start, end);
    accepted.iter().any(|a| a.overlaps(&cand))
}

/// True when a cue token (role noun or reporting verb) sits within the two
/// tokens before the candidate or immediately after it.
fn has_context_cue(tokens: &[Token], start: usize, end: usize) -> bool {
    let is_cue =
        |w: &str| ROLE_NOUNS.contains(&w) || REPORTING_VERBS.contains(&w);
    let before = tokens
        .iter()
        .filter(|t| t.end <= start)
        .rev()
        .take(2)
        .any(|t| is_cue(&t.word));
    if before {
        return true;
    }
    tokens
        .iter()
        .find(|t| t.start >= end)
        .is_some_and(|t| t.start == end && is_cue(&t.word))
}
