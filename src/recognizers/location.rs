//! Location recognizer (地名).
//!
//! Combines gazetteer-style literal tables (countries, provinces, cities,
//! landmarks) with an administrative-suffix rule (`XX市`, `XX县`, `XX路`).
//! Natural-feature names (lakes, mountains, rivers) are matched only as
//! literals: a bare 湖 or 山 suffix swallows too many verb collocations to
//! be usable as a pattern.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entity::{EntityType, Token};
use crate::error::Result;
use crate::offset::DocView;
use crate::recognizers::{
    aligned_with_tokens, is_determiner, longest_suffix_len, organization, push_longest,
    single_char_preposition_at, sort_candidates, starts_with_at, token_start_within, Candidate,
    Recognizer, Source, HAN_STOP_CHARS, MIN_SPAN_CHARS,
};

// ==================== Tables ====================

const COUNTRIES: &[&str] = &[
    "中国",
    "美国",
    "日本",
    "韩国",
    "朝鲜",
    "英国",
    "法国",
    "德国",
    "俄罗斯",
    "印度",
    "巴西",
    "加拿大",
    "澳大利亚",
    "意大利",
    "西班牙",
    "葡萄牙",
    "荷兰",
    "瑞士",
    "瑞典",
    "挪威",
    "丹麦",
    "芬兰",
    "希腊",
    "波兰",
    "乌克兰",
    "土耳其",
    "埃及",
    "南非",
    "墨西哥",
    "阿根廷",
    "新加坡",
    "泰国",
    "越南",
    "缅甸",
    "柬埔寨",
    "老挝",
    "蒙古",
    "菲律宾",
    "马来西亚",
    "印度尼西亚",
    "巴基斯坦",
    "伊朗",
    "伊拉克",
    "以色列",
    "沙特阿拉伯",
];

const REGIONS: &[&str] = &[
    "北京",
    "上海",
    "天津",
    "重庆",
    "河北",
    "山西",
    "辽宁",
    "吉林",
    "黑龙江",
    "江苏",
    "浙江",
    "安徽",
    "福建",
    "江西",
    "山东",
    "河南",
    "湖北",
    "湖南",
    "广东",
    "海南",
    "四川",
    "贵州",
    "云南",
    "陕西",
    "甘肃",
    "青海",
    "台湾",
    "内蒙古",
    "广西",
    "西藏",
    "宁夏",
    "新疆",
    "香港",
    "澳门",
    "内蒙古自治区",
    "广西壮族自治区",
    "西藏自治区",
    "宁夏回族自治区",
    "新疆维吾尔自治区",
    "香港特别行政区",
    "澳门特别行政区",
];

const CITIES: &[&str] = &[
    "广州",
    "深圳",
    "杭州",
    "南京",
    "武汉",
    "成都",
    "西安",
    "长沙",
    "郑州",
    "济南",
    "青岛",
    "大连",
    "沈阳",
    "长春",
    "哈尔滨",
    "石家庄",
    "太原",
    "合肥",
    "南昌",
    "福州",
    "厦门",
    "宁波",
    "苏州",
    "无锡",
    "温州",
    "珠海",
    "东莞",
    "佛山",
    "昆明",
    "贵阳",
    "南宁",
    "海口",
    "兰州",
    "西宁",
    "银川",
    "拉萨",
    "乌鲁木齐",
    "呼和浩特",
    "桂林",
    "洛阳",
    "开封",
    "敦煌",
    "遵义",
    "延安",
    "丽江",
    "景德镇",
    "义乌",
    "连云港",
    "秦皇岛",
    "张家口",
    // Numeral-headed city names never survive the suffix rule, because the
    // numeral is a stop character. The literal is their only route in.
    "三亚",
    "九江",
    "十堰",
    "四平",
    "六安",
    "大同",
];

const LANDMARKS: &[&str] = &[
    "天安门",
    "故宫",
    "长城",
    "外滩",
    "西湖",
    "太湖",
    "洞庭湖",
    "鄱阳湖",
    "青海湖",
    "泰山",
    "黄山",
    "华山",
    "嵩山",
    "衡山",
    "庐山",
    "峨眉山",
    "武当山",
    "长白山",
    "天山",
    "昆仑山",
    "祁连山",
    "五台山",
    "普陀山",
    "珠穆朗玛峰",
    "长江",
    "黄河",
    "珠江",
    "淮河",
    "松花江",
    "嘉陵江",
    "湘江",
    "汉江",
    "赣江",
    "闽江",
    "澜沧江",
    "怒江",
    "雅鲁藏布江",
    "海南岛",
    "台湾岛",
    "钓鱼岛",
    "崇明岛",
];

/// Administrative and street suffixes, longer variants first.
pub(crate) const LOC_SUFFIXES: &[&str] = &[
    "特别行政区",
    "自治区",
    "自治州",
    "自治县",
    "开发区",
    "街道",
    "大道",
    "广场",
    "车站",
    "机场",
    "省",
    "市",
    "县",
    "区",
    "镇",
    "乡",
    "村",
    "街",
    "路",
];

/// Suffix-rule matches ending in one of these are common nouns, not places.
const LOC_EXCLUSIONS: &[&str] = &[
    "上市",
    "城市",
    "都市",
    "大都市",
    "超市",
    "股市",
    "楼市",
    "闹市",
    "菜市",
    "地区",
    "小区",
    "市区",
    "城区",
    "郊区",
    "社区",
    "片区",
    "灾区",
    "景区",
    "风景区",
    "辖区",
    "禁区",
    "误区",
    "节省",
    "外省",
    "全省",
    "全县",
    "全村",
    "城镇",
    "村镇",
    "乡镇",
    "小镇",
    "家乡",
    "故乡",
    "他乡",
    "异乡",
    "老乡",
    "城乡",
    "同乡",
    "水乡",
    "梦乡",
    "农村",
    "乡村",
    "渔村",
    "走路",
    "跑路",
    "迷路",
    "问路",
    "带路",
    "引路",
    "修路",
    "铺路",
    "让路",
    "赶路",
    "领路",
    "指路",
    "探路",
    "开路",
    "断路",
    "短路",
    "弯路",
    "套路",
    "思路",
    "出路",
    "道路",
    "公路",
    "马路",
    "铁路",
    "线路",
    "电路",
    "网路",
    "活路",
    "销路",
    "退路",
    "岔路",
    "末路",
    "歧路",
    "绝路",
    "死路",
    "生路",
    "心路",
    "来路",
    "半路",
    "上路",
    "沿路",
    "顺路",
    "小路",
    "大路",
    "逛街",
    "上街",
    "沿街",
    "扫街",
    "临街",
    "火车站",
    "汽车站",
    "飞机场",
];

static SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    let suffixes = LOC_SUFFIXES.join("|");
    Regex::new(&format!(
        "[\\p{{Han}}--[{HAN_STOP_CHARS}]]{{1,6}}(?:{suffixes})"
    ))
    .expect("valid regex")
});

// ==================== Shared helpers ====================

/// True when a known place-name literal ends exactly at `pos`. The
/// organization recognizer treats such a tail as a valid name boundary
/// (上海浦发银行).
pub(crate) fn place_name_ending_at(chars: &[char], pos: usize) -> bool {
    COUNTRIES
        .iter()
        .chain(REGIONS)
        .chain(CITIES)
        .chain(LANDMARKS)
        .any(|entry| {
            let n = entry.chars().count();
            n <= pos && starts_with_at(chars, pos - n, entry)
        })
}

/// A place span that runs straight into an institutional suffix is really
/// the head of an organization name, either directly (北京|大学) or through
/// an administrative suffix (北京|市|政府).
fn continues_into_institution(chars: &[char], end: usize) -> bool {
    if organization::org_suffix_at(chars, end) {
        return true;
    }
    LOC_SUFFIXES.iter().any(|s| {
        starts_with_at(chars, end, s)
            && organization::org_suffix_at(chars, end + s.chars().count())
    })
}

/// Administrative suffixes covered by the glued-context check below.
/// Street and facility suffixes are left out: a street like 滨海南路
/// embeds 海南 by spelling accident, not by structure.
const ADMIN_SUFFIXES: &[&str] = &[
    "特别行政区",
    "自治区",
    "自治州",
    "自治县",
    "开发区",
    "省",
    "市",
    "县",
    "区",
    "镇",
    "乡",
    "村",
];

fn admin_tailed(chars: &[char], start: usize, end: usize) -> bool {
    ADMIN_SUFFIXES.iter().any(|s| {
        let n = s.chars().count();
        end - start >= n && starts_with_at(chars, end - n, s)
    })
}

/// True when a known place-name literal starts exactly at `pos`.
fn place_name_starting_at(chars: &[char], pos: usize) -> bool {
    COUNTRIES
        .iter()
        .chain(REGIONS)
        .chain(CITIES)
        .chain(LANDMARKS)
        .any(|entry| starts_with_at(chars, pos, entry))
}

/// True when one of the location suffixes ends exactly at `pos`.
fn loc_suffix_ending_at(chars: &[char], pos: usize) -> bool {
    LOC_SUFFIXES.iter().any(|s| {
        let n = s.chars().count();
        n <= pos && starts_with_at(chars, pos - n, s)
    })
}

/// An administrative match that contains a known place literal mid-span has
/// glued leading context onto the name (途经|北京市), unless the literal
/// sits at a proper suffix boundary (湖北省|武汉市). Returns the position
/// where the real name begins.
fn glued_context_end(chars: &[char], start: usize, end: usize) -> Option<usize> {
    if !admin_tailed(chars, start, end) {
        return None;
    }
    (start + 1..end)
        .find(|&pos| place_name_starting_at(chars, pos) && !loc_suffix_ending_at(chars, pos))
}

// ==================== Recognizer ====================

/// Rule-based location recognizer.
pub(crate) struct LocationRecognizer;

impl Recognizer for LocationRecognizer {
    fn name(&self) -> &'static str {
        "location"
    }

    fn recognize(&self, doc: &DocView<'_>, tokens: &[Token]) -> Result<Vec<Candidate>> {
        let chars = doc.chars();
        let mut held: Vec<Candidate> = Vec::new();

        for literal in COUNTRIES
            .iter()
            .chain(REGIONS)
            .chain(CITIES)
            .chain(LANDMARKS)
        {
            for (byte_start, matched) in doc.text().match_indices(literal) {
                let start = doc.char_index(byte_start);
                let end = start + matched.chars().count();
                if start > 0 && is_determiner(chars[start - 1]) {
                    continue;
                }
                if continues_into_institution(chars, end) {
                    continue;
                }
                if organization::org_literal_extending(chars, start, end) {
                    continue;
                }
                // 上海 inside 海上海风 starts mid-token and is no mention.
                if !aligned_with_tokens(tokens, start, end) {
                    continue;
                }
                push_longest(
                    &mut held,
                    Candidate::new(start, end, EntityType::Location, Source::Location),
                );
            }
        }

        for m in SUFFIX_RE.find_iter(doc.text()) {
            let matched_start = doc.char_index(m.start());
            let end = doc.char_index(m.end());
            let mut start = matched_start;
            if !tokens.is_empty() {
                // The prefix class can open a match mid-word; snap to the
                // first token boundary inside it, then trim any leading
                // preposition token (据北京市消息 names 北京市).
                if let Some(snap) = token_start_within(tokens, start, end) {
                    start = snap;
                }
                while start < end && single_char_preposition_at(tokens, start) {
                    start += 1;
                }
            }
            if let Some(pos) = glued_context_end(chars, start, end) {
                start = pos;
            }
            if end - start < MIN_SPAN_CHARS {
                continue;
            }
            let text = doc.slice(start, end);
            if start > matched_start
                && end - start < longest_suffix_len(&text, LOC_SUFFIXES) + 1
            {
                continue;
            }
            if LOC_EXCLUSIONS.iter().any(|e| text.ends_with(e)) {
                continue;
            }
            if continues_into_institution(chars, end) {
                continue;
            }
            if !aligned_with_tokens(tokens, start, end) {
                continue;
            }
            push_longest(
                &mut held,
                Candidate::new(start, end, EntityType::Location, Source::Location),
            );
        }

        sort_candidates(&mut held);
        Ok(held)
    }
}

// ==================== Tests ====================
