//! Document category classification.
//!
//! A weighted keyword table scores each category over the raw text; the
//! best score wins if it clears an absolute threshold, otherwise the
//! document falls back to the sentinel category [`OTHER_CATEGORY`]. The
//! table is fixed configuration: iteration order is the declared order, so
//! ties resolve deterministically to the earlier entry.

/// Sentinel category for documents no keyword table claims.
pub const OTHER_CATEGORY: &str = "其他";

/// Minimum winning score; anything below classifies as [`OTHER_CATEGORY`].
const SCORE_THRESHOLD: f64 = 3.0;

/// Repeated keyword occurrences beyond this count stop adding score.
const OCCURRENCE_CAP: usize = 5;

/// Chars of document head that earn the lead-in bonus. Openers and titles
/// carry more signal than body text.
const LEAD_IN_CHARS: usize = 100;

struct CategoryRule {
    name: &'static str,
    weight: f64,
    keywords: &'static [&'static str],
}

/// Category table in priority order. Earlier entries win score ties.
const CATEGORIES: &[CategoryRule] = &[
    CategoryRule {
        name: "新闻时事",
        weight: 1.0,
        keywords: &[
            "报道", "消息", "记者", "新华社", "新闻", "媒体", "发布会", "采访", "舆论",
        ],
    },
    CategoryRule {
        name: "科技数码",
        weight: 1.1,
        keywords: &[
            "技术", "科学", "研究", "算法", "人工智能", "芯片", "互联网", "数据", "软件", "手机",
        ],
    },
    CategoryRule {
        name: "财经金融",
        weight: 1.2,
        keywords: &[
            "公司", "企业", "市场", "投资", "股票", "基金", "融资", "经济", "利润", "银行",
        ],
    },
    CategoryRule {
        name: "体育运动",
        weight: 1.0,
        keywords: &[
            "比赛", "球队", "运动员", "冠军", "联赛", "进球", "教练", "奥运", "决赛",
        ],
    },
    CategoryRule {
        name: "娱乐影视",
        weight: 1.0,
        keywords: &[
            "电影", "演员", "导演", "票房", "电视剧", "综艺", "明星", "首映", "粉丝", "剧组",
        ],
    },
    CategoryRule {
        name: "教育学术",
        weight: 1.1,
        keywords: &[
            "学生", "教师", "课程", "学校", "考试", "大学", "论文", "招生", "教材",
        ],
    },
    CategoryRule {
        name: "法律法规",
        weight: 1.4,
        keywords: &[
            "法院", "判决", "法律", "诉讼", "合同", "律师", "条例", "犯罪", "仲裁", "被告",
        ],
    },
    CategoryRule {
        name: "医疗健康",
        weight: 1.3,
        keywords: &[
            "患者", "医生", "治疗", "医院", "药物", "疫苗", "手术", "症状", "诊断", "健康",
        ],
    },
    CategoryRule {
        name: "生活服务",
        weight: 0.9,
        keywords: &[
            "服务", "用户", "体验", "推荐", "外卖", "快递", "消费", "优惠", "商家",
        ],
    },
];

/// Classifies a document into one fixed category.
///
/// Per category: `score = Σ min(count, 5) * weight` over its keywords, plus
/// `2 * weight` for each keyword present in the first 100 chars. The highest
/// score wins if it reaches 3.0; otherwise the sentinel `其他` is returned.
///
/// ```
/// assert_eq!(hanno::classify("法院对合同诉讼作出判决"), "法律法规");
/// assert_eq!(hanno::classify("今天天气真好"), "其他");
/// ```
#[must_use]
pub fn classify(text: &str) -> &'static str {
    if text.is_empty() {
        return OTHER_CATEGORY;
    }
    let lead: String = text.chars().take(LEAD_IN_CHARS).collect();

    let mut best_name = OTHER_CATEGORY;
    let mut best_score = 0.0f64;
    for rule in CATEGORIES {
        let score = score_rule(rule, text, &lead);
        if score > best_score {
            best_score = score;
            best_name = rule.name;
        }
    }

    if best_score < SCORE_THRESHOLD {
        OTHER_CATEGORY
    } else {
        best_name
    }
}

fn score_rule(rule: &CategoryRule, text: &str, lead: &str) -> f64 {
    let mut score = 0.0;
    for kw in rule.keywords {
        let count = text.matches(kw).count();
        if count == 0 {
            continue;
        }
        score += count.min(OCCURRENCE_CAP) as f64 * rule.weight;
        if lead.contains(kw) {
            score += 2.0 * rule.weight;
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static CategoryRule {
        CATEGORIES.iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn empty_and_unclaimed_text_fall_back() {
        assert_eq!(classify(""), OTHER_CATEGORY);
        assert_eq!(classify("今天天气真好，出去散步吧"), OTHER_CATEGORY);
    }

    #[test]
    fn single_keyword_with_lead_in_clears_threshold() {
        // 1 occurrence * 1.4 + lead-in 2 * 1.4 = 4.2
        assert_eq!(classify("合同签署完成"), "法律法规");
    }

    #[test]
    fn keyword_outside_lead_in_stays_below_threshold() {
        let text = format!("{}比赛", "啊".repeat(100));
        // 1 occurrence * 1.0, no lead-in bonus: below 3.0.
        assert_eq!(classify(&text), OTHER_CATEGORY);
    }

    #[test]
    fn occurrence_count_is_capped() {
        let spam = "比赛".repeat(9);
        let score = score_rule(rule("体育运动"), &spam, &spam);
        // min(9, 5) * 1.0 + lead-in 2.0
        assert!((score - 7.0).abs() < 1e-9);
    }

    #[test]
    fn exact_tie_prefers_earlier_table_entry() {
        // 新闻时事 and 体育运动 both score 1.0 + 2.0 = 3.0.
        assert_eq!(classify("报道了比赛"), "新闻时事");
    }

    #[test]
    fn dominant_category_wins() {
        let text = "医院的医生为患者安排了手术治疗，术后症状明显好转";
        assert_eq!(classify(text), "医疗健康");
    }

    #[test]
    fn occurrences_count_non_overlapping() {
        let score = score_rule(rule("财经金融"), "公司公司公司", "公司公司公司");
        // 3 occurrences * 1.2 + lead-in 2.4
        assert!((score - 6.0).abs() < 1e-9);
    }
}
