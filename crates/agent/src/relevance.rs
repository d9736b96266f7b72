use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use strum::Display;

/// 上下文短于该字符数且没有任何规则命中时，视为 "内容不足"
pub const SHORT_CONTEXT_CHARS: usize = 50;

const MEDICAL_KEYWORDS: &[&str] = &[
    "patient", "diagnosis", "medication", "treatment", "lab", "blood", "test", "doctor",
    "hospital", "clinic", "medical", "health", "nurse", "physician", "healthcare",
    "vital", "pressure", "temperature", "heart", "pulse", "oxygen", "breathing",
    "pain", "symptom", "disease", "condition", "therapy", "drug", "prescription",
    "dose", "dosing", "dosage", "examination", "surgery", "procedure", "radiology",
    "imaging", "ultrasound", "x-ray", "ct", "mri", "scan", "chart", "record", "report",
    "result", "emergency", "icu", "room", "bed", "monitor", "equipment", "device", "injection",
    "iv", "drip", "tube", "catheter", "wound", "bandage", "ambulance", "stretcher",
    "wheelchair", "stethoscope", "thermometer", "bp", "hr",
];

/// 规则名称，用于日志与测试断言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RuleKind {
    KeywordMatch,
    VitalsPattern,
    DatePattern,
    DosagePattern,
    MedicalIntent,
}

/// 规则检查的输入范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Question,
    Either,
}

/// 一条带名字的相关性规则
pub struct RelevanceRule {
    kind: RuleKind,
    scope: Scope,
    regex: Regex,
}

impl RelevanceRule {
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn matches(&self, question: &str, context: &str) -> bool {
        match self.scope {
            Scope::Question => self.regex.is_match(question),
            Scope::Either => self.regex.is_match(context) || self.regex.is_match(question),
        }
    }
}

fn rule(kind: RuleKind, scope: Scope, pattern: &str) -> RelevanceRule {
    RelevanceRule {
        kind,
        scope,
        regex: Regex::new(pattern).expect("relevance pattern must compile"),
    }
}

/// 有序规则表，评估顺序即声明顺序
static RULES: LazyLock<Vec<RelevanceRule>> = LazyLock::new(|| {
    let keywords = MEDICAL_KEYWORDS
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");

    vec![
        rule(
            RuleKind::KeywordMatch,
            Scope::Either,
            &format!(r"(?i)\b(?:{keywords})(?:s|es)?\b"),
        ),
        // 血压 120/80、心率 98 bpm、90 mmHg、体温 37.2 / 98.6
        rule(
            RuleKind::VitalsPattern,
            Scope::Either,
            r"(?i)\b\d{1,3}/\d{1,3}\b|\b\d{2,3}\s*bpm\b|\b\d{1,3}\s*mmhg\b|\b(?:3[4-9]|9[5-9]|10[0-7])\.\d\b",
        ),
        rule(
            RuleKind::DatePattern,
            Scope::Either,
            r"\b\d{1,2}/\d{1,2}/\d{2,4}\b|\b\d{4}-\d{1,2}-\d{1,2}\b|\b\d{1,2}:\d{2}\b",
        ),
        rule(
            RuleKind::DosagePattern,
            Scope::Either,
            r"(?i)\b\d+(?:\.\d+)?\s*(?:mg|ml|cc|units?|mcg|kg|lbs?|cm|mm)\b|\b\d+(?:\.\d+)?\s*%",
        ),
        rule(
            RuleKind::MedicalIntent,
            Scope::Question,
            r"(?i)\b(?:analy[sz]|medical|hospital|patient|document)",
        ),
    ]
});

pub fn rules() -> &'static [RelevanceRule] {
    &RULES
}

/// 相关性评估结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelevanceAssessment {
    pub matched: Vec<RuleKind>,
    pub context_chars: usize,
}

impl RelevanceAssessment {
    pub fn is_match(&self, kind: RuleKind) -> bool {
        self.matched.contains(&kind)
    }

    /// 上下文很短且没有任何医疗信号：不应据此编造医疗内容
    pub fn is_limited_content(&self) -> bool {
        self.matched.is_empty() && self.context_chars < SHORT_CONTEXT_CHARS
    }
}

pub fn assess(question: &str, context: &str) -> RelevanceAssessment {
    RelevanceAssessment {
        matched: rules()
            .iter()
            .filter(|r| r.matches(question, context))
            .map(RelevanceRule::kind)
            .collect(),
        context_chars: context.chars().count(),
    }
}
