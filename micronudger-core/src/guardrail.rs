//! Safety guardrails that run before any coaching reply.
//!
//! Matching is plain lower-cased substring / regex containment, so a keyword
//! inside unrelated text ("the overdose plot of a movie") still triggers.
//! Rules are evaluated in table order and the first match wins, which is
//! what gives crisis phrases precedence over medical ones.

use std::sync::OnceLock;

use regex::Regex;

const CRISIS_PHRASES: &[&str] = &[
    "kill myself",
    "suicide",
    "end my life",
    "hurt myself",
    "self harm",
    "self-harm",
    "overdose",
    "take more pills",
    "took too many",
    "i want to die",
    "i don't want to live",
];

const MEDICAL_PHRASES: &[&str] = &[
    "change my dose",
    "increase my dose",
    "decrease my dose",
    "stop my medication",
    "start medication",
    "prescribe",
    "contraindication",
    "side effect severe",
    "drug interaction",
];

const CRISIS_MESSAGE: &str = "I’m really glad you told me. I can’t help with crises, but you deserve support right now. Please contact your primary care clinician immediately, or for urgent help call 911. In the U.S., you can call or text 988 for the Suicide & Crisis Lifeline.";

const MEDICAL_MESSAGE: &str = "I can’t give medical advice about medications. Please talk to your primary care clinician or pharmacist for guidance tailored to you.";

fn medication_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"medicat(e|ion)|dose|prescription").expect("medication regex should compile")
    })
}

/// Outcome of running the guardrails over one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardrailResult {
    None,
    Crisis { message: String },
    MedicalAdvice { message: String },
}

impl GuardrailResult {
    pub fn is_triggered(&self) -> bool {
        !matches!(self, GuardrailResult::None)
    }

    /// The safety message to show instead of a coaching reply.
    pub fn message(&self) -> Option<&str> {
        match self {
            GuardrailResult::None => None,
            GuardrailResult::Crisis { message } | GuardrailResult::MedicalAdvice { message } => {
                Some(message)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardrailKind {
    Crisis,
    MedicalAdvice,
}

/// One entry of the ordered rule table.
pub struct GuardrailRule {
    pub kind: GuardrailKind,
    pub phrases: &'static [&'static str],
    pub pattern: Option<&'static Regex>,
    pub message: &'static str,
}

impl GuardrailRule {
    /// `lowered` must already be lower-cased.
    pub fn matches(&self, lowered: &str) -> bool {
        self.phrases.iter().any(|p| lowered.contains(p))
            || self.pattern.is_some_and(|re| re.is_match(lowered))
    }

    fn result(&self) -> GuardrailResult {
        let message = self.message.to_string();
        match self.kind {
            GuardrailKind::Crisis => GuardrailResult::Crisis { message },
            GuardrailKind::MedicalAdvice => GuardrailResult::MedicalAdvice { message },
        }
    }
}

/// The rule table in evaluation order.
pub fn rules() -> &'static [GuardrailRule] {
    static RULES: OnceLock<Vec<GuardrailRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            GuardrailRule {
                kind: GuardrailKind::Crisis,
                phrases: CRISIS_PHRASES,
                pattern: None,
                message: CRISIS_MESSAGE,
            },
            GuardrailRule {
                kind: GuardrailKind::MedicalAdvice,
                phrases: MEDICAL_PHRASES,
                pattern: Some(medication_regex()),
                message: MEDICAL_MESSAGE,
            },
        ]
    })
}

/// Classify raw user text. Never fails.
pub fn classify(text: &str) -> GuardrailResult {
    let lowered = text.to_lowercase();
    rules()
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(GuardrailRule::result)
        .unwrap_or(GuardrailResult::None)
}
