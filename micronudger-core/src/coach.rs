//! Canned, non-medical coaching replies.
//!
//! Topics are tried in a fixed priority order and the first pattern that
//! matches the lower-cased text wins. Each topic always answers with its
//! first two tips.

use std::sync::OnceLock;

use regex::Regex;

/// Coaching topics in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Greeting,
    Nutrition,
    Movement,
    Sleep,
    Mindset,
}

impl Topic {
    pub const PRIORITY: [Topic; 5] = [
        Topic::Greeting,
        Topic::Nutrition,
        Topic::Movement,
        Topic::Sleep,
        Topic::Mindset,
    ];

    fn pattern_source(self) -> &'static str {
        match self {
            Topic::Greeting => r"hello|hi|hey",
            Topic::Nutrition => r"nutri|food|diet|meal|eat",
            Topic::Movement => r"walk|move|exercise|activity",
            Topic::Sleep => r"sleep|insomnia|tired",
            Topic::Mindset => r"stress|motivat|mind|habit|goal",
        }
    }

    fn pattern(self) -> &'static Regex {
        static PATTERNS: OnceLock<Vec<(Topic, Regex)>> = OnceLock::new();
        let patterns = PATTERNS.get_or_init(|| {
            Topic::PRIORITY
                .iter()
                .map(|&t| {
                    let re = Regex::new(t.pattern_source()).expect("topic regex should compile");
                    (t, re)
                })
                .collect()
        });
        patterns
            .iter()
            .find_map(|(topic, re)| (*topic == self).then_some(re))
            .expect("every topic is listed in PRIORITY")
    }

    pub fn matches(self, lowered: &str) -> bool {
        self.pattern().is_match(lowered)
    }

    /// Ordered tips for this topic. Greeting has none; it uses a fixed line.
    pub fn tips(self) -> &'static [&'static str] {
        match self {
            Topic::Greeting => &[],
            Topic::Nutrition => NUTRITION_TIPS,
            Topic::Movement => MOVEMENT_TIPS,
            Topic::Sleep => SLEEP_TIPS,
            Topic::Mindset => MINDSET_TIPS,
        }
    }

    fn lead_in(self) -> &'static str {
        match self {
            Topic::Greeting => "",
            Topic::Nutrition => "here are two ideas:",
            Topic::Movement => "try this:",
            Topic::Sleep => "sleep supports weight goals:",
            Topic::Mindset => "quick mindset nudges:",
        }
    }
}

pub const WELCOME_TIPS: &[&str] = &[
    "We’ll keep things practical and kind. What’s one small win you want this week?",
    "We use SMART goals. For example: “Walk 10 minutes after dinner on Mon/Wed/Fri.” What could work for you?",
];

const NUTRITION_TIPS: &[&str] = &[
    "Try the 50/25/25 plate: half veggies, a quarter lean protein, a quarter high-fiber carbs.",
    "Keep easy wins on hand: pre-cut veggies, fruit, Greek yogurt, nuts. Convenience helps.",
];

const MOVEMENT_TIPS: &[&str] = &[
    "Aim for ‘movement snacks’: 5–10 minutes, 2–3 times per day. Walk, stretch, or climb stairs.",
    "Pair activity with cues you already do: after coffee, take a 10-minute walk.",
];

const SLEEP_TIPS: &[&str] = &[
    "Protect a regular sleep window. Dim lights 60 minutes before bed, and keep devices out of bed.",
    "If you can’t sleep after ~20 minutes, get up for a calm activity and try again.",
];

const MINDSET_TIPS: &[&str] = &[
    "Self-talk matters: speak to yourself like you would to a good friend—firm, kind, and specific.",
    "Set up your space for success: visible water bottle, fruit bowl, shoes by the door.",
];

/// First topic whose pattern matches, if any.
pub fn detect_topic(text: &str) -> Option<Topic> {
    let lowered = text.to_lowercase();
    Topic::PRIORITY.into_iter().find(|t| t.matches(&lowered))
}

/// Build a coaching reply for `name`. Only meant for text the guardrails let through.
pub fn respond(name: &str, text: &str) -> String {
    match detect_topic(text) {
        Some(Topic::Greeting) => {
            format!("Hi {}! What’s one small health win you’d like this week?", name)
        }
        Some(topic) => {
            let tips = topic.tips();
            format!(
                "{}, {}\n• {}\n• {}",
                name,
                topic.lead_in(),
                tips[0],
                tips[1]
            )
        }
        None => format!(
            "{}, I’m here to coach on habits—nutrition, movement, sleep, and mindset. What would you like to focus on?",
            name
        ),
    }
}

/// First message after onboarding.
pub fn welcome_message(name: &str) -> String {
    format!(
        "Hello {}! I’m your micronudger coach. I’ll remember our chats unless you tap Wipe. I can’t give medical advice, but I can help with small, steady habit nudges.",
        name
    )
}
