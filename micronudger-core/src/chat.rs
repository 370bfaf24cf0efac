//! One round of conversation: guardrails first, then coaching.

use crate::coach::{WELCOME_TIPS, respond, welcome_message};
use crate::error::{NudgerError, NudgerResult};
use crate::guardrail::{GuardrailResult, classify};
use crate::profile::{system_offset_minutes, validate_offset};
use crate::store::LocalData;
use crate::transcript::{CoachTurn, Speaker};
use crate::utils::parse_hhmm;

/// The pair of turns produced by one message.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user: CoachTurn,
    pub coach: CoachTurn,
    pub guardrail: GuardrailResult,
}

/// Compute the coach's answer without touching any state.
pub fn reply_to(name: &str, text: &str) -> (GuardrailResult, String) {
    let guardrail = classify(text);
    let reply = match guardrail.message() {
        Some(message) => message.to_string(),
        None => respond(name, text),
    };
    (guardrail, reply)
}

/// Record the user's message and the coach's reply in the history.
///
/// Blank input is ignored and returns `None`.
pub fn exchange(data: &mut LocalData, input: &str) -> Option<Exchange> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }

    let user = CoachTurn::new(Speaker::User, text);
    data.history.push(user.clone());

    let (guardrail, reply) = reply_to(data.profile.display_name(), text);
    if guardrail.is_triggered() {
        tracing::debug!(?guardrail, "guardrail short-circuited coaching");
    }

    let coach = CoachTurn::new(Speaker::Coach, reply);
    data.history.push(coach.clone());

    Some(Exchange {
        user,
        coach,
        guardrail,
    })
}

/// Store the onboarding answers and append the welcome turns.
///
/// `tz_offset_min` defaults to the system offset when not given.
pub fn onboard(
    data: &mut LocalData,
    name: &str,
    nudge_time: Option<&str>,
    tz_offset_min: Option<i32>,
) -> NudgerResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NudgerError::MissingName);
    }
    if let Some(time) = nudge_time {
        parse_hhmm(time)?;
    }
    if let Some(offset) = tz_offset_min {
        validate_offset(offset)?;
    }

    data.profile.name = Some(name.to_string());
    data.profile.nudge_time = nudge_time.map(str::to_string);
    data.profile.tz_offset_min = Some(tz_offset_min.unwrap_or_else(system_offset_minutes));

    data.history
        .push(CoachTurn::new(Speaker::Coach, welcome_message(name)));
    data.history
        .push(CoachTurn::new(Speaker::Coach, WELCOME_TIPS[0]));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> LocalData {
        let mut data = LocalData::default();
        data.profile.name = Some(name.to_string());
        data
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut data = named("Zoe");
        assert!(exchange(&mut data, "   ").is_none());
        assert!(data.history.is_empty());
    }

    #[test]
    fn coaching_reply_is_recorded() {
        let mut data = named("Zoe");
        let ex = exchange(&mut data, "  hello coach ").unwrap();

        assert_eq!(ex.user.text, "hello coach");
        assert_eq!(ex.guardrail, GuardrailResult::None);
        assert!(ex.coach.text.contains("Zoe"));
        assert_eq!(data.history.len(), 2);
        assert_eq!(data.history.turns()[1].speaker, Speaker::Coach);
    }

    #[test]
    fn guardrail_message_replaces_coaching() {
        let mut data = named("Zoe");
        let ex = exchange(&mut data, "hello, can you prescribe something").unwrap();

        assert!(matches!(ex.guardrail, GuardrailResult::MedicalAdvice { .. }));
        assert_eq!(Some(ex.coach.text.as_str()), ex.guardrail.message());
        assert!(!ex.coach.text.contains("Zoe"));
    }

    #[test]
    fn missing_name_falls_back_to_friend() {
        let (_, reply) = reply_to(LocalData::default().profile.display_name(), "hi");
        assert!(reply.contains("friend"));
    }

    #[test]
    fn onboarding_validates_and_welcomes() {
        let mut data = LocalData::default();
        assert!(matches!(
            onboard(&mut data, "  ", None, None),
            Err(NudgerError::MissingName)
        ));
        assert!(matches!(
            onboard(&mut data, "Ivy", Some("9am"), None),
            Err(NudgerError::InvalidTime(_))
        ));

        assert!(matches!(
            onboard(&mut data, "Ivy", None, Some(40_000_000)),
            Err(NudgerError::InvalidOffset(40_000_000))
        ));
        assert!(data.profile.name.is_none());
        assert!(data.history.is_empty());

        onboard(&mut data, "Ivy", Some("08:15"), Some(-300)).unwrap();
        assert_eq!(data.profile.tz_offset_min, Some(-300));
        assert_eq!(data.profile.nudge_time.as_deref(), Some("08:15"));
        assert_eq!(data.history.len(), 2);
        assert!(data.history.turns()[0].text.starts_with("Hello Ivy!"));
        assert_eq!(data.history.turns()[1].text, WELCOME_TIPS[0]);
    }
}
