//! Prompt construction for the live assistant. Each builder fixes the
//! temperature and token limit for its endpoint.

use crate::completion::CompletionRequest;

pub const WORKFLOW_TEMPERATURE: f32 = 0.4;
pub const WORKFLOW_MAX_TOKENS: u32 = 900;
pub const AGENT_TEMPERATURE: f32 = 0.6;
pub const AGENT_MAX_TOKENS: u32 = 700;
pub const SUMMARISE_TEMPERATURE: f32 = 0.3;
pub const SUMMARISE_MAX_TOKENS: u32 = 400;
pub const EMAIL_TEMPERATURE: f32 = 0.7;
pub const EMAIL_MAX_TOKENS: u32 = 600;
pub const FORECAST_TEMPERATURE: f32 = 0.2;
pub const FORECAST_MAX_TOKENS: u32 = 500;
pub const SENTIMENT_TEMPERATURE: f32 = 0.1;
pub const SENTIMENT_MAX_TOKENS: u32 = 300;

/// Business category used to adjust workflow phrasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Agency,
    LocalService,
    ECommerce,
    Other(String),
}

impl Segment {
    /// Case-insensitive match; `_` and spaces are read as `-`. Blank input
    /// yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized: String = trimmed
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c })
            .collect();

        Some(match normalized.as_str() {
            "agency" => Segment::Agency,
            "local-service" => Segment::LocalService,
            "e-commerce" | "ecommerce" => Segment::ECommerce,
            _ => Segment::Other(trimmed.to_string()),
        })
    }

    fn guidance(&self) -> String {
        match self {
            Segment::Agency => "The business is a marketing or digital agency serving multiple \
                client accounts. Emphasise client onboarding, reporting and hand-offs between \
                account managers."
                .to_string(),
            Segment::LocalService => "The business is a local service provider (trades, clinics, \
                salons). Emphasise bookings, reminders, reviews and quick lead response."
                .to_string(),
            Segment::ECommerce => "The business is an e-commerce store. Emphasise orders, \
                inventory, abandoned carts and customer support tickets."
                .to_string(),
            Segment::Other(name) => format!("The business segment is \"{name}\"."),
        }
    }
}

pub fn workflow(text: &str, segment: Option<&Segment>) -> CompletionRequest {
    let mut system = String::from(
        "You are an automation consultant. Turn the user's business task into a concise, \
         numbered workflow plan: trigger, processing steps, actions, integrations and how to \
         monitor results. Keep it practical and tool-agnostic.",
    );
    if let Some(segment) = segment {
        system.push(' ');
        system.push_str(&segment.guidance());
    }

    CompletionRequest {
        system,
        user: text.to_string(),
        temperature: WORKFLOW_TEMPERATURE,
        max_tokens: WORKFLOW_MAX_TOKENS,
    }
}

pub fn agent(role: &str, task: &str, details: &str) -> CompletionRequest {
    CompletionRequest {
        system: format!(
            "You are an AI agent acting as: {role}. Respond in character, stating how you \
             will approach the task and the first concrete actions you take."
        ),
        user: format!("Task: {task}\n\nDetails: {details}"),
        temperature: AGENT_TEMPERATURE,
        max_tokens: AGENT_MAX_TOKENS,
    }
}

pub fn summarise(text: &str) -> CompletionRequest {
    CompletionRequest {
        system: "Summarise the user's text into a short paragraph followed by three bullet \
                 key points. Do not add information that is not in the text."
            .to_string(),
        user: text.to_string(),
        temperature: SUMMARISE_TEMPERATURE,
        max_tokens: SUMMARISE_MAX_TOKENS,
    }
}

pub fn generate_email(context: &str, tone: &str) -> CompletionRequest {
    CompletionRequest {
        system: format!(
            "Write a complete business email with a subject line, greeting, body and sign-off. \
             Use a {tone} tone."
        ),
        user: context.to_string(),
        temperature: EMAIL_TEMPERATURE,
        max_tokens: EMAIL_MAX_TOKENS,
    }
}

pub fn forecast(data: &[f64], horizon: u32) -> CompletionRequest {
    let series = data
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    CompletionRequest {
        system: "You are a forecasting analyst. Given a numeric time series, describe the trend \
                 and give a projected value for each requested future period, rounded to two \
                 decimals, with a one-line caveat about confidence."
            .to_string(),
        user: format!("Series: [{series}]\nPeriods to forecast: {horizon}"),
        temperature: FORECAST_TEMPERATURE,
        max_tokens: FORECAST_MAX_TOKENS,
    }
}

pub fn sentiment(text: &str) -> CompletionRequest {
    CompletionRequest {
        system: "Classify the sentiment of the customer feedback as Positive, Negative or \
                 Neutral. Report the classification, a confidence score, the main emotions \
                 detected and a recommended follow-up action."
            .to_string(),
        user: text.to_string(),
        temperature: SENTIMENT_TEMPERATURE,
        max_tokens: SENTIMENT_MAX_TOKENS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_parse_is_case_insensitive() {
        assert_eq!(Segment::parse("AGENCY"), Some(Segment::Agency));
        assert_eq!(Segment::parse(" Local Service "), Some(Segment::LocalService));
        assert_eq!(Segment::parse("local_service"), Some(Segment::LocalService));
        assert_eq!(Segment::parse("E-Commerce"), Some(Segment::ECommerce));
        assert_eq!(Segment::parse("ecommerce"), Some(Segment::ECommerce));
    }

    #[test]
    fn test_segment_parse_keeps_unknown_values() {
        assert_eq!(
            Segment::parse("SaaS"),
            Some(Segment::Other("SaaS".to_string()))
        );
        assert_eq!(Segment::parse("   "), None);
    }

    #[test]
    fn test_workflow_prompt_includes_segment_guidance() {
        let plain = workflow("Follow up on new leads", None);
        let tailored = workflow("Follow up on new leads", Some(&Segment::ECommerce));

        assert_eq!(plain.user, "Follow up on new leads");
        assert!(!plain.system.contains("e-commerce"));
        assert!(tailored.system.contains("e-commerce store"));
        assert_eq!(tailored.temperature, WORKFLOW_TEMPERATURE);
        assert_eq!(tailored.max_tokens, WORKFLOW_MAX_TOKENS);
    }

    #[test]
    fn test_agent_prompt_carries_role_task_and_details() {
        let req = agent("Support Agent", "Answer refunds", "Shopify store");
        assert!(req.system.contains("Support Agent"));
        assert!(req.user.contains("Answer refunds"));
        assert!(req.user.contains("Shopify store"));
    }

    #[test]
    fn test_forecast_prompt_lists_series_and_horizon() {
        let req = forecast(&[10.0, 20.5], 3);
        assert_eq!(req.user, "Series: [10, 20.5]\nPeriods to forecast: 3");
        assert_eq!(req.temperature, FORECAST_TEMPERATURE);
    }

    #[test]
    fn test_email_prompt_sets_tone() {
        let req = generate_email("late delivery", "apologetic");
        assert!(req.system.contains("apologetic tone"));
        assert_eq!(req.user, "late delivery");
        assert_eq!(req.max_tokens, EMAIL_MAX_TOKENS);
    }
}
