//! Deterministic responses used when no provider key is configured.
//!
//! Everything here is a pure function of its input: the same request always
//! produces byte-identical output.

use std::fmt;

pub const MOCK_NOTICE: &str =
    "Note: generated in mock mode. Set OPENAI_API_KEY to get AI-generated output.";

pub const POSITIVE_WORDS: [&str; 8] = [
    "good",
    "great",
    "excellent",
    "love",
    "happy",
    "satisfied",
    "amazing",
    "wonderful",
];

pub const NEGATIVE_WORDS: [&str; 8] = [
    "bad",
    "terrible",
    "poor",
    "hate",
    "angry",
    "disappointed",
    "awful",
    "horrible",
];

/// Per-period growth applied by the mock forecast.
pub const FORECAST_GROWTH: f64 = 1.05;

const SUMMARY_WORDS: usize = 10;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Workflow / agent / summary / email
// ============================================================================

pub fn workflow_plan(text: &str, segment: Option<&str>) -> String {
    let trigger = text.split_whitespace().next().unwrap_or("data");
    let segment_line = match segment.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => format!("Segment: {s}\n"),
        None => String::new(),
    };

    format!(
        "Workflow Plan for: \"{text}\"\n\
         {segment_line}\n\
         Step 1: Identify Trigger\n  \
         - Monitor incoming {trigger}\n  \
         - Set up automated listener\n\n\
         Step 2: Process & Enrich\n  \
         - Extract key fields\n  \
         - Cross-reference with CRM\n\n\
         Step 3: Execute Action\n  \
         - Route to appropriate system\n  \
         - Log for audit trail\n\n\
         Step 4: Monitor & Optimize\n  \
         - Track success metrics\n  \
         - Adjust parameters as needed\n\n\
         {MOCK_NOTICE}"
    )
}

pub fn agent_output(role: &str, task: &str, details: &str) -> String {
    format!(
        "Agent Initialized: {role}\n\n\
         Task: {task}\n\n\
         Context: {details}\n\n\
         Agent Analysis:\n\
         - Understood context and requirements\n\
         - Identified key decision points\n\
         - Ready to handle incoming requests\n\n\
         {MOCK_NOTICE}"
    )
}

/// First ten whitespace-separated words followed by `...`.
pub fn summary(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().take(SUMMARY_WORDS).collect();
    format!("{}...", words.join(" "))
}

pub fn email(context: &str, tone: &str) -> String {
    let subject = context
        .split_whitespace()
        .next()
        .map(title_case)
        .unwrap_or_else(|| "General".to_string());

    format!(
        "Subject: {subject} Update\n\n\
         Dear Recipient,\n\n\
         Following up on {context} with a {tone} tone.\n\n\
         Best regards,\n\
         VectorMind AI Assistant\n\n\
         {MOCK_NOTICE}"
    )
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ============================================================================
// Forecast
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastProjection {
    /// Mean of the input, rounded to two decimals.
    pub mean: f64,
    /// `round2(mean * 1.05^i)` for i in 1..=horizon.
    pub values: Vec<f64>,
}

pub fn project(data: &[f64], horizon: u32) -> ForecastProjection {
    let mean = if data.is_empty() {
        0.0
    } else {
        data.iter().sum::<f64>() / data.len() as f64
    };

    let values = (1..=horizon)
        .map(|i| round2(mean * FORECAST_GROWTH.powi(i as i32)))
        .collect();

    ForecastProjection {
        mean: round2(mean),
        values,
    }
}

pub fn forecast(data: &[f64], horizon: u32) -> String {
    let projection = project(data, horizon);

    let periods = projection
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("Period {}: {:.2}", i + 1, v))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Forecast for next {horizon} periods:\n\n\
         Historical data: {} data points\n\
         Average value: {:.2}\n\
         Growth model: 5% compounding per period\n\n\
         {periods}\n\n\
         {MOCK_NOTICE}",
        data.len(),
        projection.mean,
    )
}

// ============================================================================
// Sentiment
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentScore {
    pub label: SentimentLabel,
    pub positive: usize,
    pub negative: usize,
    /// Confidence in [0, 1].
    pub score: f64,
}

/// Keyword heuristic. Each keyword counts once when it appears anywhere in
/// the lower-cased text, including inside longer words.
pub fn classify(text: &str) -> SentimentScore {
    let lower = text.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();
    let negative = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count();

    let (label, score) = if positive > negative {
        (SentimentLabel::Positive, 0.75 + positive as f64 * 0.05)
    } else if negative > positive {
        (SentimentLabel::Negative, 0.25 - negative as f64 * 0.05)
    } else {
        (SentimentLabel::Neutral, 0.5)
    };

    SentimentScore {
        label,
        positive,
        negative,
        score: score.clamp(0.0, 1.0),
    }
}

pub fn sentiment(text: &str) -> String {
    let result = classify(text);
    let (emotion, action) = match result.label {
        SentimentLabel::Positive => ("Satisfaction", "Thank customer & continue engagement"),
        SentimentLabel::Negative => ("Concern", "Follow up to address concerns"),
        SentimentLabel::Neutral => ("Neutral observation", "Standard support follow-up"),
    };

    format!(
        "Sentiment Analysis Results:\n\n\
         Overall Sentiment: {}\n\
         Confidence Score: {:.1}%\n\
         Keyword matches: {} positive, {} negative\n\n\
         Primary emotion: {emotion}\n\
         Recommended Action: {action}\n\n\
         {MOCK_NOTICE}",
        result.label,
        result.score * 100.0,
        result.positive,
        result.negative,
    )
}
