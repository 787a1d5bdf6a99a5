//! Hand-off to a language-model collaborator.
//!
//! The crate builds prompts from [`WeeklySummary`] values and interprets the
//! replies. The model call itself sits behind [`WeekAnalyzer`], so any client
//! (HTTP, cached, mocked) can be plugged in without this crate doing I/O.
//!
//! # Example
//!
//! ```
//! use weekpack::analysis::{WeekAnalyzer, analyze_weeks};
//! use weekpack::core::aggregate::WeeklySummaries;
//!
//! struct Echo;
//!
//! impl WeekAnalyzer for Echo {
//!     fn analyze_week(&self, prompt: &str) -> weekpack::Result<String> {
//!         Ok(format!("{} chars", prompt.len()))
//!     }
//! }
//!
//! let analyses = analyze_weeks(&Echo, &WeeklySummaries::new(), "target")?;
//! assert!(analyses.is_empty());
//! # Ok::<(), weekpack::WeekpackError>(())
//! ```

use std::collections::BTreeMap;

use crate::core::aggregate::{WeeklySummaries, WeeklySummary};
use crate::error::Result;

/// Separator between conversation blocks of one week.
pub const CONVERSATION_SEPARATOR: &str = "\n\n---\n\n";

/// Score used when a sentiment reply cannot be read.
pub const NEUTRAL_SCORE: f64 = 5.0;

/// Week key to analysis text.
pub type WeeklyAnalyses = BTreeMap<String, String>;

/// Week key to sentiment score, 0 (thriving) to 10 (struggling).
pub type SentimentScores = BTreeMap<String, f64>;

/// Something that answers a prompt, usually a language model.
pub trait WeekAnalyzer {
    /// Returns the model's reply to `prompt`.
    fn analyze_week(&self, prompt: &str) -> Result<String>;
}

impl<F> WeekAnalyzer for F
where
    F: Fn(&str) -> Result<String>,
{
    fn analyze_week(&self, prompt: &str) -> Result<String> {
        self(prompt)
    }
}

/// Leading text of [`no_messages_note`]; analyses containing it are not scored.
pub const NO_MESSAGES_MARKER: &str = "No messages from";

/// Reply recorded for a week in which the target user wrote nothing.
pub fn no_messages_note(target_user: &str) -> String {
    format!("{NO_MESSAGES_MARKER} {target_user} this week.")
}

/// Builds the per-week analysis prompt.
pub fn week_prompt(summary: &WeeklySummary, target_user: &str) -> String {
    let conversations = summary.conversations.join(CONVERSATION_SEPARATOR);
    let week = &summary.week_key;
    let count = summary.target_message_count;

    format!(
        "You are analyzing WhatsApp chat conversations to understand how {target_user} was feeling during a specific week.

Week: {week}
Number of messages from {target_user}: {count}

Here are the conversation snippets involving {target_user} from that week:

{conversations}

Please provide a detailed summary of this week for {target_user}. Include:

1. How did {target_user} feel? (emotional state, mood indicators)
2. What bad things happened? (problems, conflicts, negative events)
3. What good things happened? (positive events, happy moments, social interactions)
4. Did {target_user} seem depressed? (signs of low mood, withdrawal, negative self-talk)
5. Did {target_user} seem happy? (signs of joy, excitement, positive engagement)
6. Did {target_user} seem manic? (signs of elevated mood, high energy, impulsive behavior)

IMPORTANT:
- Include relevant direct quotes from {target_user}'s messages to support your observations
- DO NOT hallucinate or invent things that are not in the messages
- DO NOT interpret or add meaning - just summarize what is actually said
- Be specific and detailed
- If you cannot determine something from the messages, say so
- Focus on factual observations from the text

Format your response as a structured summary."
    )
}

/// Analyzes every week in week order.
///
/// Weeks without messages from `target_user` get [`no_messages_note`] and
/// never reach the analyzer.
///
/// # Errors
///
/// Stops at the first analyzer error.
pub fn analyze_weeks<A: WeekAnalyzer + ?Sized>(
    analyzer: &A,
    summaries: &WeeklySummaries,
    target_user: &str,
) -> Result<WeeklyAnalyses> {
    let mut analyses = WeeklyAnalyses::new();
    for (week, summary) in summaries {
        let analysis = if summary.target_message_count == 0 {
            no_messages_note(target_user)
        } else {
            tracing::debug!(week = %week, "analyzing week");
            analyzer.analyze_week(&week_prompt(summary, target_user))?
        };
        analyses.insert(week.clone(), analysis);
    }
    Ok(analyses)
}

/// Builds the prompt asking for a single 0 to 10 score for one analysis.
pub fn sentiment_prompt(analysis: &str, target_user: &str) -> String {
    format!(
        "You are analyzing the emotional state of {target_user} based on a weekly summary of their conversations.

Here is the weekly summary:

{analysis}

Based on this summary, rate {target_user}'s overall emotional state for this week on a scale from 0 to 10:
- 0 = Very happy, positive, thriving
- 5 = Neutral, balanced mood
- 10 = Very depressed, negative, struggling

Consider factors like:
- Overall emotional tone
- Presence of negative vs positive events
- Social engagement and connections
- Signs of depression, anxiety, or distress
- Signs of happiness, excitement, or mania

Respond with ONLY a number between 0 and 10 (you can use decimals like 6.5).
Do not include any explanation, just the number."
    )
}

/// Reads a score from the first word of `reply`.
///
/// A comma is accepted as decimal separator and the value is clamped to
/// `0..=10`. Returns `None` if the first word is not a number.
///
/// ```
/// use weekpack::analysis::parse_sentiment_score;
///
/// assert_eq!(parse_sentiment_score(" 6,5 out of 10"), Some(6.5));
/// assert_eq!(parse_sentiment_score("12"), Some(10.0));
/// assert_eq!(parse_sentiment_score("unclear"), None);
/// ```
pub fn parse_sentiment_score(reply: &str) -> Option<f64> {
    let token = reply.split_whitespace().next()?;
    let score: f64 = token.replace(',', ".").parse().ok()?;
    if score.is_nan() {
        return None;
    }
    Some(score.clamp(0.0, 10.0))
}

/// Scores every analyzed week, skipping weeks without target messages.
///
/// A week is skipped when its analysis contains [`NO_MESSAGES_MARKER`],
/// whichever user the note names.
///
/// Unreadable replies fall back to [`NEUTRAL_SCORE`].
///
/// # Errors
///
/// Stops at the first analyzer error.
pub fn score_weeks<A: WeekAnalyzer + ?Sized>(
    analyzer: &A,
    analyses: &WeeklyAnalyses,
    target_user: &str,
) -> Result<SentimentScores> {
    let mut scores = SentimentScores::new();

    for (week, analysis) in analyses {
        if analysis.contains(NO_MESSAGES_MARKER) {
            tracing::debug!(week = %week, "no target messages, not scored");
            continue;
        }
        let reply = analyzer.analyze_week(&sentiment_prompt(analysis, target_user))?;
        let score = parse_sentiment_score(&reply).unwrap_or_else(|| {
            tracing::warn!(week = %week, reply = %reply.trim(), "could not read score, using neutral");
            NEUTRAL_SCORE
        });
        scores.insert(week.clone(), score);
    }
    Ok(scores)
}

/// Builds the prompt for an overall summary across weeks.
///
/// Each week becomes a `=== <week> (Score: s) ===` section; weeks without a
/// score show `N/A`.
pub fn overall_prompt(
    analyses: &WeeklyAnalyses,
    scores: &SentimentScores,
    target_user: &str,
) -> String {
    let combined = analyses
        .iter()
        .map(|(week, analysis)| {
            let score = scores
                .get(week)
                .map_or_else(|| "N/A".to_string(), |s| format!("{s:?}"));
            format!("=== {week} (Score: {score}) ===\n{analysis}")
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You have been analyzing {target_user}'s emotional state over multiple weeks based on WhatsApp conversations.

Here are all the weekly summaries with their sentiment scores (0=happy, 10=depressed):

{combined}

Please provide an overall summary that includes:

1. General emotional trajectory over time (improving, declining, stable, fluctuating)
2. Common themes and patterns
3. Key events or periods of concern
4. Key events or periods of joy
5. Overall assessment of {target_user}'s well-being during this period

Be specific and reference particular weeks when relevant."
    )
}
