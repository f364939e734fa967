//! Prompt text for plan generation.

use wellness_domain::dass::Dass21Scores;
use wellness_domain::shared::DateKey;

pub(super) const SYSTEM_PROMPT: &str = "\
You are a clinical psychology practitioner experienced in cognitive behavioural \
therapy (CBT) and mindfulness-based stress reduction (MBSR).

Create a 7-day mental health activity plan from the user's DASS-21 results. \
Every day has a Morning, an Afternoon and an Evening activity. Combine CBT \
thought and behaviour skills with MBSR mindfulness and sensory grounding. \
Do not use religious or spiritual terms or concepts.

Rules:
- Activities are simple, safe, actionable and of medium intensity.
- Each activity carries a short neutral self-talk example.
- Never rate the user's feelings with numbers.
- If any score is missing, label the whole plan [Unverified] and give the reason.
- Add short guidance for when symptoms get worse, without diagnosing.
- State that the plan does not replace professional care.

Respond with a single JSON object of this shape:
{
  \"label\": \"[Verified]\" or \"[Unverified]\",
  \"reason\": string or null,
  \"activity_plan\": [
    {
      \"day\": 1,
      \"date\": \"YYYY-MM-DD\",
      \"Morning\": { \"activity\": string, \"description\": string, \"duration\": string, \"self_talk\": string },
      \"Afternoon\": { ... },
      \"Evening\": { ... }
    }
  ],
  \"warning_signs\": [string],
  \"disclaimer\": string
}";

fn score_line(label: &str, value: Option<u8>) -> String {
    match value {
        Some(v) => format!("- {}: {}", label, v),
        None => format!("- {}: (missing)", label),
    }
}

/// User message: verification label, the scores, and the first plan date.
pub(super) fn build_user_prompt(scores: &Dass21Scores, start: DateKey) -> String {
    let label = if scores.is_verified() {
        "Verified"
    } else {
        "Unverified"
    };

    let mut lines = vec![
        format!("Label: [{}]", label),
        "DASS-21 scores:".to_string(),
        score_line("Depression", scores.depression),
        score_line("Anxiety", scores.anxiety),
        score_line("Stress", scores.stress),
    ];

    let missing = scores.missing();
    if !missing.is_empty() {
        lines.push(format!("Reason: Missing {}.", missing.join(", ")));
    }

    lines.push(format!(
        "Day 1 is {}; give each day its consecutive date.",
        start
    ));
    lines.push("Return only the JSON object.".to_string());
    lines.join("\n")
}
