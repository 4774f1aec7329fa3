/// Rubric used when a hackathon has no criteria of its own.
pub const DEFAULT_CRITERIA: &str = "Evaluate based on innovation and impact.";

/// Pick the hackathon's criteria, falling back to [`DEFAULT_CRITERIA`] when absent or blank.
pub fn resolve_criteria(criteria: Option<&str>) -> &str {
    match criteria {
        Some(c) if !c.trim().is_empty() => c,
        _ => DEFAULT_CRITERIA,
    }
}

/// Render the judging prompt.
///
/// The model is asked for a bare JSON object with exactly the four verdict
/// fields. Nothing here retries or rephrases; tolerance for answers that
/// ignore the format lives in [`crate::extract`].
pub fn build_prompt(
    criteria: &str,
    readme_text: &str,
    video_title: &str,
    video_description: &str,
) -> String {
    format!(
        r#"You are an expert hackathon judge. Evaluate this project based on the following criteria.

Judge's Criteria: {criteria}

Project Information:
- README Content: {readme_text}
- Video Title: {video_title}
- Video Description: {video_description}

Please evaluate this project and respond with ONLY a valid JSON object in this exact format:
{{
    "score_innovation": <float between 0-10>,
    "score_impact": <float between 0-10>,
    "justification": "<detailed explanation of your evaluation>",
    "decision": "<ACCEPTED or REJECTED>"
}}"#
    )
}
