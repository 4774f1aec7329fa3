//! Turning a free-form model answer into a structured verdict.
//!
//! Models are told to answer with bare JSON but often wrap it in prose or a
//! code fence. The extractor scans for the first brace-delimited object and
//! parses only that.
//!
//! The scan is deliberately shallow: an object may contain at most one level
//! of nested braces (`{ .. { .. } .. }`). Braces inside JSON strings are
//! counted like any other brace. A deeper object makes the scan skip ahead to
//! the next candidate start, which can select an inner object instead of the
//! outer one. The verdict shape is flat, so this bound covers every
//! well-formed answer.

use serde_json::{Map, Value};

use crate::error::ExtractionFailure;

/// Maximum brace depth of an extractable object (the object itself plus one nested level).
pub const MAX_OBJECT_DEPTH: usize = 2;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// Justification stored when the model omits one.
pub const MISSING_JUSTIFICATION: &str = "No justification provided";

/// The structured answer of the model, before clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub score_innovation: f64,
    pub score_impact: f64,
    pub justification: String,
    /// Upper-cased decision; empty when the model gave none.
    pub decision: String,
}

/// Recognized outcome of the decision field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Rejected,
    /// Missing or unexpected value, kept verbatim (upper-cased) for a human to review.
    Unrecognized(String),
}

impl Verdict {
    pub fn decision(&self) -> Decision {
        match self.decision.as_str() {
            "ACCEPTED" => Decision::Accepted,
            "REJECTED" => Decision::Rejected,
            other => Decision::Unrecognized(other.to_string()),
        }
    }
}

/// Bound a score into `[MIN_SCORE, MAX_SCORE]`.
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Find the leftmost brace-balanced object of depth at most [`MAX_OBJECT_DEPTH`].
pub fn find_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'{')
        .find_map(|(start, _)| object_end(bytes, start).map(|end| &text[start..end]))
}

/// Exclusive end of the object opening at `start`, if it closes within the depth bound.
fn object_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, &b) in bytes[start..].iter().enumerate() {
        match b {
            b'{' => {
                depth += 1;
                if depth > MAX_OBJECT_DEPTH {
                    return None;
                }
            }
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract a verdict from a raw model answer.
///
/// Fails only when no object can be found, the object is not valid JSON, or a
/// score is present but not numeric. A missing score counts as 0, and a
/// missing justification or decision never fails extraction.
pub fn extract_verdict(raw: &str) -> Result<Verdict, ExtractionFailure> {
    let object = find_json_object(raw).ok_or(ExtractionFailure::NoJsonObject)?;
    let fields: Map<String, Value> = serde_json::from_str(object)
        .map_err(|e| ExtractionFailure::InvalidJson(e.to_string()))?;

    Ok(Verdict {
        score_innovation: coerce_score(&fields, "score_innovation")?,
        score_impact: coerce_score(&fields, "score_impact")?,
        justification: match fields.get("justification") {
            None | Some(Value::Null) => MISSING_JUSTIFICATION.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        },
        decision: match fields.get("decision") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.to_uppercase(),
            Some(other) => other.to_string().to_uppercase(),
        },
    })
}

fn coerce_score(fields: &Map<String, Value>, field: &'static str) -> Result<f64, ExtractionFailure> {
    let score = match fields.get(field) {
        None => Some(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    score
        .filter(|s| s.is_finite())
        .ok_or(ExtractionFailure::NonNumericScore(field))
}
