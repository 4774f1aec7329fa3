//! AI evaluation pipeline for hackathon submissions.
//!
//! Gathers evidence about a project from the repository reader and video
//! parser services, asks a chat model to judge it, and turns the free-form
//! answer into a terminal [`SubmissionStatus`](common::SubmissionStatus).

pub mod config;
pub mod error;
pub mod evidence;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod prompt;

pub use config::{EvaluatorConfig, ModelConfig};
pub use error::{EvaluatorError, ExtractionFailure, Result};
pub use evidence::{
    HttpRepositoryReader, HttpVideoParser, RepositoryEvidence, RepositoryReader, VideoEvidence,
    VideoParser,
};
pub use extract::{Decision, Verdict, extract_verdict};
pub use model::{ChatCompletionsModel, JudgeModel};
pub use pipeline::{Evaluation, EvaluationRequest, Evaluator};
