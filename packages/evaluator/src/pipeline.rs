use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use common::SubmissionStatus;
use tracing::{error, info, instrument, warn};

use crate::config::EvaluatorConfig;
use crate::error::{EvaluatorError, Result};
use crate::evidence::{HttpRepositoryReader, HttpVideoParser, RepositoryReader, VideoParser};
use crate::extract::{Decision, Verdict, clamp_score, extract_verdict};
use crate::model::{ChatCompletionsModel, JudgeModel};
use crate::prompt::{build_prompt, resolve_criteria};

/// Characters of the raw model answer kept when no verdict can be extracted.
pub const RAW_RESPONSE_LIMIT: usize = 500;

const DEFAULT_EVIDENCE_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(60);

/// What the pipeline needs to know about a submission and its hackathon.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationRequest<'a> {
    pub repository_link: &'a str,
    pub video_link: &'a str,
    /// The hackathon's judging criteria, if it has any.
    pub criteria: Option<&'a str>,
}

/// Terminal outcome of one pipeline run, ready to be written in a single update.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub status: SubmissionStatus,
    pub score_innovation: Option<f64>,
    pub score_impact: Option<f64>,
    pub justification: String,
}

impl Evaluation {
    /// Clamp the scores and derive the status from the decision.
    pub fn from_verdict(verdict: Verdict) -> Self {
        let (status, justification) = match verdict.decision() {
            Decision::Accepted => (SubmissionStatus::AiAccepted, verdict.justification),
            Decision::Rejected => (SubmissionStatus::AiRejected, verdict.justification),
            Decision::Unrecognized(decision) => (
                SubmissionStatus::AiPending,
                format!(
                    "{} (Note: Unclear decision: {decision})",
                    verdict.justification
                ),
            ),
        };
        Self {
            status,
            score_innovation: Some(clamp_score(verdict.score_innovation)),
            score_impact: Some(clamp_score(verdict.score_impact)),
            justification,
        }
    }

    /// The model answered but no verdict could be extracted.
    pub fn unparseable(raw_response: &str) -> Self {
        Self::failure(
            SubmissionStatus::AiError,
            raw_response.chars().take(RAW_RESPONSE_LIMIT).collect(),
        )
    }

    pub fn service_error(err: &EvaluatorError) -> Self {
        Self::failure(
            SubmissionStatus::ServiceError,
            format!("Failed to communicate with evaluation services: {err}"),
        )
    }

    pub fn system_error(err: &dyn std::fmt::Display) -> Self {
        Self::failure(
            SubmissionStatus::SystemError,
            format!("An unexpected error occurred: {err}"),
        )
    }

    fn failure(status: SubmissionStatus, justification: String) -> Self {
        Self {
            status,
            score_innovation: None,
            score_impact: None,
            justification,
        }
    }
}

/// Runs the evidence → prompt → model → verdict pipeline for one submission.
///
/// Every stage failure is folded into the returned [`Evaluation`]; `evaluate`
/// never errors, so the caller can always persist a terminal status.
#[derive(Clone)]
pub struct Evaluator {
    repository: Arc<dyn RepositoryReader>,
    video: Arc<dyn VideoParser>,
    model: Arc<dyn JudgeModel>,
    evidence_timeout: Duration,
    model_timeout: Duration,
}

impl Evaluator {
    pub fn new(
        repository: Arc<dyn RepositoryReader>,
        video: Arc<dyn VideoParser>,
        model: Arc<dyn JudgeModel>,
    ) -> Self {
        Self {
            repository,
            video,
            model,
            evidence_timeout: DEFAULT_EVIDENCE_TIMEOUT,
            model_timeout: DEFAULT_MODEL_TIMEOUT,
        }
    }

    /// Build the HTTP-backed pipeline described by `config`.
    pub fn from_config(config: &EvaluatorConfig) -> Result<Self> {
        let request_timeout = config.request_timeout();
        let evaluator = Self::new(
            Arc::new(HttpRepositoryReader::new(
                &config.repository_reader_url,
                request_timeout,
            )?),
            Arc::new(HttpVideoParser::new(
                &config.video_parser_url,
                request_timeout,
            )?),
            Arc::new(ChatCompletionsModel::new(&config.model)?),
        );
        Ok(evaluator.with_timeouts(request_timeout, config.model.timeout()))
    }

    pub fn with_timeouts(mut self, evidence: Duration, model: Duration) -> Self {
        self.evidence_timeout = evidence;
        self.model_timeout = model;
        self
    }

    #[instrument(skip_all, fields(repository_link = %request.repository_link))]
    pub async fn evaluate(&self, request: EvaluationRequest<'_>) -> Evaluation {
        // The two lookups share nothing, so they run together. A repository
        // failure is reported in preference to a video failure.
        let (repository, video) = tokio::join!(
            bounded(
                "Repository reader",
                self.evidence_timeout,
                self.repository.read_repository(request.repository_link),
            ),
            bounded(
                "Video parser",
                self.evidence_timeout,
                self.video.parse_video(request.video_link),
            ),
        );

        let (repository, video) = match (repository, video) {
            (Ok(repository), Ok(video)) => (repository, video),
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, "Evidence service failed");
                return Evaluation::service_error(&err);
            }
        };

        let prompt = build_prompt(
            resolve_criteria(request.criteria),
            &repository.readme_text,
            &video.title,
            &video.description,
        );

        let raw = match bounded("Model", self.model_timeout, self.model.complete(&prompt)).await {
            Ok(raw) => raw,
            Err(err) => {
                error!(error = ?err, "Model invocation failed");
                return Evaluation::system_error(&err);
            }
        };

        let evaluation = match extract_verdict(&raw) {
            Ok(verdict) => Evaluation::from_verdict(verdict),
            Err(err) => {
                warn!(error = %err, response_len = raw.len(), "Model answer has no usable verdict");
                Evaluation::unparseable(&raw)
            }
        };

        info!(status = %evaluation.status, "Evaluation finished");
        evaluation
    }
}

async fn bounded<T>(
    stage: &'static str,
    limit: Duration,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(limit, fut)
        .await
        .unwrap_or(Err(EvaluatorError::Timeout { stage, limit }))
}
