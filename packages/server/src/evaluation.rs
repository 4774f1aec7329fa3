use std::sync::Arc;

use common::SubmissionStatus;
use evaluator::{Evaluation, EvaluationRequest, Evaluator};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, Set};
use tracing::{error, info, instrument, warn};

use crate::entity::{hackathon, submission};

/// Drives a recorded submission through the evaluation pipeline and stores
/// the outcome.
pub struct EvaluationService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> EvaluationService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Evaluate a `PROCESSING` submission and write its terminal status.
    ///
    /// Pipeline failures never surface as `Err`; they are stored on the record.
    /// An `Err` here means the final write itself failed. A submission that
    /// already has a terminal status is returned untouched.
    #[instrument(skip_all, fields(submission_id = submission.id, hackathon_id = hackathon.id))]
    pub async fn evaluate(
        &self,
        evaluator: &Evaluator,
        submission: submission::Model,
        hackathon: &hackathon::Model,
    ) -> Result<submission::Model, DbErr> {
        if submission.status.is_terminal() {
            warn!(status = %submission.status, "Submission already evaluated, skipping");
            return Ok(submission);
        }

        let evaluation = evaluator
            .evaluate(EvaluationRequest {
                repository_link: &submission.repository_link,
                video_link: &submission.video_link,
                criteria: hackathon.criteria.as_deref(),
            })
            .await;

        self.record(submission, evaluation).await
    }

    /// Write the pipeline outcome in a single update.
    pub async fn record(
        &self,
        submission: submission::Model,
        evaluation: Evaluation,
    ) -> Result<submission::Model, DbErr> {
        debug_assert_eq!(submission.status, SubmissionStatus::Processing);
        debug_assert_eq!(
            evaluation.status.has_verdict(),
            evaluation.score_innovation.is_some()
        );

        let mut active: submission::ActiveModel = submission.into();
        active.status = Set(evaluation.status);
        active.score_innovation = Set(evaluation.score_innovation);
        active.score_impact = Set(evaluation.score_impact);
        active.justification = Set(Some(evaluation.justification));
        let updated = active.update(self.conn).await?;

        if updated.status.is_failure() {
            warn!(status = %updated.status, "Evaluation recorded without a verdict");
        } else {
            info!(status = %updated.status, "Evaluation recorded");
        }
        Ok(updated)
    }
}

impl EvaluationService<'_, DatabaseConnection> {
    /// Like [`evaluate`](Self::evaluate), but on a detached task.
    ///
    /// The final write completes even if the caller is dropped, e.g. when an
    /// HTTP client disconnects mid-evaluation. A panic inside the pipeline is
    /// recorded as `SYSTEM_ERROR`.
    pub async fn evaluate_detached(
        &self,
        evaluator: Arc<Evaluator>,
        submission: submission::Model,
        hackathon: hackathon::Model,
    ) -> Result<submission::Model, DbErr> {
        let db = self.conn.clone();
        let pending = submission.clone();
        let task = tokio::spawn(async move {
            EvaluationService::new(&db)
                .evaluate(&evaluator, submission, &hackathon)
                .await
        });

        match task.await {
            Ok(result) => result,
            Err(join_err) => {
                error!(submission_id = pending.id, error = %join_err, "Evaluation task failed");
                self.record(pending, Evaluation::system_error(&join_err))
                    .await
            }
        }
    }
}
