use common::SubmissionStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub hackathon_id: i32,
    #[sea_orm(belongs_to, from = "hackathon_id", to = "id")]
    pub hackathon: HasOne<super::hackathon::Entity>,

    pub project_name: String,
    pub repository_link: String,
    pub video_link: String,

    /// `PROCESSING` until the evaluation pipeline writes a terminal status.
    pub status: SubmissionStatus,
    /// In [0, 10] once set.
    pub score_innovation: Option<f64>,
    /// In [0, 10] once set.
    pub score_impact: Option<f64>,
    /// Model justification, or a failure explanation.
    #[sea_orm(column_type = "Text", nullable)]
    pub justification: Option<String>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
