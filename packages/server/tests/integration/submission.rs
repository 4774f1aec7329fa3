use std::time::Duration;

use serde_json::json;

use crate::common::{STAGE_TIMEOUT, StubReply, TestApp, Upstream, routes};

const ACCEPTED: &str = r#"Here is my verdict:
{"score_innovation": 8.5, "score_impact": 9.2, "justification": "Clear novelty and reach.", "decision": "ACCEPTED"}"#;

mod verdicts {
    use super::*;

    #[tokio::test]
    async fn accepted_verdict_is_stored() {
        let app = TestApp::spawn_with(Upstream::answering(ACCEPTED)).await;
        let id = app
            .create_hackathon("Hack", "judge-a", Some("Reward memory safety."))
            .await;

        let res = app.submit(id).await;

        assert_eq!(res.status, 201, "Submit failed: {}", res.text);
        assert_eq!(res.body["status"], "AI_ACCEPTED");
        assert_eq!(res.body["score_innovation"], 8.5);
        assert_eq!(res.body["score_impact"], 9.2);
        assert_eq!(res.body["justification"], "Clear novelty and reach.");
        assert_eq!(res.body["project_name"], "Rocket");

        let stored = app.stored_submission(res.body["id"].as_i64().unwrap()).await;
        assert_eq!(stored["status"], "AI_ACCEPTED");
        assert_eq!(stored["score_impact"], 9.2);
    }

    #[tokio::test]
    async fn prompt_carries_criteria_and_evidence() {
        let app = TestApp::spawn_with(Upstream::answering(ACCEPTED)).await;
        let id = app
            .create_hackathon("Hack", "judge-a", Some("Reward memory safety."))
            .await;

        app.submit(id).await;

        let prompt = app.calls.last_prompt().expect("model was prompted");
        assert!(prompt.contains("Reward memory safety."));
        assert!(prompt.contains("Reusable launcher written in Rust."));
        assert!(prompt.contains("Rocket demo"));
        assert!(prompt.contains("Launch and landing."));
        assert_eq!(
            *app.calls.repository_links.lock().unwrap(),
            vec!["https://github.com/acme/rocket".to_string()]
        );
    }

    #[tokio::test]
    async fn unclear_decision_is_pending_with_note() {
        let app = TestApp::spawn_with(Upstream::answering(
            r#"{"score_innovation": 5, "score_impact": 6, "justification": "Mixed", "decision": "maybe"}"#,
        ))
        .await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;

        let res = app.submit(id).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["status"], "AI_PENDING");
        assert_eq!(res.body["score_innovation"], 5.0);
        assert_eq!(
            res.body["justification"],
            "Mixed (Note: Unclear decision: MAYBE)"
        );
    }

    #[tokio::test]
    async fn out_of_range_scores_are_clamped() {
        let app = TestApp::spawn_with(Upstream::answering(
            r#"{"score_innovation": 14, "score_impact": -2, "justification": "Odd", "decision": "REJECTED"}"#,
        ))
        .await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;

        let res = app.submit(id).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["status"], "AI_REJECTED");
        assert_eq!(res.body["score_innovation"], 10.0);
        assert_eq!(res.body["score_impact"], 0.0);
    }

    #[tokio::test]
    async fn prose_answer_is_ai_error_with_raw_text() {
        let prose = "I think this project is great. ".repeat(30);
        let app = TestApp::spawn_with(Upstream::answering(&prose)).await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;

        let res = app.submit(id).await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["status"], "AI_ERROR");
        assert!(res.body["score_innovation"].is_null());
        assert!(res.body["score_impact"].is_null());
        let expected: String = prose.chars().take(500).collect();
        assert_eq!(res.body["justification"], expected.as_str());
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn repository_failure_is_service_error_without_model_call() {
        let app = TestApp::spawn_with(
            Upstream::answering(ACCEPTED).with_repository(StubReply::status(
                404,
                json!({"success": false, "error": "Repository not found"}),
            )),
        )
        .await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;

        let res = app.submit(id).await;

        assert_eq!(res.status, 502, "Expected SERVICE_ERROR: {}", res.text);
        assert_eq!(res.body["code"], "SERVICE_ERROR");
        let message = res.body["message"].as_str().unwrap();
        assert!(message.starts_with("Failed to communicate with evaluation services"));
        assert!(message.contains("Repository not found"));
        assert_eq!(app.calls.model_calls(), 0);

        let stored = app
            .stored_submission(res.body["submission_id"].as_i64().unwrap())
            .await;
        assert_eq!(stored["status"], "SERVICE_ERROR");
        assert!(stored["score_innovation"].is_null());
        assert!(stored["score_impact"].is_null());
        assert_eq!(stored["justification"], message);
    }

    #[tokio::test]
    async fn video_failure_is_service_error() {
        let app = TestApp::spawn_with(
            Upstream::answering(ACCEPTED)
                .with_video(StubReply::ok(json!({"success": false, "error": "Private video"}))),
        )
        .await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;

        let res = app.submit(id).await;

        assert_eq!(res.status, 502);
        assert_eq!(res.body["code"], "SERVICE_ERROR");
        assert_eq!(app.calls.model_calls(), 0);
    }

    #[tokio::test]
    async fn slow_evidence_service_times_out() {
        let app = TestApp::spawn_with(
            Upstream::answering(ACCEPTED).with_repository(
                StubReply::ok(json!({"success": true, "readme_content": "late"}))
                    .delayed(STAGE_TIMEOUT + Duration::from_secs(3)),
            ),
        )
        .await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;

        let res = app.submit(id).await;

        assert_eq!(res.status, 502);
        assert!(res.body["message"].as_str().unwrap().contains("timed out"));
        assert_eq!(app.calls.model_calls(), 0);
    }

    #[tokio::test]
    async fn model_failure_is_system_error() {
        let app = TestApp::spawn_with(
            Upstream::answering(ACCEPTED)
                .with_model(StubReply::status(500, json!({"error": "overloaded"}))),
        )
        .await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;

        let res = app.submit(id).await;

        assert_eq!(res.status, 500, "Expected SYSTEM_ERROR: {}", res.text);
        assert_eq!(res.body["code"], "SYSTEM_ERROR");
        assert!(
            res.body["message"]
                .as_str()
                .unwrap()
                .starts_with("An unexpected error occurred")
        );

        let stored = app
            .stored_submission(res.body["submission_id"].as_i64().unwrap())
            .await;
        assert_eq!(stored["status"], "SYSTEM_ERROR");
        assert!(stored["score_innovation"].is_null());
    }

    #[tokio::test]
    async fn empty_model_choices_is_system_error() {
        let app = TestApp::spawn_with(
            Upstream::answering(ACCEPTED).with_model(StubReply::ok(json!({"choices": []}))),
        )
        .await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;

        let res = app.submit(id).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "SYSTEM_ERROR");
    }
}

mod intake {
    use super::*;

    #[tokio::test]
    async fn missing_fields_create_no_record() {
        let app = TestApp::spawn().await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;

        let res = app
            .post(
                routes::SUBMISSIONS,
                &json!({"hackathon_id": id, "project_name": "Rocket"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(
            res.body["message"],
            "Missing required fields: repository_link, video_link"
        );
        assert_eq!(app.calls.repository_calls(), 0);

        let dashboard = app.get(&routes::hackathon_submissions(id)).await;
        assert!(dashboard.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_hackathon_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.submit(999).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Invalid Hackathon ID");
        assert_eq!(app.calls.repository_calls(), 0);
    }

    #[tokio::test]
    async fn github_link_alias_and_default_name() {
        let app = TestApp::spawn().await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;

        let res = app
            .post(
                routes::SUBMISSIONS,
                &json!({
                    "hackathon_id": id.to_string(),
                    "github_link": "https://github.com/acme/alias",
                    "video_link": "https://youtu.be/alias",
                }),
            )
            .await;

        assert_eq!(res.status, 201, "Submit failed: {}", res.text);
        assert_eq!(res.body["project_name"], "Untitled");
        assert_eq!(res.body["repository_link"], "https://github.com/acme/alias");
        assert_eq!(app.calls.repository_calls(), 1);
        assert_eq!(app.calls.video_calls(), 1);
    }

    #[tokio::test]
    async fn unknown_submission_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::submission(12345)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod disconnect {
    use super::*;

    #[tokio::test]
    async fn evaluation_completes_after_client_gives_up() {
        let app = TestApp::spawn_with(Upstream::answering(ACCEPTED).with_model(
            StubReply::ok(crate::common::chat_answer(ACCEPTED)).delayed(Duration::from_millis(1000)),
        ))
        .await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;

        let impatient = reqwest::Client::builder()
            .timeout(Duration::from_millis(300))
            .build()
            .unwrap();
        let result = impatient
            .post(app.url(routes::SUBMISSIONS))
            .json(&json!({
                "hackathon_id": id,
                "repository_link": "https://github.com/acme/rocket",
                "video_link": "https://youtu.be/rocket",
            }))
            .send()
            .await;
        assert!(result.is_err(), "Client should have timed out");

        let mut status = serde_json::Value::Null;
        for _ in 0..40 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let rows = app.get(&routes::hackathon_submissions(id)).await.body;
            if let Some(row) = rows.as_array().and_then(|r| r.first()) {
                status = row["status"].clone();
                if status != "PROCESSING" {
                    break;
                }
            }
        }

        assert_eq!(status, "AI_ACCEPTED");
        assert_eq!(app.calls.model_calls(), 1);
    }
}
