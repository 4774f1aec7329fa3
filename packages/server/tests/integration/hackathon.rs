use serde_json::json;

use crate::common::{TestApp, routes};

mod create {
    use super::*;

    #[tokio::test]
    async fn stores_given_criteria() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::HACKATHONS,
                &json!({"name": "Spring Hack", "judge_id": "judge-a", "criteria": "Reward Rust."}),
            )
            .await;

        assert_eq!(res.status, 201, "Create failed: {}", res.text);
        assert_eq!(res.body["name"], "Spring Hack");
        assert_eq!(res.body["judge_id"], "judge-a");
        assert_eq!(res.body["criteria"], "Reward Rust.");
        assert!(res.body["id"].is_i64());
    }

    #[tokio::test]
    async fn omitted_criteria_gets_default_rubric() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::HACKATHONS, &json!({"name": "Hack", "judge_id": "judge-a"}))
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["criteria"], "Evaluate based on innovation and impact.");
    }

    #[tokio::test]
    async fn missing_judge_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::HACKATHONS, &json!({"name": "Hack"})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "Missing name or judge_id");
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.post_raw(routes::HACKATHONS, "{not json").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod list {
    use super::*;

    #[tokio::test]
    async fn returns_only_the_judges_hackathons_newest_first() {
        let app = TestApp::spawn().await;
        let first = app.create_hackathon("First", "judge-a", None).await;
        let second = app.create_hackathon("Second", "judge-a", None).await;
        app.create_hackathon("Other", "judge-b", None).await;

        let res = app
            .get(&format!("{}?judge_id=judge-a", routes::HACKATHONS))
            .await;

        assert_eq!(res.status, 200, "List failed: {}", res.text);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|h| h["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![second as i64, first as i64]);
    }

    #[tokio::test]
    async fn requires_judge_id() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::HACKATHONS).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Judge ID is required");
    }
}

mod verify {
    use super::*;

    #[tokio::test]
    async fn known_id_is_valid() {
        let app = TestApp::spawn().await;
        let id = app.create_hackathon("Spring Hack", "judge-a", None).await;

        let res = app
            .post(routes::VERIFY_HACKATHON, &json!({"hackathon_id": id.to_string()}))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["valid"], true);
        assert_eq!(res.body["hackathon_name"], "Spring Hack");
    }

    #[tokio::test]
    async fn unknown_id_is_invalid() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::VERIFY_HACKATHON, &json!({"hackathon_id": 999}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["valid"], false);
        assert_eq!(res.body["message"], "Invalid Hackathon ID");
    }

    #[tokio::test]
    async fn non_numeric_id_is_invalid() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::VERIFY_HACKATHON, &json!({"hackathon_id": "abc"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["valid"], false);
        assert_eq!(res.body["message"], "Invalid Hackathon ID format");
    }
}

mod dashboard {
    use super::*;
    use crate::common::{StubReply, Upstream, chat_answer};

    #[tokio::test]
    async fn lists_submissions_with_outcomes() {
        let app = TestApp::spawn().await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;
        let first = app.submit(id).await;
        let second = app.submit(id).await;
        assert_eq!(first.status, 201);
        assert_eq!(second.status, 201);

        let res = app.get(&routes::hackathon_submissions(id)).await;

        assert_eq!(res.status, 200, "Dashboard failed: {}", res.text);
        let rows = res.body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], second.body["id"]);
        assert_eq!(rows[0]["status"], "AI_ACCEPTED");
        assert_eq!(rows[0]["score_innovation"], 7.0);
        assert_eq!(rows[1]["id"], first.body["id"]);
    }

    #[tokio::test]
    async fn filters_by_status() {
        let app = TestApp::spawn_with(
            Upstream::answering("").with_model(StubReply::ok(chat_answer(
                r#"{"score_innovation": 2, "score_impact": 3, "justification": "Thin", "decision": "REJECTED"}"#,
            ))),
        )
        .await;
        let id = app.create_hackathon("Hack", "judge-a", None).await;
        assert_eq!(app.submit(id).await.status, 201);

        let rejected = app
            .get(&format!("{}?status=AI_REJECTED", routes::hackathon_submissions(id)))
            .await;
        let accepted = app
            .get(&format!("{}?status=AI_ACCEPTED", routes::hackathon_submissions(id)))
            .await;

        assert_eq!(rejected.body.as_array().unwrap().len(), 1);
        assert!(accepted.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_hackathon_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::hackathon_submissions(404)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}
