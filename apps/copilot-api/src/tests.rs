//! Tests for the copilot server API
//!
//! Property tests drive the engine with arbitrary clause JSON; the API
//! tests exercise each route through `axum-test`.

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;
    use serde_json::json;

    use compliance_engine::scoring::{FALLBACK_FLAGGED_SCORE, SCORE_FLOOR};
    use compliance_engine::ComplianceEngine;
    use shared_types::AssessmentSource;

    proptest! {
        /// Property: any string body goes through the analyzer with a bounded score
        #[test]
        fn string_bodies_are_analyzed(text in ".{0,300}", heading in "[A-Za-z ]{0,20}") {
            let engine = ComplianceEngine::new();
            let assessment = engine.assess_value(&json!({"heading": heading, "text": text}));

            prop_assert_eq!(assessment.source, AssessmentSource::Analyzer);
            prop_assert!(assessment.compliance_score >= SCORE_FLOOR);
            prop_assert!(assessment.compliance_score <= 90);
            prop_assert!(assessment.analysis.is_some());
        }

        /// Property: a numeric body cannot be analyzed and is flagged by the fallback
        #[test]
        fn numeric_bodies_fall_back(text in any::<i64>()) {
            let engine = ComplianceEngine::new();
            let assessment = engine.assess_value(&json!({"text": text}));

            prop_assert_eq!(assessment.source, AssessmentSource::Fallback);
            prop_assert_eq!(assessment.compliance_score, FALLBACK_FLAGGED_SCORE);
            prop_assert!(assessment.low_compliance);
            prop_assert!(assessment.risk_level.is_none());
        }

        /// Property: the review counts exactly the flagged assessments
        #[test]
        fn review_flag_count_matches(texts in prop::collection::vec(".{0,120}", 1..6)) {
            let engine = ComplianceEngine::new();
            let clauses: Vec<_> = texts.iter().map(|t| json!({"text": t})).collect();
            let review = engine.review(None, &clauses);

            prop_assert_eq!(review.assessments.len(), clauses.len());
            let flagged = review.assessments.iter().filter(|a| a.low_compliance).count();
            prop_assert_eq!(review.flagged_count, flagged);
        }
    }
}

#[cfg(test)]
mod api_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use crate::{build_router, AppState};

    fn create_test_server() -> TestServer {
        let state = AppState::new().unwrap();
        TestServer::new(build_router(state)).unwrap()
    }

    fn error_code(response: &axum_test::TestResponse) -> String {
        let json = response.json::<Value>();
        json["error"]["code"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let server = create_test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "copilot-api");
    }

    #[tokio::test]
    async fn test_analyze_clause() {
        let server = create_test_server();
        let response = server
            .post("/api/clauses/analyze")
            .json(&json!({
                "clause_id": "c-1",
                "heading": "Payment Terms",
                "text": "The buyer may try to pay a reasonable amount."
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["clauseType"], "Payment");
        assert_eq!(json["analysisSteps"].as_array().unwrap().len(), 7);
        assert!(json["improvedVersion"]
            .as_str()
            .unwrap()
            .starts_with("Payment Terms\n\n"));
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_string_text() {
        let server = create_test_server();
        let response = server
            .post("/api/clauses/analyze")
            .json(&json!({"text": 42}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&response), "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_envelope() {
        let server = create_test_server();
        let response = server.post("/api/clauses/analyze").text("{not json").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let json = response.json::<Value>();
        assert_eq!(json["error"]["code"], "INVALID_REQUEST");
        assert!(json["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_assess_falls_back_for_undecodable_clause() {
        let server = create_test_server();
        let response = server
            .post("/api/clauses/assess")
            .json(&json!({"clause_id": "c-7", "heading": "Odd", "text": 42}))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["heading"], "Odd");
        assert_eq!(json["compliance_score"], 65);
        assert_eq!(json["low_compliance"], true);
        assert!(json["analysis"].is_null());
    }

    #[tokio::test]
    async fn test_assess_uses_analyzer() {
        let server = create_test_server();
        let response = server
            .post("/api/clauses/assess")
            .json(&json!({"heading": "Notes", "text": "The Client shall deliver."}))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["source"], "analyzer");
        assert_eq!(json["clause_type"], "General Provision");
        assert!(json["analysis"].is_object());
    }

    #[tokio::test]
    async fn test_review_contract() {
        let server = create_test_server();
        let response = server
            .post("/api/contracts/review")
            .json(&json!({
                "contract_id": "k-1",
                "clauses": [
                    {"heading": "Termination", "text": "Either party may end this."},
                    {"heading": "Broken", "content": ["not", "text"]}
                ]
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["contract_id"], "k-1");
        assert_eq!(json["assessments"].as_array().unwrap().len(), 2);
        assert_eq!(json["assessments"][1]["source"], "fallback");
        assert_eq!(json["flagged_count"], 2);
    }

    #[tokio::test]
    async fn test_review_requires_clauses() {
        let server = create_test_server();
        let response = server
            .post("/api/contracts/review")
            .json(&json!({"clauses": []}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&response), "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_regenerate_returns_transcript() {
        let server = create_test_server();
        let response = server
            .post("/api/copilot/regenerate")
            .json(&json!({
                "clause_id": "c-3",
                "text": "Payment Terms\nThe buyer may try to pay a reasonable amount."
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<Value>();
        assert_eq!(json["clause_id"], "c-3");
        assert!(json["improved_version"]
            .as_str()
            .unwrap()
            .starts_with("Payment Terms\n\n"));

        let messages = json["messages"].as_array().unwrap();
        // welcome + request + 7 steps + findings + improvements
        assert_eq!(messages.len(), 11);
        assert_eq!(messages[0]["role"], "assistant");
        assert_eq!(messages[1]["role"], "user");
    }

    #[tokio::test]
    async fn test_regenerate_requires_text() {
        let server = create_test_server();
        let response = server
            .post("/api/copilot/regenerate")
            .json(&json!({"text": "   "}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(error_code(&response), "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_ledger_flow_emits_events() {
        let server = create_test_server();

        let mint = server
            .post("/api/ledger/proposals/p-1/mint")
            .json(&json!({"amount": "250"}))
            .await;
        mint.assert_status_ok();
        assert_eq!(mint.json::<Value>()["amount"], 250);

        let vote = server
            .post("/api/ledger/proposals/p-1/votes")
            .json(&json!({"org": "org1", "vote": "yes"}))
            .await;
        vote.assert_status_ok();
        assert_eq!(vote.json::<Value>()["vote"], "yes");

        let quorum = server.post("/api/ledger/proposals/p-1/quorum").await;
        quorum.assert_status_ok();
        assert_eq!(quorum.json::<Value>()["outcome"], "approved");

        let events = server.get("/api/ledger/events").await;
        events.assert_status_ok();
        let json = events.json::<Value>();
        assert_eq!(json["count"], 3);
        let names: Vec<&str> = json["events"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["FatwaMinted", "FatwaVote", "FatwaApproved"]);
        assert_eq!(
            json["events"][0]["payload"],
            r#"{"proposalID":"p-1","amount":"250"}"#
        );
    }

    #[tokio::test]
    async fn test_mint_accepts_numeric_amount() {
        let server = create_test_server();
        let response = server
            .post("/api/ledger/proposals/p-2/mint")
            .json(&json!({"amount": 40}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["amount"], 40);
    }

    #[tokio::test]
    async fn test_ledger_validation_errors() {
        let server = create_test_server();

        let bad_amount = server
            .post("/api/ledger/proposals/p-1/mint")
            .json(&json!({"amount": "-5"}))
            .await;
        bad_amount.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_code(&bad_amount), "LEDGER_ERROR");

        let bad_vote = server
            .post("/api/ledger/proposals/p-1/votes")
            .json(&json!({"org": "org1", "vote": "maybe"}))
            .await;
        bad_vote.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_code(&bad_vote), "LEDGER_ERROR");

        let events = server.get("/api/ledger/events").await;
        assert_eq!(events.json::<Value>()["count"], 0);
    }

    #[tokio::test]
    async fn test_init_resets_supply() {
        let server = create_test_server();
        let response = server.post("/api/ledger/init").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["totalSupply"], 0);
    }

    #[tokio::test]
    async fn test_analyze_accepts_numeric_clause_id() {
        let server = create_test_server();
        let response = server
            .post("/api/clauses/analyze")
            .json(&json!({
                "clause_id": 7,
                "heading": "Termination",
                "text": "Either party may terminate this agreement."
            }))
            .await;
        response.assert_status_ok();

        let assess = server
            .post("/api/clauses/assess")
            .json(&json!({
                "clause_id": 7,
                "level": "first",
                "heading": "Termination",
                "text": "Either party may terminate this agreement."
            }))
            .await;
        assess.assert_status_ok();
        let json = assess.json::<Value>();
        assert_eq!(json["source"], "analyzer");
        assert_eq!(json["clause_id"], "7");
    }

    #[tokio::test]
    async fn test_registry_flow() {
        let server = create_test_server();

        let registered = server
            .post("/api/registry/contracts")
            .json(&json!({
                "contractId": "k-1",
                "bankOrg": "BankA",
                "standardCode": "AAOIFI-SS-8",
                "createdAt": "2024-01-01T00:00:00Z"
            }))
            .await;
        registered.assert_status_ok();
        assert_eq!(registered.json::<Value>()["status"], "on_chain");

        let updated = server
            .put("/api/registry/contracts/k-1/status")
            .json(&json!({"status": "approved"}))
            .await;
        updated.assert_status_ok();

        let fetched = server.get("/api/registry/contracts/k-1").await;
        fetched.assert_status_ok();
        let json = fetched.json::<Value>();
        assert_eq!(json["status"], "approved");
        assert_eq!(json["bankOrg"], "BankA");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_registry_errors() {
        let server = create_test_server();

        let missing = server.get("/api/registry/contracts/nope").await;
        missing.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(error_code(&missing), "NOT_FOUND");

        let missing_update = server
            .put("/api/registry/contracts/nope/status")
            .json(&json!({"status": "approved"}))
            .await;
        missing_update.assert_status(StatusCode::NOT_FOUND);

        server
            .post("/api/registry/contracts")
            .json(&json!({"contractId": "k-2"}))
            .await
            .assert_status_ok();
        let bad_status = server
            .put("/api/registry/contracts/k-2/status")
            .json(&json!({"status": "pending"}))
            .await;
        bad_status.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_code(&bad_status), "LEDGER_ERROR");
    }

    #[tokio::test]
    async fn test_consensus_needs_two_approvals() {
        let server = create_test_server();

        for (org, decision) in [("BankA", "approved"), ("BankB", "rejected")] {
            server
                .post("/api/consensus/votes")
                .json(&json!({
                    "contractId": "k-1",
                    "voterOrg": org,
                    "level": 1,
                    "decision": decision
                }))
                .await
                .assert_status_ok();
        }
        let pending = server.get("/api/consensus/k-1/levels/1").await;
        pending.assert_status_ok();
        assert_eq!(pending.json::<Value>()["status"], "pending");

        server
            .post("/api/consensus/votes")
            .json(&json!({
                "contractId": "k-1",
                "voterOrg": "BankC",
                "level": 1,
                "decision": "approved"
            }))
            .await
            .assert_status_ok();
        let approved = server.get("/api/consensus/k-1/levels/1").await;
        assert_eq!(approved.json::<Value>()["status"], "approved");

        let other_level = server.get("/api/consensus/k-1/levels/2").await;
        assert_eq!(other_level.json::<Value>()["status"], "pending");
    }

    #[tokio::test]
    async fn test_subscribe_and_broadcast() {
        let server = create_test_server();

        for (country, bank) in [("MY", "BankB"), ("MY", "BankA"), ("AE", "BankC")] {
            server
                .post("/api/notifications/subscribers")
                .json(&json!({"countryCode": country, "bankOrg": bank}))
                .await
                .assert_status_ok();
        }

        let listed = server.get("/api/notifications/subscribers/MY").await;
        listed.assert_status_ok();
        let json = listed.json::<Value>();
        assert_eq!(json["count"], 2);
        assert_eq!(json["subscribers"][0]["bankOrg"], "BankA");

        let broadcast = server
            .post("/api/notifications/broadcast")
            .json(&json!({"contract_id": "k-1", "country": "MY"}))
            .await;
        broadcast.assert_status_ok();
        assert_eq!(broadcast.json::<Value>()["notified"].as_array().unwrap().len(), 2);

        let events = server.get("/api/ledger/events").await.json::<Value>();
        assert_eq!(events["count"], 1);
        assert_eq!(events["events"][0]["chaincode"], "notifications");
        assert_eq!(events["events"][0]["name"], "ContractApproved");
        assert_eq!(
            events["events"][0]["payload"],
            r#"{"contractId":"k-1","country":"MY"}"#
        );
    }

    #[tokio::test]
    async fn test_events_are_tagged_by_chaincode() {
        let server = create_test_server();
        server
            .post("/api/ledger/proposals/p-1/mint")
            .json(&json!({"amount": "10"}))
            .await
            .assert_status_ok();
        server
            .post("/api/consensus/votes")
            .json(&json!({"contractId": "k-1", "voterOrg": "BankA", "level": 1, "decision": "approved"}))
            .await
            .assert_status_ok();

        let json = server.get("/api/ledger/events").await.json::<Value>();
        let tags: Vec<(&str, &str)> = json["events"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| (e["chaincode"].as_str().unwrap(), e["name"].as_str().unwrap()))
            .collect();
        assert_eq!(
            tags,
            vec![("token", "FatwaMinted"), ("consensus", "VoteSubmitted")]
        );
    }
}
