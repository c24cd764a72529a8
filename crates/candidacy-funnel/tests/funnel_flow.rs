//! End-to-end specifications for the quiz funnel: session persistence,
//! classification, contact capture, and the HTTP surface, exercised through
//! the public facade only.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use candidacy_funnel::funnel::leads::{
        funnel_router, ContactForm, FunnelState, LeadId, LeadRecord, LeadRepository,
        RepositoryError,
    };
    use candidacy_funnel::funnel::quiz::{
        AnswerMap, SessionId, SessionState, SessionStore, SessionStoreError, StepIndex,
    };

    pub(super) fn answers(pairs: &[(StepIndex, &str)]) -> AnswerMap {
        pairs
            .iter()
            .map(|(step, value)| (*step, value.to_string()))
            .collect()
    }

    pub(super) fn contact_form() -> ContactForm {
        ContactForm {
            email: "lead@example.com".to_string(),
            phone: "515-555-0142".to_string(),
            email_consent: true,
            phone_consent: false,
            privacy_acknowledged: true,
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct Sessions {
        snapshots: Arc<Mutex<HashMap<SessionId, SessionState>>>,
    }

    impl SessionStore for Sessions {
        fn save(&self, id: &SessionId, state: &SessionState) -> Result<(), SessionStoreError> {
            self.snapshots
                .lock()
                .expect("lock")
                .insert(id.clone(), state.clone());
            Ok(())
        }

        fn load(&self, id: &SessionId) -> Result<Option<SessionState>, SessionStoreError> {
            Ok(self.snapshots.lock().expect("lock").get(id).cloned())
        }

        fn clear(&self, id: &SessionId) -> Result<(), SessionStoreError> {
            self.snapshots.lock().expect("lock").remove(id);
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct Leads {
        records: Arc<Mutex<Vec<LeadRecord>>>,
    }

    impl Leads {
        pub(super) fn stored(&self) -> Vec<LeadRecord> {
            self.records.lock().expect("lock").clone()
        }
    }

    impl LeadRepository for Leads {
        fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
            self.records.lock().expect("lock").push(record.clone());
            Ok(record)
        }

        fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("lock")
                .iter()
                .find(|record| &record.lead_id == id)
                .cloned())
        }

        fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
            Ok(self
                .records
                .lock()
                .expect("lock")
                .iter()
                .rev()
                .take(limit)
                .cloned()
                .collect())
        }
    }

    pub(super) fn build_funnel() -> (axum::Router, Arc<Sessions>, Arc<Leads>) {
        let sessions = Arc::new(Sessions::default());
        let leads = Arc::new(Leads::default());
        let state = Arc::new(FunnelState::new(sessions.clone(), leads.clone()));
        (funnel_router(state), sessions, leads)
    }

    pub(super) async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }
}

mod sessions {
    use std::sync::Arc;

    use super::common::*;
    use candidacy_funnel::funnel::quiz::{QuizSession, SessionId};

    #[test]
    fn a_full_walk_survives_a_restart() {
        let store = Arc::new(Sessions::default());
        let id = SessionId::new("walk-1");

        let mut session = QuizSession::resume_or_start(store.clone(), id.clone());
        for (step, value) in [
            (1u8, "crown"),
            (2, "6_to_12_months"),
            (3, "somewhat_worse"),
            (4, "minoxidil"),
            (5, "stop_loss"),
            (6, "male_early"),
            (7, "maybe"),
        ] {
            session.set_answer(step, value).expect("valid step");
            session.set_current_step(step + 1).expect("valid step");
        }

        let resumed = QuizSession::resume_or_start(store, id);
        assert_eq!(resumed.state(), session.state());
        assert_eq!(resumed.current_step(), 8);
        assert_eq!(resumed.answers().len(), 7);
    }

    #[test]
    fn reset_forgets_a_walk_completely() {
        let sessions = Arc::new(Sessions::default());
        let id = SessionId::new("walk-reset");

        let mut session = QuizSession::resume_or_start(sessions.clone(), id.clone());
        session.set_answer(1, "patches").expect("valid step");
        session.reset();

        let resumed = QuizSession::resume_or_start(sessions, id);
        assert!(resumed.answers().is_empty());
        assert_eq!(resumed.current_step(), 1);
    }
}

mod classification {
    use candidacy_funnel::funnel::quiz::{classify, ResultTier};

    use super::common::answers;

    #[test]
    fn the_three_tiers_are_reachable_from_real_walks() {
        let ideal = answers(&[
            (1, "hairline"),
            (2, "under_6_months"),
            (3, "accelerating"),
            (6, "male_early"),
            (7, "yes"),
        ]);
        let partial = answers(&[
            (1, "crown"),
            (2, "1_to_2_years"),
            (3, "somewhat_worse"),
            (6, "other"),
            (7, "maybe"),
        ]);
        let unfit = answers(&[
            (1, "patches"),
            (2, "under_6_months"),
            (3, "accelerating"),
            (6, "stressed"),
            (7, "yes"),
        ]);

        assert_eq!(classify(&ideal), ResultTier::Ideal);
        assert_eq!(classify(&partial), ResultTier::Partial);
        assert_eq!(classify(&unfit), ResultTier::Unfit);
    }
}

mod capture {
    use std::sync::Arc;

    use super::common::*;
    use candidacy_funnel::funnel::leads::LeadCaptureService;
    use candidacy_funnel::funnel::quiz::{ResultTier, SessionId};

    #[test]
    fn a_submission_lands_in_the_repository_with_its_tier() {
        let leads = Arc::new(Leads::default());
        let service = LeadCaptureService::new(leads.clone());
        let walk = answers(&[(2, "over_2_years"), (3, "stable")]);

        let outcome = service
            .submit(&SessionId::new("walk-capture"), &walk, &contact_form())
            .expect("contact is valid");

        assert_eq!(outcome.result_tier, ResultTier::Unfit);
        assert!(outcome.stored);

        let stored = leads.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].result_tier, ResultTier::Unfit);
        assert_eq!(stored[0].answers, walk);
    }
}

mod api {
    use axum::http::StatusCode;
    use serde_json::json;
    use tower::ServiceExt;

    use super::common::*;

    #[tokio::test]
    async fn the_funnel_flows_end_to_end_over_http() {
        let (router, _, leads) = build_funnel();

        let response = router
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/v1/quiz/sessions")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&json!({ "session_id": "walk-http" })).expect("encode"),
                    ))
                    .expect("build request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::CREATED);

        for (step, value) in [(1, "diffuse"), (2, "under_6_months"), (3, "accelerating"), (7, "maybe")] {
            let response = router
                .clone()
                .oneshot(
                    axum::http::Request::builder()
                        .method("PUT")
                        .uri(format!("/api/v1/quiz/sessions/walk-http/answers/{step}"))
                        .header(axum::http::header::CONTENT_TYPE, "application/json")
                        .body(axum::body::Body::from(
                            serde_json::to_vec(&json!({ "value": value })).expect("encode"),
                        ))
                        .expect("build request"),
                )
                .await
                .expect("route executes");
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = router
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .method("GET")
                    .uri("/api/v1/quiz/sessions/walk-http/result")
                    .body(axum::body::Body::empty())
                    .expect("build request"),
            )
            .await
            .expect("route executes");
        let preview = read_json(response).await;
        assert_eq!(preview["tier"], "ideal");

        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/v1/quiz/sessions/walk-http/submission")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&json!({
                            "email": "lead@example.com",
                            "phone": "515-555-0142",
                            "email_consent": true,
                            "privacy_acknowledged": true,
                        }))
                        .expect("encode"),
                    ))
                    .expect("build request"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let outcome = read_json(response).await;
        assert_eq!(outcome["result_tier"], "ideal");

        let stored = leads.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].session_id.as_str(), "walk-http");
    }
}
