use std::sync::Arc;

use axum::{
    Json,
    extract::State as AxumState,
    response::{Html, IntoResponse},
};
use serde_json::json;
use tally::Counts;

use crate::{error::AppError, input::VoteInput, pages, state::State};

pub async fn index_handler(AxumState(state): AxumState<Arc<State>>) -> Result<Html<String>, AppError> {
    let counts = state.tally.counts().await?;

    Ok(Html(pages::index(&counts)))
}

pub async fn vote_handler(
    AxumState(state): AxumState<Arc<State>>,
    input: VoteInput,
) -> Result<impl IntoResponse, AppError> {
    let choice = input.into_choice();
    state.tally.record_vote(choice.as_deref()).await?;

    Ok(Json(json!({ "ok": true })))
}

pub async fn results_handler(AxumState(state): AxumState<Arc<State>>) -> Result<Json<Counts>, AppError> {
    Ok(Json(state.tally.counts().await?))
}

pub async fn health_handler() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{
            Request, StatusCode,
            header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, ORIGIN},
        },
    };
    use serde_json::Value;
    use tally::{
        Ballot, Tally, TallyStore,
        store::{MemoryStore, UnreachableStore},
    };
    use tower::ServiceExt;

    use crate::router;

    use super::*;

    async fn app() -> (Arc<MemoryStore>, Router) {
        let store = Arc::new(MemoryStore::new());
        let tally = Tally::new(store.clone(), Ballot::default());
        tally.initialize().await.unwrap();

        (store, router(State::new(tally)))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn form_vote(choice: &str) -> Request<Body> {
        Request::post("/vote")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!("choice={choice}")))
            .unwrap()
    }

    fn json_vote(body: &str) -> Request<Body> {
        Request::post("/vote")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn results(app: &Router) -> HashMap<String, u64> {
        let (status, body) = send(app, Request::get("/results").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);

        serde_json::from_str(&body).unwrap()
    }

    #[tokio::test]
    async fn test_form_vote() {
        let (_, app) = app().await;

        let (status, body) = send(&app, form_vote("Cats")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "ok": true }));
        assert_eq!(results(&app).await, HashMap::from([("Cats".to_string(), 1), ("Dogs".to_string(), 0)]));
    }

    #[tokio::test]
    async fn test_json_vote() {
        let (_, app) = app().await;

        let (status, _) = send(&app, json_vote(r#"{"choice": "Dogs"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(results(&app).await, HashMap::from([("Cats".to_string(), 0), ("Dogs".to_string(), 1)]));
    }

    #[tokio::test]
    async fn test_invalid_votes_rejected() {
        let (store, app) = app().await;
        send(&app, form_vote("Cats")).await;
        let before = store.get_all().await.unwrap();

        let requests = [
            form_vote("Birds"),
            form_vote(""),
            json_vote(r#"{"choice": "cats"}"#),
            json_vote(r#"{"choice": 3}"#),
            json_vote(r#"{}"#),
            json_vote("not json"),
            Request::post("/vote").body(Body::empty()).unwrap(),
        ];

        for request in requests {
            let (status, body) = send(&app, request).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                serde_json::from_str::<Value>(&body).unwrap(),
                json!({ "error": "invalid choice" })
            );
        }

        assert_eq!(store.get_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_results_keep_ballot_order() {
        let (_, app) = app().await;

        let (_, body) = send(&app, Request::get("/results").body(Body::empty()).unwrap()).await;

        assert_eq!(body, r#"{"Cats":0,"Dogs":0}"#);
    }

    #[tokio::test]
    async fn test_index_shows_counts() {
        let (_, app) = app().await;
        send(&app, form_vote("Dogs")).await;

        let (status, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"value="Cats""#));
        assert!(body.contains(r#"value="Dogs""#));
        assert!(body.contains("Total votes: 1"));
    }

    #[tokio::test]
    async fn test_health() {
        let (_, app) = app().await;

        let (status, body) = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_store_failure_is_a_server_error() {
        let app = router(State::new(Tally::new(Arc::new(UnreachableStore), Ballot::default())));

        for request in [
            form_vote("Cats"),
            Request::get("/results").body(Body::empty()).unwrap(),
            Request::get("/").body(Body::empty()).unwrap(),
        ] {
            let (status, body) = send(&app, request).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                serde_json::from_str::<Value>(&body).unwrap(),
                json!({ "error": UnreachableStore::MESSAGE })
            );
        }

        let (status, _) = send(&app, form_vote("Birds")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_vote_with_charset() {
        let (_, app) = app().await;

        let request = Request::post("/vote")
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(Body::from(r#"{"choice": "Cats"}"#))
            .unwrap();
        let (status, _) = send(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(results(&app).await["Cats"], 1);
    }

    #[tokio::test]
    async fn test_configured_ballot() {
        let store = Arc::new(MemoryStore::new());
        let tally = Tally::new(store.clone(), "Cats,Dogs,Birds".parse().unwrap());
        tally.initialize().await.unwrap();
        let app = router(State::new(tally));

        for choice in ["Birds", "Birds", "Dogs"] {
            assert_eq!(send(&app, form_vote(choice)).await.0, StatusCode::OK);
        }
        assert_eq!(send(&app, form_vote("Fish")).await.0, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, Request::get("/results").body(Body::empty()).unwrap()).await;
        assert_eq!(body, r#"{"Cats":0,"Dogs":1,"Birds":2}"#);

        let (_, page) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;
        assert!(page.contains(r#"value="Birds""#));
    }

    #[tokio::test]
    async fn test_cross_origin_reads_allowed() {
        let (_, app) = app().await;

        let request = Request::get("/results")
            .header(ORIGIN, "http://results.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
