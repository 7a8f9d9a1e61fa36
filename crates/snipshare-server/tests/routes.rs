//! Route-level tests driven through `warp::test`.

use async_trait::async_trait;
use serde_json::{json, Value};
use snipshare_core::{
    CodeProjection, KvStore, MemoryKv, PageLoader, RecordError, RecordStore, ShareService,
    DEFAULT_TTL,
};
use snipshare_server::{routes, AppState};
use std::collections::HashMap;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::test::request;

struct FixedRecords(HashMap<String, CodeProjection>);

#[async_trait]
impl RecordStore for FixedRecords {
    async fn fetch_projection(&self, id: &str) -> Result<CodeProjection, RecordError> {
        if id == "broken" {
            return Err(RecordError::Fetch("upstream returned 500".to_string()));
        }
        self.0
            .get(id)
            .cloned()
            .ok_or_else(|| RecordError::NotFound(id.to_string()))
    }
}

fn state(kv: Arc<MemoryKv>) -> AppState {
    let mut records = HashMap::new();
    records.insert(
        "r1".to_string(),
        CodeProjection {
            title: "T".to_string(),
            code: "C".to_string(),
        },
    );
    records.insert(
        "a b".to_string(),
        CodeProjection {
            title: "Spaced".to_string(),
            code: "S".to_string(),
        },
    );
    AppState::new(
        ShareService::new(kv, DEFAULT_TTL),
        PageLoader::new(Arc::new(FixedRecords(records)), "https://pb.example.com"),
    )
}

fn text(body: &[u8]) -> String {
    String::from_utf8(body.to_vec()).unwrap()
}

fn json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn create_then_fetch_returns_code() {
    let api = routes(state(Arc::new(MemoryKv::new())));

    let created = request()
        .method("POST")
        .path("/api/share")
        .json(&json!({ "code": "print('hi')\n" }))
        .reply(&api)
        .await;
    assert_eq!(created.status(), StatusCode::OK);
    let id = json_body(created.body())["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 36);

    let fetched = request()
        .method("GET")
        .path(&format!("/api/share?id={}", id))
        .reply(&api)
        .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(json_body(fetched.body()), json!({ "code": "print('hi')\n" }));
}

#[tokio::test]
async fn same_body_twice_yields_distinct_ids() {
    let api = routes(state(Arc::new(MemoryKv::new())));

    let mut ids = Vec::new();
    for _ in 0..2 {
        let res = request()
            .method("POST")
            .path("/api/share")
            .json(&json!({ "code": "dup" }))
            .reply(&api)
            .await;
        ids.push(json_body(res.body())["id"].as_str().unwrap().to_string());
    }
    assert_ne!(ids[0], ids[1]);

    for id in &ids {
        let res = request()
            .path(&format!("/api/share?id={}", id))
            .reply(&api)
            .await;
        assert_eq!(json_body(res.body()), json!({ "code": "dup" }));
    }
}

#[tokio::test]
async fn missing_id_is_a_bad_request() {
    let api = routes(state(Arc::new(MemoryKv::new())));

    for path in ["/api/share", "/api/share?id=", "/api/share?other=1"] {
        let res = request().path(path).reply(&api).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(text(res.body()), "Missing id");
    }
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let api = routes(state(Arc::new(MemoryKv::new())));

    let res = request()
        .path("/api/share?id=1b4e28ba-2fa1-11d2-883f-0016d3cca427")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(text(res.body()), "Not found");
}

#[tokio::test]
async fn repeated_id_uses_first_value() {
    let kv = Arc::new(MemoryKv::new());
    kv.put("abc", r#"{"code":"first"}"#.to_string(), DEFAULT_TTL)
        .await
        .unwrap();
    let api = routes(state(kv));

    let res = request().path("/api/share?id=abc&id=abc").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res.body()), json!({ "code": "first" }));

    let res = request()
        .path("/api/share?id=abc&id=missing")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = request().path("/api/share?id=&id=abc").reply(&api).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_stored_value_is_not_found() {
    let kv = Arc::new(MemoryKv::new());
    kv.put("blank", String::new(), DEFAULT_TTL).await.unwrap();
    let api = routes(state(kv));

    let res = request().path("/api/share?id=blank").reply(&api).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(text(res.body()), "Not found");
}

#[tokio::test]
async fn corrupt_record_is_a_server_error() {
    let kv = Arc::new(MemoryKv::new());
    kv.put("garbage", "{{{".to_string(), DEFAULT_TTL).await.unwrap();
    kv.put("no-code", r#"{"title":"x"}"#.to_string(), DEFAULT_TTL)
        .await
        .unwrap();
    let api = routes(state(kv));

    for id in ["garbage", "no-code"] {
        let res = request()
            .path(&format!("/api/share?id={}", id))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(text(res.body()), "Invalid data");
    }
}

#[tokio::test]
async fn malformed_create_body_is_rejected() {
    let api = routes(state(Arc::new(MemoryKv::new())));

    let res = request()
        .method("POST")
        .path("/api/share")
        .header("content-type", "application/json")
        .body("not json")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(res.body()), "Invalid request body");

    let res = request()
        .method("POST")
        .path("/api/share")
        .json(&json!({ "code": 7 }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn page_data_for_known_record() {
    let api = routes(state(Arc::new(MemoryKv::new())));

    let res = request().path("/share/r1").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        json_body(res.body()),
        json!({ "title": "T", "code": "C", "url": "https://pb.example.com/share/r1" })
    );
}

#[tokio::test]
async fn page_id_is_percent_decoded() {
    let api = routes(state(Arc::new(MemoryKv::new())));

    let res = request().path("/share/a%20b").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    let page = json_body(res.body());
    assert_eq!(page["title"], "Spaced");
    assert_eq!(page["code"], "S");

    let res = request().path("/share/%72%31").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res.body())["title"], "T");

    // %FF is not UTF-8
    let res = request().path("/share/%FF").reply(&api).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(text(res.body()), "Not found");
}

#[tokio::test]
async fn page_data_failures_are_not_partial() {
    let api = routes(state(Arc::new(MemoryKv::new())));

    let res = request().path("/share/unknown").reply(&api).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(text(res.body()), "Not found");

    let res = request().path("/share/broken").reply(&api).await;
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(text(res.body()), "Failed to fetch code data");
}

#[tokio::test]
async fn health_and_unknown_routes() {
    let api = routes(state(Arc::new(MemoryKv::new())));

    let res = request().path("/health").reply(&api).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = request().path("/nowhere").reply(&api).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = request().method("DELETE").path("/api/share").reply(&api).await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}
