use fakedata_api::build_router;
use fakedata_api::framework::ControllerSettings;
use fakedata_api::lifecycle::ApiSystem;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serves a fresh system on an ephemeral port and returns its base URL.
async fn spawn_app() -> String {
    let system = ApiSystem::new(64, ControllerSettings::default()).expect("Failed to build system");
    let router = build_router(&system);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn get_json(client: &reqwest::Client, url: &str) -> (StatusCode, Value) {
    let response = client.get(url).send().await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_index_lists_every_endpoint() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    for path in ["/", "/all-endpoints"] {
        let (status, body) = get_json(&client, &format!("{base}{path}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 17);
        let users = &body["endpoints"][0];
        assert_eq!(users["prefix"], "/users");
        assert_eq!(users["route_name"], "users-list");
        let params: Vec<&str> = users["params"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect();
        assert!(params.contains(&"first_name"));
        assert!(!params.contains(&"password"));
    }
}

#[tokio::test]
async fn test_list_returns_page_envelope() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, &format!("{base}/employees?page=1&pageSize=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 5);
    assert_eq!(body["total"], 5);
    assert_eq!(body["results"].as_array().unwrap().len(), 5);

    let (status, body) = get_json(&client, &format!("{base}/employees/?page=2&pageSize=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["id"], 3);
}

#[tokio::test]
async fn test_retrieve_by_id_and_uuid() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let (status, by_id) = get_json(&client, &format!("{base}/products/2")).await;
    assert_eq!(status, StatusCode::OK);
    let uuid = by_id["uuid"].as_str().unwrap().to_string();

    let (status, by_uuid) = get_json(&client, &format!("{base}/products/{uuid}/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id, by_uuid);

    let (status, body) = get_json(&client, &format!("{base}/products/abc")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Product not found"}));
}

#[tokio::test]
async fn test_regenerate_then_list() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/todos/regenerate?length=5"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "5 todos regenerated.", "count": 5}));

    let (_, body) = get_json(&client, &format!("{base}/todos")).await;
    assert_eq!(body["total"], 5);

    let response = client
        .post(format!("{base}/todos/regenerate?length=0"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_update_and_patch() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/notifications/regenerate?length=3"))
        .send()
        .await
        .unwrap();
    let (_, template) = get_json(&client, &format!("{base}/notifications/1")).await;

    let response = client
        .post(format!("{base}/notifications"))
        .json(&template)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["id"], 4);
    assert_ne!(created["uuid"], template["uuid"]);

    let mut replacement = template.clone();
    replacement["title"] = json!("Replaced");
    let response = client
        .put(format!("{base}/notifications/4"))
        .json(&replacement)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["id"], 4);
    assert_eq!(updated["uuid"], created["uuid"]);
    assert_eq!(updated["title"], "Replaced");

    let response = client
        .patch(format!("{base}/notifications/4/"))
        .json(&json!({"title": "Patched"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let patched: Value = response.json().await.unwrap();
    assert_eq!(patched["title"], "Patched");
    assert_eq!(patched["level"], updated["level"]);
}

#[tokio::test]
async fn test_invalid_requests_get_detail_bodies() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, &format!("{base}/users?pageSize=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());

    let response = client
        .post(format!("{base}/users"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{base}/payments"))
        .json(&json!({"amount": 10.0}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("payment"));

    let (status, body) = get_json(&client, &format!("{base}/users?pageSize=100000000000")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "pageSize must be less than or equal to 10000"}));

    let response = client
        .post(format!("{base}/users/regenerate?length=10001"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = get_json(&client, &format!("{base}/nowhere")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Not Found"}));
}

#[tokio::test]
async fn test_regenerate_path_is_not_a_record() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();
    let not_found = json!({"detail": "User not found"});

    for path in ["/users/regenerate", "/users/regenerate/"] {
        let (status, body) = get_json(&client, &format!("{base}{path}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {path}");
        assert_eq!(body, not_found);
    }

    for request in [
        client.put(format!("{base}/users/regenerate")),
        client.patch(format!("{base}/users/regenerate/")),
    ] {
        let response = request.json(&json!({"first_name": "X"})).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, not_found);
    }

    let response = client
        .post(format!("{base}/users/regenerate?length=2"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_only_canonical_identifiers_resolve() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let (status, user) = get_json(&client, &format!("{base}/users/3")).await;
    assert_eq!(status, StatusCode::OK);
    let uuid = user["uuid"].as_str().unwrap().to_string();

    let simple = uuid.replace('-', "");
    let upper = uuid.to_uppercase();
    for token in ["007", "%2B3", simple.as_str(), upper.as_str()] {
        let (status, body) = get_json(&client, &format!("{base}/users/{token}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "token {token}");
        assert_eq!(body, json!({"detail": "User not found"}));
    }
}

#[tokio::test]
async fn test_every_resource_is_served() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let (_, index) = get_json(&client, &format!("{base}/all-endpoints")).await;
    let prefixes: Vec<String> = index["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["prefix"].as_str().unwrap().to_string())
        .collect();
    for prefix in [
        "/medical",
        "/incomes",
        "/expenses",
        "/attendances",
        "/chats",
        "/analytics",
        "/cryptos",
        "/crypto-transactions",
        "/feedbacks",
    ] {
        assert!(prefixes.iter().any(|p| p == prefix), "{prefix} missing");
    }

    for prefix in &prefixes {
        let (status, page) = get_json(&client, &format!("{base}{prefix}?pageSize=3")).await;
        assert_eq!(status, StatusCode::OK, "{prefix}");
        assert_eq!(page["total"], 3, "{prefix}");

        let (status, record) = get_json(&client, &format!("{base}{prefix}/2")).await;
        assert_eq!(status, StatusCode::OK, "{prefix}");
        assert_eq!(record["id"], 2);
    }
}
