use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::time::{sleep, Duration};

// Test client wrapper for making API calls
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn post(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn put(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .put(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .delete(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }
}

async fn expect_json(response: reqwest::Response, what: &str) -> Value {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        panic!("Failed to {}: {} - {}", what, status, error_text);
    }
    response.json().await.expect("response body is JSON")
}

#[tokio::test]
async fn test_budget_workflow_against_running_server() {
    // Start the server first, e.g. `PORT=3002 DATABASE_URL=... cargo run`
    let Ok(base_url) = std::env::var("TEST_API_BASE_URL") else {
        println!("TEST_API_BASE_URL not set, skipping live HTTP workflow");
        return;
    };
    let client = TestClient::new(base_url);

    println!("0. Verifying API server connectivity...");
    let mut retries = 0;
    let max_retries = 30;
    loop {
        match client.get("/health").await {
            Ok(resp) if resp.status().is_success() => break,
            _ => {
                if retries >= max_retries {
                    panic!("API server is not responding after {} attempts", max_retries);
                }
                sleep(Duration::from_secs(2)).await;
                retries += 1;
            }
        }
    }

    println!("1. Creating catalog items");
    let cemento = expect_json(
        client
            .post("/api/catalogo", json!({"nombre": "Cemento", "unidad": "bulto"}))
            .await
            .expect("request sent"),
        "create Cemento",
    )
    .await;
    let arena = expect_json(
        client
            .post("/api/catalogo", json!({"nombre": "Arena", "unidad": "m3"}))
            .await
            .expect("request sent"),
        "create Arena",
    )
    .await;

    let catalog = expect_json(client.get("/api/catalogo").await.expect("request sent"), "list catalog").await;
    let catalog = catalog.as_array().unwrap();
    assert!(catalog.contains(&cemento));
    assert!(catalog.contains(&arena));

    println!("2. Creating a matrix that uses them");
    let insumos = json!([
        {"id": cemento["id"], "cantidad": 7},
        {"id": arena["id"], "cantidad": 0.55}
    ]);
    let matrix = expect_json(
        client
            .post(
                "/api/matrices",
                json!({"nombre": "Concreto f'c 250", "unidad": "m3", "insumos": insumos}),
            )
            .await
            .expect("request sent"),
        "create matrix",
    )
    .await;
    assert_eq!(matrix["insumos"], insumos);

    println!("3. Replacing its inputs");
    let path = format!("/api/matrices/{}", matrix["id"]);
    let updated = expect_json(
        client
            .put(
                &path,
                json!({"nombre": "Concreto f'c 250", "unidad": "m3", "insumos": [{"id": cemento["id"], "cantidad": 8}]}),
            )
            .await
            .expect("request sent"),
        "update matrix",
    )
    .await;
    assert_eq!(updated["insumos"], json!([{"id": cemento["id"], "cantidad": 8}]));

    println!("4. Rejected write surfaces as a plain 500");
    let rejected = client
        .post("/api/catalogo", json!({"unidad": "kg"}))
        .await
        .expect("request sent");
    assert_eq!(rejected.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(rejected.text().await.unwrap().contains("not-null"));

    println!("5. Cleaning up");
    for path in [
        format!("/api/matrices/{}", matrix["id"]),
        format!("/api/catalogo/{}", cemento["id"]),
        format!("/api/catalogo/{}", arena["id"]),
    ] {
        let deleted = expect_json(client.delete(&path).await.expect("request sent"), "delete").await;
        assert_eq!(deleted, json!({"success": true}));
    }
}
