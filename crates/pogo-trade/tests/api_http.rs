//! End-to-end tests against a live server on an ephemeral port.

use std::net::SocketAddr;

use pogo_trade::engine::test_support::{catalog_with, standard_catalog};
use pogo_trade::models::{Catalog, PogoConfig, TradeOptions};
use pogo_trade::server;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const BODY_LIMIT: usize = 2048;

struct TestServer {
    base: String,
    cancel: CancellationToken,
    handle: JoinHandle<std::io::Result<()>>,
    _dir: TempDir,
}

impl TestServer {
    async fn start(catalog: Option<&Catalog>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        std::fs::create_dir_all(&public).unwrap();
        std::fs::write(public.join("index.html"), "<html>trade</html>").unwrap();

        let catalog_path = dir.path().join("pokemon-go-db.json");
        if let Some(catalog) = catalog {
            std::fs::write(&catalog_path, serde_json::to_vec(catalog).unwrap()).unwrap();
        }

        let mut config = PogoConfig::default();
        config.server.public_dir = public.display().to_string();
        config.server.max_body_bytes = BODY_LIMIT;
        config.catalog.path = catalog_path.display().to_string();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        let app = pogo_trade::build_app(&config);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(server::run(listener, app, cancel.clone()));

        Self {
            base: format!("http://{addr}"),
            cancel,
            handle,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    async fn stop(self) {
        self.cancel.cancel();
        self.handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn evaluates_golden_trade() {
    let server = TestServer::start(Some(&standard_catalog())).await;
    let request = json!({
        "left": [{"pokemonId": 150, "options": {"shadow": true}}],
        "right": [
            {"pokemonId": 1, "options": {"shiny": true}},
            {"pokemonId": "4"},
            {"pokemonId": 25, "options": {"lucky": true}}
        ]
    });

    let response = reqwest::Client::new()
        .post(server.url("/api/trade-evaluate"))
        .json(&request)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["left"]["total"], 1245);
    assert_eq!(body["right"]["total"], 1149);
    assert_eq!(body["delta"], 96);
    assert_eq!(body["outcome"], "fair");
    assert_eq!(body["verdict"], "equal");
    assert_eq!(body["right"]["items"].as_array().unwrap().len(), 3);

    server.stop().await;
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let server = TestServer::start(Some(&standard_catalog())).await;
    let client = reqwest::Client::new();

    for body in ["[1, 2]", "{\"left\": 5}", "{oops"] {
        let response = client
            .post(server.url("/api/trade-evaluate"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400, "{body}");
        let value: Value = response.json().await.unwrap();
        assert!(value["error"].is_string());
    }

    server.stop().await;
}

#[tokio::test]
async fn empty_body_is_fair() {
    let server = TestServer::start(Some(&standard_catalog())).await;
    let response = reqwest::Client::new()
        .post(server.url("/api/trade-evaluate"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["delta"], 0);
    assert_eq!(body["outcome"], "fair");

    server.stop().await;
}

#[tokio::test]
async fn missing_tables_are_server_error() {
    let catalog = catalog_with(standard_catalog().pokemon, TradeOptions::default());
    let server = TestServer::start(Some(&catalog)).await;

    let response = reqwest::Client::new()
        .post(server.url("/api/trade-evaluate"))
        .json(&json!({"left": [{"pokemonId": 1}], "right": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("variantMultipliers"));

    server.stop().await;
}

#[tokio::test]
async fn missing_catalog_points_at_builder() {
    let server = TestServer::start(None).await;
    let client = reqwest::Client::new();

    let response = client.get(server.url("/api/db")).send().await.unwrap();
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Catalog not found. Run: pogo-sync");

    let response = client
        .post(server.url("/api/trade-evaluate"))
        .json(&json!({"left": [], "right": []}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    server.stop().await;
}

#[tokio::test]
async fn serves_catalog_document() {
    let server = TestServer::start(Some(&standard_catalog())).await;
    let response = reqwest::get(server.url("/api/db")).await.unwrap();
    assert_eq!(response.status(), 200);

    let catalog: Catalog = response.json().await.unwrap();
    assert_eq!(catalog.pokemon.len(), 6);
    assert!(catalog.trade_options.variant_multipliers.is_some());

    server.stop().await;
}

#[tokio::test]
async fn searches_by_name() {
    let server = TestServer::start(Some(&standard_catalog())).await;
    let client = reqwest::Client::new();

    let hits: Vec<Value> = client
        .get(server.url("/api/pokemon?q=MEW"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let ids: Vec<u64> = hits.iter().map(|h| h["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![150, 151]);

    let padded: Vec<Value> = client
        .get(server.url("/api/pokemon?q=mew%20"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(padded.is_empty());

    let all: Vec<Value> = client
        .get(server.url("/api/pokemon"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all.len(), 6);

    server.stop().await;
}

#[tokio::test]
async fn health_and_static_fallback() {
    let server = TestServer::start(Some(&standard_catalog())).await;

    let health: Value = reqwest::get(server.url("/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");

    let page = reqwest::get(server.url("/some/client/route")).await.unwrap();
    assert!(page.status().is_success());
    assert_eq!(page.text().await.unwrap(), "<html>trade</html>");

    server.stop().await;
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = TestServer::start(Some(&standard_catalog())).await;
    let padding = "x".repeat(BODY_LIMIT * 2);
    let body = format!("{{\"left\": [], \"right\": [], \"note\": \"{padding}\"}}");

    let response = reqwest::Client::new()
        .post(server.url("/api/trade-evaluate"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 413);

    server.stop().await;
}
