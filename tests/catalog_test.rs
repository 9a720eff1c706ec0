//! Integration tests for the catalog routes: seed, home, item detail and
//! channels.

mod common;

use common::TestHarness;
use serde_json::{json, Value};

fn channel_doc(i: usize) -> Value {
    json!({
        "id": format!("ch-{i}"),
        "name": format!("Canal {i}"),
        "thumb": "https://images.example.com/ch.jpg",
        "stream_url": "https://live.example.com/ch.m3u8"
    })
}

#[tokio::test]
async fn seed_returns_seeded_true() {
    let (h, addr) = TestHarness::new().serve().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{addr}/seed"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["seeded"], true);

    assert_eq!(h.count("mediaitem"), 2);
    assert_eq!(h.count("channel"), 2);
}

#[tokio::test]
async fn seeding_twice_keeps_counts() {
    let (h, addr) = TestHarness::new().serve().await;
    let client = reqwest::Client::new();

    for _ in 0..2 {
        let resp = client
            .post(format!("http://{addr}/seed"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    assert_eq!(h.count("mediaitem"), 2);
    assert_eq!(h.count("channel"), 2);
}

#[tokio::test]
async fn seed_without_store_is_500() {
    let (_h, addr) = TestHarness::unavailable().serve().await;
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/seed"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let json: Value = resp.json().await.unwrap();
    assert!(json["detail"]
        .as_str()
        .unwrap()
        .contains("Database not configured"));
}

#[tokio::test]
async fn home_groups_seeded_catalog() {
    let (h, addr) = TestHarness::new().serve().await;
    h.ctx.catalog.seed().unwrap();

    let resp = reqwest::get(format!("http://{addr}/home")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let json: Value = resp.json().await.unwrap();

    assert_eq!(json["novelas"].as_array().unwrap().len(), 1);
    assert_eq!(json["series"].as_array().unwrap().len(), 1);
    assert_eq!(json["filmes"].as_array().unwrap().len(), 0);
    assert_eq!(json["programas"].as_array().unwrap().len(), 0);
    assert_eq!(json["canais"].as_array().unwrap().len(), 2);
    assert_eq!(json["novelas"][0]["id"], "novela-1");
    assert_eq!(json["series"][0]["title"], "Código 5.1");
    assert!(json["canais"][0]["_id"].is_string());
}

#[tokio::test]
async fn home_on_empty_store_has_empty_carousels() {
    let (_h, addr) = TestHarness::new().serve().await;
    let json: Value = reqwest::get(format!("http://{addr}/home"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    for key in ["novelas", "series", "filmes", "programas", "canais"] {
        assert!(json[key].as_array().unwrap().is_empty(), "{key} not empty");
    }
}

#[tokio::test]
async fn home_without_store_is_500() {
    let (_h, addr) = TestHarness::unavailable().serve().await;
    let resp = reqwest::get(format!("http://{addr}/home")).await.unwrap();
    assert_eq!(resp.status(), 500);
    let json: Value = resp.json().await.unwrap();
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn item_detail_after_seed() {
    let (h, addr) = TestHarness::new().serve().await;
    h.ctx.catalog.seed().unwrap();

    let resp = reqwest::get(format!("http://{addr}/item/novela-1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["title"], "Amor em Vermelho");
    assert_eq!(json["type"], "novela");
    assert_eq!(json["audio_tracks"].as_array().unwrap().len(), 2);
    assert_eq!(json["audio_tracks"][1]["label"], "Audiodescrição");
    assert_eq!(json["seasons"][0]["episodes"], 20);
    assert!(json["_id"].is_string());
}

#[tokio::test]
async fn item_detail_not_found() {
    let (h, addr) = TestHarness::new().serve().await;
    h.ctx.catalog.seed().unwrap();

    let resp = reqwest::get(format!("http://{addr}/item/does-not-exist"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["code"], "not_found");
    assert!(json["detail"].as_str().unwrap().contains("does-not-exist"));
}

#[tokio::test]
async fn item_detail_without_store_is_500() {
    let (_h, addr) = TestHarness::unavailable().serve().await;
    let resp = reqwest::get(format!("http://{addr}/item/novela-1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
}

#[tokio::test]
async fn channels_listing() {
    let (h, addr) = TestHarness::new().serve().await;
    h.ctx.catalog.seed().unwrap();

    let resp = reqwest::get(format!("http://{addr}/channels")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let channels: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(channels.len(), 2);
    assert_eq!(channels[0]["id"], "globo");
    assert!(channels[0]["alt_audio_url"].is_string());
    assert_eq!(channels[1]["id"], "sportv");
    assert_eq!(channels[1]["language"], "pt-BR");
}

#[tokio::test]
async fn channels_capped_at_fifty() {
    let (h, addr) = TestHarness::new().serve().await;
    for i in 0..75 {
        h.insert("channel", channel_doc(i));
    }

    let channels: Vec<Value> = reqwest::get(format!("http://{addr}/channels"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(channels.len(), 50);

    let home: Value = reqwest::get(format!("http://{addr}/home"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(home["canais"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn carousels_capped_at_twelve() {
    let (h, addr) = TestHarness::new().serve().await;
    for i in 0..20 {
        h.insert(
            "mediaitem",
            json!({
                "id": format!("filme-{i}"),
                "title": format!("Filme {i}"),
                "type": "filme",
                "synopsis": "",
                "banner": "https://images.example.com/b.jpg",
                "thumb": "https://images.example.com/t.jpg"
            }),
        );
    }

    let home: Value = reqwest::get(format!("http://{addr}/home"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let filmes = home["filmes"].as_array().unwrap();
    assert_eq!(filmes.len(), 12);
    assert_eq!(filmes[0]["id"], "filme-0");
    assert_eq!(filmes[11]["id"], "filme-11");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let (_h, addr) = TestHarness::new().serve().await;
    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/channels"))
        .header("Origin", "https://app.example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_seed_and_reads_all_succeed() {
    let (h, addr) = TestHarness::new().serve().await;
    let client = reqwest::Client::new();

    let mut tasks = Vec::new();
    for i in 0..24 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            let req = match i % 3 {
                0 => client.post(format!("http://{addr}/seed")),
                1 => client.get(format!("http://{addr}/home")),
                _ => client.get(format!("http://{addr}/channels")),
            };
            let resp = req.send().await.unwrap();
            (i, resp.status(), resp.text().await.unwrap())
        }));
    }

    for task in tasks {
        let (i, status, body) = task.await.unwrap();
        assert_eq!(status, 200, "request {i} failed: {body}");
    }

    // Racing seeds may each insert the full demo set, never a partial one.
    let items = h.count("mediaitem");
    let channels = h.count("channel");
    assert!(items >= 2 && items % 2 == 0, "{items} media items");
    assert!(channels >= 2 && channels % 2 == 0, "{channels} channels");
}
