use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, patch},
    Router,
};
use marquee_proto::config::CounterConfig;
use marquee_proto::counter::{AppwriteCounter, CounterError, TrendingStore, TRENDING_LIMIT};
use marquee_proto::model::MovieSummary;
use serde_json::{json, Value};
use tokio::net::TcpListener;

const PROJECT: &str = "proj";
const DOCS: &str = "/v1/databases/db/collections/trending/documents";

type Docs = Arc<Mutex<Vec<Value>>>;

fn check_project(headers: &HeaderMap) -> Result<(), StatusCode> {
    match headers.get("x-appwrite-project").and_then(|v| v.to_str().ok()) {
        Some(PROJECT) => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn list(
    State(docs): State<Docs>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, StatusCode> {
    check_project(&headers)?;
    let mut out: Vec<Value> = docs.lock().unwrap().clone();
    let mut order_by: Option<String> = None;
    let mut limit: Option<usize> = None;
    for (key, raw) in params {
        assert_eq!(key, "queries[]");
        let q: Value = serde_json::from_str(&raw).unwrap();
        match q["method"].as_str().unwrap() {
            "equal" => {
                let attr = q["attribute"].as_str().unwrap().to_string();
                let wanted = q["values"][0].clone();
                out.retain(|d| d[&attr] == wanted);
            }
            "orderDesc" => order_by = Some(q["attribute"].as_str().unwrap().to_string()),
            "limit" => limit = Some(q["values"][0].as_u64().unwrap() as usize),
            other => panic!("unexpected query method {other}"),
        }
    }
    if let Some(attr) = order_by {
        out.sort_by(|a, b| b[&attr].as_u64().cmp(&a[&attr].as_u64()));
    }
    if let Some(n) = limit {
        out.truncate(n);
    }
    Ok(Json(json!({ "total": out.len(), "documents": out })))
}

async fn create(
    State(docs): State<Docs>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    check_project(&headers)?;
    let mut doc = body["data"].clone();
    doc["$id"] = body["documentId"].clone();
    docs.lock().unwrap().push(doc.clone());
    Ok(Json(doc))
}

async fn update(
    State(docs): State<Docs>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    check_project(&headers)?;
    let mut docs = docs.lock().unwrap();
    let doc = docs
        .iter_mut()
        .find(|d| d["$id"] == id.as_str())
        .ok_or(StatusCode::NOT_FOUND)?;
    doc["count"] = body["data"]["count"].clone();
    Ok(Json(doc.clone()))
}

fn counter_at(endpoint: &str, project: &str) -> AppwriteCounter {
    AppwriteCounter::new(CounterConfig {
        endpoint: endpoint.to_string(),
        project_id: project.to_string(),
        database_id: "db".to_string(),
        collection_id: "trending".to_string(),
        api_key: None,
    })
}

async fn spawn_counter(seed: Vec<Value>) -> (AppwriteCounter, String, Docs) {
    let docs: Docs = Arc::new(Mutex::new(seed));
    let app = Router::new()
        .route(DOCS, get(list).post(create))
        .route(&format!("{DOCS}/:id"), patch(update))
        .with_state(docs.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let endpoint = format!("http://{addr}/v1");
    (counter_at(&endpoint, PROJECT), endpoint, docs)
}

fn movie(id: u64, title: &str, poster: Option<&str>) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        vote_average: None,
        poster_path: poster.map(str::to_string),
        release_date: None,
        genre_ids: vec![],
    }
}

fn doc(id: &str, movie_id: u64, count: u64) -> Value {
    json!({
        "$id": id,
        "searchTerm": format!("movie {movie_id}"),
        "count": count,
        "movie_id": movie_id,
        "poster_url": format!("https://image.tmdb.org/t/p/w500/{movie_id}.jpg"),
    })
}

#[tokio::test]
async fn first_click_creates_document() {
    let (counter, _, docs) = spawn_counter(vec![]).await;
    counter
        .record_click(&movie(155, "The Dark Knight", Some("/qJ2tW6WMUDux911r6m7haRef0WH.jpg")))
        .await
        .unwrap();

    let docs = docs.lock().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["count"], 1);
    assert_eq!(docs[0]["movie_id"], 155);
    assert_eq!(docs[0]["searchTerm"], "The Dark Knight");
    assert_eq!(
        docs[0]["poster_url"],
        "https://image.tmdb.org/t/p/w500/qJ2tW6WMUDux911r6m7haRef0WH.jpg"
    );
    assert!(!docs[0]["$id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn repeat_click_increments_existing_document() {
    let (counter, _, docs) = spawn_counter(vec![doc("a", 1, 3), doc("b", 2, 9)]).await;
    counter.record_click(&movie(1, "one", None)).await.unwrap();

    let docs = docs.lock().unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0]["count"], 4);
    assert_eq!(docs[1]["count"], 9);
}

#[tokio::test]
async fn top_is_ordered_and_limited() {
    let seed = (1..=12).map(|i| doc(&format!("d{i}"), i, i * 2)).collect();
    let (counter, _, _docs) = spawn_counter(seed).await;

    let top = counter.top(TRENDING_LIMIT).await.unwrap();
    assert_eq!(top.len(), TRENDING_LIMIT);
    assert_eq!(top[0].movie_id, 12);
    assert_eq!(top[0].count, 24);
    assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
}

#[tokio::test]
async fn wrong_project_is_a_status_error() {
    let (_counter, endpoint, _docs) = spawn_counter(vec![]).await;
    let intruder = counter_at(&endpoint, "other");
    assert!(matches!(
        intruder.top(10).await,
        Err(CounterError::Status { operation: "top", .. })
    ));
}
