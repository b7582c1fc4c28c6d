use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::storage::LocalItemStore;
use service::student::StudentService;
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    data_path: std::path::PathBuf,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated file-backed store per test run
    let data_path = std::env::temp_dir().join(format!("e2e_students_{}.json", Uuid::new_v4()));
    let store = Arc::new(LocalItemStore::open(&data_path, "testtable1").await?);
    let app = server::startup::build_app(StudentService::new(store));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_path })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    let _ = tokio::fs::remove_file(&app.data_path).await;
    Ok(())
}

#[tokio::test]
async fn e2e_student_lifecycle_persists_to_file() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/student-write", app.base_url))
        .json(&json!({"Id": 1, "StudentName": "Alice", "Age": 20, "City": "NY"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // the store file now holds the item in DynamoDB JSON form
    let stored: Value = serde_json::from_slice(&tokio::fs::read(&app.data_path).await?)?;
    assert_eq!(stored["1"]["StudentName"], json!({"S": "Alice"}));
    assert_eq!(stored["1"]["Age"], json!({"N": "20"}));

    let res = c.put(format!("{}/student/update/1", app.base_url))
        .json(&json!({"Id": 1, "StudentName": "Bob", "Age": 21, "City": "LA"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["StudentName"], "Bob");

    let res = c.get(format!("{}/student/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    let record: Value = serde_json::from_str(body["data"].as_str().unwrap_or_default())?;
    assert_eq!(record, json!({"Id": 1, "StudentName": "Bob", "Age": 21, "City": "LA"}));

    let res = c.delete(format!("{}/student/delete/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.delete(format!("{}/student/delete/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"], "You either deleted the details or You haven't created");

    let _ = tokio::fs::remove_file(&app.data_path).await;
    Ok(())
}
