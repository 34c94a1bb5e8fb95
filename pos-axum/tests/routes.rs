use axum_test::TestServer;
use pos_axum::{config::AxumConfig, router};

mod app;
use app::{FEED, TestApp};

async fn server(feed: &str) -> TestServer {
    let app = TestApp::new(feed).await;
    TestServer::new(router(app, AxumConfig::default())).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_points_of_sale_keep_feed_order() {
    let server = server(FEED).await;
    server.post("/points-of-sale/update").await.assert_status_ok();

    let response = server
        .get("/points-of-sale")
        .add_query_param("day", "6")
        .add_query_param("time", "1:00")
        .await;
    response.assert_status_ok();

    // Saturday at 1am: the machine and the Friday night spill, in feed order
    let body = response.text();
    let andel = body.find("\"andel\"").unwrap();
    let night = body.find("\"night\"").unwrap();
    assert!(andel < night);
    assert!(!body.contains("\"muzeum\""));
}

#[test_log::test(tokio::test)]
async fn test_update_replaces_previous_data() {
    let server = server(FEED).await;

    for _ in 0..2 {
        let response = server.post("/points-of-sale/update").await;
        response.assert_status_ok();
        let report: serde_json::Value = response.json();
        assert_eq!(report["data"]["pointsOfSale"], 3);
    }

    let response = server
        .get("/points-of-sale")
        .add_query_param("day", "0")
        .add_query_param("time", "12:00")
        .await;
    let body: serde_json::Value = response.json();
    let data = body["data"].as_object().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data["andel"]["openingHours"].as_array().unwrap().len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_update_reports_feed_failures() {
    let server = server("this is not json").await;

    let response = server.post("/points-of-sale/update").await;
    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&serde_json::json!({
        "code": 500,
        "message": "Failed to retrieve the points-of-sale feed",
    }));
}

#[test_log::test(tokio::test)]
async fn test_update_accepts_numeric_ids() {
    let feed = r#"[{
        "id": 1001, "type": "ticket-machine", "name": "Florenc",
        "lat": 50.09, "lon": 14.44, "services": 1, "payMethods": 1,
        "openingHours": [{"from": 0, "to": 6, "hours": "5:00-0:30"}]
    }]"#;
    let server = server(feed).await;
    server.post("/points-of-sale/update").await.assert_status_ok();

    let response = server
        .get("/points-of-sale")
        .add_query_param("day", "1")
        .add_query_param("time", "00:15")
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["1001"]["id"], "1001");
    assert_eq!(body["data"]["1001"]["openingHours"][0]["hours"], "05:00-00:30");
}

#[test_log::test(tokio::test)]
async fn test_docs_describe_both_tags() {
    let server = server(FEED).await;

    let page = server.get("/docs").await;
    page.assert_status_ok();
    assert!(page.text().contains(r#"spec-url="/docs/api.json""#));

    let api: serde_json::Value = server.get("/docs/api.json").await.json();
    let tags: Vec<&str> = api["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|tag| tag["name"].as_str().unwrap())
        .collect();
    assert_eq!(tags, vec!["points-of-sale", "admin"]);
    assert_eq!(api["paths"]["/points-of-sale/update"]["post"]["tags"][0], "admin");
}
