use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use sales_dashboard::models::Settings;
use sales_dashboard::{router, DashboardState, DashboardStore};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(DashboardStore::new(DashboardState::demo(Settings::default())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn row_refs(view: &Value) -> Vec<String> {
    view["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["reference"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn product_crud_roundtrip() {
    let app = app();

    let (status, created) = send_json(
        &app,
        "POST",
        "/api/products",
        Some(json!({
            "reference": "REF-100",
            "name": "Lanterne",
            "category": "Maison",
            "unitPrice": "320",
            "monthlyUnitsSold": [1, 2, "x"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["monthlyUnitsSold"][2], 0);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "reference": "REF-100", "name": "Dup", "category": "Maison" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = send_json(
        &app,
        "PUT",
        "/api/products/REF-100",
        Some(json!({ "name": "Lanterne XL", "category": "Maison", "unitPrice": 350 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Lanterne XL");
    assert_eq!(updated["reference"], "REF-100");

    let (status, listed) = send_json(&app, "GET", "/api/products?search=lanterne", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, _) = send_json(&app, "DELETE", "/api/products/REF-100", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = send_json(&app, "DELETE", "/api/products/REF-100", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["success"], false);
}

#[tokio::test]
async fn oversized_sales_do_not_break_aggregate_views() {
    let app = app();
    let (status, created) = send_json(
        &app,
        "POST",
        "/api/products",
        Some(json!({
            "reference": "REF-BIG",
            "name": "Volume",
            "category": "Maison",
            "unitPrice": "1e30",
            "monthlyUnitsSold": [18446744073709551615u64, "1e30", 1]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["monthlyUnitsSold"][0], u32::MAX);
    assert_eq!(created["monthlyUnitsSold"][1], u32::MAX);

    let (status, view) = send_json(&app, "GET", "/api/dashboard/table", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row_refs(&view).len(), 6);

    let (status, _) = send_json(&app, "GET", "/api/table?key=totalSales&direction=desc", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, analytics) = send_json(&app, "GET", "/api/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analytics["summary"]["productCount"], 6);

    let (status, _) = send(
        &app,
        "POST",
        "/api/reports/export",
        Some(json!({ "kind": "sales", "startDate": "2024-01-01", "endDate": "2024-12-31" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_required_field_is_bad_request() {
    let (status, _) = send_json(
        &app(),
        "POST",
        "/api/products",
        Some(json!({ "name": "Sans catégorie" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn categories_are_distinct() {
    let (_, categories) = send_json(&app(), "GET", "/api/categories", None).await;
    assert_eq!(categories, json!(["Électronique", "Maison", "Mode"]));
}

#[tokio::test]
async fn stateless_table_sorts_by_query() {
    let (status, view) = send_json(
        &app(),
        "GET",
        "/api/table?key=totalRevenue&direction=desc&category=Maison",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // REF-003: 417 * 249.50 = 104 041,50 ; REF-004: 85 * 1850 = 157 250
    assert_eq!(row_refs(&view), ["REF-004", "REF-003"]);
    assert_eq!(view["rows"][0]["totalRevenue"], "157\u{202F}250,00\u{00A0}MAD");
}

#[tokio::test]
async fn dashboard_sort_toggles_between_requests() {
    let app = app();

    let (_, view) = send_json(&app, "GET", "/api/dashboard/table", None).await;
    assert_eq!(view["sort"]["key"], Value::Null);
    assert_eq!(row_refs(&view)[0], "REF-001");

    let (_, view) = send_json(
        &app,
        "POST",
        "/api/dashboard/table/sort",
        Some(json!({ "key": "price" })),
    )
    .await;
    assert_eq!(view["sort"]["direction"], "asc");
    assert_eq!(row_refs(&view)[0], "REF-005");

    let (_, view) = send_json(
        &app,
        "POST",
        "/api/dashboard/table/sort",
        Some(json!({ "key": "price" })),
    )
    .await;
    assert_eq!(view["sort"]["direction"], "desc");
    assert_eq!(row_refs(&view)[0], "REF-001");

    let price_header = view["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["key"] == "price")
        .unwrap();
    assert_eq!(price_header["indicator"], "descending");
}

#[tokio::test]
async fn unknown_sort_key_keeps_order() {
    let (_, view) = send_json(
        &app(),
        "POST",
        "/api/dashboard/table/sort",
        Some(json!({ "key": "colour" })),
    )
    .await;
    assert_eq!(view["sort"]["key"], "colour");
    assert_eq!(
        row_refs(&view),
        ["REF-001", "REF-002", "REF-003", "REF-004", "REF-005"]
    );
}

#[tokio::test]
async fn selected_category_filters_dashboard() {
    let app = app();
    let (_, analytics) = send_json(
        &app,
        "PUT",
        "/api/dashboard/category",
        Some(json!({ "category": "Mode" })),
    )
    .await;
    assert_eq!(analytics["summary"]["productCount"], 1);
    assert_eq!(analytics["monthlyRevenue"].as_array().unwrap().len(), 12);

    let (_, view) = send_json(&app, "GET", "/api/dashboard/table", None).await;
    assert_eq!(row_refs(&view), ["REF-005"]);

    let (_, all) = send_json(&app, "GET", "/api/analytics?category=all", None).await;
    assert_eq!(all["summary"]["productCount"], 5);
    assert_eq!(all["categoryDistribution"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn client_crud_and_search() {
    let app = app();
    let (status, created) = send_json(
        &app,
        "POST",
        "/api/clients",
        Some(json!({
            "firstName": "Amina",
            "lastName": "Benali",
            "email": "amina@example.ma",
            "phone": "0522001122",
            "city": "Casablanca"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 2);
    assert_eq!(created["country"], "France");

    let (_, found) = send_json(&app, "GET", "/api/clients?search=benali", None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/clients/2",
        Some(json!({ "firstName": "Amina", "lastName": "Benali", "email": "bad", "phone": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(&app, "DELETE", "/api/clients/2", None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, all) = send_json(&app, "GET", "/api/clients", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn settings_patch_changes_table_currency() {
    let app = app();
    let (status, settings) = send_json(
        &app,
        "PUT",
        "/api/settings",
        Some(json!({ "currency": "EUR", "dateFormat": "YYYY-MM-DD" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["currency"], "EUR");
    assert_eq!(settings["productsPerPage"], 10);

    let (_, view) = send_json(&app, "GET", "/api/dashboard/table", None).await;
    assert!(view["rows"][0]["price"].as_str().unwrap().ends_with("EUR"));

    let (status, _) = send_json(&app, "PUT", "/api/settings", Some(json!({ "productsPerPage": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn report_generation_and_export() {
    let app = app();
    let request = json!({
        "kind": "sales",
        "startDate": "2024-05-01",
        "endDate": "2024-06-01",
        "format": "csv"
    });

    let (status, report) = send_json(&app, "POST", "/api/reports", Some(request.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["format"], "csv");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/reports/export")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(request.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert_eq!(
        disposition,
        "attachment; filename=\"rapport-sales-2024-05-01-2024-06-01.csv\""
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.starts_with("Rapport,Rapport des ventes"));
    assert!(text.contains("REF-001"));

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/reports",
        Some(json!({ "kind": "sales", "startDate": "2024-06-01", "endDate": "2024-05-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn report_export_defaults_to_pdf() {
    let request = json!({ "kind": "financial", "startDate": "2024-01-01", "endDate": "2024-03-31" });
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/reports/export")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(request.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"rapport-financial-2024-01-01-2024-03-31.pdf\""
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.starts_with(b"%PDF-"));
}
