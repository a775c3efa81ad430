use crate::error::Result;
use crate::models::{
    Client, ClientInput, Product, ProductInput, Report, ReportRequest, Settings, SettingsPatch,
};
use crate::service::{analytics, reports, DashboardAnalytics, ReportData};
use crate::store::DashboardStore;
use crate::table::{SortConfig, SortDirection, SortableAggregateTable, TableView};
use axum::{
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// 商品列表筛选参数
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

/// 无状态表格视图参数
#[derive(Debug, Default, Deserialize)]
pub struct TableQuery {
    pub key: Option<String>,
    pub direction: Option<SortDirection>,
    pub search: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SortRequest {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub category: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClientQuery {
    pub search: Option<String>,
}

/// 删除操作的响应体
#[derive(Debug, Serialize)]
pub struct DeleteResponse<T> {
    pub success: bool,
    pub message: String,
    pub deleted: T,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn list_products(
    State(store): State<DashboardStore>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<Product>> {
    let state = store.read().await;
    Json(
        state
            .catalog
            .filter(query.search.as_deref(), query.category.as_deref()),
    )
}

pub async fn create_product(
    State(store): State<DashboardStore>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = store.write().await.catalog.add(input)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(store): State<DashboardStore>,
    Path(reference): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>> {
    let product = store.write().await.catalog.update(&reference, input)?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(store): State<DashboardStore>,
    Path(reference): Path<String>,
) -> Result<Json<DeleteResponse<Product>>> {
    let deleted = store.write().await.catalog.delete(&reference)?;
    Ok(Json(DeleteResponse {
        success: true,
        message: format!("Product {} deleted", reference),
        deleted,
    }))
}

pub async fn list_categories(State(store): State<DashboardStore>) -> Json<Vec<String>> {
    let state = store.read().await;
    Json(state.catalog.categories().into_iter().collect())
}

/// 按查询参数排序的表格 (不修改仪表盘上的排序状态)
pub async fn table_view(
    State(store): State<DashboardStore>,
    Query(query): Query<TableQuery>,
) -> Json<TableView> {
    let state = store.read().await;
    let records = state
        .catalog
        .filter(query.search.as_deref(), query.category.as_deref());
    let config = SortConfig {
        key: query.key,
        direction: query.direction.unwrap_or_default(),
    };
    let table = SortableAggregateTable::with_config(config, state.settings.currency);
    Json(table.view(&records))
}

/// 仪表盘表格: 使用已保存的排序配置和当前分类
pub async fn dashboard_table(State(store): State<DashboardStore>) -> Json<TableView> {
    let state = store.read().await;
    let records = state
        .catalog
        .filter(None, Some(state.selected_category.as_str()));
    Json(state.table.view(&records))
}

/// 点击表头
pub async fn request_sort(
    State(store): State<DashboardStore>,
    Json(req): Json<SortRequest>,
) -> Json<TableView> {
    let mut state = store.write().await;
    let config = state.table.request_sort(&req.key).clone();
    tracing::debug!(
        "Dashboard table sorted by {:?} ({:?})",
        config.key,
        config.direction
    );

    let records = state
        .catalog
        .filter(None, Some(state.selected_category.as_str()));
    Json(state.table.view(&records))
}

pub async fn select_category(
    State(store): State<DashboardStore>,
    Json(req): Json<CategoryRequest>,
) -> Json<DashboardAnalytics> {
    let mut state = store.write().await;
    state.selected_category = req.category;
    let records = state
        .catalog
        .filter(None, Some(state.selected_category.as_str()));
    Json(analytics::dashboard(&records))
}

/// 未指定分类时使用仪表盘当前选中的分类
pub async fn dashboard_analytics(
    State(store): State<DashboardStore>,
    Query(query): Query<AnalyticsQuery>,
) -> Json<DashboardAnalytics> {
    let state = store.read().await;
    let category = query
        .category
        .as_deref()
        .unwrap_or(state.selected_category.as_str());
    let records = state.catalog.filter(None, Some(category));
    Json(analytics::dashboard(&records))
}

pub async fn list_clients(
    State(store): State<DashboardStore>,
    Query(query): Query<ClientQuery>,
) -> Json<Vec<Client>> {
    let state = store.read().await;
    Json(state.clients.search(query.search.as_deref()))
}

pub async fn create_client(
    State(store): State<DashboardStore>,
    Json(input): Json<ClientInput>,
) -> Result<(StatusCode, Json<Client>)> {
    let client = store.write().await.clients.add(input)?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn update_client(
    State(store): State<DashboardStore>,
    Path(id): Path<u64>,
    Json(input): Json<ClientInput>,
) -> Result<Json<Client>> {
    let client = store.write().await.clients.update(id, input)?;
    Ok(Json(client))
}

pub async fn delete_client(
    State(store): State<DashboardStore>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse<Client>>> {
    let deleted = store.write().await.clients.delete(id)?;
    Ok(Json(DeleteResponse {
        success: true,
        message: format!("Client {} deleted", id),
        deleted,
    }))
}

pub async fn get_settings(State(store): State<DashboardStore>) -> Json<Settings> {
    Json(store.read().await.settings.clone())
}

pub async fn update_settings(
    State(store): State<DashboardStore>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<Settings>> {
    let mut state = store.write().await;
    let settings = state.apply_settings(patch)?.clone();
    tracing::info!("Settings updated: {:?}", settings);
    Ok(Json(settings))
}

pub async fn generate_report(Json(req): Json<ReportRequest>) -> Result<Json<Report>> {
    Ok(Json(reports::generate(req, Utc::now())?))
}

/// 生成并直接下载报表文件
pub async fn export_report(
    State(store): State<DashboardStore>,
    Json(req): Json<ReportRequest>,
) -> Result<Response> {
    let report = reports::generate(req, Utc::now())?;
    let state = store.read().await;
    let data = ReportData {
        products: state.catalog.list(),
        clients: state.clients.list(),
    };
    let body = reports::export(&report, data, &state.settings)?;

    let headers = [
        (header::CONTENT_TYPE, report.format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", report.file_name()),
        ),
    ];
    Ok((headers, body).into_response())
}
