pub mod handlers;

pub use handlers::*;

use crate::store::DashboardStore;
use axum::{
    routing::{get, post, put},
    Router,
};

/// 构建全部路由
pub fn router(store: DashboardStore) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // 商品
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/:reference",
            put(update_product).delete(delete_product),
        )
        .route("/api/categories", get(list_categories))
        .route("/api/table", get(table_view))
        // 仪表盘
        .route("/api/dashboard/table", get(dashboard_table))
        .route("/api/dashboard/table/sort", post(request_sort))
        .route("/api/dashboard/category", put(select_category))
        .route("/api/analytics", get(dashboard_analytics))
        // 客户
        .route("/api/clients", get(list_clients).post(create_client))
        .route("/api/clients/:id", put(update_client).delete(delete_client))
        // 设置与报表
        .route("/api/settings", get(get_settings).put(update_settings))
        .route("/api/reports", post(generate_report))
        .route("/api/reports/export", post(export_report))
        .with_state(store)
}
