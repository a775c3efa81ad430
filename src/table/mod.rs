//! 可排序的商品汇总表
//!
//! 表格只持有一份排序配置; 记录由调用方在每次渲染时整体传入,
//! 派生指标 (总销量、总销售额) 每次重新计算, 不做缓存。

pub mod column;
pub mod format;
pub mod sort;

use serde::Serialize;

pub use column::{column, Column, SortValue, COLUMNS};
pub use format::{format_currency, format_decimal, format_number};
pub use sort::{sorted_view, SortConfig, SortDirection};

use crate::models::{Currency, Product};

/// 表头排序图标状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

/// 表头
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    pub key: &'static str,
    pub label: &'static str,
    pub indicator: SortIndicator,
}

/// 格式化后的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub reference: String,
    pub name: String,
    pub category: String,
    pub image_ref: String,
    pub price: String,
    pub total_sales: String,
    pub total_revenue: String,
}

impl TableRow {
    pub fn render(product: &Product, currency: Currency) -> Self {
        Self {
            reference: product.reference.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            image_ref: product.image_ref.clone(),
            price: format_currency(&product.unit_price, currency),
            total_sales: format_number(product.total_units_sold()),
            total_revenue: format_currency(&product.total_revenue(), currency),
        }
    }
}

/// 整张表的渲染结果
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub columns: Vec<ColumnHeader>,
    pub sort: SortConfig,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default)]
pub struct SortableAggregateTable {
    config: SortConfig,
    currency: Currency,
}

impl SortableAggregateTable {
    pub fn new(currency: Currency) -> Self {
        Self {
            config: SortConfig::default(),
            currency,
        }
    }

    pub fn with_config(config: SortConfig, currency: Currency) -> Self {
        Self { config, currency }
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    pub fn request_sort(&mut self, key: &str) -> &SortConfig {
        self.config.request_sort(key);
        &self.config
    }

    pub fn sort_indicator(&self, key: &str) -> SortIndicator {
        if !self.config.is_active(key) {
            return SortIndicator::Unsorted;
        }
        match self.config.direction {
            SortDirection::Asc => SortIndicator::Ascending,
            SortDirection::Desc => SortIndicator::Descending,
        }
    }

    pub fn sorted<'a>(&self, records: &'a [Product]) -> Vec<&'a Product> {
        sorted_view(records, &self.config)
    }

    pub fn rows(&self, records: &[Product]) -> Vec<TableRow> {
        self.sorted(records)
            .into_iter()
            .map(|p| TableRow::render(p, self.currency))
            .collect()
    }

    pub fn view(&self, records: &[Product]) -> TableView {
        let columns = COLUMNS
            .iter()
            .map(|c| ColumnHeader {
                key: c.key,
                label: c.label,
                indicator: self.sort_indicator(c.key),
            })
            .collect();

        TableView {
            columns,
            sort: self.config.clone(),
            rows: self.rows(records),
        }
    }
}
