//! 仪表盘统计
//!
//! 卡片、图表与汇总共用这里的计算, 所有金额都经由
//! [`Product::total_revenue`] / [`Product::monthly_revenue`] 得出。

use bigdecimal::{BigDecimal, Zero};
use indexmap::IndexMap;
use serde::Serialize;

use crate::models::{Product, MONTHS_PER_YEAR};
use crate::table::format::round_half_up;

pub const MONTH_LABELS: [&str; MONTHS_PER_YEAR] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Juin", "Juil", "Août", "Sep", "Oct", "Nov", "Déc",
];

const LAST_MONTH: usize = MONTHS_PER_YEAR - 1;
const PREVIOUS_MONTH: usize = MONTHS_PER_YEAR - 2;

/// 汇总卡片
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub product_count: usize,
    pub total_units: u64,
    pub total_revenue: BigDecimal,
    pub last_month_revenue: BigDecimal,
    pub previous_month_revenue: BigDecimal,
    pub revenue_trend_percent: BigDecimal,
}

/// 单个商品最近两个月的销量变化
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTrend {
    pub reference: String,
    pub last_month_units: u64,
    pub previous_month_units: u64,
    pub trend_percent: BigDecimal,
    pub rising: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRevenue {
    pub reference: String,
    pub name: String,
    pub revenue: BigDecimal,
}

/// 折线图的一个点 (某月)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoint {
    pub month: &'static str,
    pub total: BigDecimal,
    pub by_product: Vec<ProductRevenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub units: u64,
    pub revenue: BigDecimal,
    pub share_percent: BigDecimal,
}

/// 仪表盘全部数据
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardAnalytics {
    pub summary: SalesSummary,
    pub monthly_revenue: Vec<MonthlyPoint>,
    pub revenue_by_product: Vec<ProductRevenue>,
    pub category_distribution: Vec<CategoryShare>,
    pub product_trends: Vec<ProductTrend>,
}

/// 环比百分比, 保留一位小数
///
/// 上期为 0 时: 本期大于 0 记为 100.0, 否则 0.0。
pub fn trend_percent(previous: &BigDecimal, current: &BigDecimal) -> BigDecimal {
    if previous.is_zero() {
        return if *current > BigDecimal::zero() {
            BigDecimal::from(100)
        } else {
            BigDecimal::zero()
        };
    }
    let ratio = (current - previous) * BigDecimal::from(100) / previous.clone();
    round_half_up(&ratio, 1)
}

/// 占比百分比, 总量为 0 时为 0
pub fn share_percent(part: &BigDecimal, total: &BigDecimal) -> BigDecimal {
    if total.is_zero() {
        return BigDecimal::zero();
    }
    round_half_up(&(part.clone() * BigDecimal::from(100) / total.clone()), 1)
}

pub fn total_units(products: &[Product]) -> u64 {
    products
        .iter()
        .fold(0u64, |acc, p| acc.saturating_add(p.total_units_sold()))
}

pub fn total_revenue(products: &[Product]) -> BigDecimal {
    products
        .iter()
        .fold(BigDecimal::zero(), |acc, p| acc + p.total_revenue())
}

pub fn month_revenue(products: &[Product], month: usize) -> BigDecimal {
    products
        .iter()
        .fold(BigDecimal::zero(), |acc, p| acc + p.monthly_revenue(month))
}

pub fn summary(products: &[Product]) -> SalesSummary {
    let last_month_revenue = month_revenue(products, LAST_MONTH);
    let previous_month_revenue = month_revenue(products, PREVIOUS_MONTH);
    let revenue_trend_percent = trend_percent(&previous_month_revenue, &last_month_revenue);

    SalesSummary {
        product_count: products.len(),
        total_units: total_units(products),
        total_revenue: total_revenue(products),
        last_month_revenue,
        previous_month_revenue,
        revenue_trend_percent,
    }
}

pub fn product_trend(product: &Product) -> ProductTrend {
    let last = u64::from(product.monthly_units_sold[LAST_MONTH]);
    let previous = u64::from(product.monthly_units_sold[PREVIOUS_MONTH]);

    ProductTrend {
        reference: product.reference.clone(),
        last_month_units: last,
        previous_month_units: previous,
        trend_percent: trend_percent(&BigDecimal::from(previous), &BigDecimal::from(last)),
        rising: last > previous,
    }
}

pub fn revenue_by_product(products: &[Product]) -> Vec<ProductRevenue> {
    products
        .iter()
        .map(|p| ProductRevenue {
            reference: p.reference.clone(),
            name: p.name.clone(),
            revenue: p.total_revenue(),
        })
        .collect()
}

pub fn monthly_revenue_series(products: &[Product]) -> Vec<MonthlyPoint> {
    MONTH_LABELS
        .iter()
        .enumerate()
        .map(|(month, label)| {
            let by_product: Vec<ProductRevenue> = products
                .iter()
                .map(|p| ProductRevenue {
                    reference: p.reference.clone(),
                    name: p.name.clone(),
                    revenue: p.monthly_revenue(month),
                })
                .collect();
            let total = by_product
                .iter()
                .fold(BigDecimal::zero(), |acc, r| acc + r.revenue.clone());

            MonthlyPoint {
                month: label,
                total,
                by_product,
            }
        })
        .collect()
}

/// 按分类汇总, 分类按首次出现顺序排列
pub fn category_distribution(products: &[Product]) -> Vec<CategoryShare> {
    let mut groups: IndexMap<&str, (u64, BigDecimal)> = IndexMap::new();
    for p in products {
        let entry = groups
            .entry(p.category.as_str())
            .or_insert_with(|| (0, BigDecimal::zero()));
        entry.0 = entry.0.saturating_add(p.total_units_sold());
        entry.1 += p.total_revenue();
    }

    let total = total_revenue(products);
    groups
        .into_iter()
        .map(|(category, (units, revenue))| CategoryShare {
            category: category.to_string(),
            units,
            share_percent: share_percent(&revenue, &total),
            revenue,
        })
        .collect()
}

pub fn dashboard(products: &[Product]) -> DashboardAnalytics {
    DashboardAnalytics {
        summary: summary(products),
        monthly_revenue: monthly_revenue_series(products),
        revenue_by_product: revenue_by_product(products),
        category_distribution: category_distribution(products),
        product_trends: products.iter().map(product_trend).collect(),
    }
}
