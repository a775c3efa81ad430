use bigdecimal::{BigDecimal, Zero};
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::{DashboardError, Result};

/// 每条记录固定 12 个月的销量
pub const MONTHS_PER_YEAR: usize = 12;

/// 商品记录 (表格中的一行)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub reference: String,
    pub name: String,
    pub category: String,
    pub unit_price: BigDecimal,
    /// 下标 0..11 依次对应 1..12 月
    pub monthly_units_sold: [u32; MONTHS_PER_YEAR],
    pub image_ref: String,
    pub stock: u32,
    pub margin_percent: BigDecimal,
    pub description: String,
    pub created_on: NaiveDate,
}

impl Product {
    pub fn new(
        reference: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: BigDecimal,
        monthly_units_sold: [u32; MONTHS_PER_YEAR],
    ) -> Self {
        Self {
            reference: reference.into(),
            name: name.into(),
            category: category.into(),
            unit_price,
            monthly_units_sold,
            image_ref: String::new(),
            stock: 0,
            margin_percent: BigDecimal::zero(),
            description: String::new(),
            created_on: Local::now().date_naive(),
        }
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    /// 总销量
    ///
    /// 单月销量不超过 `u32::MAX`, 12 个月相加在 u64 内不会溢出。
    pub fn total_units_sold(&self) -> u64 {
        self.monthly_units_sold.iter().map(|&u| u64::from(u)).sum()
    }

    /// 总销售额 = 总销量 * 单价
    pub fn total_revenue(&self) -> BigDecimal {
        BigDecimal::from(self.total_units_sold()) * &self.unit_price
    }

    /// 某月销售额, 越界月份视为 0
    pub fn monthly_revenue(&self, month: usize) -> BigDecimal {
        match self.monthly_units_sold.get(month) {
            Some(&units) => BigDecimal::from(units) * &self.unit_price,
            None => BigDecimal::zero(),
        }
    }
}

/// 外部提交的原始商品数据, 字段类型宽松
///
/// 数值字段可以是 JSON 数字或数字字符串; 其余情况一律按 0 处理。
/// `normalize` 是唯一的转换入口, 之后的计算都基于强类型的 [`Product`]。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInput {
    pub reference: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit_price: Value,
    pub monthly_units_sold: Value,
    pub image_ref: Option<String>,
    pub stock: Value,
    pub margin_percent: Value,
    pub description: Option<String>,
}

impl ProductInput {
    /// 新建商品: 缺失的 reference 按时间戳生成
    pub fn normalize(self) -> Result<Product> {
        let reference = match self.reference.as_deref().map(str::trim) {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => format!("REF-{}", Utc::now().timestamp_millis()),
        };
        self.into_product(reference, Local::now().date_naive())
    }

    /// 编辑商品: reference 与创建日期保持不变
    pub fn normalize_onto(self, existing: &Product) -> Result<Product> {
        self.into_product(existing.reference.clone(), existing.created_on)
    }

    fn into_product(self, reference: String, created_on: NaiveDate) -> Result<Product> {
        let name = required(self.name, "name")?;
        let category = required(self.category, "category")?;

        let mut monthly_units_sold = [0u32; MONTHS_PER_YEAR];
        if let Value::Array(values) = &self.monthly_units_sold {
            for (slot, value) in monthly_units_sold.iter_mut().zip(values) {
                *slot = coerce_units(value);
            }
        }

        let hundred = BigDecimal::from(100);
        let mut margin_percent = coerce_decimal(&self.margin_percent);
        if margin_percent > hundred {
            margin_percent = hundred;
        }

        Ok(Product {
            reference,
            name,
            category,
            unit_price: coerce_decimal(&self.unit_price),
            monthly_units_sold,
            image_ref: self.image_ref.unwrap_or_default(),
            stock: coerce_units(&self.stock),
            margin_percent,
            description: self.description.unwrap_or_default(),
            created_on,
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(DashboardError::Validation(format!("{} is required", field))),
    }
}

/// 非数值或负数 => 0
pub fn coerce_decimal(value: &Value) -> BigDecimal {
    let parsed = match value {
        Value::Number(n) => BigDecimal::from_str(&n.to_string()).ok(),
        Value::String(s) => BigDecimal::from_str(s.trim()).ok(),
        _ => None,
    };
    match parsed {
        Some(d) if d > BigDecimal::zero() => d,
        _ => BigDecimal::zero(),
    }
}

/// 非数值或负数 => 0, 小数部分截断, 超过 `u32::MAX` 按上限截取
pub fn coerce_units(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(n) => match n.as_u64() {
            Some(u) => Some(u32::try_from(u).unwrap_or(u32::MAX)),
            None => n.as_f64().map(truncate_units),
        },
        Value::String(s) => s.trim().parse::<f64>().ok().map(truncate_units),
        _ => None,
    };
    parsed.unwrap_or(0)
}

fn truncate_units(v: f64) -> u32 {
    if v.is_nan() || v <= 0.0 {
        0
    } else if v >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        v.trunc() as u32
    }
}
