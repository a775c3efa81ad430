use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

pub const DEFAULT_COUNTRY: &str = "France";

/// 客户记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub orders: u32,
    pub total_purchases: BigDecimal,
    pub registered_on: NaiveDate,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 客户表单 (可编辑字段)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl ClientInput {
    /// 必填字段校验, 返回去除首尾空白后的表单
    pub fn validate(self) -> Result<Self> {
        let trimmed = Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            country: match self.country.trim() {
                "" => DEFAULT_COUNTRY.to_string(),
                c => c.to_string(),
            },
        };

        for (field, value) in [
            ("firstName", &trimmed.first_name),
            ("lastName", &trimmed.last_name),
            ("email", &trimmed.email),
            ("phone", &trimmed.phone),
        ] {
            if value.is_empty() {
                return Err(DashboardError::Validation(format!("{} is required", field)));
            }
        }

        if !trimmed.email.contains('@') {
            return Err(DashboardError::Validation(format!(
                "'{}' is not a valid email address",
                trimmed.email
            )));
        }

        Ok(trimmed)
    }
}
