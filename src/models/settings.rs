use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DashboardError, Result};

/// 显示货币
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Mad,
    Eur,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Mad => "MAD",
            Self::Eur => "EUR",
            Self::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MAD" => Ok(Self::Mad),
            "EUR" => Ok(Self::Eur),
            "USD" => Ok(Self::Usd),
            other => Err(DashboardError::Validation(format!("unsupported currency '{}'", other))),
        }
    }
}

/// 日期显示格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,
    #[serde(rename = "YYYY-MM-DD")]
    Iso,
}

impl DateFormat {
    pub fn format(&self, date: NaiveDate) -> String {
        let pattern = match self {
            Self::DayMonthYear => "%d/%m/%Y",
            Self::MonthDayYear => "%m/%d/%Y",
            Self::Iso => "%Y-%m-%d",
        };
        date.format(pattern).to_string()
    }
}

/// 仪表盘设置 (内存中, 不持久化)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub dark_mode: bool,
    pub currency: Currency,
    pub date_format: DateFormat,
    pub notifications: bool,
    pub products_per_page: u32,
    pub cache_duration_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            currency: Currency::Mad,
            date_format: DateFormat::DayMonthYear,
            notifications: true,
            products_per_page: 10,
            cache_duration_minutes: 30,
        }
    }
}

/// 设置的部分更新
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub dark_mode: Option<bool>,
    pub currency: Option<Currency>,
    pub date_format: Option<DateFormat>,
    pub notifications: Option<bool>,
    pub products_per_page: Option<u32>,
    pub cache_duration_minutes: Option<u32>,
}

impl Settings {
    /// 逐字段合并; 校验失败时不修改任何字段
    pub fn apply(&mut self, patch: SettingsPatch) -> Result<()> {
        if patch.products_per_page == Some(0) {
            return Err(DashboardError::Validation(
                "productsPerPage must be at least 1".to_string(),
            ));
        }

        if let Some(v) = patch.dark_mode {
            self.dark_mode = v;
        }
        if let Some(v) = patch.currency {
            self.currency = v;
        }
        if let Some(v) = patch.date_format {
            self.date_format = v;
        }
        if let Some(v) = patch.notifications {
            self.notifications = v;
        }
        if let Some(v) = patch.products_per_page {
            self.products_per_page = v;
        }
        if let Some(v) = patch.cache_duration_minutes {
            self.cache_duration_minutes = v;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_merges_only_present_fields() {
        let mut settings = Settings::default();
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"currency":"EUR","darkMode":true}"#).unwrap();
        settings.apply(patch).unwrap();

        assert_eq!(settings.currency, Currency::Eur);
        assert!(settings.dark_mode);
        assert_eq!(settings.products_per_page, 10);
        assert!(settings.notifications);
    }

    #[test]
    fn zero_page_size_is_rejected_without_side_effects() {
        let mut settings = Settings::default();
        let patch = SettingsPatch {
            dark_mode: Some(true),
            products_per_page: Some(0),
            ..Default::default()
        };
        assert!(settings.apply(patch).is_err());
        assert!(!settings.dark_mode);
    }

    #[test]
    fn date_formats_render() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(DateFormat::DayMonthYear.format(date), "07/03/2024");
        assert_eq!(DateFormat::MonthDayYear.format(date), "03/07/2024");
        assert_eq!(DateFormat::Iso.format(date), "2024-03-07");
    }

    #[test]
    fn currency_parses_case_insensitively() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert!("GBP".parse::<Currency>().is_err());
    }

    #[test]
    fn date_format_serializes_as_pattern() {
        let json = serde_json::to_string(&DateFormat::Iso).unwrap();
        assert_eq!(json, r#""YYYY-MM-DD""#);
    }
}
