use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 报表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Sales,
    Clients,
    Products,
    Stock,
    Financial,
}

impl ReportKind {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Clients => "clients",
            Self::Products => "products",
            Self::Stock => "stock",
            Self::Financial => "financial",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Sales => "Rapport des ventes",
            Self::Clients => "Rapport clients",
            Self::Products => "Rapport des produits",
            Self::Stock => "Rapport des stocks",
            Self::Financial => "Rapport financier",
        }
    }

    /// 是否附带商品明细表 (库存报表同样列出商品及库存)
    pub fn includes_catalog(&self) -> bool {
        matches!(self, Self::Sales | Self::Products | Self::Stock | Self::Financial)
    }
}

/// 导出格式, 默认 PDF
///
/// `excel` 与 `csv` 输出相同的 CSV 内容, 仅 MIME 类型不同。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Csv,
    Excel,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Csv | Self::Excel => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Csv => "text/csv; charset=utf-8",
            Self::Excel => "application/vnd.ms-excel",
        }
    }
}

/// 报表生成请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub kind: ReportKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub format: ReportFormat,
}

/// 已生成的报表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    pub kind: ReportKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub format: ReportFormat,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    pub fn file_name(&self) -> String {
        format!(
            "rapport-{}-{}-{}.{}",
            self.kind.slug(),
            self.start_date,
            self.end_date,
            self.format.extension()
        )
    }
}
