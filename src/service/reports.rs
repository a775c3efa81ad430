use chrono::{DateTime, Local, Utc};
use csv::WriterBuilder;
use std::io::Write;

use crate::error::{DashboardError, Result};
use crate::models::{Client, Product, Report, ReportFormat, ReportKind, ReportRequest, Settings};
use crate::service::analytics;
use crate::service::pdf::{self, PdfWriter};
use crate::table::{self, format_currency, format_number, SortConfig, SortDirection};

/// 报表导出所需的数据快照
#[derive(Debug, Clone, Copy)]
pub struct ReportData<'a> {
    pub products: &'a [Product],
    pub clients: &'a [Client],
}

/// 明细表: 商品 (含合计行) 或客户
#[derive(Debug, Clone, PartialEq)]
pub struct DetailTable {
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// 生成报表元数据, 结束日期不得早于开始日期
pub fn generate(request: ReportRequest, now: DateTime<Utc>) -> Result<Report> {
    if request.end_date < request.start_date {
        return Err(DashboardError::Validation(format!(
            "end date {} is before start date {}",
            request.end_date, request.start_date
        )));
    }

    let report = Report {
        id: now.timestamp_millis(),
        kind: request.kind,
        start_date: request.start_date,
        end_date: request.end_date,
        format: request.format,
        generated_at: now,
    };
    tracing::info!(
        "Report {} generated: {} {}..{} ({:?})",
        report.id,
        report.kind.slug(),
        report.start_date,
        report.end_date,
        report.format
    );
    Ok(report)
}

/// 按报表格式导出文件内容
pub fn export(report: &Report, data: ReportData<'_>, settings: &Settings) -> Result<Vec<u8>> {
    match report.format {
        ReportFormat::Pdf => export_pdf(report, data, settings),
        ReportFormat::Csv | ReportFormat::Excel => export_csv(report, data, settings),
    }
}

/// 导出为 CSV 字节
pub fn export_csv(report: &Report, data: ReportData<'_>, settings: &Settings) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(report, data, settings, &mut buf)?;
    Ok(buf)
}

pub fn write_csv<W: Write>(
    report: &Report,
    data: ReportData<'_>,
    settings: &Settings,
    writer: W,
) -> Result<()> {
    // 表头块与明细行列数不同
    let mut writer = WriterBuilder::new().flexible(true).from_writer(writer);

    writer.write_record(["Rapport", report.kind.title()])?;
    writer.write_record(["Période".to_string(), period_label(report, settings)])?;
    writer.write_record(["Généré le".to_string(), generated_label(report, settings)])?;
    writer.write_record(["Type", report.kind.slug()])?;

    if let Some(detail) = detail_table(report.kind, data, settings) {
        writer.write_record(&detail.header)?;
        for row in &detail.rows {
            writer.write_record(row)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// 导出为 PDF: 标题, 期间与生成时间, 概要表, 然后是明细表
pub fn export_pdf(report: &Report, data: ReportData<'_>, settings: &Settings) -> Result<Vec<u8>> {
    let title = report.kind.title();
    let period = period_label(report, settings);
    let generated = generated_label(report, settings);

    let mut doc = PdfWriter::new(title)?;
    doc.text(title, pdf::TITLE_SIZE, true);
    doc.text(&format!("Période: {}", period), pdf::TEXT_SIZE, false);
    doc.text(&format!("Généré le: {}", generated), pdf::TEXT_SIZE, false);
    doc.gap(6.0);

    let summary_widths = [50.0, doc.content_width() - 50.0];
    doc.row(
        &["Type".to_string(), "Valeurs".to_string()],
        &summary_widths,
        pdf::TEXT_SIZE,
        true,
    );
    for (label, value) in [
        ("Type de rapport", report.kind.slug().to_string()),
        ("Période", period),
        ("Date de génération", generated),
    ] {
        doc.row(&[label.to_string(), value], &summary_widths, pdf::TEXT_SIZE, false);
    }

    if let Some(detail) = detail_table(report.kind, data, settings) {
        doc.gap(6.0);
        let width = doc.content_width() / detail.header.len() as f32;
        let widths = vec![width; detail.header.len()];
        let header: Vec<String> = detail.header.iter().map(|h| h.to_string()).collect();
        doc.row(&header, &widths, pdf::TABLE_SIZE, true);
        for row in &detail.rows {
            doc.row(row, &widths, pdf::TABLE_SIZE, false);
        }
    }

    doc.finish()
}

/// 报表对应的明细表, 没有明细的报表类型返回 None
pub fn detail_table(
    kind: ReportKind,
    data: ReportData<'_>,
    settings: &Settings,
) -> Option<DetailTable> {
    if kind.includes_catalog() {
        Some(catalog_table(data.products, settings))
    } else if kind == ReportKind::Clients {
        Some(client_table(data.clients, settings))
    } else {
        None
    }
}

fn period_label(report: &Report, settings: &Settings) -> String {
    format!(
        "du {} au {}",
        settings.date_format.format(report.start_date),
        settings.date_format.format(report.end_date)
    )
}

fn generated_label(report: &Report, settings: &Settings) -> String {
    let local = report.generated_at.with_timezone(&Local);
    format!(
        "{} {}",
        settings.date_format.format(local.date_naive()),
        local.format("%H:%M")
    )
}

/// 商品明细按销售额降序, 末尾附合计行
fn catalog_table(products: &[Product], settings: &Settings) -> DetailTable {
    let currency = settings.currency;
    let config = SortConfig::new(table::column::TOTAL_REVENUE, SortDirection::Desc);

    let mut rows: Vec<Vec<String>> = table::sorted_view(products, &config)
        .into_iter()
        .map(|p| {
            vec![
                p.reference.clone(),
                p.name.clone(),
                p.category.clone(),
                format_currency(&p.unit_price, currency),
                format_number(p.total_units_sold()),
                format_currency(&p.total_revenue(), currency),
                format_number(u64::from(p.stock)),
            ]
        })
        .collect();

    rows.push(vec![
        "Total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        format_number(analytics::total_units(products)),
        format_currency(&analytics::total_revenue(products), currency),
        String::new(),
    ]);

    DetailTable {
        header: vec![
            "Référence",
            "Nom",
            "Catégorie",
            "Prix",
            "Ventes Totales",
            "Chiffre d'Affaires",
            "Stock",
        ],
        rows,
    }
}

fn client_table(clients: &[Client], settings: &Settings) -> DetailTable {
    let rows = clients
        .iter()
        .map(|c| {
            vec![
                c.full_name(),
                c.email.clone(),
                c.phone.clone(),
                c.city.clone(),
                c.orders.to_string(),
                format_currency(&c.total_purchases, settings.currency),
                settings.date_format.format(c.registered_on),
            ]
        })
        .collect();

    DetailTable {
        header: vec![
            "Client",
            "Email",
            "Téléphone",
            "Ville",
            "Commandes",
            "Total Achats",
            "Inscription",
        ],
        rows,
    }
}
