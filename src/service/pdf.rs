//! PDF 报表排版
//!
//! 使用 printpdf 内置 Helvetica 字体, A4 纵向, 超出页面底部时自动换页。

use std::fmt;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::error::{DashboardError, Result};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;
const TOP: f32 = PAGE_HEIGHT - 22.0;
const BOTTOM: f32 = 20.0;
const LAYER: &str = "Rapport";

pub const TITLE_SIZE: f32 = 18.0;
pub const TEXT_SIZE: f32 = 11.0;
pub const TABLE_SIZE: f32 = 8.0;

/// 按行从上往下写入的 PDF 文档
pub struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PdfWriter {
    pub fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: TOP,
        })
    }

    /// 可用宽度 (左右各留边距)
    pub fn content_width(&self) -> f32 {
        PAGE_WIDTH - 2.0 * MARGIN
    }

    pub fn text(&mut self, text: &str, size: f32, bold: bool) {
        let height = line_height(size);
        self.reserve(height);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(MARGIN), Mm(self.y), font);
        self.y -= height;
    }

    /// 一行表格, 每个单元格从对应列的左边界开始
    pub fn row(&mut self, cells: &[String], widths: &[f32], size: f32, bold: bool) {
        let height = line_height(size);
        self.reserve(height);
        let font = if bold { &self.bold } else { &self.regular };
        let mut x = MARGIN;
        for (cell, width) in cells.iter().zip(widths) {
            self.layer.use_text(cell.as_str(), size, Mm(x), Mm(self.y), font);
            x += width;
        }
        self.y -= height;
    }

    pub fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    pub fn finish(self) -> Result<Vec<u8>> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }

    fn reserve(&mut self, height: f32) {
        if self.y - height >= BOTTOM {
            return;
        }
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP;
    }
}

fn line_height(size: f32) -> f32 {
    // pt -> mm, 行距 1.5 倍
    size * 0.3528 * 1.5
}

fn pdf_error(err: impl fmt::Debug) -> DashboardError {
    DashboardError::Pdf(format!("{:?}", err))
}
