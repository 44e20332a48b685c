//! PDF 渲染
//!
//! 收据、报表、课表与证明文件共用同一套页面骨架：顶部蓝色标题栏，
//! 右侧生成时间，正文自上而下排版，空间不足时自动换页。

pub mod document;
pub mod receipt;
pub mod report;
pub mod timetable;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect, Rgb,
};

use crate::errors::{EduManageError, Result};

pub const A4_WIDTH: f32 = 210.0;
pub const A4_HEIGHT: f32 = 297.0;

const HEADER_HEIGHT: f32 = 14.0;
const MARGIN: f32 = 18.0;
const PT_TO_MM: f32 = 0.3528;

/// 标题栏右侧文字
pub fn generated_label(now: DateTime<Local>) -> String {
    format!(
        "Généré par EduManage - {}",
        now.format("%d %B %Y - %H:%M")
    )
}

/// Helvetica 的粗略字宽估算，用于右对齐与居中
pub fn approx_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5 * PT_TO_MM
}

/// 确保目录存在并拼出输出文件路径
pub(crate) fn output_path(dir: &Path, file_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    Ok(dir.join(file_name))
}

fn render_error(e: printpdf::Error) -> EduManageError {
    EduManageError::document_render(format!("PDF 渲染失败: {e}"))
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// 单个文档的绘制上下文，坐标单位为毫米，原点在左下角
pub(crate) struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    width: f32,
    height: f32,
    header_title: String,
    cursor: f32,
}

impl PdfCanvas {
    pub fn new(title: &str, width: f32, height: f32) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        let mut canvas = Self {
            doc,
            layer,
            regular,
            bold,
            width,
            height,
            header_title: title.to_string(),
            cursor: 0.0,
        };
        canvas.draw_header();
        Ok(canvas)
    }

    pub fn portrait(title: &str) -> Result<Self> {
        Self::new(title, A4_WIDTH, A4_HEIGHT)
    }

    pub fn landscape(title: &str) -> Result<Self> {
        Self::new(title, A4_HEIGHT, A4_WIDTH)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    fn draw_header(&mut self) {
        let top = self.height;
        self.layer.set_fill_color(rgb(0.15, 0.35, 0.85));
        self.fill_rect(0.0, top - HEADER_HEIGHT, self.width, top);

        self.layer.set_fill_color(rgb(1.0, 1.0, 1.0));
        let title = self.header_title.clone();
        self.layer
            .use_text(title, 14.0, Mm(7.0), Mm(top - 9.0), &self.bold);

        let label = generated_label(Local::now());
        let x = self.width - 7.0 - approx_text_width(&label, 8.0);
        self.layer
            .use_text(label, 8.0, Mm(x), Mm(top - 9.0), &self.regular);

        self.layer.set_fill_color(rgb(0.0, 0.0, 0.0));
        self.cursor = top - HEADER_HEIGHT - 12.0;
    }

    /// 剩余高度不足时换页
    pub fn ensure_space(&mut self, needed: f32) {
        if self.cursor - needed >= MARGIN {
            return;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(self.width), Mm(self.height), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.draw_header();
    }

    pub fn text_at(&self, text: &str, size: f32, x: f32, y: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.use_text(text, size, Mm(x), Mm(y), font);
    }

    /// 在当前游标处写一行并下移
    pub fn line_of_text(&mut self, text: &str, size: f32, bold: bool) {
        let advance = size * PT_TO_MM * 1.6;
        self.ensure_space(advance);
        self.text_at(text, size, MARGIN, self.cursor, bold);
        self.cursor -= advance;
    }

    pub fn title(&mut self, text: &str) {
        self.line_of_text(text, 18.0, true);
        self.cursor -= 2.0;
    }

    pub fn gap(&mut self, mm: f32) {
        self.cursor -= mm;
    }

    pub fn stroke_line(&self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let line = Line {
            points: vec![
                (Point::new(Mm(x1), Mm(y1)), false),
                (Point::new(Mm(x2), Mm(y2)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    pub fn fill_rect(&self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let rect = Rect::new(Mm(x1), Mm(y1), Mm(x2), Mm(y2)).with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
    }

    pub fn set_fill_gray(&self, level: f32) {
        self.layer.set_fill_color(rgb(level, level, level));
    }

    pub fn set_stroke(&self, r: f32, g: f32, b: f32, thickness: f32) {
        self.layer.set_outline_color(rgb(r, g, b));
        self.layer.set_outline_thickness(thickness);
    }

    /// 两列表格（表头加粗并带底色），返回后游标位于表格下方
    pub fn two_column_table(
        &mut self,
        header: (&str, &str),
        rows: &[(String, String)],
        widths: (f32, f32),
    ) {
        let row_height = 8.0;
        let x0 = MARGIN;
        let x1 = x0 + widths.0;
        let x2 = x1 + widths.1;

        let draw_row = |canvas: &mut Self, left: &str, right: &str, is_header: bool| {
            canvas.ensure_space(row_height);
            let top = canvas.cursor;
            let bottom = top - row_height;
            if is_header {
                canvas.set_fill_gray(0.85);
                canvas.fill_rect(x0, bottom, x2, top);
                canvas.set_fill_gray(0.0);
            }
            canvas.set_stroke(0.5, 0.5, 0.5, 0.5);
            canvas.stroke_line(x0, top, x2, top);
            canvas.stroke_line(x0, bottom, x2, bottom);
            canvas.stroke_line(x0, top, x0, bottom);
            canvas.stroke_line(x1, top, x1, bottom);
            canvas.stroke_line(x2, top, x2, bottom);

            canvas.text_at(left, 10.0, x0 + 2.0, bottom + 2.5, is_header);
            let right_x = x2 - 2.0 - approx_text_width(right, 10.0);
            canvas.text_at(right, 10.0, right_x.max(x1 + 2.0), bottom + 2.5, is_header);
            canvas.cursor = bottom;
        };

        draw_row(self, header.0, header.1, true);
        for (left, right) in rows {
            draw_row(self, left, right, false);
        }
        self.cursor -= 4.0;
    }

    pub fn save(self, path: &Path) -> Result<()> {
        let bytes = self.doc.save_to_bytes().map_err(render_error)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generated_label() {
        let now = Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(
            generated_label(now),
            "Généré par EduManage - 07 March 2025 - 09:05"
        );
    }

    #[test]
    fn test_text_width_grows_with_length() {
        assert_eq!(approx_text_width("", 10.0), 0.0);
        assert!(approx_text_width("abcd", 10.0) > approx_text_width("ab", 10.0));
    }

    #[test]
    fn test_canvas_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(&dir.path().join("nested"), "sample.pdf").unwrap();

        let mut canvas = PdfCanvas::portrait("Sample").unwrap();
        canvas.title("Hello");
        for i in 0..80 {
            canvas.line_of_text(&format!("Line {i}"), 10.0, false);
        }
        canvas.save(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
