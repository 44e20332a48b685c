use std::path::{Path, PathBuf};

use chrono::{NaiveTime, Timelike, Utc};

use super::{PdfCanvas, approx_text_width, output_path};
use crate::errors::Result;

/// 行顺序：周一 … 周六，周日最后
pub const DAY_ORDER: [i32; 7] = [1, 2, 3, 4, 5, 6, 0];
pub const FIRST_HOUR: u32 = 8;
pub const LAST_HOUR: u32 = 21;

pub fn day_name(day_of_week: i32) -> &'static str {
    match day_of_week {
        0 => "Dimanche",
        1 => "Lundi",
        2 => "Mardi",
        3 => "Mercredi",
        4 => "Jeudi",
        5 => "Vendredi",
        6 => "Samedi",
        _ => "",
    }
}

/// 课表中的一节课
#[derive(Debug, Clone)]
pub struct TimetableSession {
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub label: String,
}

/// 网格中的一个占位块
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
    pub span: usize,
    pub label: String,
}

fn slot_count() -> usize {
    (LAST_HOUR - FIRST_HOUR + 1) as usize
}

/// 按整点切分：从开始小时所在格起占 (结束小时 - 开始小时) 格，至少一格。
/// 超出 8h-21h 范围或与已占格重叠的课节会被截断或跳过。
pub fn layout_grid(sessions: &[TimetableSession]) -> Vec<GridCell> {
    let slots = slot_count();
    let mut cells = Vec::new();

    for (row, day) in DAY_ORDER.iter().enumerate() {
        let mut day_sessions: Vec<&TimetableSession> = sessions
            .iter()
            .filter(|s| s.day_of_week == *day)
            .collect();
        day_sessions.sort_by_key(|s| s.start_time);

        let mut occupied = vec![false; slots];
        for session in day_sessions {
            let start_hour = session.start_time.hour();
            if !(FIRST_HOUR..=LAST_HOUR).contains(&start_hour) {
                continue;
            }
            let column = (start_hour - FIRST_HOUR) as usize;
            if occupied[column] {
                continue;
            }

            let duration = session.end_time.hour().saturating_sub(start_hour).max(1) as usize;
            let mut span = 0;
            while span < duration && column + span < slots && !occupied[column + span] {
                occupied[column + span] = true;
                span += 1;
            }

            cells.push(GridCell {
                row,
                column,
                span,
                label: session.label.clone(),
            });
        }
    }

    cells
}

/// 渲染班级周课表（A4 横向）
pub fn render_timetable(
    dir: &Path,
    group_name: &str,
    sessions: &[TimetableSession],
) -> Result<PathBuf> {
    let file_name = format!("timetable_{}.pdf", Utc::now().timestamp());
    let path = output_path(dir, &file_name)?;

    let mut canvas = PdfCanvas::landscape(&format!("Emploi du Temps - {group_name}"))?;
    canvas.title(&format!("Emploi du temps - {group_name}"));

    let slots = slot_count();
    let left = 5.0;
    let day_col = 20.0;
    let slot_width = (canvas.width() - 2.0 * left - day_col) / slots as f32;
    let row_height = 18.0;
    let header_height = 8.0;
    let top = canvas.cursor();
    let grid_bottom = top - header_height - row_height * DAY_ORDER.len() as f32;
    let right = left + day_col + slot_width * slots as f32;

    // 表头
    canvas.set_fill_gray(0.85);
    canvas.fill_rect(left, top - header_height, right, top);
    canvas.set_fill_gray(0.0);
    canvas.text_at("Jour", 8.0, left + 2.0, top - 5.5, true);
    for i in 0..slots {
        let label = format!("{}h", FIRST_HOUR as usize + i);
        let x = left + day_col + slot_width * i as f32;
        let centered = x + (slot_width - approx_text_width(&label, 8.0)) / 2.0;
        canvas.text_at(&label, 8.0, centered, top - 5.5, true);
    }

    for (row, day) in DAY_ORDER.iter().enumerate() {
        let row_top = top - header_height - row_height * row as f32;
        canvas.text_at(day_name(*day), 8.0, left + 2.0, row_top - row_height / 2.0 - 1.0, false);
    }

    let cells = layout_grid(sessions);
    for cell in &cells {
        let x = left + day_col + slot_width * cell.column as f32;
        let row_top = top - header_height - row_height * cell.row as f32;
        let width = slot_width * cell.span as f32;
        let max_chars = ((width / approx_text_width("M", 7.0)) as usize).max(1);
        let label: String = cell.label.chars().take(max_chars).collect();
        let centered = x + (width - approx_text_width(&label, 7.0)) / 2.0;
        canvas.text_at(&label, 7.0, centered, row_top - row_height / 2.0 - 1.0, false);
    }

    // 红色网格；被课节合并的格子不画内部竖线
    canvas.set_stroke(0.9, 0.1, 0.1, 1.0);
    canvas.stroke_line(left, top, right, top);
    canvas.stroke_line(left, top - header_height, right, top - header_height);
    for row in 0..=DAY_ORDER.len() {
        let y = top - header_height - row_height * row as f32;
        canvas.stroke_line(left, y, right, y);
    }
    canvas.stroke_line(left, top, left, grid_bottom);
    canvas.stroke_line(left + day_col, top, left + day_col, grid_bottom);
    for i in 1..=slots {
        let x = left + day_col + slot_width * i as f32;
        canvas.stroke_line(x, top, x, top - header_height);
        for row in 0..DAY_ORDER.len() {
            let merged = cells
                .iter()
                .any(|c| c.row == row && c.column < i && i < c.column + c.span);
            if merged {
                continue;
            }
            let row_top = top - header_height - row_height * row as f32;
            canvas.stroke_line(x, row_top, x, row_top - row_height);
        }
    }

    canvas.save(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(day: i32, start: (u32, u32), end: (u32, u32), label: &str) -> TimetableSession {
        TimetableSession {
            day_of_week: day,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_day_order_puts_sunday_last() {
        let names: Vec<&str> = DAY_ORDER.iter().map(|d| day_name(*d)).collect();
        assert_eq!(names.first(), Some(&"Lundi"));
        assert_eq!(names.last(), Some(&"Dimanche"));
    }

    #[test]
    fn test_session_spans_hours() {
        let cells = layout_grid(&[session(1, (10, 0), (12, 0), "Maths")]);
        assert_eq!(
            cells,
            vec![GridCell {
                row: 0,
                column: 2,
                span: 2,
                label: "Maths".to_string()
            }]
        );
    }

    #[test]
    fn test_sunday_maps_to_last_row() {
        let cells = layout_grid(&[session(0, (8, 0), (9, 0), "Arabe")]);
        assert_eq!(cells[0].row, 6);
        assert_eq!(cells[0].column, 0);
        assert_eq!(cells[0].span, 1);
    }

    #[test]
    fn test_short_session_takes_one_cell() {
        let cells = layout_grid(&[session(2, (14, 0), (14, 45), "Quiz")]);
        assert_eq!(cells[0].span, 1);
    }

    #[test]
    fn test_out_of_range_and_overlap_are_skipped() {
        let cells = layout_grid(&[
            session(3, (7, 0), (8, 0), "Early"),
            session(3, (9, 0), (11, 0), "Physique"),
            session(3, (10, 0), (12, 0), "Chimie"),
            session(3, (20, 0), (23, 0), "Late"),
        ]);
        let labels: Vec<&str> = cells.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Physique", "Late"]);
        // 21h 为最后一列
        assert_eq!(cells[1].span, 2);
    }

    #[test]
    fn test_render_timetable() {
        let dir = tempfile::tempdir().unwrap();
        let path = render_timetable(
            dir.path(),
            "2ème Bac A",
            &[session(1, (8, 0), (10, 0), "Maths")],
        )
        .unwrap();
        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("timetable_")
        );
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }
}
