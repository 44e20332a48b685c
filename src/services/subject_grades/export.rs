//! 班级平均分导出（XLSX）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook};
use tracing::error;

use super::SubjectGradeService;
use super::averages::compute_group_averages;
use crate::models::subject_grades::requests::GroupAveragesQuery;
use crate::models::subject_grades::responses::StudentAverage;
use crate::models::{ApiResponse, ErrorCode};

/// 所有学生出现过的科目，按首次出现顺序
pub fn subject_columns(averages: &[StudentAverage]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for student in averages {
        for subject in &student.subjects {
            if !columns.contains(&subject.subject) {
                columns.push(subject.subject.clone());
            }
        }
    }
    columns
}

fn generate_xlsx(semester: &str, averages: &[StudentAverage]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let number_format = Format::new().set_num_format("0.00");

    let sheet = workbook
        .add_worksheet()
        .set_name("Moyennes")
        .map_err(|e| e.to_string())?;

    let subjects = subject_columns(averages);

    // 表头：姓名 | 科目1 | ... | 系数和 | 总平均
    sheet
        .write_string_with_format(0, 0, format!("Étudiant ({semester})"), &header_format)
        .map_err(|e| e.to_string())?;
    for (i, subject) in subjects.iter().enumerate() {
        sheet
            .write_string_with_format(0, (i + 1) as u16, subject, &header_format)
            .map_err(|e| e.to_string())?;
    }
    let coeff_col = (subjects.len() + 1) as u16;
    sheet
        .write_string_with_format(0, coeff_col, "Σ Coefficients", &header_format)
        .map_err(|e| e.to_string())?;
    sheet
        .write_string_with_format(0, coeff_col + 1, "Moyenne générale", &header_format)
        .map_err(|e| e.to_string())?;

    for (row, student) in averages.iter().enumerate() {
        let row = (row + 1) as u32;
        sheet.write_string(row, 0, &student.full_name).ok();

        for (i, subject) in subjects.iter().enumerate() {
            let col = (i + 1) as u16;
            match student.subjects.iter().find(|s| &s.subject == subject) {
                Some(avg) => {
                    sheet
                        .write_number_with_format(row, col, avg.average, &number_format)
                        .ok();
                }
                None => {
                    sheet.write_string(row, col, "-").ok();
                }
            }
        }

        sheet
            .write_number(row, coeff_col, student.sum_coefficients)
            .ok();
        match student.average {
            Some(avg) => {
                sheet
                    .write_number_with_format(row, coeff_col + 1, avg, &number_format)
                    .ok();
            }
            None => {
                sheet.write_string(row, coeff_col + 1, "-").ok();
            }
        }
    }

    sheet.set_column_width(0, 28).ok();
    for i in 0..subjects.len() {
        sheet.set_column_width((i + 1) as u16, 14).ok();
    }
    sheet.set_column_width(coeff_col, 14).ok();
    sheet.set_column_width(coeff_col + 1, 18).ok();

    workbook.save_to_buffer().map_err(|e| e.to_string())
}

pub async fn export_averages(
    service: &SubjectGradeService,
    query: GroupAveragesQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let averages = match compute_group_averages(&storage, query.group_id, &query.semester).await {
        Ok(averages) => averages,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to compute averages: {e}"),
                )),
            );
        }
    };

    match generate_xlsx(&query.semester, &averages) {
        Ok(buffer) => {
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
            let filename = format!(
                "group_{}_{}_averages_{timestamp}.xlsx",
                query.group_id, query.semester
            );

            Ok(HttpResponse::Ok()
                .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            error!("Failed to generate XLSX: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to export averages: {e}"),
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subject_grades::responses::SubjectAverage;

    fn average(name: &str, subjects: &[(&str, f64)]) -> StudentAverage {
        StudentAverage {
            student_id: 1,
            full_name: name.to_string(),
            average: Some(12.0),
            sum_coefficients: subjects.len() as f64,
            subjects: subjects
                .iter()
                .map(|(s, a)| SubjectAverage {
                    subject: s.to_string(),
                    coefficient: 1.0,
                    average: *a,
                })
                .collect(),
        }
    }

    #[test]
    fn test_subject_columns_union_in_order() {
        let rows = vec![
            average("A", &[("Maths", 12.0), ("Arabe", 14.0)]),
            average("B", &[("Arabe", 10.0), ("SVT", 11.0)]),
        ];
        assert_eq!(subject_columns(&rows), vec!["Maths", "Arabe", "SVT"]);
    }

    #[test]
    fn test_generate_xlsx_produces_zip() {
        let rows = vec![average("Karim", &[("Maths", 15.5)])];
        let buffer = generate_xlsx("S1", &rows).unwrap();
        assert!(buffer.starts_with(b"PK"));
    }
}
