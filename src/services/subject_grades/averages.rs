//! 班级学期平均分
//!
//! 每个科目取该学期全部成绩的简单平均，系数取最后一个非空值（默认 1.0），
//! 学生总平均为按系数加权的平均；系数和为 0 时为 null。

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectGradeService;
use crate::errors::Result;
use crate::models::students::entities::Student;
use crate::models::subject_grades::entities::StudentGrade;
use crate::models::subject_grades::requests::GroupAveragesQuery;
use crate::models::subject_grades::responses::{StudentAverage, SubjectAverage};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

const DEFAULT_COEFFICIENT: f64 = 1.0;

struct SubjectBucket {
    subject: String,
    coefficient: f64,
    grades: Vec<f64>,
}

/// 单个学生的科目平均；科目按首次出现顺序
pub fn subject_averages(grades: &[&StudentGrade]) -> Vec<SubjectAverage> {
    let mut buckets: Vec<SubjectBucket> = Vec::new();
    for grade in grades {
        let subject = grade.subject.trim();
        if subject.is_empty() {
            continue;
        }
        let index = match buckets.iter().position(|b| b.subject == subject) {
            Some(index) => index,
            None => {
                buckets.push(SubjectBucket {
                    subject: subject.to_string(),
                    coefficient: DEFAULT_COEFFICIENT,
                    grades: Vec::new(),
                });
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[index];
        if let Some(coefficient) = grade.coefficient {
            bucket.coefficient = coefficient;
        }
        bucket.grades.push(grade.grade);
    }

    buckets
        .into_iter()
        .filter(|b| !b.grades.is_empty())
        .map(|b| SubjectAverage {
            average: b.grades.iter().sum::<f64>() / b.grades.len() as f64,
            subject: b.subject,
            coefficient: b.coefficient,
        })
        .collect()
}

pub fn student_average(student: &Student, grades: &[StudentGrade]) -> StudentAverage {
    let own: Vec<&StudentGrade> = grades.iter().filter(|g| g.student_id == student.id).collect();
    let subjects = subject_averages(&own);

    let sum_coefficients: f64 = subjects.iter().map(|s| s.coefficient).sum();
    let weighted: f64 = subjects.iter().map(|s| s.average * s.coefficient).sum();
    let average = (sum_coefficients > 0.0).then(|| weighted / sum_coefficients);

    StudentAverage {
        student_id: student.id,
        full_name: student.full_name.clone(),
        average,
        sum_coefficients,
        subjects,
    }
}

/// 班级内学生按姓名排序
pub async fn compute_group_averages(
    storage: &Arc<dyn Storage>,
    group_id: i64,
    semester: &str,
) -> Result<Vec<StudentAverage>> {
    let mut students = storage.list_students_by_group(group_id).await?;
    students.sort_by(|a, b| a.full_name.cmp(&b.full_name));
    let grades = storage
        .list_grades_by_group_semester(group_id, semester)
        .await?;

    Ok(students
        .iter()
        .map(|student| student_average(student, &grades))
        .collect())
}

pub async fn averages_by_group(
    service: &SubjectGradeService,
    query: GroupAveragesQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match compute_group_averages(&storage, query.group_id, &query.semester).await {
        Ok(averages) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            averages,
            "Averages computed successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to compute averages: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn grade(student_id: i64, subject: &str, value: f64, coefficient: Option<f64>) -> StudentGrade {
        StudentGrade {
            id: 0,
            student_id,
            group_id: 1,
            subject: subject.to_string(),
            exam_name: "Contrôle".to_string(),
            grade: value,
            coefficient,
            semester: "S1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn student(id: i64, name: &str) -> Student {
        Student {
            id,
            full_name: name.to_string(),
            group_id: Some(1),
            email: None,
            phone: None,
            address: None,
            birth_date: None,
            gender: None,
            status: "active".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_weighted_average() {
        let grades = vec![
            grade(1, "Maths", 12.0, Some(4.0)),
            grade(1, "Maths", 16.0, None),
            grade(1, "Français", 10.0, Some(2.0)),
            grade(2, "Maths", 20.0, Some(4.0)),
        ];
        let avg = student_average(&student(1, "Amine"), &grades);
        assert_eq!(avg.subjects.len(), 2);
        assert_eq!(avg.subjects[0].subject, "Maths");
        assert_eq!(avg.subjects[0].average, 14.0);
        assert_eq!(avg.subjects[0].coefficient, 4.0);
        assert_eq!(avg.sum_coefficients, 6.0);
        // (14*4 + 10*2) / 6
        let expected = 76.0 / 6.0;
        assert!((avg.average.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_latest_coefficient_wins_and_default() {
        let grades = vec![
            grade(1, "Physique", 10.0, Some(2.0)),
            grade(1, "Physique", 14.0, Some(3.0)),
            grade(1, "Arabe", 15.0, None),
        ];
        let avg = student_average(&student(1, "Sara"), &grades);
        assert_eq!(avg.subjects[0].coefficient, 3.0);
        assert_eq!(avg.subjects[1].coefficient, 1.0);
    }

    #[test]
    fn test_no_grades_gives_null_average() {
        let avg = student_average(&student(3, "Nadia"), &[]);
        assert!(avg.subjects.is_empty());
        assert_eq!(avg.average, None);
        assert_eq!(avg.sum_coefficients, 0.0);
    }

    #[test]
    fn test_zero_coefficients_gives_null_average() {
        let grades = vec![grade(1, "Sport", 18.0, Some(0.0))];
        let avg = student_average(&student(1, "Yassine"), &grades);
        assert_eq!(avg.subjects.len(), 1);
        assert_eq!(avg.average, None);
    }

    #[test]
    fn test_blank_subject_skipped() {
        let grades = vec![grade(1, "  ", 9.0, None), grade(1, " Maths ", 11.0, None)];
        let avg = student_average(&student(1, "Omar"), &grades);
        assert_eq!(avg.subjects.len(), 1);
        assert_eq!(avg.subjects[0].subject, "Maths");
    }
}
