//! 教师统计相关接口

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Datelike, NaiveDate, Utc};
use tracing::error;

use super::TeacherService;
use crate::models::teachers::responses::{
    TeacherOverviewResponse, TeacherStatsResponse, UpdateAllStatsResponse, UpdateStatsResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::teacher_stats::{
    refresh_all_teacher_statistics, refresh_teacher_statistics,
};

/// 本月一日零点（UTC）的时间戳
pub(crate) fn month_start_timestamp(today: NaiveDate) -> i64 {
    today
        .with_day(1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

pub async fn get_teacher_stats(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let stored = match storage.get_teacher_statistics(teacher_id).await {
        Ok(stored) => stored,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get teacher statistics: {e}"),
                )),
            );
        }
    };

    // 没有统计时先计算一次；教师不存在同样返回 404
    let stats = match stored {
        Some(stats) => Some(stats),
        None => match refresh_teacher_statistics(&storage, teacher_id).await {
            Ok(stats) => stats,
            Err(e) => {
                error!("Failed to compute statistics for teacher {}: {}", teacher_id, e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to compute teacher statistics: {e}"),
                    )),
                );
            }
        },
    };

    match stats {
        Some(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherStatsResponse::from(stats),
            "Teacher statistics retrieved successfully",
        ))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
    }
}

pub async fn get_overview(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let total = match storage.count_teachers().await {
        Ok(total) => total as i64,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to count teachers: {e}"),
                )),
            );
        }
    };

    let since = month_start_timestamp(Utc::now().date_naive());
    let new_this_month = match storage.count_teachers_created_since(since).await {
        Ok(count) => count as i64,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to count teachers: {e}"),
                )),
            );
        }
    };

    // 暂无请假数据，全部视为在岗
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TeacherOverviewResponse {
            total_teachers: total,
            active_teachers: total,
            on_leave: 0,
            new_this_month,
        },
        "Teacher overview retrieved successfully",
    )))
}

pub async fn update_teacher_stats(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match refresh_teacher_statistics(&storage, teacher_id).await {
        Ok(Some(_)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UpdateStatsResponse {
                message: format!("Statistics updated for teacher {teacher_id}"),
                success: true,
            },
            "Teacher statistics updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update teacher statistics: {e}"),
            )),
        ),
    }
}

pub async fn update_all_stats(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match refresh_all_teacher_statistics(&storage).await {
        Ok(updated_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UpdateAllStatsResponse {
                message: format!("Statistics updated for {updated_count} teachers"),
                updated_count,
            },
            "Teacher statistics updated successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update teacher statistics: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_start_timestamp() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp();
        assert_eq!(month_start_timestamp(today), expected);
    }
}
