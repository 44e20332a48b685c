use super::{SeaOrmStorage, now_ts, page_params};
use crate::entity::reports::{ActiveModel, Column, Entity as Reports};
use crate::errors::{EduManageError, Result};
use crate::models::reports::{
    entities::{Report, ReportListResponse},
    requests::ReportListQuery,
};
use crate::storage::ReportCounters;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_report_impl(
        &self,
        report_type: &str,
        period_start: Option<NaiveDate>,
        period_end: Option<NaiveDate>,
        file_path: Option<String>,
    ) -> Result<Report> {
        let model = ActiveModel {
            report_type: Set(report_type.to_string()),
            period_start: Set(period_start),
            period_end: Set(period_end),
            file_path: Set(file_path),
            created_at: Set(now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建报表失败: {e}")))?;

        Ok(result.into_report())
    }

    pub async fn list_reports_with_pagination_impl(
        &self,
        query: ReportListQuery,
    ) -> Result<ReportListResponse> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Reports::find();
        if let Some(ref report_type) = query.report_type {
            select = select.filter(Column::ReportType.eq(report_type.as_str()));
        }
        select = select.order_by_desc(Column::Id);

        self.paginate(select, page, size, "报表", |m| m.into_report())
            .await
    }

    pub async fn list_recent_reports_impl(&self, limit: u64) -> Result<Vec<Report>> {
        let rows = Reports::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询最近报表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_report()).collect())
    }

    /// 报表总数、当天生成数、未生成文件数
    pub async fn report_counters_impl(&self, today: NaiveDate) -> Result<ReportCounters> {
        let day_start = today.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let day_end = day_start + 86_400;

        let total = Reports::find()
            .count(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("统计报表总数失败: {e}")))?;

        let generated_today = Reports::find()
            .filter(Column::CreatedAt.gte(day_start))
            .filter(Column::CreatedAt.lt(day_end))
            .count(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("统计当天报表失败: {e}")))?;

        let pending = Reports::find()
            .filter(Column::FilePath.is_null())
            .count(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("统计待生成报表失败: {e}")))?;

        Ok(ReportCounters {
            total,
            generated_today,
            pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;

    #[tokio::test]
    async fn test_report_counters() {
        let storage = memory_storage().await;
        storage
            .create_report_impl("financial", None, None, Some("reports/a.pdf".into()))
            .await
            .unwrap();
        storage
            .create_report_impl("attendance_analysis", None, None, None)
            .await
            .unwrap();

        let today = chrono::Utc::now().date_naive();
        let counters = storage.report_counters_impl(today).await.unwrap();
        assert_eq!(counters.total, 2);
        assert_eq!(counters.generated_today, 2);
        assert_eq!(counters.pending, 1);

        let recent = storage.list_recent_reports_impl(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].report_type, "attendance_analysis");
    }
}
