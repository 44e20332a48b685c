use super::{SeaOrmStorage, page_params};
use crate::entity::attendance::{ActiveModel, Column, Entity as AttendanceRecords};
use crate::errors::{EduManageError, Result};
use crate::models::attendance::{
    entities::{Attendance, AttendanceListResponse, AttendanceStatus},
    requests::{AttendanceListQuery, CreateAttendanceRequest, UpdateAttendanceRequest},
};
use crate::storage::AttendanceTotals;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 按 (student_id, date) 写入：保留最新一行并覆盖状态，删除更早的重复行
    pub async fn upsert_attendance_impl(&self, req: CreateAttendanceRequest) -> Result<Attendance> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| EduManageError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = AttendanceRecords::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::Date.eq(req.date))
            .order_by_desc(Column::Id)
            .all(&txn)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询考勤失败: {e}")))?;

        let result = match existing.split_first() {
            Some((latest, older)) => {
                if !older.is_empty() {
                    AttendanceRecords::delete_many()
                        .filter(Column::Id.is_in(older.iter().map(|m| m.id)))
                        .exec(&txn)
                        .await
                        .map_err(|e| {
                            EduManageError::database_operation(format!("清理重复考勤失败: {e}"))
                        })?;
                }

                ActiveModel {
                    id: Set(latest.id),
                    status: Set(req.status.to_string()),
                    ..Default::default()
                }
                .update(&txn)
                .await
            }
            None => {
                ActiveModel {
                    student_id: Set(req.student_id),
                    date: Set(req.date),
                    status: Set(req.status.to_string()),
                    ..Default::default()
                }
                .insert(&txn)
                .await
            }
        }
        .map_err(|e| EduManageError::database_operation(format!("保存考勤失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| EduManageError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_attendance())
    }

    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<Attendance>> {
        let result = AttendanceRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    /// 同一学生同一天的最新记录
    pub async fn find_attendance_impl(
        &self,
        student_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>> {
        let result = AttendanceRecords::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Date.eq(date))
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    pub async fn list_attendance_with_pagination_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = AttendanceRecords::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }
        select = select.order_by_desc(Column::Id);

        self.paginate(select, page, size, "考勤", |m| m.into_attendance())
            .await
    }

    pub async fn update_attendance_impl(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        if self.get_attendance_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(date) = update.date {
            model.date = Set(date);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新考勤失败: {e}")))?;

        Ok(Some(result.into_attendance()))
    }

    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = AttendanceRecords::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("删除考勤失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 区间内考勤总数与出勤数
    pub async fn attendance_totals_impl(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<AttendanceTotals> {
        let mut select = AttendanceRecords::find()
            .select_only()
            .column(Column::Status);
        if let Some(from) = from {
            select = select.filter(Column::Date.gte(from));
        }
        if let Some(to) = to {
            select = select.filter(Column::Date.lte(to));
        }

        let statuses: Vec<String> = select
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("统计考勤失败: {e}")))?;

        let present = statuses
            .iter()
            .filter(|s| s.eq_ignore_ascii_case(AttendanceStatus::PRESENT))
            .count() as u64;

        Ok(AttendanceTotals {
            total: statuses.len() as u64,
            present,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::attendance::{
        entities::AttendanceStatus,
        requests::{AttendanceListQuery, CreateAttendanceRequest},
    };
    use crate::models::students::requests::CreateStudentRequest;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_attendance_upsert_keeps_single_row_per_day() {
        let storage = memory_storage().await;
        let s = storage
            .create_student_impl(CreateStudentRequest {
                full_name: "Imane Fassi".into(),
                group_id: None,
                email: None,
                phone: None,
                address: None,
                birth_date: None,
                gender: None,
                status: None,
            })
            .await
            .unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 10, 7).unwrap();

        let first = storage
            .upsert_attendance_impl(CreateAttendanceRequest {
                student_id: s.id,
                date: day,
                status: AttendanceStatus::Absent,
            })
            .await
            .unwrap();
        let second = storage
            .upsert_attendance_impl(CreateAttendanceRequest {
                student_id: s.id,
                date: day,
                status: AttendanceStatus::Late,
            })
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.status, AttendanceStatus::Late);

        let list = storage
            .list_attendance_with_pagination_impl(AttendanceListQuery {
                page: None,
                size: None,
                student_id: Some(s.id),
                date: None,
            })
            .await
            .unwrap();
        assert_eq!(list.pagination.total, 1);

        let totals = storage.attendance_totals_impl(None, None).await.unwrap();
        assert_eq!(totals.total, 1);
        assert_eq!(totals.present, 0);

        let outside = storage
            .attendance_totals_impl(NaiveDate::from_ymd_opt(2024, 11, 1), None)
            .await
            .unwrap();
        assert_eq!(outside.total, 0);
    }

    #[tokio::test]
    async fn test_find_attendance_by_student_and_day() {
        let storage = memory_storage().await;
        let s = storage
            .create_student_impl(CreateStudentRequest {
                full_name: "Rania Ouazzani".into(),
                group_id: None,
                email: None,
                phone: None,
                address: None,
                birth_date: None,
                gender: None,
                status: None,
            })
            .await
            .unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 10, 7).unwrap();
        let record = storage
            .upsert_attendance_impl(CreateAttendanceRequest {
                student_id: s.id,
                date: day,
                status: AttendanceStatus::Present,
            })
            .await
            .unwrap();

        let found = storage.find_attendance_impl(s.id, day).await.unwrap();
        assert_eq!(found.map(|a| a.id), Some(record.id));
        assert!(
            storage
                .find_attendance_impl(s.id, day.succ_opt().unwrap())
                .await
                .unwrap()
                .is_none()
        );
        assert!(storage.find_attendance_impl(s.id + 1, day).await.unwrap().is_none());
    }
}
