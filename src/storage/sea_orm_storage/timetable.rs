use super::SeaOrmStorage;
use crate::entity::timetable::{ActiveModel, Column, Entity as TimetableEntries};
use crate::errors::{EduManageError, Result};
use crate::models::timetable::{entities::TimetableEntry, requests::CreateTimetableRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_timetable_entry_impl(
        &self,
        req: CreateTimetableRequest,
    ) -> Result<TimetableEntry> {
        let model = ActiveModel {
            group_id: Set(req.group_id),
            day_of_week: Set(req.day_of_week),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            course_id: Set(req.course_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建课表条目失败: {e}")))?;

        Ok(result.into_entry())
    }

    pub async fn get_timetable_entry_impl(&self, id: i64) -> Result<Option<TimetableEntry>> {
        let result = TimetableEntries::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询课表条目失败: {e}")))?;

        Ok(result.map(|m| m.into_entry()))
    }

    /// 全部课表，按星期与开始时间排序
    pub async fn list_timetable_impl(&self) -> Result<Vec<TimetableEntry>> {
        self.fetch_timetable(None, None).await
    }

    pub async fn list_timetable_by_group_impl(&self, group_id: i64) -> Result<Vec<TimetableEntry>> {
        self.fetch_timetable(Some(group_id), None).await
    }

    pub async fn list_timetable_by_day_impl(&self, day_of_week: i32) -> Result<Vec<TimetableEntry>> {
        self.fetch_timetable(None, Some(day_of_week)).await
    }

    pub async fn list_timetable_by_group_and_day_impl(
        &self,
        group_id: i64,
        day_of_week: i32,
    ) -> Result<Vec<TimetableEntry>> {
        self.fetch_timetable(Some(group_id), Some(day_of_week)).await
    }

    async fn fetch_timetable(
        &self,
        group_id: Option<i64>,
        day_of_week: Option<i32>,
    ) -> Result<Vec<TimetableEntry>> {
        let mut select = TimetableEntries::find();
        if let Some(group_id) = group_id {
            select = select.filter(Column::GroupId.eq(group_id));
        }
        if let Some(day) = day_of_week {
            select = select.filter(Column::DayOfWeek.eq(day));
        }

        let rows = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询课表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_entry()).collect())
    }

    /// 以合并后的完整条目覆盖
    pub async fn replace_timetable_entry_impl(
        &self,
        entry: TimetableEntry,
    ) -> Result<Option<TimetableEntry>> {
        if self.get_timetable_entry_impl(entry.id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(entry.id),
            group_id: Set(entry.group_id),
            day_of_week: Set(entry.day_of_week),
            start_time: Set(entry.start_time),
            end_time: Set(entry.end_time),
            course_id: Set(entry.course_id),
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新课表条目失败: {e}")))?;

        Ok(Some(result.into_entry()))
    }

    pub async fn delete_timetable_entry_impl(&self, id: i64) -> Result<bool> {
        let result = TimetableEntries::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("删除课表条目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::groups::requests::CreateGroupRequest;
    use crate::models::timetable::requests::CreateTimetableRequest;
    use chrono::NaiveTime;

    fn at(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_timetable_ordering_and_replace() {
        let storage = memory_storage().await;
        let g = storage
            .create_group_impl(CreateGroupRequest {
                name: "2BAC PC".into(),
                level: None,
                year: None,
                capacity: None,
            })
            .await
            .unwrap();

        for (day, start) in [(3, 14), (1, 10), (1, 8)] {
            storage
                .create_timetable_entry_impl(CreateTimetableRequest {
                    group_id: g.id,
                    day_of_week: day,
                    start_time: at(start),
                    end_time: at(start + 2),
                    course_id: None,
                })
                .await
                .unwrap();
        }

        let all = storage.list_timetable_impl().await.unwrap();
        let order: Vec<(i32, NaiveTime)> = all.iter().map(|e| (e.day_of_week, e.start_time)).collect();
        assert_eq!(order, vec![(1, at(8)), (1, at(10)), (3, at(14))]);

        let monday = storage
            .list_timetable_by_group_and_day_impl(g.id, 1)
            .await
            .unwrap();
        assert_eq!(monday.len(), 2);

        let mut moved = all[2].clone();
        moved.day_of_week = 5;
        let saved = storage
            .replace_timetable_entry_impl(moved)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.day_of_week, 5);
        assert_eq!(storage.list_timetable_by_day_impl(3).await.unwrap().len(), 0);
    }
}
