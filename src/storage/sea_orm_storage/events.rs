use super::{SeaOrmStorage, now_ts, page_params};
use crate::entity::events::{ActiveModel, Column, Entity as Events};
use crate::errors::{EduManageError, Result};
use crate::models::events::{
    entities::{Event, EventListResponse},
    requests::{CreateEventRequest, EventListQuery, UpdateEventRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_event_impl(&self, req: CreateEventRequest) -> Result<Event> {
        let model = ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            event_type: Set(req.event_type),
            start: Set(req.start.timestamp()),
            end: Set(req.end.map(|end| end.timestamp())),
            created_at: Set(now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("创建事件失败: {e}")))?;

        Ok(result.into_event())
    }

    pub async fn get_event_by_id_impl(&self, id: i64) -> Result<Option<Event>> {
        let result = Events::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询事件失败: {e}")))?;

        Ok(result.map(|m| m.into_event()))
    }

    pub async fn list_events_with_pagination_impl(
        &self,
        query: EventListQuery,
    ) -> Result<EventListResponse> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Events::find();
        if let Some(ref event_type) = query.event_type {
            select = select.filter(Column::EventType.eq(event_type.as_str()));
        }
        select = select.order_by_desc(Column::Id);

        self.paginate(select, page, size, "事件", |m| m.into_event())
            .await
    }

    /// 日历视图使用，按开始时间排序
    pub async fn list_all_events_impl(&self) -> Result<Vec<Event>> {
        let rows = Events::find()
            .order_by_asc(Column::Start)
            .all(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("查询事件失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_event()).collect())
    }

    pub async fn update_event_impl(
        &self,
        id: i64,
        update: UpdateEventRequest,
    ) -> Result<Option<Event>> {
        if self.get_event_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(event_type) = update.event_type {
            model.event_type = Set(Some(event_type));
        }
        if let Some(start) = update.start {
            model.start = Set(start.timestamp());
        }
        if let Some(end) = update.end {
            model.end = Set(Some(end.timestamp()));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("更新事件失败: {e}")))?;

        Ok(Some(result.into_event()))
    }

    pub async fn delete_event_impl(&self, id: i64) -> Result<bool> {
        let result = Events::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EduManageError::database_operation(format!("删除事件失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::events::requests::CreateEventRequest;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_events_sorted_by_start() {
        let storage = memory_storage().await;
        for (title, day) in [("Réunion parents", 20), ("Journée portes ouvertes", 5)] {
            storage
                .create_event_impl(CreateEventRequest {
                    title: title.into(),
                    description: None,
                    event_type: Some("meeting".into()),
                    start: Utc.with_ymd_and_hms(2024, 11, day, 9, 0, 0).unwrap(),
                    end: None,
                })
                .await
                .unwrap();
        }

        let events = storage.list_all_events_impl().await.unwrap();
        assert_eq!(events[0].title, "Journée portes ouvertes");
        assert_eq!(
            events[1].start,
            Utc.with_ymd_and_hms(2024, 11, 20, 9, 0, 0).unwrap()
        );
    }
}
