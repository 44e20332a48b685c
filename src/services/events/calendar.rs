//! 日历数据：存储的事件加上投影到本周的课表

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Datelike, Days, Local, NaiveDate};

use super::EventService;
use crate::models::events::entities::Event;
use crate::models::events::responses::{CalendarEntry, CalendarExtendedProps};
use crate::models::timetable::entities::TimetableEntry;
use crate::models::{ApiResponse, ErrorCode};

/// 本周周日（周日视为一周第一天）
pub fn week_start(today: NaiveDate) -> NaiveDate {
    let offset = today.weekday().num_days_from_sunday() as u64;
    today - Days::new(offset)
}

pub fn event_entry(event: &Event) -> CalendarEntry {
    CalendarEntry {
        id: format!("evt-{}", event.id),
        title: event.title.clone(),
        start: event.start.naive_utc(),
        end: event.end.map(|end| end.naive_utc()),
        extended_props: CalendarExtendedProps {
            kind: event
                .event_type
                .clone()
                .unwrap_or_else(|| "event".to_string()),
            group_id: None,
            course_id: None,
        },
    }
}

/// 课表条目映射到 week_start + day_of_week 那天
pub fn timetable_entry(
    entry: &TimetableEntry,
    week_start: NaiveDate,
    course_names: &HashMap<i64, String>,
) -> CalendarEntry {
    let day = week_start + Days::new(entry.day_of_week.clamp(0, 6) as u64);
    let title = entry
        .course_id
        .and_then(|id| course_names.get(&id).cloned())
        .unwrap_or_else(|| "Class".to_string());

    CalendarEntry {
        id: format!("tt-{}", entry.id),
        title,
        start: day.and_time(entry.start_time),
        end: Some(day.and_time(entry.end_time)),
        extended_props: CalendarExtendedProps {
            kind: "timetable".to_string(),
            group_id: Some(entry.group_id),
            course_id: entry.course_id,
        },
    }
}

pub async fn fullcalendar(
    service: &EventService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let loaded = async {
        let events = storage.list_all_events().await?;
        let entries = storage.list_timetable().await?;
        let courses = storage.list_course_refs().await?;
        Ok::<_, crate::errors::EduManageError>((events, entries, courses))
    }
    .await;

    let (events, entries, courses) = match loaded {
        Ok(data) => data,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to build calendar: {e}"),
                )),
            );
        }
    };

    let course_names: HashMap<i64, String> =
        courses.into_iter().map(|c| (c.id, c.name)).collect();
    let start = week_start(Local::now().date_naive());

    let mut calendar: Vec<CalendarEntry> = events.iter().map(event_entry).collect();
    calendar.extend(
        entries
            .iter()
            .map(|entry| timetable_entry(entry, start, &course_names)),
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        calendar,
        "Calendar retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_is_sunday() {
        // 2025-03-12 是周三
        assert_eq!(week_start(date(2025, 3, 12)), date(2025, 3, 9));
        // 周日当天即为周首
        assert_eq!(week_start(date(2025, 3, 9)), date(2025, 3, 9));
        assert_eq!(week_start(date(2025, 3, 15)), date(2025, 3, 9));
    }

    #[test]
    fn test_timetable_projection() {
        let entry = TimetableEntry {
            id: 4,
            group_id: 2,
            day_of_week: 1,
            start_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            course_id: Some(7),
        };
        let mut names = HashMap::new();
        names.insert(7, "Mathématiques".to_string());

        let item = timetable_entry(&entry, date(2025, 3, 9), &names);
        assert_eq!(item.id, "tt-4");
        assert_eq!(item.title, "Mathématiques");
        assert_eq!(item.start, date(2025, 3, 10).and_hms_opt(8, 30, 0).unwrap());
        assert_eq!(item.extended_props.kind, "timetable");
        assert_eq!(item.extended_props.group_id, Some(2));

        let unnamed = TimetableEntry {
            course_id: None,
            ..entry
        };
        assert_eq!(timetable_entry(&unnamed, date(2025, 3, 9), &names).title, "Class");
    }

    #[test]
    fn test_event_entry_defaults_type() {
        let event = Event {
            id: 12,
            title: "Réunion parents".to_string(),
            description: None,
            event_type: None,
            start: Utc.with_ymd_and_hms(2025, 3, 14, 17, 0, 0).unwrap(),
            end: None,
            created_at: Utc::now(),
        };
        let item = event_entry(&event);
        assert_eq!(item.id, "evt-12");
        assert_eq!(item.extended_props.kind, "event");
        assert!(item.end.is_none());
    }
}
