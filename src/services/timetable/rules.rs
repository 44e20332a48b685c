//! 课表校验规则

use chrono::NaiveTime;

use crate::models::timetable::entities::TimetableEntry;
use crate::models::timetable::requests::UpdateTimetableRequest;

pub const INVALID_DAY_MESSAGE: &str = "Invalid day of week (0-6)";
pub const TIME_CONFLICT_MESSAGE: &str = "Time conflict with existing timetable entry";

/// 0 = 周日 … 6 = 周六
pub fn is_valid_day(day_of_week: i32) -> bool {
    (0..=6).contains(&day_of_week)
}

pub fn is_valid_range(start: NaiveTime, end: NaiveTime) -> bool {
    start < end
}

/// 同班级同一天内时间段重叠的第一条记录（首尾相接不算冲突）
pub fn find_conflict<'a>(
    existing: &'a [TimetableEntry],
    group_id: i64,
    day_of_week: i32,
    start: NaiveTime,
    end: NaiveTime,
    exclude_id: Option<i64>,
) -> Option<&'a TimetableEntry> {
    existing.iter().find(|entry| {
        Some(entry.id) != exclude_id
            && entry.group_id == group_id
            && entry.day_of_week == day_of_week
            && entry.start_time < end
            && entry.end_time > start
    })
}

/// 部分更新合并到原条目
pub fn merge_update(current: &TimetableEntry, update: &UpdateTimetableRequest) -> TimetableEntry {
    TimetableEntry {
        id: current.id,
        group_id: update.group_id.unwrap_or(current.group_id),
        day_of_week: update.day_of_week.unwrap_or(current.day_of_week),
        start_time: update.start_time.unwrap_or(current.start_time),
        end_time: update.end_time.unwrap_or(current.end_time),
        course_id: update.course_id.or(current.course_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn entry(id: i64, day: i32, start: NaiveTime, end: NaiveTime) -> TimetableEntry {
        TimetableEntry {
            id,
            group_id: 1,
            day_of_week: day,
            start_time: start,
            end_time: end,
            course_id: None,
        }
    }

    #[test]
    fn test_day_range() {
        assert!(is_valid_day(0));
        assert!(is_valid_day(6));
        assert!(!is_valid_day(7));
        assert!(!is_valid_day(-1));
    }

    #[test]
    fn test_time_range() {
        assert!(is_valid_range(time(8, 0), time(9, 0)));
        assert!(!is_valid_range(time(9, 0), time(9, 0)));
        assert!(!is_valid_range(time(10, 0), time(9, 0)));
    }

    #[test]
    fn test_overlap_detected() {
        let existing = vec![entry(1, 1, time(8, 0), time(10, 0))];
        let hit = find_conflict(&existing, 1, 1, time(9, 0), time(11, 0), None);
        assert_eq!(hit.map(|e| e.id), Some(1));
    }

    #[test]
    fn test_adjacent_sessions_do_not_conflict() {
        let existing = vec![entry(1, 1, time(8, 0), time(10, 0))];
        assert!(find_conflict(&existing, 1, 1, time(10, 0), time(11, 0), None).is_none());
        assert!(find_conflict(&existing, 1, 1, time(7, 0), time(8, 0), None).is_none());
    }

    #[test]
    fn test_other_day_or_group_ignored() {
        let existing = vec![entry(1, 1, time(8, 0), time(10, 0))];
        assert!(find_conflict(&existing, 1, 2, time(8, 0), time(10, 0), None).is_none());
        assert!(find_conflict(&existing, 2, 1, time(8, 0), time(10, 0), None).is_none());
    }

    #[test]
    fn test_update_excludes_self() {
        let existing = vec![entry(1, 1, time(8, 0), time(10, 0))];
        assert!(find_conflict(&existing, 1, 1, time(8, 30), time(10, 30), Some(1)).is_none());
    }

    #[test]
    fn test_merge_update_keeps_unset_fields() {
        let current = entry(3, 2, time(8, 0), time(9, 0));
        let merged = merge_update(
            &current,
            &UpdateTimetableRequest {
                group_id: None,
                day_of_week: Some(4),
                start_time: None,
                end_time: Some(time(9, 30)),
                course_id: Some(7),
            },
        );
        assert_eq!(merged.id, 3);
        assert_eq!(merged.day_of_week, 4);
        assert_eq!(merged.start_time, time(8, 0));
        assert_eq!(merged.end_time, time(9, 30));
        assert_eq!(merged.course_id, Some(7));
    }
}
