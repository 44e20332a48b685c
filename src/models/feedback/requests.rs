use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct CreateFeedbackRequest {
    pub student_id: i64,
    pub teacher_id: i64,
    pub course_id: i64,
    pub rating: i32,
    pub satisfaction_score: i32,
    pub teaching_quality: i32,
    pub course_content: i32,
    pub communication: i32,
    pub helpfulness: i32,
    pub comments: Option<String>,
}

impl CreateFeedbackRequest {
    /// 分值范围：满意度 1-10，其余 1-5
    pub fn validate_scores(&self) -> Result<(), String> {
        let checks = [
            ("rating", self.rating, 5),
            ("satisfaction_score", self.satisfaction_score, 10),
            ("teaching_quality", self.teaching_quality, 5),
            ("course_content", self.course_content, 5),
            ("communication", self.communication, 5),
            ("helpfulness", self.helpfulness, 5),
        ];
        for (field, value, max) in checks {
            if !(1..=max).contains(&value) {
                return Err(format!("{field} must be between 1 and {max}"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/feedback.ts")]
pub struct FeedbackListQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CreateFeedbackRequest {
        CreateFeedbackRequest {
            student_id: 1,
            teacher_id: 2,
            course_id: 3,
            rating: 4,
            satisfaction_score: 8,
            teaching_quality: 5,
            course_content: 4,
            communication: 3,
            helpfulness: 5,
            comments: None,
        }
    }

    #[test]
    fn test_valid_scores() {
        assert!(sample().validate_scores().is_ok());
    }

    #[test]
    fn test_satisfaction_allows_up_to_ten() {
        let mut req = sample();
        req.satisfaction_score = 10;
        assert!(req.validate_scores().is_ok());
        req.satisfaction_score = 11;
        let err = req.validate_scores().unwrap_err();
        assert!(err.contains("satisfaction_score"));
    }

    #[test]
    fn test_five_point_fields_reject_out_of_range() {
        let mut req = sample();
        req.rating = 6;
        assert!(req.validate_scores().is_err());

        let mut req = sample();
        req.helpfulness = 0;
        let err = req.validate_scores().unwrap_err();
        assert_eq!(err, "helpfulness must be between 1 and 5");
    }
}
