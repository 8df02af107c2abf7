use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Abstract schema for one kind of screening test: how many groups, questions
/// and answer options a package of this kind carries, plus the threshold that
/// separates a positive from a negative indication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Template {
    pub id: Uuid,
    #[validate(length(min = 1, message = "Template name cannot be empty"))]
    pub name: String,
    pub indication_threshold: i32,
    #[validate(length(min = 1, message = "Positive indication text cannot be empty"))]
    pub positive_text: String,
    #[validate(length(min = 1, message = "Negative indication text cannot be empty"))]
    pub negative_text: String,
    #[validate(length(min = 1, message = "Template needs at least one sub-group"), nested)]
    pub sub_groups: Vec<SubGroupSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SubGroupSchema {
    #[validate(length(min = 1, message = "Sub-group name cannot be empty"))]
    pub name: String,
    #[validate(range(min = 1, message = "Sub-group needs at least one question"))]
    pub question_count: i32,
    #[validate(range(min = 2, message = "Questions need at least two answer options"))]
    pub answer_option_count: i32,
}

impl Template {
    /// Lowest total a complete submission can score: one point per sub-group.
    pub fn min_point(&self) -> i32 {
        self.sub_groups.len() as i32
    }

    /// Highest total a complete submission can score.
    pub fn max_point(&self) -> i32 {
        self.sub_groups
            .iter()
            .map(|g| g.question_count * g.answer_option_count)
            .sum()
    }

    /// Indication line for a graded total. Totals at or above the threshold
    /// read as a positive indication.
    pub fn indication_text(&self, total: i32) -> &str {
        if total >= self.indication_threshold {
            &self.positive_text
        } else {
            &self.negative_text
        }
    }
}
