use serde::{Deserialize, Serialize};

/// Output of grading: one score per package sub-group, in package order,
/// plus the total. The total is owned by the grading engine (sum of the
/// group scores), never recomputed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedResult {
    pub groups: Vec<GroupScore>,
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupScore {
    pub group_name: String,
    pub score: i32,
}
