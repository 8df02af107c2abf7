use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Concrete authored content instantiated against a [`Template`]: the actual
/// questions, answer texts and answer values end users see.
///
/// `is_active` is an external flag this core only reads. `is_locked` flips
/// one way, the first time a test is initiated from the package; the flip
/// itself is performed by the storage layer inside the initiation
/// transaction.
///
/// [`Template`]: crate::models::template::Template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Package {
    pub id: Uuid,
    #[validate(length(min = 1, message = "Package name cannot be empty"))]
    pub name: String,
    pub template_id: Uuid,
    pub is_active: bool,
    pub is_locked: bool,
    #[validate(length(min = 1, message = "Package needs at least one sub-group"), nested)]
    pub sub_groups: Vec<SubGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SubGroup {
    #[validate(length(min = 1, message = "Sub-group name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Sub-group needs at least one question"), nested)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Question {
    #[validate(length(min = 1, message = "Question text cannot be empty"))]
    pub text: String,
    #[validate(length(min = 1, message = "Question needs at least one answer"), nested)]
    pub answers: Vec<AnswerOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AnswerOption {
    #[validate(length(min = 1, message = "Answer text cannot be empty"))]
    pub text: String,
    #[validate(range(min = 1, message = "Answer value must be positive"))]
    pub value: i32,
}

impl Package {
    pub fn sub_group(&self, name: &str) -> Option<&SubGroup> {
        self.sub_groups.iter().find(|g| g.name == name)
    }
}

impl SubGroup {
    pub fn question(&self, text: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.text == text)
    }
}

impl Question {
    pub fn answer(&self, text: &str) -> Option<&AnswerOption> {
        self.answers.iter().find(|a| a.text == text)
    }
}
