use serde::{Deserialize, Serialize};

/// One end-user answer set, as handed over by the caller. Groups and answers
/// are matched against the package by name/text, not by position, so
/// submission order carries no meaning for scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswerSet {
    pub groups: Vec<SubmittedGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedGroup {
    pub name: String,
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    /// Question text, matched verbatim against the package content.
    pub question: String,
    /// Chosen answer text, matched verbatim against the question's options.
    pub answer: String,
}
