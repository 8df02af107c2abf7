pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Package is not active")]
    PackageInactive,

    #[error("Test is past its deadline")]
    TestExpired,

    #[error("Test has already been answered")]
    AlreadyAnswered,

    #[error("Submit key does not match")]
    InvalidSubmitKey,

    #[error("Invalid answers: {0}")]
    InvalidAnswers(#[from] GradingError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Closed set of grading failures. Grading is all-or-nothing: the first
/// violation in evaluation order is returned and no partial scores escape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GradingError {
    #[error("submission contains no answer groups")]
    EmptySubmission,

    #[error("required group '{0}' is missing from the submission")]
    GroupMissing(String),

    #[error("submitted group '{0}' is not part of this package")]
    UnknownGroup(String),

    #[error("question '{0}' was not answered")]
    QuestionUnanswered(String),

    #[error("submitted question '{0}' is not part of this group")]
    UnknownQuestion(String),

    #[error("submitted answer '{0}' does not match any defined answer")]
    UnknownAnswer(String),
}
