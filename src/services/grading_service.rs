use crate::error::GradingError;
use crate::models::grade::{GradedResult, GroupScore};
use crate::models::package::Package;
use crate::models::submission::SubmittedAnswerSet;

pub struct GradingService;

impl GradingService {
    /// Matches a submitted answer set against the package content and sums
    /// the values of matched answers per sub-group. Pure and deterministic;
    /// all-or-nothing, no partial result escapes on failure.
    ///
    /// Checks run in a fixed order so a malformed submission always yields
    /// the same error: empty submission, then missing required groups (in
    /// package order), then unknown submitted groups, then per package
    /// sub-group its unanswered questions (package order) and unknown
    /// questions/answers (submission order).
    pub fn grade(
        answer: &SubmittedAnswerSet,
        package: &Package,
    ) -> Result<GradedResult, GradingError> {
        if answer.groups.is_empty() {
            return Err(GradingError::EmptySubmission);
        }

        for group in &package.sub_groups {
            if !answer.groups.iter().any(|g| g.name == group.name) {
                return Err(GradingError::GroupMissing(group.name.clone()));
            }
        }

        for submitted in &answer.groups {
            if package.sub_group(&submitted.name).is_none() {
                return Err(GradingError::UnknownGroup(submitted.name.clone()));
            }
        }

        let mut groups = Vec::with_capacity(package.sub_groups.len());
        for group in &package.sub_groups {
            let submitted = match answer.groups.iter().find(|g| g.name == group.name) {
                Some(g) => g,
                None => return Err(GradingError::GroupMissing(group.name.clone())),
            };

            for question in &group.questions {
                if !submitted.answers.iter().any(|a| a.question == question.text) {
                    return Err(GradingError::QuestionUnanswered(question.text.clone()));
                }
            }

            let mut score = 0;
            for given in &submitted.answers {
                let question = match group.question(&given.question) {
                    Some(q) => q,
                    None => return Err(GradingError::UnknownQuestion(given.question.clone())),
                };
                let option = match question.answer(&given.answer) {
                    Some(o) => o,
                    None => return Err(GradingError::UnknownAnswer(given.answer.clone())),
                };
                score += option.value;
            }

            groups.push(GroupScore {
                group_name: group.name.clone(),
                score,
            });
        }

        let total = groups.iter().map(|g| g.score).sum();
        Ok(GradedResult { groups, total })
    }
}
