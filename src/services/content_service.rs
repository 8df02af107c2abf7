use crate::error::{Error, Result};
use crate::models::package::Package;
use crate::utils::validation::{validate, validation_error};
use std::collections::HashSet;

pub struct ContentService;

impl ContentService {
    /// Structural validation of authored package content: at least one
    /// sub-group, non-empty names and texts, at least one answer per
    /// question, positive answer values unique among siblings.
    ///
    /// Deliberately does not cross-check the counts declared by the
    /// referenced template; templates are authoring guidance, not a hard
    /// schema for packages.
    pub fn validate_package(package: &Package) -> Result<()> {
        validate(package)?;

        for group in &package.sub_groups {
            for question in &group.questions {
                let mut seen = HashSet::new();
                for answer in &question.answers {
                    if !seen.insert(answer.value) {
                        return Err(Error::Validation(validation_error(
                            "answers",
                            "duplicate_answer_value",
                            format!(
                                "Answer value {} appears more than once in question '{}'",
                                answer.value, question.text
                            ),
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
