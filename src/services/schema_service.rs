use crate::error::{Error, Result};
use crate::models::template::Template;
use crate::utils::validation::{validate, validation_error};

pub struct SchemaService;

impl SchemaService {
    /// Structural validation of a template: required fields, at least one
    /// sub-group, `question_count >= 1` and `answer_option_count >= 2` per
    /// sub-group. Safe to call at authoring time and on every update.
    pub fn validate_template(template: &Template) -> Result<()> {
        validate(template)?;
        Ok(())
    }

    /// Full validation, used when activating a template. Runs the structural
    /// pass first, then checks that the indication threshold lies within the
    /// scoring range the sub-group counts allow.
    pub fn validate_threshold(template: &Template) -> Result<()> {
        Self::validate_template(template)?;

        let min_point = template.min_point();
        let max_point = template.max_point();
        if template.indication_threshold < min_point || template.indication_threshold > max_point {
            return Err(Error::Validation(validation_error(
                "indication_threshold",
                "threshold_out_of_bounds",
                format!(
                    "Indication threshold {} must lie within [{}, {}]",
                    template.indication_threshold, min_point, max_point
                ),
            )));
        }
        Ok(())
    }
}
