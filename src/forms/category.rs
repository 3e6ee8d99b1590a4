use serde::Deserialize;
use validator::Validate;

use super::{clean, first_failure, length_message, FormErrors};

/// Raw category form as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

/// Trimmed, validated category fields.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 3, max = 255))]
    pub name: String,
    #[validate(length(min = 3, max = 255))]
    pub description: String,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<CategoryInput, FormErrors> {
        let input = CategoryInput {
            name: clean(&self.name),
            description: clean(&self.description),
        };

        let mut errors = FormErrors::new();
        if let Err(failures) = input.validate() {
            if first_failure(&failures, "name").is_some() {
                errors.add("name", length_message("Name", &input.name));
            }
            if first_failure(&failures, "description").is_some() {
                errors.add(
                    "description",
                    length_message("Description", &input.description),
                );
            }
        }

        errors.into_result(input)
    }
}
