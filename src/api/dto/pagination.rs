//! Pagination query parameters.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::{Validate, ValidationErrors};

use crate::domain::ValidationMessage;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, message = "Page must be greater than 0"))]
    pub page: Option<usize>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    #[validate(range(min = 1, message = "Page size must be greater than 0"))]
    pub page_size: Option<usize>,
}

impl PaginationParams {
    /// Validates the parameters and resolves defaults.
    ///
    /// A page beyond the last one is not rejected here; the renderer answers
    /// it with a `409` problem.
    ///
    /// # Returns
    ///
    /// `(page, page_size)`, or one message per failed rule.
    pub fn resolve(
        &self,
        default_page_size: usize,
        max_page_size: usize,
    ) -> Result<(usize, usize), Vec<ValidationMessage>> {
        let mut messages = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => validation_messages(&errors),
        };

        let page_size = self.page_size.unwrap_or(default_page_size);
        if page_size > max_page_size {
            messages.push(ValidationMessage::new(
                "page_size",
                format!("Page size must not exceed {max_page_size}"),
            ));
        }

        if messages.is_empty() {
            Ok((self.page.unwrap_or(1), page_size))
        } else {
            Err(messages)
        }
    }
}

/// Flattens `validator` errors into field/message pairs, sorted by field.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<ValidationMessage> {
    let mut messages: Vec<ValidationMessage> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                ValidationMessage::new(field.to_string(), message)
            })
        })
        .collect();

    messages.sort_by(|a, b| a.field.cmp(&b.field));
    messages
}
