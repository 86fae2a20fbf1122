//! The in-progress template and the payload handed to the creation service

use crate::types::{AdvancedTemplateData, BillingMethod};
use serde::{Deserialize, Serialize};

/// Practice-area value the form uses for "no practice area"
pub const NO_PRACTICE_AREA: &str = "none";

/// The aggregate built across wizard steps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDraft {
    /// Template name
    pub name: String,
    /// Template description
    pub description: String,
    /// Practice area, possibly the `"none"` sentinel
    pub practice_area_id: Option<String>,
    /// Billing method offered by default when opening a case
    pub default_billing_method: BillingMethod,
    /// Nested configuration
    pub template_data: AdvancedTemplateData,
}

impl TemplateDraft {
    /// Create a fresh draft
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Practice area with the sentinel and blanks mapped to `None`
    #[must_use]
    pub fn effective_practice_area(&self) -> Option<&str> {
        self.practice_area_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty() && *id != NO_PRACTICE_AREA)
    }

    /// Assemble the creation payload
    #[must_use]
    pub fn to_create_data(&self) -> CreateAdvancedTemplateData {
        CreateAdvancedTemplateData {
            name: self.name.clone(),
            description: self.description.clone(),
            practice_area_id: self.effective_practice_area().map(str::to_string),
            default_billing_method: self.default_billing_method,
            template_data: self.template_data.clone(),
        }
    }
}

/// Payload passed to the template creation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdvancedTemplateData {
    /// Template name, as typed
    pub name: String,
    /// Template description
    pub description: String,
    /// Practice area; omitted when none was chosen
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub practice_area_id: Option<String>,
    /// Default billing method
    pub default_billing_method: BillingMethod,
    /// Nested configuration
    pub template_data: AdvancedTemplateData,
}
