//! Wizard state: the draft, the active step and the field errors

use crate::step::{Field, FieldErrors, Step};
use lexflow_template::{
    AdvancedTemplateData, BillingConfig, BillingMethod, Complexity, DocumentRequirement,
    EmailTemplate, Stage, Task, TemplateDraft,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Shallow update of the top-level form fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormDataPatch {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New practice area (`"none"` for no practice area)
    pub practice_area_id: Option<String>,
    /// New default billing method
    pub default_billing_method: Option<BillingMethod>,
}

impl FormDataPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set practice area
    #[must_use]
    pub fn practice_area_id(mut self, id: impl Into<String>) -> Self {
        self.practice_area_id = Some(id.into());
        self
    }

    /// Set default billing method
    #[must_use]
    pub fn default_billing_method(mut self, method: BillingMethod) -> Self {
        self.default_billing_method = Some(method);
        self
    }

    /// Fields present in the patch
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push(Field::Name);
        }
        if self.description.is_some() {
            fields.push(Field::Description);
        }
        if self.practice_area_id.is_some() {
            fields.push(Field::PracticeAreaId);
        }
        if self.default_billing_method.is_some() {
            fields.push(Field::DefaultBillingMethod);
        }
        fields
    }
}

/// Shallow update of the nested template data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TemplateDataPatch {
    pub icon: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
    pub tags: Option<BTreeSet<String>>,
    pub complexity: Option<Complexity>,
    pub estimated_duration_days: Option<u32>,
    pub stages: Option<Vec<Stage>>,
    pub tasks: Option<Vec<Task>>,
    pub billing: Option<BillingConfig>,
    pub documents: Option<Vec<DocumentRequirement>>,
    pub email_templates: Option<Vec<EmailTemplate>>,
    pub auto_communications: Option<bool>,
    pub client_portal_access: Option<bool>,
}

impl TemplateDataPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set category
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set complexity
    #[must_use]
    pub fn complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = Some(complexity);
        self
    }

    /// Replace the billing configuration
    #[must_use]
    pub fn billing(mut self, billing: BillingConfig) -> Self {
        self.billing = Some(billing);
        self
    }

    /// Replace the stage list
    #[must_use]
    pub fn stages(mut self, stages: Vec<Stage>) -> Self {
        self.stages = Some(stages);
        self
    }

    /// Replace the task list
    #[must_use]
    pub fn tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = Some(tasks);
        self
    }

    /// Set client portal access
    #[must_use]
    pub fn client_portal_access(mut self, enabled: bool) -> Self {
        self.client_portal_access = Some(enabled);
        self
    }

    fn apply(self, data: &mut AdvancedTemplateData) {
        macro_rules! merge {
            ($($field:ident),+ $(,)?) => {
                $(if let Some(value) = self.$field {
                    data.$field = value;
                })+
            };
        }
        merge!(
            icon,
            color,
            category,
            tags,
            complexity,
            estimated_duration_days,
            stages,
            tasks,
            billing,
            documents,
            email_templates,
            auto_communications,
            client_portal_access,
        );
    }
}

/// Single source of truth for an open wizard
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    draft: TemplateDraft,
    step: Step,
    errors: FieldErrors,
}

impl WizardState {
    /// Fresh state on the first step
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_draft(TemplateDraft::new())
    }

    /// State seeded with an existing draft, on the first step
    #[must_use]
    pub fn with_draft(draft: TemplateDraft) -> Self {
        Self {
            draft,
            step: Step::FIRST,
            errors: FieldErrors::new(),
        }
    }

    /// The draft being built
    #[inline]
    #[must_use]
    pub fn draft(&self) -> &TemplateDraft {
        &self.draft
    }

    /// Active step
    #[inline]
    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    /// Current field errors
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Error message for one field
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Merge top-level fields; clears the error of every field present
    pub fn update_form_data(&mut self, patch: FormDataPatch) {
        for field in patch.fields() {
            self.errors.remove(&field);
        }
        tracing::debug!("Form update: {:?}", patch.fields());

        if let Some(name) = patch.name {
            self.draft.name = name;
        }
        if let Some(description) = patch.description {
            self.draft.description = description;
        }
        if let Some(practice_area_id) = patch.practice_area_id {
            self.draft.practice_area_id = Some(practice_area_id);
        }
        if let Some(method) = patch.default_billing_method {
            self.draft.default_billing_method = method;
        }
    }

    /// Merge into the nested template data; errors are left alone
    pub fn update_template_data(&mut self, patch: TemplateDataPatch) {
        patch.apply(&mut self.draft.template_data);
    }

    /// Validate a step and replace the error map with its result
    ///
    /// Returns `true` when the step has no errors.
    pub fn validate_step(&mut self, step: Step) -> bool {
        self.errors = step.validate(&self.draft);
        self.errors.is_empty()
    }

    /// Discard the draft and return to the first step
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub(crate) fn set_step(&mut self, step: Step) {
        self.step = step;
    }

    pub(crate) fn template_data_mut(&mut self) -> &mut AdvancedTemplateData {
        &mut self.draft.template_data
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
