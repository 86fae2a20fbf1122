//! Wizard steps and per-step validation
//!
//! Each step owns one slice of the draft and a validator for it. Validators
//! are pure: they read the draft and return a fresh error map.

use lexflow_template::TemplateDraft;
use serde::Serialize;
use std::collections::BTreeMap;

/// Draft fields that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Template name
    Name,
    /// Template description
    Description,
    /// Practice area
    PracticeAreaId,
    /// Default billing method
    DefaultBillingMethod,
    /// Template category
    Category,
    /// Billing configuration
    Billing,
    /// Stage list
    Stages,
}

impl Field {
    /// Key used by the form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::PracticeAreaId => "practiceAreaId",
            Field::DefaultBillingMethod => "defaultBillingMethod",
            Field::Category => "category",
            Field::Billing => "billing",
            Field::Stages => "stages",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field errors keyed by field, with a user-facing message
pub type FieldErrors = BTreeMap<Field, String>;

/// Static description of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepConfig {
    /// 1-based step number
    pub number: u8,
    /// Stable identifier
    pub id: &'static str,
    /// Title shown in the header
    pub title: &'static str,
    /// Subtitle shown under the title
    pub description: &'static str,
}

/// Static configuration of every step, in order
pub const STEP_CONFIGS: [StepConfig; 5] = [
    StepConfig {
        number: 1,
        id: "basic",
        title: "Información básica",
        description: "Nombre, categoría y área de práctica de la plantilla",
    },
    StepConfig {
        number: 2,
        id: "billing",
        title: "Facturación",
        description: "Método de facturación, tarifas y horas estimadas",
    },
    StepConfig {
        number: 3,
        id: "stages",
        title: "Etapas",
        description: "Fases del expediente y su duración",
    },
    StepConfig {
        number: 4,
        id: "tasks",
        title: "Tareas",
        description: "Tareas por etapa, prioridades y dependencias",
    },
    StepConfig {
        number: 5,
        id: "documents",
        title: "Documentos y comunicaciones",
        description: "Documentos requeridos, correos automáticos y portal del cliente",
    },
];

/// A wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Name, description, category, practice area
    BasicInfo,
    /// Billing method, rates, hours
    Billing,
    /// Stage list
    Stages,
    /// Tasks and dependencies
    Tasks,
    /// Documents, emails, portal access
    Documents,
}

impl Step {
    /// Every step, in order
    pub const ALL: [Step; 5] = [
        Step::BasicInfo,
        Step::Billing,
        Step::Stages,
        Step::Tasks,
        Step::Documents,
    ];

    /// First step
    pub const FIRST: Step = Step::BasicInfo;

    /// Last step
    pub const LAST: Step = Step::Documents;

    /// Number of steps
    pub const COUNT: u8 = 5;

    /// 1-based step number
    #[inline]
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Step::BasicInfo => 1,
            Step::Billing => 2,
            Step::Stages => 3,
            Step::Tasks => 4,
            Step::Documents => 5,
        }
    }

    /// Step for a 1-based number
    #[must_use]
    pub fn from_number(number: u8) -> Option<Step> {
        Step::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// Following step, `None` on the last
    #[must_use]
    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    /// Preceding step, `None` on the first
    #[must_use]
    pub fn previous(self) -> Option<Step> {
        Step::from_number(self.number() - 1)
    }

    /// Check if this is the submission step
    #[inline]
    #[must_use]
    pub fn is_last(self) -> bool {
        self == Step::LAST
    }

    /// Static configuration
    #[inline]
    #[must_use]
    pub fn config(self) -> &'static StepConfig {
        &STEP_CONFIGS[usize::from(self.number() - 1)]
    }

    /// Validate this step's slice of the draft
    #[must_use]
    pub fn validate(self, draft: &TemplateDraft) -> FieldErrors {
        match self {
            Step::BasicInfo => validate_basic_info(draft),
            Step::Billing => validate_billing(draft),
            Step::Stages => validate_stages(draft),
            Step::Tasks | Step::Documents => FieldErrors::new(),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.number(), self.config().id)
    }
}

fn validate_basic_info(draft: &TemplateDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.name.trim().is_empty() {
        errors.insert(Field::Name, "El nombre es requerido".to_string());
    }
    if draft.template_data.category.is_empty() {
        errors.insert(Field::Category, "La categoría es requerida".to_string());
    }
    errors
}

fn validate_billing(draft: &TemplateDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let hours = draft.template_data.billing.estimated_hours_total;
    if hours.is_nan() || hours <= 0.0 {
        errors.insert(
            Field::Billing,
            "Las horas estimadas deben ser mayores a 0".to_string(),
        );
    }
    errors
}

fn validate_stages(draft: &TemplateDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.template_data.stages.is_empty() {
        errors.insert(Field::Stages, "Debe agregar al menos una etapa".to_string());
    }
    errors
}
