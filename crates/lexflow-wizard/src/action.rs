//! Scripted wizard interactions
//!
//! Every click or keypress the step screens handle has an action here, so a
//! whole session can be replayed from JSON. Stages and tasks are referenced
//! by name or id, since ids are only known once the items exist.

use crate::error::WizardError;
use crate::navigator::WizardNavigator;
use crate::shaping::{self, DependencyToggle, NewStage, NewTask};
use crate::state::{FormDataPatch, TemplateDataPatch};
use crate::step::{FieldErrors, Step};
use crate::submit::{TemplateCreator, TemplateReceipt};
use lexflow_template::{EmailTrigger, Priority, StageId, TaskId};
use serde::{Deserialize, Serialize};

/// Task input with its stage given by name or id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Stage name or id
    #[serde(default)]
    pub stage: Option<String>,
    /// Expected effort in hours
    pub estimated_hours: f64,
    /// Priority
    #[serde(default)]
    pub priority: Priority,
    /// Assignee role
    #[serde(default)]
    pub assignee_role: Option<String>,
    /// Due day offset
    #[serde(default)]
    pub due_days_after_start: u32,
    /// Created automatically with the case
    #[serde(default)]
    pub is_automatic: bool,
}

/// One user interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum WizardAction {
    /// Edit top-level fields
    UpdateForm(FormDataPatch),
    /// Edit nested template data
    UpdateTemplate(TemplateDataPatch),
    /// Press "Siguiente"
    Next,
    /// Press "Anterior"
    Previous,
    /// Add a stage
    AddStage(NewStage),
    /// Remove a stage
    RemoveStage {
        /// Stage name or id
        stage: String,
    },
    /// Add a task
    AddTask(TaskInput),
    /// Remove a task
    RemoveTask {
        /// Task name or id
        task: String,
    },
    /// Toggle a dependency checkbox
    ToggleDependency {
        /// Task name or id
        task: String,
        /// Dependency name or id
        depends_on: String,
    },
    /// Type the total hour estimate
    SetEstimatedHours {
        /// Hours
        hours: f64,
    },
    /// Copy task hours into the billing estimate
    SyncEstimatedHours,
    /// Set a role's hourly rate
    SetHourlyRate {
        /// Role
        role: String,
        /// Rate
        rate: f64,
    },
    /// Add a typical expense
    AddExpense {
        /// Display name
        name: String,
        /// Expected amount
        amount: f64,
        /// Category
        #[serde(default)]
        category: String,
    },
    /// Add a tag
    AddTag {
        /// Tag
        tag: String,
    },
    /// Add a document requirement
    AddDocument {
        /// Display name
        name: String,
        /// Free-form description
        #[serde(default)]
        description: String,
        /// Stage name or id
        #[serde(default)]
        stage: Option<String>,
        /// Whether the case cannot close without it
        #[serde(default)]
        is_required: bool,
    },
    /// Add an email template
    AddEmailTemplate {
        /// Display name
        name: String,
        /// Subject line
        subject: String,
        /// Body text
        #[serde(default)]
        body: String,
        /// When the email is sent
        #[serde(default)]
        trigger: EmailTrigger,
    },
    /// Press the submit button on the last step
    Submit,
    /// Close and reopen the wizard
    Reset,
}

/// What an action did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The draft changed
    Updated,
    /// Navigation landed on a step
    Moved {
        /// Current step
        step: Step,
    },
    /// Navigation or submission was blocked by field errors
    Blocked {
        /// Step that failed
        step: Step,
        /// Field errors
        errors: FieldErrors,
    },
    /// A stage was added
    StageAdded {
        /// New stage
        id: StageId,
    },
    /// A task was added
    TaskAdded {
        /// New task
        id: TaskId,
    },
    /// A dependency was toggled
    DependencyToggled {
        /// Direction of the toggle
        toggle: DependencyToggle,
    },
    /// The template was handed off
    Submitted {
        /// Service acknowledgement
        receipt: TemplateReceipt,
    },
    /// The wizard was reset
    Reset,
}

/// Apply one action to a wizard
///
/// Validation failures become [`ActionOutcome::Blocked`] so a replay can
/// continue, as a user would after seeing the inline errors.
///
/// # Errors
/// Edit failures, submission misuse and creator failures.
pub async fn apply_action(
    navigator: &mut WizardNavigator,
    action: WizardAction,
    creator: &dyn TemplateCreator,
) -> Result<ActionOutcome, WizardError> {
    tracing::debug!("Applying {:?}", action);
    let outcome = match action {
        WizardAction::UpdateForm(patch) => {
            navigator.update_form_data(patch);
            ActionOutcome::Updated
        }
        WizardAction::UpdateTemplate(patch) => {
            navigator.update_template_data(patch);
            ActionOutcome::Updated
        }
        WizardAction::Next => blocked_or(navigator.next().map(|step| ActionOutcome::Moved { step }))?,
        WizardAction::Previous => ActionOutcome::Moved {
            step: navigator.previous(),
        },
        WizardAction::AddStage(stage) => ActionOutcome::StageAdded {
            id: navigator.add_stage(stage)?,
        },
        WizardAction::RemoveStage { stage } => {
            let id = shaping::resolve_stage(&navigator.draft().template_data, &stage)?;
            navigator.remove_stage(id)?;
            ActionOutcome::Updated
        }
        WizardAction::AddTask(input) => {
            let data = &navigator.draft().template_data;
            let stage_id = input
                .stage
                .as_deref()
                .map(|key| shaping::resolve_stage(data, key))
                .transpose()?;
            let task = NewTask {
                name: input.name,
                description: input.description,
                stage_id,
                estimated_hours: input.estimated_hours,
                priority: input.priority,
                assignee_role: input.assignee_role,
                due_days_after_start: input.due_days_after_start,
                is_automatic: input.is_automatic,
            };
            ActionOutcome::TaskAdded {
                id: navigator.add_task(task)?,
            }
        }
        WizardAction::RemoveTask { task } => {
            let id = shaping::resolve_task(&navigator.draft().template_data, &task)?;
            navigator.remove_task(id)?;
            ActionOutcome::Updated
        }
        WizardAction::ToggleDependency { task, depends_on } => {
            let data = &navigator.draft().template_data;
            let task = shaping::resolve_task(data, &task)?;
            let dependency = shaping::resolve_task(data, &depends_on)?;
            ActionOutcome::DependencyToggled {
                toggle: navigator.toggle_dependency(task, dependency)?,
            }
        }
        WizardAction::SetEstimatedHours { hours } => {
            navigator.edit_template_data(|data| {
                data.billing.estimated_hours_total = hours;
                Ok(())
            })?;
            ActionOutcome::Updated
        }
        WizardAction::SyncEstimatedHours => {
            navigator.edit_template_data(|data| Ok(shaping::sync_estimated_hours(data)))?;
            ActionOutcome::Updated
        }
        WizardAction::SetHourlyRate { role, rate } => {
            navigator.edit_template_data(|data| shaping::set_hourly_rate(data, &role, rate))?;
            ActionOutcome::Updated
        }
        WizardAction::AddExpense {
            name,
            amount,
            category,
        } => {
            navigator
                .edit_template_data(|data| shaping::add_expense(data, &name, amount, &category))?;
            ActionOutcome::Updated
        }
        WizardAction::AddTag { tag } => {
            navigator.edit_template_data(|data| Ok(shaping::add_tag(data, &tag)))?;
            ActionOutcome::Updated
        }
        WizardAction::AddDocument {
            name,
            description,
            stage,
            is_required,
        } => {
            navigator.edit_template_data(|data| {
                let stage_id = stage
                    .as_deref()
                    .map(|key| shaping::resolve_stage(data, key))
                    .transpose()?;
                shaping::add_document(data, &name, &description, stage_id, is_required)
            })?;
            ActionOutcome::Updated
        }
        WizardAction::AddEmailTemplate {
            name,
            subject,
            body,
            trigger,
        } => {
            navigator.edit_template_data(|data| {
                shaping::add_email_template(data, &name, &subject, &body, trigger)
            })?;
            ActionOutcome::Updated
        }
        WizardAction::Submit => blocked_or(
            navigator
                .submit(creator)
                .await
                .map(|receipt| ActionOutcome::Submitted { receipt }),
        )?,
        WizardAction::Reset => {
            navigator.reset();
            ActionOutcome::Reset
        }
    };
    Ok(outcome)
}

fn blocked_or(result: Result<ActionOutcome, WizardError>) -> Result<ActionOutcome, WizardError> {
    match result {
        Err(WizardError::Validation { step, errors }) => Ok(ActionOutcome::Blocked { step, errors }),
        other => other,
    }
}
