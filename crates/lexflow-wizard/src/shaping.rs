//! Stage, task and item editing
//!
//! Operations the step screens perform on the nested template data: append
//! and remove stages and tasks, group tasks for display, toggle dependencies,
//! and manage expenses, rates, tags, documents and emails.

use crate::config::{StageRemovalPolicy, WizardConfig};
use crate::dependency::DependencyGraph;
use crate::error::ShapingError;
use lexflow_template::{
    AdvancedTemplateData, DocumentId, DocumentRequirement, EmailTemplate, EmailTemplateId,
    EmailTrigger, Expense, ExpenseId, Priority, Stage, StageId, Task, TaskId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Input for a new stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStage {
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Expected duration in days
    pub estimated_days: u32,
    /// Documents required to close the stage
    #[serde(default)]
    pub required_documents: BTreeSet<String>,
    /// Default assignee role
    #[serde(default)]
    pub default_assignee_role: Option<String>,
    /// Critical path flag
    #[serde(default)]
    pub is_critical: bool,
}

impl NewStage {
    /// Stage with a name and duration
    #[must_use]
    pub fn new(name: impl Into<String>, estimated_days: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            estimated_days,
            required_documents: BTreeSet::new(),
            default_assignee_role: None,
            is_critical: false,
        }
    }

    /// With description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With a required document
    #[must_use]
    pub fn with_required_document(mut self, document: impl Into<String>) -> Self {
        self.required_documents.insert(document.into());
        self
    }

    /// Mark as critical
    #[must_use]
    pub fn critical(mut self) -> Self {
        self.is_critical = true;
        self
    }
}

/// Input for a new task
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Owning stage
    pub stage_id: Option<StageId>,
    /// Expected effort in hours
    pub estimated_hours: f64,
    /// Priority
    pub priority: Priority,
    /// Assignee role
    pub assignee_role: Option<String>,
    /// Due day offset
    pub due_days_after_start: u32,
    /// Created automatically with the case
    pub is_automatic: bool,
}

impl NewTask {
    /// Task with a name and effort
    #[must_use]
    pub fn new(name: impl Into<String>, estimated_hours: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            stage_id: None,
            estimated_hours,
            priority: Priority::default(),
            assignee_role: None,
            due_days_after_start: 0,
            is_automatic: false,
        }
    }

    /// In a stage
    #[must_use]
    pub fn in_stage(mut self, stage_id: StageId) -> Self {
        self.stage_id = Some(stage_id);
        self
    }

    /// With priority
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// With assignee role
    #[must_use]
    pub fn with_assignee_role(mut self, role: impl Into<String>) -> Self {
        self.assignee_role = Some(role.into());
        self
    }

    /// Due a number of days after case start
    #[must_use]
    pub fn due_after(mut self, days: u32) -> Self {
        self.due_days_after_start = days;
        self
    }
}

/// Tasks of one stage, or of the general bucket
#[derive(Debug, Clone, PartialEq)]
pub struct TaskGroup<'a> {
    /// Stage, `None` for general tasks
    pub stage: Option<&'a Stage>,
    /// Tasks in list order
    pub tasks: Vec<&'a Task>,
}

impl TaskGroup<'_> {
    /// Heading for the group
    #[must_use]
    pub fn title(&self) -> &str {
        self.stage.map_or("Tareas generales", |s| s.name.as_str())
    }
}

/// Result of toggling a dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyToggle {
    /// The dependency was added
    Added,
    /// The dependency was removed
    Removed,
}

fn require_name(name: &str, item: &'static str) -> Result<String, ShapingError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ShapingError::EmptyName { item });
    }
    Ok(trimmed.to_string())
}

/// Append a stage; its order is the new stage count
///
/// # Errors
/// `EmptyName` or `ZeroStageDays` for invalid input.
pub fn add_stage(data: &mut AdvancedTemplateData, stage: NewStage) -> Result<StageId, ShapingError> {
    let name = require_name(&stage.name, "stage")?;
    if stage.estimated_days == 0 {
        return Err(ShapingError::ZeroStageDays);
    }

    let id = StageId::new();
    let order = u32::try_from(data.stages.len() + 1).unwrap_or(u32::MAX);
    data.stages.push(Stage {
        id,
        name,
        description: stage.description,
        order,
        estimated_days: stage.estimated_days,
        required_documents: stage.required_documents,
        default_assignee_role: stage.default_assignee_role,
        is_critical: stage.is_critical,
    });
    tracing::debug!("Added stage {} at position {}", id, order);
    Ok(id)
}

/// Remove a stage, resolving its tasks and documents per `config`
///
/// # Errors
/// `StageNotFound` if no stage has this id.
pub fn remove_stage(
    data: &mut AdvancedTemplateData,
    id: StageId,
    config: &WizardConfig,
) -> Result<Stage, ShapingError> {
    let index = data
        .stages
        .iter()
        .position(|s| s.id == id)
        .ok_or(ShapingError::StageNotFound(id))?;
    let removed = data.stages.remove(index);

    if config.renumber_stages_on_remove {
        for (position, stage) in data.stages.iter_mut().enumerate() {
            stage.order = u32::try_from(position + 1).unwrap_or(u32::MAX);
        }
    }

    match config.stage_removal {
        StageRemovalPolicy::ReassignToGeneral => {
            for task in data.tasks.iter_mut().filter(|t| t.stage_id == Some(id)) {
                task.stage_id = None;
            }
            for doc in data.documents.iter_mut().filter(|d| d.stage_id == Some(id)) {
                doc.stage_id = None;
            }
        }
        StageRemovalPolicy::CascadeDelete => {
            let doomed: Vec<TaskId> = data
                .tasks
                .iter()
                .filter(|t| t.stage_id == Some(id))
                .map(|t| t.id)
                .collect();
            for task_id in doomed {
                remove_task(data, task_id)?;
            }
            data.documents.retain(|d| d.stage_id != Some(id));
        }
        StageRemovalPolicy::KeepDangling => {}
    }

    tracing::debug!(
        "Removed stage {} ({:?}), {} stage(s) left",
        id,
        config.stage_removal,
        data.stages.len()
    );
    Ok(removed)
}

/// Append a task
///
/// # Errors
/// `EmptyName`, `NonPositiveHours`, or `StageNotFound` for an unknown stage.
pub fn add_task(data: &mut AdvancedTemplateData, task: NewTask) -> Result<TaskId, ShapingError> {
    let name = require_name(&task.name, "task")?;
    if !task.estimated_hours.is_finite() || task.estimated_hours <= 0.0 {
        return Err(ShapingError::NonPositiveHours {
            hours: task.estimated_hours,
        });
    }
    if let Some(stage_id) = task.stage_id {
        if data.stage(stage_id).is_none() {
            return Err(ShapingError::StageNotFound(stage_id));
        }
    }

    let id = TaskId::new();
    data.tasks.push(Task {
        id,
        name,
        description: task.description,
        stage_id: task.stage_id,
        estimated_hours: task.estimated_hours,
        priority: task.priority,
        assignee_role: task.assignee_role,
        due_days_after_start: task.due_days_after_start,
        dependencies: Vec::new(),
        is_automatic: task.is_automatic,
    });
    tracing::debug!("Added task {}", id);
    Ok(id)
}

/// Remove a task and every dependency on it
///
/// # Errors
/// `TaskNotFound` if no task has this id.
pub fn remove_task(data: &mut AdvancedTemplateData, id: TaskId) -> Result<Task, ShapingError> {
    let index = data
        .tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or(ShapingError::TaskNotFound(id))?;
    let removed = data.tasks.remove(index);
    for task in &mut data.tasks {
        task.dependencies.retain(|&dep| dep != id);
    }
    tracing::debug!("Removed task {}", id);
    Ok(removed)
}

/// Group tasks by stage, in stage order, then the general bucket
///
/// Tasks whose stage no longer exists land in the general bucket. Empty
/// stages are included; the general bucket only when it has tasks.
#[must_use]
pub fn group_tasks_by_stage(data: &AdvancedTemplateData) -> Vec<TaskGroup<'_>> {
    let mut stages: Vec<&Stage> = data.stages.iter().collect();
    stages.sort_by_key(|s| s.order);

    let mut groups: Vec<TaskGroup<'_>> = stages
        .into_iter()
        .map(|stage| TaskGroup {
            stage: Some(stage),
            tasks: data
                .tasks
                .iter()
                .filter(|t| t.stage_id == Some(stage.id))
                .collect(),
        })
        .collect();

    let general: Vec<&Task> = data
        .tasks
        .iter()
        .filter(|t| t.stage_id.map_or(true, |id| data.stage(id).is_none()))
        .collect();
    if !general.is_empty() {
        groups.push(TaskGroup {
            stage: None,
            tasks: general,
        });
    }
    groups
}

/// Add `dependency` to `task`, or remove it if already present
///
/// # Errors
/// `TaskNotFound` for unknown ids, `SelfDependency`, and `CyclicDependency`
/// when cycles are enforced.
pub fn toggle_dependency(
    data: &mut AdvancedTemplateData,
    task: TaskId,
    dependency: TaskId,
    config: &WizardConfig,
) -> Result<DependencyToggle, ShapingError> {
    let index = data
        .tasks
        .iter()
        .position(|t| t.id == task)
        .ok_or(ShapingError::TaskNotFound(task))?;

    if data.tasks[index].depends_on(dependency) {
        data.tasks[index].dependencies.retain(|&d| d != dependency);
        tracing::debug!("Task {} no longer waits on {}", task, dependency);
        return Ok(DependencyToggle::Removed);
    }

    if task == dependency {
        return Err(ShapingError::SelfDependency(task));
    }
    if data.task(dependency).is_none() {
        return Err(ShapingError::TaskNotFound(dependency));
    }
    if config.enforce_acyclic_dependencies {
        let graph = DependencyGraph::from_tasks(&data.tasks);
        if let Some(path) = graph.cycle_through(task, dependency) {
            tracing::warn!("Rejected dependency {} -> {}: cycle", task, dependency);
            return Err(ShapingError::CyclicDependency { path });
        }
    }

    data.tasks[index].dependencies.push(dependency);
    tracing::debug!("Task {} now waits on {}", task, dependency);
    Ok(DependencyToggle::Added)
}

/// Copy the sum of task effort into the billing estimate
pub fn sync_estimated_hours(data: &mut AdvancedTemplateData) -> f64 {
    let total = data.total_task_hours();
    data.billing.estimated_hours_total = total;
    total
}

/// Append a typical expense
///
/// # Errors
/// `EmptyName` or an invalid amount.
pub fn add_expense(
    data: &mut AdvancedTemplateData,
    name: &str,
    amount: f64,
    category: &str,
) -> Result<ExpenseId, ShapingError> {
    let name = require_name(name, "expense")?;
    let expense = Expense::new(name, amount, category.trim())?;
    let id = expense.id;
    data.billing.typical_expenses.push(expense);
    Ok(id)
}

/// Remove a typical expense
///
/// # Errors
/// `ExpenseNotFound` if no expense has this id.
pub fn remove_expense(data: &mut AdvancedTemplateData, id: ExpenseId) -> Result<Expense, ShapingError> {
    let index = data
        .billing
        .typical_expenses
        .iter()
        .position(|e| e.id == id)
        .ok_or(ShapingError::ExpenseNotFound(id))?;
    Ok(data.billing.typical_expenses.remove(index))
}

/// Set the hourly rate of a role
///
/// # Errors
/// `EmptyName` for a blank role or an invalid rate.
pub fn set_hourly_rate(
    data: &mut AdvancedTemplateData,
    role: &str,
    rate: f64,
) -> Result<Option<f64>, ShapingError> {
    let role = require_name(role, "role")?;
    Ok(data.billing.set_hourly_rate(role, rate)?)
}

/// Add a tag; returns `false` for blanks and duplicates
pub fn add_tag(data: &mut AdvancedTemplateData, tag: &str) -> bool {
    let tag = tag.trim();
    !tag.is_empty() && data.tags.insert(tag.to_string())
}

/// Remove a tag
pub fn remove_tag(data: &mut AdvancedTemplateData, tag: &str) -> bool {
    data.tags.remove(tag.trim())
}

/// Append a document requirement
///
/// # Errors
/// `EmptyName` or `StageNotFound`.
pub fn add_document(
    data: &mut AdvancedTemplateData,
    name: &str,
    description: &str,
    stage_id: Option<StageId>,
    is_required: bool,
) -> Result<DocumentId, ShapingError> {
    let name = require_name(name, "document")?;
    if let Some(stage_id) = stage_id {
        if data.stage(stage_id).is_none() {
            return Err(ShapingError::StageNotFound(stage_id));
        }
    }
    let id = DocumentId::new();
    data.documents.push(DocumentRequirement {
        id,
        name,
        description: description.to_string(),
        stage_id,
        is_required,
    });
    Ok(id)
}

/// Remove a document requirement
///
/// # Errors
/// `DocumentNotFound` if no document has this id.
pub fn remove_document(
    data: &mut AdvancedTemplateData,
    id: DocumentId,
) -> Result<DocumentRequirement, ShapingError> {
    let index = data
        .documents
        .iter()
        .position(|d| d.id == id)
        .ok_or(ShapingError::DocumentNotFound(id))?;
    Ok(data.documents.remove(index))
}

/// Append an email template
///
/// # Errors
/// `EmptyName` for a blank name.
pub fn add_email_template(
    data: &mut AdvancedTemplateData,
    name: &str,
    subject: &str,
    body: &str,
    trigger: EmailTrigger,
) -> Result<EmailTemplateId, ShapingError> {
    let name = require_name(name, "email template")?;
    let id = EmailTemplateId::new();
    data.email_templates.push(EmailTemplate {
        id,
        name,
        subject: subject.to_string(),
        body: body.to_string(),
        trigger,
    });
    Ok(id)
}

/// Remove an email template
///
/// # Errors
/// `EmailTemplateNotFound` if no template has this id.
pub fn remove_email_template(
    data: &mut AdvancedTemplateData,
    id: EmailTemplateId,
) -> Result<EmailTemplate, ShapingError> {
    let index = data
        .email_templates
        .iter()
        .position(|e| e.id == id)
        .ok_or(ShapingError::EmailTemplateNotFound(id))?;
    Ok(data.email_templates.remove(index))
}

/// Find a stage by id or by name
///
/// # Errors
/// `UnresolvedReference` if nothing matches.
pub fn resolve_stage(data: &AdvancedTemplateData, key: &str) -> Result<StageId, ShapingError> {
    let key = key.trim();
    data.stages
        .iter()
        .find(|s| s.id.to_string() == key || s.name == key)
        .map(|s| s.id)
        .ok_or_else(|| ShapingError::UnresolvedReference {
            item: "stage",
            key: key.to_string(),
        })
}

/// Find a task by id or by name
///
/// # Errors
/// `UnresolvedReference` if nothing matches.
pub fn resolve_task(data: &AdvancedTemplateData, key: &str) -> Result<TaskId, ShapingError> {
    let key = key.trim();
    data.tasks
        .iter()
        .find(|t| t.id.to_string() == key || t.name == key)
        .map(|t| t.id)
        .ok_or_else(|| ShapingError::UnresolvedReference {
            item: "task",
            key: key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_stages(names: &[&str]) -> (AdvancedTemplateData, Vec<StageId>) {
        let mut data = AdvancedTemplateData::default();
        let ids = names
            .iter()
            .map(|name| add_stage(&mut data, NewStage::new(*name, 5)).unwrap())
            .collect();
        (data, ids)
    }

    #[test]
    fn stage_order_follows_append_position() {
        let (data, _) = with_stages(&["Análisis", "Demanda", "Juicio"]);
        let orders: Vec<u32> = data.stages.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn invalid_stage_input_is_rejected() {
        let mut data = AdvancedTemplateData::default();
        assert_eq!(
            add_stage(&mut data, NewStage::new("  ", 5)),
            Err(ShapingError::EmptyName { item: "stage" })
        );
        assert_eq!(
            add_stage(&mut data, NewStage::new("Análisis", 0)),
            Err(ShapingError::ZeroStageDays)
        );
        assert!(data.stages.is_empty());
    }

    #[test]
    fn remove_stage_renumbers_and_reassigns() {
        let (mut data, ids) = with_stages(&["A", "B", "C"]);
        let task = add_task(&mut data, NewTask::new("Redactar", 2.0).in_stage(ids[0])).unwrap();

        remove_stage(&mut data, ids[0], &WizardConfig::default()).unwrap();

        let orders: Vec<u32> = data.stages.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2]);
        assert_eq!(data.task(task).unwrap().stage_id, None);
    }

    #[test]
    fn legacy_removal_keeps_stale_references() {
        let (mut data, ids) = with_stages(&["A", "B"]);
        let task = add_task(&mut data, NewTask::new("Redactar", 2.0).in_stage(ids[0])).unwrap();

        remove_stage(&mut data, ids[0], &WizardConfig::legacy()).unwrap();

        assert_eq!(data.stages[0].order, 2);
        assert_eq!(data.task(task).unwrap().stage_id, Some(ids[0]));
        // Dangling tasks still show up under general tasks
        let groups = group_tasks_by_stage(&data);
        assert_eq!(groups.last().unwrap().stage, None);
        assert_eq!(groups.last().unwrap().tasks[0].id, task);
    }

    #[test]
    fn cascade_removal_deletes_tasks_and_their_dependents_links() {
        let (mut data, ids) = with_stages(&["A", "B"]);
        let doomed = add_task(&mut data, NewTask::new("a", 1.0).in_stage(ids[0])).unwrap();
        let kept = add_task(&mut data, NewTask::new("b", 1.0).in_stage(ids[1])).unwrap();
        toggle_dependency(&mut data, kept, doomed, &WizardConfig::default()).unwrap();
        add_document(&mut data, "Poder", "", Some(ids[0]), true).unwrap();

        let config = WizardConfig::default().with_stage_removal(StageRemovalPolicy::CascadeDelete);
        remove_stage(&mut data, ids[0], &config).unwrap();

        assert!(data.task(doomed).is_none());
        assert!(data.task(kept).unwrap().dependencies.is_empty());
        assert!(data.documents.is_empty());
    }

    #[test]
    fn remove_unknown_stage_fails() {
        let (mut data, _) = with_stages(&["A"]);
        let missing = StageId::new();
        assert_eq!(
            remove_stage(&mut data, missing, &WizardConfig::default()),
            Err(ShapingError::StageNotFound(missing))
        );
    }

    #[test]
    fn task_input_is_checked() {
        let (mut data, _) = with_stages(&["A"]);
        assert!(matches!(
            add_task(&mut data, NewTask::new("x", 0.0)),
            Err(ShapingError::NonPositiveHours { .. })
        ));
        assert!(matches!(
            add_task(&mut data, NewTask::new("x", f64::INFINITY)),
            Err(ShapingError::NonPositiveHours { .. })
        ));
        let missing = StageId::new();
        assert_eq!(
            add_task(&mut data, NewTask::new("x", 1.0).in_stage(missing)),
            Err(ShapingError::StageNotFound(missing))
        );
    }

    #[test]
    fn grouping_follows_stage_order() {
        let (mut data, ids) = with_stages(&["A", "B"]);
        let general = add_task(&mut data, NewTask::new("general", 1.0)).unwrap();
        let in_b = add_task(&mut data, NewTask::new("b", 1.0).in_stage(ids[1])).unwrap();

        let groups = group_tasks_by_stage(&data);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].title(), "A");
        assert!(groups[0].tasks.is_empty());
        assert_eq!(groups[1].tasks[0].id, in_b);
        assert_eq!(groups[2].title(), "Tareas generales");
        assert_eq!(groups[2].tasks[0].id, general);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut data = AdvancedTemplateData::default();
        let a = add_task(&mut data, NewTask::new("a", 1.0)).unwrap();
        let b = add_task(&mut data, NewTask::new("b", 1.0)).unwrap();
        let config = WizardConfig::default();

        assert_eq!(toggle_dependency(&mut data, b, a, &config), Ok(DependencyToggle::Added));
        assert!(data.task(b).unwrap().depends_on(a));
        assert_eq!(toggle_dependency(&mut data, b, a, &config), Ok(DependencyToggle::Removed));
        assert!(!data.task(b).unwrap().depends_on(a));
    }

    #[test]
    fn toggle_rejects_self_unknown_and_cycles() {
        let mut data = AdvancedTemplateData::default();
        let a = add_task(&mut data, NewTask::new("a", 1.0)).unwrap();
        let b = add_task(&mut data, NewTask::new("b", 1.0)).unwrap();
        let config = WizardConfig::default();

        assert_eq!(
            toggle_dependency(&mut data, a, a, &config),
            Err(ShapingError::SelfDependency(a))
        );
        let missing = TaskId::new();
        assert_eq!(
            toggle_dependency(&mut data, a, missing, &config),
            Err(ShapingError::TaskNotFound(missing))
        );

        toggle_dependency(&mut data, b, a, &config).unwrap();
        assert_eq!(
            toggle_dependency(&mut data, a, b, &config),
            Err(ShapingError::CyclicDependency { path: vec![a, b, a] })
        );

        // Without enforcement the cycle is accepted
        let lax = WizardConfig::default().with_acyclic_dependencies(false);
        assert_eq!(toggle_dependency(&mut data, a, b, &lax), Ok(DependencyToggle::Added));
    }

    #[test]
    fn sync_hours_sums_tasks() {
        let mut data = AdvancedTemplateData::default();
        add_task(&mut data, NewTask::new("a", 1.5)).unwrap();
        add_task(&mut data, NewTask::new("b", 2.5)).unwrap();
        assert_eq!(sync_estimated_hours(&mut data), 4.0);
        assert_eq!(data.billing.estimated_hours_total, 4.0);
    }

    #[test]
    fn billing_items() {
        let mut data = AdvancedTemplateData::default();
        let expense = add_expense(&mut data, "Tasa judicial", 120.0, "court").unwrap();
        assert!(add_expense(&mut data, "x", -1.0, "court").is_err());
        assert_eq!(set_hourly_rate(&mut data, "socio", 200.0), Ok(None));
        assert!(set_hourly_rate(&mut data, " ", 200.0).is_err());
        assert_eq!(remove_expense(&mut data, expense).unwrap().name, "Tasa judicial");
        assert!(data.billing.typical_expenses.is_empty());
    }

    #[test]
    fn tags_are_trimmed_and_unique() {
        let mut data = AdvancedTemplateData::default();
        assert!(add_tag(&mut data, " familia "));
        assert!(!add_tag(&mut data, "familia"));
        assert!(!add_tag(&mut data, "  "));
        assert!(remove_tag(&mut data, "familia"));
        assert!(data.tags.is_empty());
    }

    #[test]
    fn documents_and_emails() {
        let (mut data, ids) = with_stages(&["A"]);
        let doc = add_document(&mut data, "DNI", "", Some(ids[0]), true).unwrap();
        assert!(add_document(&mut data, "DNI", "", Some(StageId::new()), true).is_err());
        let email =
            add_email_template(&mut data, "Bienvenida", "Hola", "...", EmailTrigger::CaseCreated)
                .unwrap();
        assert_eq!(remove_document(&mut data, doc).unwrap().name, "DNI");
        assert_eq!(
            remove_email_template(&mut data, email).unwrap().trigger,
            EmailTrigger::CaseCreated
        );
    }

    #[test]
    fn references_resolve_by_name_or_id() {
        let (mut data, ids) = with_stages(&["Análisis"]);
        let task = add_task(&mut data, NewTask::new("Entrevista", 1.0)).unwrap();
        assert_eq!(resolve_stage(&data, "Análisis"), Ok(ids[0]));
        assert_eq!(resolve_stage(&data, &ids[0].to_string()), Ok(ids[0]));
        assert_eq!(resolve_task(&data, "Entrevista"), Ok(task));
        assert!(resolve_task(&data, "nada").is_err());
    }
}
