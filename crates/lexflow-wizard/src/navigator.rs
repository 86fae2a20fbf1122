//! Step navigation and submission
//!
//! The navigator owns the wizard state and moves it between steps:
//! - `next` validates the current step and advances only when it is clean
//! - `previous` always moves back, without validation
//! - `begin_submit` / `finish_submit` bracket the hand-off on the last step
//!
//! Resetting after a successful hand-off is the caller's job (the dialog
//! does it when it closes).

use crate::config::WizardConfig;
use crate::error::{ShapingError, WizardError};
use crate::shaping::{self, DependencyToggle, NewStage, NewTask, TaskGroup};
use crate::state::{FormDataPatch, TemplateDataPatch, WizardState};
use crate::step::{FieldErrors, Step};
use crate::submit::{TemplateCreator, TemplateReceipt};
use lexflow_template::{
    AdvancedTemplateData, CreateAdvancedTemplateData, Stage, StageId, Task, TaskId, TemplateDraft,
};

/// Drives an open wizard from the first step to submission
#[derive(Debug, Clone, Default)]
pub struct WizardNavigator {
    state: WizardState,
    config: WizardConfig,
    submitting: bool,
}

impl WizardNavigator {
    /// Fresh wizard on the first step
    #[inline]
    #[must_use]
    pub fn new(config: WizardConfig) -> Self {
        Self {
            state: WizardState::new(),
            config,
            submitting: false,
        }
    }

    /// Wizard seeded with an existing draft
    #[must_use]
    pub fn with_draft(config: WizardConfig, draft: TemplateDraft) -> Self {
        Self {
            state: WizardState::with_draft(draft),
            config,
            submitting: false,
        }
    }

    /// Underlying state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Active step
    #[inline]
    #[must_use]
    pub fn step(&self) -> Step {
        self.state.step()
    }

    /// The draft being built
    #[inline]
    #[must_use]
    pub fn draft(&self) -> &TemplateDraft {
        self.state.draft()
    }

    /// Current field errors
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        self.state.errors()
    }

    /// Whether a hand-off is pending
    #[inline]
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Progress through the steps, in percent
    #[must_use]
    pub fn progress(&self) -> f64 {
        f64::from(self.step().number()) / f64::from(Step::COUNT) * 100.0
    }

    /// Merge top-level fields, clearing their errors
    pub fn update_form_data(&mut self, patch: FormDataPatch) {
        self.state.update_form_data(patch);
    }

    /// Merge into the nested template data
    pub fn update_template_data(&mut self, patch: TemplateDataPatch) {
        self.state.update_template_data(patch);
    }

    /// Validate the current step, replacing the error map
    pub fn validate_current_step(&mut self) -> bool {
        let step = self.step();
        self.state.validate_step(step)
    }

    /// Advance one step if the current one is valid
    ///
    /// On the last step a valid `next` stays put.
    ///
    /// # Errors
    /// `WizardError::Validation` with the step's field errors.
    pub fn next(&mut self) -> Result<Step, WizardError> {
        let step = self.step();
        if !self.state.validate_step(step) {
            tracing::warn!(
                "Step {} blocked: {} field error(s)",
                step,
                self.state.errors().len()
            );
            return Err(WizardError::Validation {
                step,
                errors: self.state.errors().clone(),
            });
        }

        let target = step.next().unwrap_or(Step::LAST);
        if target != step {
            tracing::info!("Wizard step {} -> {}", step, target);
        }
        self.state.set_step(target);
        Ok(target)
    }

    /// Go back one step; never fails and stops at the first step
    pub fn previous(&mut self) -> Step {
        let step = self.step();
        let target = step.previous().unwrap_or(Step::FIRST);
        if target != step {
            tracing::info!("Wizard step {} -> {}", step, target);
        }
        self.state.set_step(target);
        target
    }

    /// Validate the last step and mark a hand-off as pending
    ///
    /// # Errors
    /// - `NotOnFinalStep` before the last step
    /// - `SubmissionInProgress` while a hand-off is pending
    /// - `Validation` if the step has errors
    pub fn begin_submit(&mut self) -> Result<CreateAdvancedTemplateData, WizardError> {
        let step = self.step();
        if !step.is_last() {
            return Err(WizardError::NotOnFinalStep { step });
        }
        if self.submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        if !self.state.validate_step(step) {
            return Err(WizardError::Validation {
                step,
                errors: self.state.errors().clone(),
            });
        }

        self.submitting = true;
        Ok(self.state.draft().to_create_data())
    }

    /// Clear the pending hand-off
    ///
    /// # Errors
    /// `NoSubmissionInProgress` without a matching `begin_submit`.
    pub fn finish_submit(&mut self) -> Result<(), WizardError> {
        if !self.submitting {
            return Err(WizardError::NoSubmissionInProgress);
        }
        self.submitting = false;
        Ok(())
    }

    /// Validate, hand the template to `creator`, and clear the pending flag
    ///
    /// The creator is called at most once. State is not reset. The pending
    /// flag is also cleared if this future is dropped before the creator
    /// answers.
    ///
    /// # Errors
    /// Everything `begin_submit` returns, plus `Submit` if the creator fails.
    pub async fn submit(
        &mut self,
        creator: &dyn TemplateCreator,
    ) -> Result<TemplateReceipt, WizardError> {
        let data = self.begin_submit()?;
        tracing::info!(
            "Submitting template '{}' with {} stage(s), {} task(s)",
            data.name,
            data.template_data.stages.len(),
            data.template_data.tasks.len()
        );

        let pending = PendingSubmit(&mut self.submitting);
        let outcome = creator.create(data).await;
        drop(pending);

        match outcome {
            Ok(receipt) => {
                tracing::info!("Template created: {}", receipt.template_id);
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!("Template creation failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Discard everything and return to the first step
    pub fn reset(&mut self) {
        tracing::debug!("Wizard reset");
        self.state.reset();
        self.submitting = false;
    }

    /// Append a stage
    ///
    /// # Errors
    /// See [`shaping::add_stage`].
    pub fn add_stage(&mut self, stage: NewStage) -> Result<StageId, WizardError> {
        Ok(shaping::add_stage(self.state.template_data_mut(), stage)?)
    }

    /// Remove a stage per the configured policy
    ///
    /// # Errors
    /// See [`shaping::remove_stage`].
    pub fn remove_stage(&mut self, id: StageId) -> Result<Stage, WizardError> {
        let config = self.config;
        Ok(shaping::remove_stage(self.state.template_data_mut(), id, &config)?)
    }

    /// Append a task
    ///
    /// # Errors
    /// See [`shaping::add_task`].
    pub fn add_task(&mut self, task: NewTask) -> Result<TaskId, WizardError> {
        Ok(shaping::add_task(self.state.template_data_mut(), task)?)
    }

    /// Remove a task
    ///
    /// # Errors
    /// See [`shaping::remove_task`].
    pub fn remove_task(&mut self, id: TaskId) -> Result<Task, WizardError> {
        Ok(shaping::remove_task(self.state.template_data_mut(), id)?)
    }

    /// Toggle a dependency between two tasks
    ///
    /// # Errors
    /// See [`shaping::toggle_dependency`].
    pub fn toggle_dependency(
        &mut self,
        task: TaskId,
        dependency: TaskId,
    ) -> Result<DependencyToggle, WizardError> {
        let config = self.config;
        Ok(shaping::toggle_dependency(
            self.state.template_data_mut(),
            task,
            dependency,
            &config,
        )?)
    }

    /// Tasks grouped for display
    #[must_use]
    pub fn task_groups(&self) -> Vec<TaskGroup<'_>> {
        shaping::group_tasks_by_stage(&self.draft().template_data)
    }

    /// Run any other edit against the nested template data
    ///
    /// # Errors
    /// Whatever the edit returns.
    pub fn edit_template_data<R>(
        &mut self,
        edit: impl FnOnce(&mut AdvancedTemplateData) -> Result<R, ShapingError>,
    ) -> Result<R, WizardError> {
        Ok(edit(self.state.template_data_mut())?)
    }
}

/// Clears the submitting flag when the hand-off ends or is abandoned
struct PendingSubmit<'a>(&'a mut bool);

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if *self.0 {
            tracing::debug!("Submission no longer pending");
        }
        *self.0 = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmitError;
    use crate::step::Field;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    #[async_trait]
    impl TemplateCreator for Counting {
        async fn create(
            &self,
            _data: CreateAdvancedTemplateData,
        ) -> Result<TemplateReceipt, SubmitError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(TemplateReceipt {
                template_id: "tpl-1".to_string(),
            })
        }
    }

    struct Stalled;

    #[async_trait]
    impl TemplateCreator for Stalled {
        async fn create(
            &self,
            _data: CreateAdvancedTemplateData,
        ) -> Result<TemplateReceipt, SubmitError> {
            std::future::pending().await
        }
    }

    fn on_last_step() -> WizardNavigator {
        let mut nav = WizardNavigator::default();
        nav.update_form_data(FormDataPatch::new().name("Divorcio"));
        nav.update_template_data(TemplateDataPatch::new().category("civil"));
        nav.next().unwrap();
        nav.edit_template_data(|data| {
            data.billing.estimated_hours_total = 10.0;
            Ok(())
        })
        .unwrap();
        nav.next().unwrap();
        nav.add_stage(NewStage::new("Análisis", 3)).unwrap();
        nav.next().unwrap();
        nav.next().unwrap();
        nav
    }

    #[test]
    fn progress_is_derived_from_step() {
        let mut nav = WizardNavigator::default();
        assert_eq!(nav.progress(), 20.0);
        nav.update_form_data(FormDataPatch::new().name("x"));
        nav.update_template_data(TemplateDataPatch::new().category("civil"));
        nav.next().unwrap();
        assert_eq!(nav.progress(), 40.0);
    }

    #[test]
    fn next_on_last_step_stays() {
        let mut nav = on_last_step();
        assert_eq!(nav.step(), Step::Documents);
        assert_eq!(nav.next().unwrap(), Step::Documents);
        assert_eq!(nav.progress(), 100.0);
    }

    #[test]
    fn submit_requires_last_step() {
        let mut nav = WizardNavigator::default();
        assert!(matches!(
            nav.begin_submit(),
            Err(WizardError::NotOnFinalStep { step: Step::BasicInfo })
        ));
        assert!(!nav.is_submitting());
    }

    #[test]
    fn second_begin_is_refused_until_finished() {
        let mut nav = on_last_step();
        nav.begin_submit().unwrap();
        assert!(nav.is_submitting());
        assert!(matches!(nav.begin_submit(), Err(WizardError::SubmissionInProgress)));
        nav.finish_submit().unwrap();
        assert!(matches!(
            nav.finish_submit(),
            Err(WizardError::NoSubmissionInProgress)
        ));
    }

    #[test]
    fn blocked_next_reports_errors() {
        let mut nav = WizardNavigator::default();
        let err = nav.next().unwrap_err();
        let errors = err.field_errors().unwrap();
        assert!(errors.contains_key(&Field::Name));
        assert_eq!(nav.errors(), errors);
    }

    #[tokio::test]
    async fn submit_calls_creator_once_and_keeps_state() {
        let mut nav = on_last_step();
        let creator = Counting(AtomicUsize::new(0));

        let receipt = nav.submit(&creator).await.unwrap();
        assert_eq!(receipt.template_id, "tpl-1");
        assert_eq!(creator.0.load(Ordering::SeqCst), 1);
        assert!(!nav.is_submitting());
        assert_eq!(nav.step(), Step::Documents);
        assert_eq!(nav.draft().name, "Divorcio");
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_submit_clears_pending_flag() {
        let mut nav = on_last_step();

        let attempt =
            tokio::time::timeout(std::time::Duration::from_secs(5), nav.submit(&Stalled)).await;

        assert!(attempt.is_err());
        assert!(!nav.is_submitting());
        assert!(nav.begin_submit().is_ok());
    }
}
