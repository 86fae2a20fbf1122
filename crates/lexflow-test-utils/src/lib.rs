//! Testing utilities for the Lexflow workspace
//!
//! Shared fixtures, pre-filled wizards, and creators that record or fail.

#![allow(missing_docs)]

use async_trait::async_trait;
use lexflow_template::CreateAdvancedTemplateData;
use lexflow_wizard::{
    FormDataPatch, NewStage, Step, SubmitError, TemplateCreator, TemplateDataPatch,
    TemplateReceipt, WizardConfig, WizardNavigator,
};
use parking_lot::Mutex;

/// Creator that keeps every payload it receives
#[derive(Debug, Default)]
pub struct RecordingCreator {
    received: Mutex<Vec<CreateAdvancedTemplateData>>,
}

impl RecordingCreator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.received.lock().len()
    }

    pub fn received(&self) -> Vec<CreateAdvancedTemplateData> {
        self.received.lock().clone()
    }
}

#[async_trait]
impl TemplateCreator for RecordingCreator {
    async fn create(
        &self,
        data: CreateAdvancedTemplateData,
    ) -> Result<TemplateReceipt, SubmitError> {
        let mut received = self.received.lock();
        received.push(data);
        Ok(TemplateReceipt {
            template_id: format!("tpl-{}", received.len()),
        })
    }
}

/// Creator that always fails with the given error
#[derive(Debug)]
pub struct FailingCreator(pub SubmitError);

#[async_trait]
impl TemplateCreator for FailingCreator {
    async fn create(
        &self,
        _data: CreateAdvancedTemplateData,
    ) -> Result<TemplateReceipt, SubmitError> {
        Err(self.0.clone())
    }
}

/// Fill step 1 with a valid name and category
pub fn fill_basic_info(wizard: &mut WizardNavigator, name: &str, category: &str) {
    wizard.update_form_data(FormDataPatch::new().name(name));
    wizard.update_template_data(TemplateDataPatch::new().category(category));
}

/// Set the billing estimate
pub fn set_estimated_hours(wizard: &mut WizardNavigator, hours: f64) {
    let mut billing = wizard.draft().template_data.billing.clone();
    billing.estimated_hours_total = hours;
    wizard.update_template_data(TemplateDataPatch::new().billing(billing));
}

/// Wizard advanced to `target` with valid data on every earlier step
pub fn wizard_at(config: WizardConfig, target: Step) -> WizardNavigator {
    let mut wizard = WizardNavigator::new(config);
    fill_basic_info(&mut wizard, "Divorcio", "civil");
    set_estimated_hours(&mut wizard, 40.0);
    while wizard.step() < target {
        if wizard.step() == Step::Stages && wizard.draft().template_data.stages.is_empty() {
            wizard
                .add_stage(NewStage::new("Análisis", 5))
                .expect("fixture stage is valid");
        }
        wizard.next().expect("fixture steps are valid");
    }
    wizard
}
