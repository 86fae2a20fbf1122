//! Wizard walkthrough tests
//!
//! End-to-end sessions through the navigator, from a fresh draft to the
//! creator hand-off.

use lexflow_test_utils::{
    fill_basic_info, set_estimated_hours, wizard_at, FailingCreator, RecordingCreator,
};
use lexflow_wizard::prelude::*;
use lexflow_wizard::{Field, SubmitError, WizardDialog};
use pretty_assertions::assert_eq;

#[test]
fn empty_name_blocks_first_step() {
    let mut wizard = WizardNavigator::default();

    let err = wizard.next().unwrap_err();

    assert!(err.is_blocking_validation());
    assert_eq!(wizard.step(), Step::BasicInfo);
    assert!(wizard.errors().contains_key(&Field::Name));
    assert!(wizard.errors().contains_key(&Field::Category));
}

#[test]
fn name_and_category_advance_to_billing() {
    let mut wizard = WizardNavigator::default();
    fill_basic_info(&mut wizard, "Divorcio", "civil");

    assert_eq!(wizard.next().unwrap(), Step::Billing);
    assert!(wizard.errors().is_empty());
}

#[test]
fn zero_hours_block_billing_until_set() {
    let mut wizard = wizard_at(WizardConfig::default(), Step::Billing);
    set_estimated_hours(&mut wizard, 0.0);

    assert!(wizard.next().is_err());
    assert_eq!(wizard.step(), Step::Billing);
    assert!(wizard.errors().contains_key(&Field::Billing));

    set_estimated_hours(&mut wizard, 40.0);
    assert_eq!(wizard.next().unwrap(), Step::Stages);
}

#[test]
fn stages_step_needs_one_stage() {
    let mut wizard = wizard_at(WizardConfig::default(), Step::Stages);

    assert!(wizard.next().is_err());
    assert!(wizard.errors().contains_key(&Field::Stages));

    wizard.add_stage(NewStage::new("Análisis", 5)).unwrap();
    assert_eq!(wizard.next().unwrap(), Step::Tasks);
}

#[tokio::test]
async fn submit_hands_off_exactly_once() {
    let mut wizard = wizard_at(WizardConfig::default(), Step::Documents);
    assert!(wizard.draft().template_data.tasks.is_empty());
    let creator = RecordingCreator::new();

    let receipt = wizard.submit(&creator).await.unwrap();

    assert_eq!(receipt.template_id, "tpl-1");
    assert_eq!(creator.calls(), 1);
    let payload = &creator.received()[0];
    assert_eq!(payload.name, "Divorcio");
    assert_eq!(payload.template_data.stages.len(), 1);
    assert_eq!(payload.practice_area_id, None);
}

#[tokio::test]
async fn failed_creation_clears_flag_and_keeps_draft() {
    let mut wizard = wizard_at(WizardConfig::default(), Step::Documents);
    let creator = FailingCreator(SubmitError::Unavailable("timeout".to_string()));

    let err = wizard.submit(&creator).await.unwrap_err();

    assert!(matches!(err, WizardError::Submit(ref e) if e.is_retryable()));
    assert!(!wizard.is_submitting());
    assert_eq!(wizard.step(), Step::Documents);
    assert_eq!(wizard.draft().name, "Divorcio");
}

#[tokio::test]
async fn submit_off_final_step_never_calls_creator() {
    let mut wizard = wizard_at(WizardConfig::default(), Step::Tasks);
    let creator = RecordingCreator::new();

    let err = wizard.submit(&creator).await.unwrap_err();

    assert!(matches!(err, WizardError::NotOnFinalStep { step: Step::Tasks }));
    assert_eq!(creator.calls(), 0);
}

#[test]
fn previous_skips_validation_and_keeps_data() {
    let mut wizard = wizard_at(WizardConfig::default(), Step::Stages);
    set_estimated_hours(&mut wizard, 0.0);

    assert_eq!(wizard.previous(), Step::Billing);
    assert_eq!(wizard.previous(), Step::BasicInfo);
    assert_eq!(wizard.previous(), Step::BasicInfo);
    assert_eq!(wizard.draft().name, "Divorcio");
}

#[test]
fn errors_are_not_recomputed_on_back_navigation() {
    let mut wizard = wizard_at(WizardConfig::default(), Step::Stages);
    assert!(wizard.next().is_err());
    assert!(wizard.errors().contains_key(&Field::Stages));

    wizard.previous();
    assert!(wizard.errors().contains_key(&Field::Stages));
}

#[tokio::test]
async fn dialog_close_after_submit_starts_over() {
    let mut dialog = WizardDialog::new(WizardConfig::default());
    dialog.on_open_change(true);
    *dialog.navigator_mut() = wizard_at(WizardConfig::default(), Step::Documents);
    let creator = RecordingCreator::new();

    dialog.navigator_mut().submit(&creator).await.unwrap();
    assert!(dialog.on_open_change(false));

    assert_eq!(dialog.navigator().step(), Step::BasicInfo);
    assert!(dialog.navigator().draft().template_data.stages.is_empty());
}
