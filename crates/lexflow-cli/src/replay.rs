//! Script replay against a fresh wizard

use anyhow::{Context, Result};
use async_trait::async_trait;
use lexflow_template::CreateAdvancedTemplateData;
use lexflow_wizard::{
    apply_action, ActionOutcome, SubmitError, TemplateCreator, TemplateReceipt, WizardAction,
    WizardConfig, WizardError, WizardNavigator,
};
use parking_lot::Mutex;
use serde::Serialize;
use std::path::Path;

/// Creator that keeps payloads in memory and hands out local ids
#[derive(Debug, Default)]
pub(crate) struct LocalCreator {
    created: Mutex<Vec<CreateAdvancedTemplateData>>,
}

impl LocalCreator {
    pub(crate) fn into_created(self) -> Vec<CreateAdvancedTemplateData> {
        self.created.into_inner()
    }
}

#[async_trait]
impl TemplateCreator for LocalCreator {
    async fn create(
        &self,
        data: CreateAdvancedTemplateData,
    ) -> Result<TemplateReceipt, SubmitError> {
        let mut created = self.created.lock();
        created.push(data);
        Ok(TemplateReceipt {
            template_id: format!("local-{}", created.len()),
        })
    }
}

/// What a replay did
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReplaySummary {
    pub(crate) applied: usize,
    pub(crate) blocked: usize,
    pub(crate) rejected: usize,
    pub(crate) submitted: bool,
    pub(crate) final_step: u8,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Line<'a> {
    Outcome {
        index: usize,
        #[serde(flatten)]
        outcome: &'a ActionOutcome,
    },
    Rejected {
        index: usize,
        rejected: String,
    },
}

/// Read a JSON array of actions
pub(crate) fn load_script(path: &Path) -> Result<Vec<WizardAction>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing script {}", path.display()))
}

/// Apply every action in order
///
/// Shaping rejections (a dependency cycle, an empty name) are reported and
/// skipped, as the dialog would show them inline. Anything else stops the
/// replay.
pub(crate) async fn run(
    config: WizardConfig,
    actions: Vec<WizardAction>,
    json: bool,
) -> Result<ReplaySummary> {
    let mut navigator = WizardNavigator::new(config);
    let creator = LocalCreator::default();
    let mut summary = ReplaySummary::default();

    for (index, action) in actions.into_iter().enumerate() {
        match apply_action(&mut navigator, action, &creator).await {
            Ok(outcome) => {
                summary.applied += 1;
                match &outcome {
                    ActionOutcome::Blocked { .. } => summary.blocked += 1,
                    ActionOutcome::Submitted { .. } => summary.submitted = true,
                    _ => {}
                }
                emit(json, &Line::Outcome { index, outcome: &outcome }, || {
                    describe(&outcome)
                })?;
            }
            Err(WizardError::Shaping(err)) => {
                tracing::warn!("Action #{} rejected: {}", index, err);
                summary.rejected += 1;
                let rejected = err.to_string();
                emit(json, &Line::Rejected { index, rejected: rejected.clone() }, || {
                    format!("rejected: {rejected}")
                })?;
            }
            Err(err) => return Err(err).with_context(|| format!("action #{index}")),
        }
    }

    summary.final_step = navigator.step().number();
    for template in creator.into_created() {
        let out = serde_json::to_string(&template).context("serializing template")?;
        println!("{out}");
    }
    tracing::info!(
        "Replay finished: {} applied, {} blocked, {} rejected",
        summary.applied,
        summary.blocked,
        summary.rejected
    );
    Ok(summary)
}

fn emit(json: bool, line: &Line<'_>, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(line).context("serializing outcome")?);
    } else {
        let index = match line {
            Line::Outcome { index, .. } | Line::Rejected { index, .. } => index,
        };
        println!("#{index}: {}", text());
    }
    Ok(())
}

fn describe(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Updated => "updated".to_string(),
        ActionOutcome::Moved { step } => format!("on step {step}"),
        ActionOutcome::Blocked { step, errors } => {
            let fields: Vec<String> = errors
                .iter()
                .map(|(field, message)| format!("{field}: {message}"))
                .collect();
            format!("blocked on step {step} ({})", fields.join("; "))
        }
        ActionOutcome::StageAdded { id } => format!("stage {id} added"),
        ActionOutcome::TaskAdded { id } => format!("task {id} added"),
        ActionOutcome::DependencyToggled { toggle } => format!("dependency {toggle:?}"),
        ActionOutcome::Submitted { receipt } => format!("created {}", receipt.template_id),
        ActionOutcome::Reset => "reset".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SESSION: &str = r#"[
        {"action": "next"},
        {"action": "update_form", "name": "Divorcio"},
        {"action": "update_template", "category": "civil"},
        {"action": "next"},
        {"action": "add_task", "name": "Entrevista", "estimatedHours": 3},
        {"action": "sync_estimated_hours"},
        {"action": "next"},
        {"action": "add_stage", "name": "Análisis", "estimatedDays": 5},
        {"action": "add_task", "name": "Demanda", "stage": "Análisis", "estimatedHours": 5},
        {"action": "toggle_dependency", "task": "Demanda", "dependsOn": "Entrevista"},
        {"action": "toggle_dependency", "task": "Entrevista", "dependsOn": "Demanda"},
        {"action": "next"},
        {"action": "next"},
        {"action": "submit"}
    ]"#;

    #[test]
    fn script_loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SESSION.as_bytes()).unwrap();

        let actions = load_script(file.path()).unwrap();
        assert_eq!(actions.len(), 14);
        assert_eq!(actions[0], WizardAction::Next);
    }

    #[test]
    fn malformed_script_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();

        let err = load_script(file.path()).unwrap_err();
        assert!(err.to_string().contains("parsing script"));
    }

    #[tokio::test]
    async fn session_replays_to_creation() {
        let actions: Vec<WizardAction> = serde_json::from_str(SESSION).unwrap();

        let summary = run(WizardConfig::default(), actions, true).await.unwrap();

        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.applied, 13);
        assert!(summary.submitted);
        assert_eq!(summary.final_step, 5);
    }

    #[tokio::test]
    async fn shipped_demo_replays_to_creation() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
        let config = WizardConfig::load(demos.join("wizard.toml")).unwrap();
        let actions = load_script(&demos.join("divorce_session.json")).unwrap();

        let summary = run(config, actions, false).await.unwrap();

        assert!(summary.submitted);
        assert_eq!(summary.final_step, 5);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.rejected, 1);
    }

    #[tokio::test]
    async fn submitting_early_stops_the_replay() {
        let actions = vec![WizardAction::Submit];

        let err = run(WizardConfig::default(), actions, false).await.unwrap_err();
        assert!(err.to_string().contains("action #0"));
    }
}
