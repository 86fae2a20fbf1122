//! Lexflow Wizard - multi-step case template wizard
//!
//! Headless engine behind the "new template" dialog:
//! - Five fixed steps, each validating its own slice of the draft
//! - Forward navigation gated on validation, free backward navigation
//! - Stage and task editing, with cycle-checked task dependencies
//! - Hand-off of the finished template to an injected creator
//!
//! # Example
//!
//! ```rust,ignore
//! use lexflow_wizard::prelude::*;
//!
//! # async fn example(creator: &dyn TemplateCreator) -> Result<(), WizardError> {
//! let mut wizard = WizardNavigator::new(WizardConfig::default());
//!
//! wizard.update_form_data(FormDataPatch::new().name("Divorcio"));
//! wizard.update_template_data(TemplateDataPatch::new().category("civil"));
//! wizard.next()?;
//!
//! // ... billing, stages, tasks ...
//!
//! let receipt = wizard.submit(creator).await?;
//! println!("created {}", receipt.template_id);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod action;
pub mod config;
pub mod dependency;
pub mod dialog;
pub mod error;
pub mod navigator;
pub mod shaping;
pub mod state;
pub mod step;
pub mod submit;

pub use action::{apply_action, ActionOutcome, TaskInput, WizardAction};
pub use config::{StageRemovalPolicy, WizardConfig};
pub use dependency::DependencyGraph;
pub use dialog::WizardDialog;
pub use error::{ConfigError, ShapingError, SubmitError, WizardError};
pub use navigator::WizardNavigator;
pub use shaping::{DependencyToggle, NewStage, NewTask, TaskGroup};
pub use state::{FormDataPatch, TemplateDataPatch, WizardState};
pub use step::{Field, FieldErrors, Step, StepConfig, STEP_CONFIGS};
pub use submit::{TemplateCreator, TemplateReceipt};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a wizard
    pub use crate::{
        FormDataPatch, NewStage, NewTask, Step, TemplateCreator, TemplateDataPatch,
        TemplateReceipt, WizardConfig, WizardError, WizardNavigator,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
