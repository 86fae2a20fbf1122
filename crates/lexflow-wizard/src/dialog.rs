//! Dialog lifecycle around a wizard

use crate::config::WizardConfig;
use crate::navigator::WizardNavigator;

/// An open/closed wizard dialog controlled by its parent
#[derive(Debug, Clone, Default)]
pub struct WizardDialog {
    open: bool,
    navigator: WizardNavigator,
}

impl WizardDialog {
    /// Closed dialog
    #[must_use]
    pub fn new(config: WizardConfig) -> Self {
        Self {
            open: false,
            navigator: WizardNavigator::new(config),
        }
    }

    /// Whether the dialog is showing
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a hand-off is pending
    #[inline]
    #[must_use]
    pub fn is_creating(&self) -> bool {
        self.navigator.is_submitting()
    }

    /// The wizard
    #[inline]
    #[must_use]
    pub fn navigator(&self) -> &WizardNavigator {
        &self.navigator
    }

    /// The wizard, for edits
    #[inline]
    pub fn navigator_mut(&mut self) -> &mut WizardNavigator {
        &mut self.navigator
    }

    /// Open or close the dialog; either transition starts from a fresh draft
    ///
    /// Closing is ignored while a hand-off is pending. Returns whether the
    /// dialog is now in the requested state.
    pub fn on_open_change(&mut self, open: bool) -> bool {
        if open == self.open {
            return true;
        }
        if !open && self.is_creating() {
            tracing::warn!("Ignoring close while the template is being created");
            return false;
        }
        tracing::debug!("Wizard dialog {}", if open { "opened" } else { "closed" });
        self.navigator.reset();
        self.open = open;
        true
    }
}
