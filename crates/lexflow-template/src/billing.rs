//! Billing configuration and fee estimates

use crate::error::ModelError;
use crate::ids::ExpenseId;
use crate::types::BillingMethod;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An expense typically incurred by matters of this type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Expense identifier
    pub id: ExpenseId,
    /// Display name
    pub name: String,
    /// Expected amount
    pub estimated_amount: f64,
    /// Free-form category (court fees, notary, travel...)
    pub category: String,
}

/// How a template is priced
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingConfig {
    /// Pricing strategy
    pub method: BillingMethod,
    /// Hourly rate per role
    pub hourly_rates: BTreeMap<String, f64>,
    /// Expected billable hours for the whole matter
    pub estimated_hours_total: f64,
    /// Flat fee, for `Fixed`
    pub fixed_amount: Option<f64>,
    /// Retainer, for `Retainer`
    pub retainer_amount: Option<f64>,
    /// Expenses usually passed through to the client
    pub typical_expenses: Vec<Expense>,
}

impl BillingConfig {
    /// Set the rate for a role, replacing any previous rate
    ///
    /// # Errors
    /// `ModelError::InvalidAmount` if the rate is negative or not finite.
    pub fn set_hourly_rate(
        &mut self,
        role: impl Into<String>,
        rate: f64,
    ) -> Result<Option<f64>, ModelError> {
        check_amount("hourly rate", rate)?;
        Ok(self.hourly_rates.insert(role.into(), rate))
    }

    /// Remove the rate for a role
    pub fn remove_hourly_rate(&mut self, role: &str) -> Option<f64> {
        self.hourly_rates.remove(role)
    }

    /// Sum of typical expenses
    #[must_use]
    pub fn expenses_total(&self) -> f64 {
        self.typical_expenses.iter().map(|e| e.estimated_amount).sum()
    }

    /// Mean of the configured hourly rates
    #[must_use]
    pub fn blended_hourly_rate(&self) -> Option<f64> {
        if self.hourly_rates.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.hourly_rates.len() as f64;
        Some(self.hourly_rates.values().sum::<f64>() / count)
    }

    /// Expected professional fee, excluding expenses
    ///
    /// Contingency fees depend on the outcome and have no estimate.
    #[must_use]
    pub fn estimated_fee(&self) -> Option<f64> {
        match self.method {
            BillingMethod::Hourly => self
                .blended_hourly_rate()
                .map(|rate| rate * self.estimated_hours_total),
            BillingMethod::Fixed => self.fixed_amount,
            BillingMethod::Retainer => self.retainer_amount,
            BillingMethod::Contingency => None,
        }
    }
}

pub(crate) fn check_amount(field: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidAmount { field, value })
    }
}

impl Expense {
    /// Create an expense with a fresh id
    ///
    /// # Errors
    /// `ModelError::InvalidAmount` if the amount is negative or not finite.
    pub fn new(
        name: impl Into<String>,
        estimated_amount: f64,
        category: impl Into<String>,
    ) -> Result<Self, ModelError> {
        check_amount("expense", estimated_amount)?;
        Ok(Self {
            id: ExpenseId::new(),
            name: name.into(),
            estimated_amount,
            category: category.into(),
        })
    }
}
