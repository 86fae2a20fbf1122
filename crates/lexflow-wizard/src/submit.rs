//! Hand-off to the template creation service

use crate::error::SubmitError;
use async_trait::async_trait;
use lexflow_template::CreateAdvancedTemplateData;
use serde::{Deserialize, Serialize};

/// Acknowledgement from the creation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateReceipt {
    /// Identifier assigned by the service
    pub template_id: String,
}

/// Persists a finished template
///
/// The wizard has no knowledge of storage; the embedder supplies this.
#[async_trait]
pub trait TemplateCreator: Send + Sync {
    /// Create the template
    async fn create(&self, data: CreateAdvancedTemplateData) -> Result<TemplateReceipt, SubmitError>;
}
