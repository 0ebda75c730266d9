//! Request and response bodies for prompt version endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::prompt::{PromptSlot, PromptVersion};

/// Query string of `GET /prompts/:slot`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollbackRequest {
    #[serde(default)]
    pub version_id: String,
}

/// One saved prompt version.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptVersionResponse {
    pub id: String,
    pub slot: PromptSlot,
    pub content: String,
    /// ISO 8601.
    pub created_at: String,
}

impl From<&PromptVersion> for PromptVersionResponse {
    fn from(version: &PromptVersion) -> Self {
        Self {
            id: version.id().to_string(),
            slot: version.slot(),
            content: version.content().to_string(),
            created_at: version.created_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptHistoryResponse {
    pub slot: PromptSlot,
    /// Newest first.
    pub versions: Vec<PromptVersionResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RollbackResponse {
    pub version: PromptVersionResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn version_response_uses_camel_case() {
        let version = PromptVersion::new(PromptSlot::Editor, "Improve the prompt.");
        let value = serde_json::to_value(PromptVersionResponse::from(&version)).unwrap();

        assert_eq!(value["slot"], "editor");
        assert_eq!(value["content"], "Improve the prompt.");
        assert_eq!(value["id"], version.id().to_string());
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn rollback_request_reads_version_id() {
        let req: RollbackRequest =
            serde_json::from_value(json!({"versionId": "abc"})).unwrap();
        assert_eq!(req.version_id, "abc");
    }
}
