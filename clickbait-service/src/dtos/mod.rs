use serde::{Deserialize, Serialize};

/// Body of a prompt request. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptRequest {
    pub user_prompt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptResponse {
    pub response: String,
}
