//! Base plugin types.

use crate::types::tool::{FunctionDefinition, ToolDefinition};
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Static description of a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginMetadata {
    pub name: String,
    pub module_name: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub url: String,
}

/// How the host feeds a method's result back to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SandboxMethodType {
    /// The result goes back to the agent for another reasoning round.
    Agent,
    /// A plain tool call; the result is returned to the calling code.
    Tool,
}

/// A method the plugin exposes to the agent sandbox.
#[derive(Debug, Clone, Serialize)]
pub struct SandboxMethod {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub method_type: SandboxMethodType,
    /// JSON Schema of the arguments object.
    pub parameters: serde_json::Value,
}

impl SandboxMethod {
    pub fn to_tool_definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: self.name.clone(),
                description: Some(self.description.clone()),
                parameters: Some(self.parameters.clone()),
            },
        }
    }
}

/// Per-call context from the host.
#[derive(Debug, Clone)]
pub struct AgentCtx {
    pub request_id: String,
}

impl AgentCtx {
    pub fn new() -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = id.into();
        self
    }
}

impl Default for AgentCtx {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
pub trait Plugin: Send + Sync {
    fn metadata(&self) -> &PluginMetadata;

    fn name(&self) -> &str {
        &self.metadata().module_name
    }

    fn methods(&self) -> Vec<SandboxMethod>;

    /// Invoke `method` with a JSON object of arguments.
    async fn call(
        &self,
        ctx: &AgentCtx,
        method: &str,
        args: serde_json::Value,
    ) -> Result<serde_json::Value>;

    /// Release resources when the host unloads the plugin.
    async fn cleanup(&self) -> Result<()> {
        Ok(())
    }
}
