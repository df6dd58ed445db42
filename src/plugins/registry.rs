//! Plugin registry.

use super::base::{AgentCtx, Plugin};
use crate::types::tool::{ToolCall, ToolDefinition, ToolResult};
use crate::{Error, ErrorContext, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

pub struct PluginRegistry {
    plugins: RwLock<HashMap<String, Arc<dyn Plugin>>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(HashMap::new()),
        }
    }

    /// Register under the plugin's module name, replacing any previous entry.
    pub fn register(&self, plugin: Arc<dyn Plugin>) -> Option<Arc<dyn Plugin>> {
        let name = plugin.name().to_string();
        info!("registering plugin {}", name);
        self.write().insert(name, plugin)
    }

    /// Remove a plugin and run its cleanup hook.
    pub async fn unregister(&self, name: &str) -> Result<Option<Arc<dyn Plugin>>> {
        let plugin = self.write().remove(name);
        if let Some(ref p) = plugin {
            p.cleanup().await?;
        }
        Ok(plugin)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.read().get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    pub fn list(&self) -> Vec<Arc<dyn Plugin>> {
        self.read().values().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Dispatch a sandbox method call to the named plugin.
    pub async fn call(
        &self,
        ctx: &AgentCtx,
        plugin: &str,
        method: &str,
        args: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let target = self.get(plugin).ok_or_else(|| {
            Error::validation_with_context(
                format!("Unknown plugin: {}", plugin),
                ErrorContext::new().with_source("plugin_registry"),
            )
        })?;
        target.call(ctx, method, args).await
    }

    /// Run an agent tool call; errors become `is_error` results the agent can read.
    pub async fn call_tool(&self, ctx: &AgentCtx, plugin: &str, call: &ToolCall) -> ToolResult {
        match self.call(ctx, plugin, &call.name, call.arguments.clone()).await {
            Ok(content) => ToolResult::success(&call.id, content),
            Err(e) => ToolResult::error(&call.id, e.to_string()),
        }
    }

    /// Function-calling definitions of every method of every registered plugin.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.list()
            .iter()
            .flat_map(|p| p.methods())
            .map(|m| m.to_tool_definition())
            .collect()
    }

    /// Unregister everything, running every cleanup hook even if some fail.
    pub async fn clear(&self) {
        let plugins: HashMap<_, _> = std::mem::take(&mut *self.write());
        let results =
            futures::future::join_all(plugins.values().map(|p| async move { (p.name(), p.cleanup().await) }))
                .await;
        for (name, result) in results {
            if let Err(e) = result {
                warn!("cleanup of plugin {} failed: {}", name, e);
            }
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<dyn Plugin>>> {
        self.plugins.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<dyn Plugin>>> {
        self.plugins.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: once_cell::sync::Lazy<PluginRegistry> =
    once_cell::sync::Lazy::new(PluginRegistry::new);

/// Process-wide registry.
pub fn get_plugin_registry() -> &'static PluginRegistry {
    &GLOBAL_REGISTRY
}
