use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use xentral_core::{Arguments, ExecutableTool, ToolDefinition, ToolError};

/// A tool definition bound to the capability that executes it.
pub struct ToolBinding {
    definition: ToolDefinition,
    tool: Arc<dyn ExecutableTool>,
}

impl ToolBinding {
    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// Run the bound tool.
    ///
    /// # Errors
    ///
    /// Whatever [`ToolError`] the tool reports.
    pub async fn execute(&self, arguments: Arguments) -> Result<String, ToolError> {
        self.tool.execute(arguments).await
    }
}

impl std::fmt::Debug for ToolBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolBinding")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct Entries {
    bindings: Vec<Arc<ToolBinding>>,
    index: HashMap<String, usize>,
}

/// Registry of all tools exposed over MCP.
///
/// Listing order is registration order. Re-registering a name replaces the
/// binding in place, so the order stays stable across upserts.
#[derive(Default)]
pub struct ToolRegistry {
    entries: RwLock<Entries>,
}

impl ToolRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or replace the binding for `definition.name()`.
    pub fn register(&self, definition: ToolDefinition, tool: Arc<dyn ExecutableTool>) {
        let name = definition.name().to_string();
        let binding = Arc::new(ToolBinding { definition, tool });

        let mut entries = self.write();
        let existing = entries.index.get(&name).copied();
        if let Some(slot) = existing {
            entries.bindings[slot] = binding;
            tracing::debug!(tool = %name, "Replaced MCP tool");
        } else {
            let slot = entries.bindings.len();
            entries.bindings.push(binding);
            entries.index.insert(name.clone(), slot);
            tracing::debug!(tool = %name, "Registered MCP tool");
        }
    }

    /// All bindings in registration order.
    pub fn list(&self) -> Vec<Arc<ToolBinding>> {
        self.read().bindings.clone()
    }

    /// Case-exact lookup by tool name.
    pub fn lookup(&self, name: &str) -> Option<Arc<ToolBinding>> {
        let entries = self.read();
        entries
            .index
            .get(name)
            .map(|&slot| Arc::clone(&entries.bindings[slot]))
    }

    pub fn names(&self) -> Vec<String> {
        self.read()
            .bindings
            .iter()
            .map(|b| b.name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().bindings.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
