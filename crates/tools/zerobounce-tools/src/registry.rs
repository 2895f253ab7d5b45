//! Tool registry for dynamic JSON dispatch.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use futures::future::BoxFuture;
use schemars::Schema;
use schemars::generate::SchemaSettings;
use serde_json::Value;
use thiserror::Error;

use crate::shape::Mapping;
use crate::tool::Tool;

/// Protocol-level dispatch failures. These never reach a tool.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
}

/// Type-erased tool for dynamic dispatch.
pub trait ErasedTool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn input_schema(&self) -> Schema;

    /// Decodes `args` and runs the tool.
    fn call_json(&self, args: Value) -> BoxFuture<'static, Result<Mapping, DispatchError>>;
}

struct Erased<T: Tool> {
    tool: T,
    schema: Schema,
    _input: PhantomData<fn() -> T::Input>,
}

impl<T: Tool> ErasedTool for Erased<T> {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn description(&self) -> &'static str {
        T::DESCRIPTION
    }

    fn input_schema(&self) -> Schema {
        self.schema.clone()
    }

    fn call_json(&self, args: Value) -> BoxFuture<'static, Result<Mapping, DispatchError>> {
        // MCP clients may omit `arguments` entirely for parameterless tools.
        let args = if args.is_null() {
            Value::Object(Mapping::new())
        } else {
            args
        };
        match serde_json::from_value::<T::Input>(args) {
            Err(e) => {
                let err = DispatchError::InvalidArguments {
                    tool: T::NAME.to_string(),
                    message: e.to_string(),
                };
                Box::pin(async move { Err(err) })
            }
            Ok(input) => {
                let fut = self.tool.call(input);
                Box::pin(async move { Ok(fut.await) })
            }
        }
    }
}

fn schema_for<T: schemars::JsonSchema>() -> Schema {
    SchemaSettings::draft2020_12()
        .into_generator()
        .into_root_schema_for::<T>()
}

/// Registry of tools keyed by name.
pub struct ToolRegistry {
    map: BTreeMap<&'static str, Arc<dyn ErasedTool>>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Tool names in sorted order.
    pub fn list_names(&self) -> Vec<&'static str> {
        self.map.keys().copied().collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ErasedTool>> {
        self.map.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ErasedTool>> {
        self.map.values()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Dispatch a tool call using JSON arguments.
    pub async fn dispatch_json(&self, name: &str, args: Value) -> Result<Mapping, DispatchError> {
        let entry = self
            .map
            .get(name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        let started = Instant::now();
        let result = entry.call_json(args).await;
        let elapsed_ms = started.elapsed().as_millis();

        match &result {
            Ok(mapping) => tracing::info!(
                tool = name,
                elapsed_ms,
                is_error = mapping.contains_key("error"),
                "tool call finished"
            ),
            Err(e) => tracing::warn!(tool = name, elapsed_ms, error = %e, "tool call rejected"),
        }
        result
    }
}

/// Builder for constructing a [`ToolRegistry`].
#[derive(Default)]
pub struct ToolRegistryBuilder {
    items: Vec<Arc<dyn ErasedTool>>,
}

impl ToolRegistryBuilder {
    /// Register a tool. Later registrations replace earlier ones with the same name.
    #[must_use]
    pub fn register<T: Tool>(mut self, tool: T) -> Self {
        self.items.push(Arc::new(Erased {
            tool,
            schema: schema_for::<T::Input>(),
            _input: PhantomData,
        }));
        self
    }

    pub fn finish(self) -> ToolRegistry {
        let map = self
            .items
            .into_iter()
            .map(|erased| (erased.name(), erased))
            .collect();
        ToolRegistry { map }
    }
}
