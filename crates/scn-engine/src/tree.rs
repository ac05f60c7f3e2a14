//! The definition tree processor.
//!
//! Walks one object's definition, resolving references in place and pulling
//! deferred method fields out into a list the loader replays after the
//! object is constructed.

use std::sync::Arc;

use indexmap::IndexMap;
use scn_handlers::TypeHandler;
use scn_types::{Fields, Value};

use crate::error::ScenarioResult;
use crate::node::{DeferredInvocation, Node};
use crate::scenario::Scenario;

/// Where method fields found in mappings go.
///
/// Constructor definitions extract them; deferred arguments, which are
/// resolved after the fact, treat every key as plain data.
pub(crate) enum Methods<'a> {
    Extract {
        handler: &'a Arc<dyn TypeHandler>,
        deferred: &'a mut Vec<DeferredInvocation>,
    },
    Ignore,
}

impl Scenario {
    /// Resolve a node, dispatching on its kind.
    pub(crate) fn resolve_node(&mut self, node: Node, methods: &mut Methods<'_>) -> ScenarioResult<Value> {
        match node {
            Node::Mapping(map) => self.resolve_mapping(map, methods).map(Value::Map),
            Node::Sequence(items) => self.resolve_sequence(items, methods).map(Value::List),
            Node::Reference(reference) => self.resolve_reference(&reference),
            Node::Scalar(value) => Ok(value),
        }
    }

    /// Resolve every field of a mapping, diverting method fields.
    ///
    /// Method fields keep their raw value and are absent from the result.
    pub(crate) fn resolve_mapping(
        &mut self,
        map: IndexMap<String, Node>,
        methods: &mut Methods<'_>,
    ) -> ScenarioResult<Fields> {
        let mut resolved = Fields::with_capacity(map.len());
        for (key, node) in map {
            if let Methods::Extract { handler, deferred } = methods {
                if handler.is_method(&key) {
                    if let Some(method) = handler.special_method(&key) {
                        deferred.push(DeferredInvocation {
                            field: key,
                            method,
                            argument: node,
                        });
                        continue;
                    }
                }
            }
            let value = self.resolve_node(node, methods)?;
            resolved.insert(key, value);
        }
        Ok(resolved)
    }

    pub(crate) fn resolve_sequence(
        &mut self,
        items: Vec<Node>,
        methods: &mut Methods<'_>,
    ) -> ScenarioResult<Vec<Value>> {
        items
            .into_iter()
            .map(|item| self.resolve_node(item, methods))
            .collect()
    }

    /// Turn a deferred invocation's raw argument into call arguments.
    ///
    /// A sequence spreads into one argument per element; anything else is a
    /// single argument.
    pub(crate) fn resolve_arguments(&mut self, argument: Node) -> ScenarioResult<Vec<Value>> {
        match argument {
            Node::Sequence(items) => self.resolve_sequence(items, &mut Methods::Ignore),
            other => Ok(vec![self.resolve_node(other, &mut Methods::Ignore)?]),
        }
    }
}
