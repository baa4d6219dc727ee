// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Vocabulary adapters over the canonical flowchart operations.
//!
//! A [`TerminologyConfig`] renames operations, option keys and parameter positions; custom
//! operations are registered on the [`TerminologyBuilder`]. [`TerminologyBuilder::build`] resolves
//! everything into one immutable [`Terminology`] dispatch table, which [`Session`]s share through
//! an [`Arc`].

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::ops::{OpError, Operation};

mod glossary;
mod session;

pub use glossary::Glossary;
pub use session::Session;

/// A composite operation. It receives the session it was invoked on, so it can call any exposed
/// operation, aliases included.
pub type CustomOperation = dyn Fn(&mut Session, &[Value]) -> Result<(), OpError> + Send + Sync;

/// Serializable part of a terminology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TerminologyConfig {
    /// Exposed operation name to the name it forwards to.
    pub methods: IndexMap<String, String>,
    /// Public option key to the key the canonical operations understand.
    pub properties: IndexMap<String, String>,
    /// Operation name to a permutation: argument `perm[i]` is delivered at position `i`.
    pub parameters: IndexMap<String, Vec<usize>>,
}

impl TerminologyConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(TerminologyConfig)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Canonical(Operation),
    Custom(usize),
}

/// How one exposed name is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Route {
    pub(crate) target: Target,
    /// Permutations applied in order, outermost alias first.
    pub(crate) steps: SmallVec<[Vec<usize>; 2]>,
}

impl Route {
    /// Option-map keys are renamed for canonical targets only; custom operations leave that to the
    /// calls they make.
    pub(crate) fn renames_properties(&self) -> bool {
        matches!(self.target, Target::Canonical(_))
    }

    pub(crate) fn arrange(&self, args: &[Value]) -> Vec<Value> {
        let mut args = args.to_vec();
        for perm in &self.steps {
            args = permute(&args, perm);
        }
        args
    }
}

/// `new[i] = old[perm[i]]` (null when missing) for `i < perm.len()`; later positions keep their
/// original argument.
fn permute(args: &[Value], perm: &[usize]) -> Vec<Value> {
    let len = perm.len().max(args.len());
    (0..len)
        .map(|i| match perm.get(i) {
            Some(&source) => args.get(source).cloned().unwrap_or(Value::Null),
            None => args.get(i).cloned().unwrap_or(Value::Null),
        })
        .collect()
}

/// Collects a configuration and custom operations.
#[derive(Default)]
pub struct TerminologyBuilder {
    config: TerminologyConfig,
    customs: IndexMap<String, Arc<CustomOperation>>,
}

impl fmt::Debug for TerminologyBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminologyBuilder")
            .field("config", &self.config)
            .field("customs", &self.customs.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TerminologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: TerminologyConfig) -> Self {
        Self {
            config,
            customs: IndexMap::new(),
        }
    }

    pub fn method(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.config.methods.insert(name.into(), target.into());
        self
    }

    pub fn property(mut self, public: impl Into<String>, internal: impl Into<String>) -> Self {
        self.config.properties.insert(public.into(), internal.into());
        self
    }

    pub fn parameters(
        mut self,
        name: impl Into<String>,
        perm: impl IntoIterator<Item = usize>,
    ) -> Self {
        self.config.parameters.insert(name.into(), perm.into_iter().collect());
        self
    }

    pub fn custom<F>(mut self, name: impl Into<String>, operation: F) -> Self
    where
        F: Fn(&mut Session, &[Value]) -> Result<(), OpError> + Send + Sync + 'static,
    {
        self.customs.insert(name.into(), Arc::new(operation));
        self
    }

    /// Validate the configuration and resolve every exposed name.
    pub fn build(self) -> Result<Terminology, OpError> {
        self.validate()?;

        let mut names = Vec::new();
        names.extend(Operation::ALL.iter().map(|op| op.name().to_owned()));
        for op in Operation::ALL {
            names.extend(op.builtin_aliases().iter().map(|alias| (*alias).to_owned()));
        }
        names.extend(self.config.methods.keys().cloned());
        names.extend(self.customs.keys().cloned());

        let mut routes = IndexMap::new();
        for name in names {
            let route = self.resolve(&name)?;
            tracing::debug!(%name, target = ?route.target, steps = route.steps.len(), "route");
            routes.insert(name, route);
        }

        Ok(Terminology {
            config: self.config,
            customs: self.customs,
            routes,
        })
    }

    fn validate(&self) -> Result<(), OpError> {
        for name in self.config.methods.keys() {
            if Operation::from_name(name).is_some() {
                return Err(shadowing("methods", name));
            }
            if self.customs.contains_key(name) {
                return Err(OpError::DomainValidation {
                    field: format!("methods.{name}"),
                    message: "is also registered as a custom operation".to_owned(),
                });
            }
        }
        for name in self.customs.keys() {
            if Operation::from_name(name).is_some() {
                return Err(shadowing("custom", name));
            }
        }
        for (public, internal) in &self.config.properties {
            if public.is_empty() || internal.is_empty() {
                return Err(OpError::DomainValidation {
                    field: format!("properties.{public}"),
                    message: "property names must not be empty".to_owned(),
                });
            }
        }
        for (name, perm) in &self.config.parameters {
            let mut seen = perm.clone();
            seen.sort_unstable();
            seen.dedup();
            if seen.len() != perm.len() {
                return Err(OpError::DomainValidation {
                    field: format!("parameters.{name}"),
                    message: "permutation indices must be distinct".to_owned(),
                });
            }
            if !self.is_exposed(name) {
                return Err(OpError::UnknownOperation { name: name.clone() });
            }
        }
        Ok(())
    }

    fn is_exposed(&self, name: &str) -> bool {
        Operation::resolve(name).is_some()
            || self.config.methods.contains_key(name)
            || self.customs.contains_key(name)
    }

    /// Follow aliases to a canonical or custom operation, collecting permutations on the way.
    /// User-defined names take precedence over builtin aliases. A builtin alias is a name of its
    /// own: it lands on the canonical operation without the canonical name's permutation.
    fn resolve(&self, name: &str) -> Result<Route, OpError> {
        let mut steps = SmallVec::new();
        let mut visited: Vec<&str> = Vec::new();
        let mut current = name;

        loop {
            if visited.contains(&current) {
                return Err(OpError::DomainValidation {
                    field: format!("methods.{name}"),
                    message: format!("alias cycle through {current}"),
                });
            }
            visited.push(current);

            if let Some(perm) = self.config.parameters.get(current) {
                steps.push(perm.clone());
            }
            if let Some(op) = Operation::from_name(current) {
                return Ok(Route {
                    target: Target::Canonical(op),
                    steps,
                });
            }
            if let Some(index) = self.customs.get_index_of(current) {
                return Ok(Route {
                    target: Target::Custom(index),
                    steps,
                });
            }
            if let Some(target) = self.config.methods.get(current) {
                current = target.as_str();
                continue;
            }
            if let Some(op) = Operation::resolve(current) {
                return Ok(Route {
                    target: Target::Canonical(op),
                    steps,
                });
            }
            return Err(OpError::UnknownOperation {
                name: current.to_owned(),
            });
        }
    }
}

fn shadowing(section: &str, name: &str) -> OpError {
    OpError::DomainValidation {
        field: format!("{section}.{name}"),
        message: "must not shadow a canonical operation".to_owned(),
    }
}

/// An immutable dispatch table from exposed names to routes.
pub struct Terminology {
    config: TerminologyConfig,
    customs: IndexMap<String, Arc<CustomOperation>>,
    routes: IndexMap<String, Route>,
}

impl fmt::Debug for Terminology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminology")
            .field("config", &self.config)
            .field("customs", &self.customs.keys().collect::<Vec<_>>())
            .field("routes", &self.routes)
            .finish()
    }
}

impl Default for Terminology {
    fn default() -> Self {
        Self::canonical()
    }
}

impl Terminology {
    pub fn builder() -> TerminologyBuilder {
        TerminologyBuilder::new()
    }

    /// Canonical names and builtin aliases only.
    pub fn canonical() -> Self {
        let routes = Operation::ALL
            .iter()
            .flat_map(|&op| {
                std::iter::once(op.name())
                    .chain(op.builtin_aliases().iter().copied())
                    .map(move |name| {
                        let route = Route {
                            target: Target::Canonical(op),
                            steps: SmallVec::new(),
                        };
                        (name.to_owned(), route)
                    })
            })
            .collect();
        Self {
            config: TerminologyConfig::default(),
            customs: IndexMap::new(),
            routes,
        }
    }

    pub fn from_config(config: TerminologyConfig) -> Result<Self, OpError> {
        TerminologyBuilder::from_config(config).build()
    }

    pub fn config(&self) -> &TerminologyConfig {
        &self.config
    }

    /// Every exposed name, canonical names first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// The canonical operation `name` ends up at, if it is not a custom operation.
    pub fn canonical_target(&self, name: &str) -> Option<Operation> {
        match self.routes.get(name)?.target {
            Target::Canonical(op) => Some(op),
            Target::Custom(_) => None,
        }
    }

    pub fn glossary(&self) -> Glossary {
        Glossary::for_terminology(self)
    }

    pub(crate) fn route(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    pub(crate) fn custom(&self, index: usize) -> Option<(&str, &Arc<CustomOperation>)> {
        self.customs.get_index(index).map(|(name, op)| (name.as_str(), op))
    }

    pub(crate) fn custom_names(&self) -> impl Iterator<Item = &str> {
        self.customs.keys().map(String::as_str)
    }

    /// Rename option-map keys in config order. Non-object arguments are untouched.
    pub(crate) fn rename_properties(&self, args: &mut [Value]) {
        if self.config.properties.is_empty() {
            return;
        }
        for arg in args {
            let Value::Object(map) = arg else {
                continue;
            };
            for (public, internal) in &self.config.properties {
                rename_key(map, public, internal);
            }
        }
    }
}

/// Replace `from` by `to` at the position of `from`; an existing `to` entry is overwritten.
fn rename_key(map: &mut Map<String, Value>, from: &str, to: &str) {
    if from == to || !map.contains_key(from) {
        return;
    }
    *map = std::mem::take(map)
        .into_iter()
        .filter(|(key, _)| key != to)
        .map(|(key, value)| {
            let key = if key == from { to.to_owned() } else { key };
            (key, value)
        })
        .collect();
}
