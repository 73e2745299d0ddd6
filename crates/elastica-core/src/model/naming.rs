//! Fully-qualified component names, blocks, and lookup by name.

use elastica_expr::ids::{ConstraintId, ObjectiveId, VariableId};

use crate::model::Model;
use crate::model::error::ModelError;

/// Component a fully-qualified name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKey {
    Variable(VariableId),
    Constraint(ConstraintId),
    Objective(ObjectiveId),
}

impl Model {
    /// Reserve `name` for a new component.
    pub(crate) fn claim_name(&mut self, name: String) -> Result<String, ModelError> {
        if name.is_empty() {
            return Err(ModelError::EmptyName);
        }
        if self.name_index.contains_key(&name) || self.blocks.contains(&name) {
            return Err(ModelError::DuplicateName(name));
        }
        Ok(name)
    }

    pub(crate) fn index_name(&mut self, name: &str, key: ComponentKey) {
        self.name_index.insert(name.to_string(), key);
    }

    /// Resolve any fully-qualified name.
    pub fn find_component(&self, name: &str) -> Option<ComponentKey> {
        self.name_index.get(name).copied()
    }

    /// Get name for a variable.
    pub fn get_variable_name(&self, id: VariableId) -> Option<&str> {
        self.variable_names.get(&id).map(String::as_str)
    }

    /// Get name for a constraint.
    pub fn get_constraint_name(&self, id: ConstraintId) -> Option<&str> {
        self.constraint_names.get(&id).map(String::as_str)
    }

    /// Get name for an objective.
    pub fn get_objective_name(&self, id: ObjectiveId) -> Option<&str> {
        self.objective_names.get(&id).map(String::as_str)
    }

    /// Lookup a variable by name.
    pub fn get_variable_by_name(&self, name: &str) -> Option<VariableId> {
        match self.find_component(name)? {
            ComponentKey::Variable(id) => Some(id),
            _ => None,
        }
    }

    /// Lookup a constraint by name.
    pub fn get_constraint_by_name(&self, name: &str) -> Option<ConstraintId> {
        match self.find_component(name)? {
            ComponentKey::Constraint(id) => Some(id),
            _ => None,
        }
    }

    /// Register a block; components inside it are named `block.local`.
    pub fn add_block(&mut self, name: impl Into<String>) -> Result<String, ModelError> {
        let name = self.claim_name(name.into())?;
        self.blocks.insert(name.clone());
        Ok(name)
    }

    pub fn has_block(&self, name: &str) -> bool {
        self.blocks.contains(name)
    }

    /// `base` if it is unused, otherwise the first free `base_1`, `base_2`, ...
    pub fn unique_component_name(&self, base: &str) -> String {
        let taken = |candidate: &str| {
            self.blocks.contains(candidate) || self.name_index.contains_key(candidate)
        };
        if !taken(base) {
            return base.to_string();
        }
        (1..)
            .map(|idx| format!("{base}_{idx}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Name of the enclosing block, if the name was created inside one.
    pub fn block_of(&self, name: &str) -> Option<&str> {
        let (block, _) = name.split_once('.')?;
        self.blocks.get(block).map(String::as_str)
    }
}

/// Name of `local` inside `block`.
pub(crate) fn qualified_name(block: &str, local: &str) -> String {
    format!("{block}.{local}")
}
