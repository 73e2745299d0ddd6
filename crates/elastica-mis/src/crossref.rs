//! Name-based correspondence between the caller's model and its working clone.

use std::collections::BTreeMap;

use elastica_core::{Model, VariableId};

use crate::DiagnosisError;

/// Maps each variable of the original model to its counterpart in the clone.
///
/// Built from fully-qualified names, so it stays valid even if the clone
/// renumbers components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariableMap {
    forward: BTreeMap<VariableId, VariableId>,
    reverse: BTreeMap<VariableId, VariableId>,
}

impl VariableMap {
    /// Pair every variable of `original` with the same-named variable of `clone`.
    pub fn build(original: &Model, clone: &Model) -> Result<Self, DiagnosisError> {
        let mut forward = BTreeMap::new();
        let mut reverse = BTreeMap::new();
        for (id, _) in original.variables() {
            let name = original.get_variable_name(id).ok_or_else(|| {
                DiagnosisError::Structural(format!("variable {} has no name", id))
            })?;
            let counterpart = clone.get_variable_by_name(name).ok_or_else(|| {
                DiagnosisError::Structural(format!(
                    "variable '{}' has no counterpart in the working copy",
                    name
                ))
            })?;
            forward.insert(id, counterpart);
            reverse.insert(counterpart, id);
        }
        Ok(Self { forward, reverse })
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Clone-side id of an original variable.
    pub fn counterpart(&self, original: VariableId) -> Option<VariableId> {
        self.forward.get(&original).copied()
    }

    /// Original-side id of a clone variable.
    pub fn original_of(&self, clone: VariableId) -> Option<VariableId> {
        self.reverse.get(&clone).copied()
    }

    /// `(original, clone)` pairs in original id order.
    pub fn pairs(&self) -> impl Iterator<Item = (VariableId, VariableId)> + '_ {
        self.forward.iter().map(|(original, clone)| (*original, *clone))
    }

    /// Copy clone values onto the corresponding original variables.
    pub fn copy_to_original(
        &self,
        clone: &Model,
        original: &mut Model,
    ) -> Result<(), DiagnosisError> {
        for (original_id, clone_id) in self.pairs() {
            original.set_value(original_id, clone.value(clone_id)?)?;
        }
        Ok(())
    }
}

/// Starting values of the original variables, keyed by their clone ids.
///
/// Every re-solve starts from these values so that earlier solves do not
/// steer later ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueCache {
    values: BTreeMap<VariableId, Option<f64>>,
}

impl ValueCache {
    /// Record the current values of `original` under their clone ids.
    pub fn capture(original: &Model, map: &VariableMap) -> Result<Self, DiagnosisError> {
        let mut values = BTreeMap::new();
        for (original_id, clone_id) in map.pairs() {
            values.insert(clone_id, original.value(original_id)?);
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, clone_id: VariableId) -> Option<Option<f64>> {
        self.values.get(&clone_id).copied()
    }

    /// Restore the cached values into `clone`. Slack variables are untouched.
    pub fn reset(&self, clone: &mut Model) -> Result<(), DiagnosisError> {
        clone.restore_values(&self.values)?;
        Ok(())
    }
}
