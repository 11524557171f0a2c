//! Per-evaluation typed key→value store
//!
//! An [`EvalContext`] carries every input a calculation chain reads: seeded
//! character attributes, the running value, and ambient capabilities such as
//! the dice roller. Contexts are immutable; [`EvalContext::with`] returns a
//! derived context and never touches the receiver, so one context can be
//! shared across concurrent evaluations without synchronization.

use crate::error::{Error, Result};
use crate::key::{KeyRef, TypedKey};
use ahash::AHashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Immutable heterogeneous map from [`TypedKey<T>`] to `T`.
///
/// Values are stored behind `Arc`, so deriving a context clones the binding
/// table but shares every bound value.
#[derive(Clone, Default)]
pub struct EvalContext {
    bindings: AHashMap<KeyRef, Arc<dyn Any + Send + Sync>>,
}

impl EvalContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value bound under `key`.
    ///
    /// Fails with [`Error::MissingBinding`] if the slot was never bound in
    /// this context or any context it derives from.
    pub fn get<T: 'static>(&self, key: &TypedKey<T>) -> Result<&T> {
        self.bindings
            .get(&key.erased())
            .and_then(|value| value.downcast_ref::<T>())
            .ok_or_else(|| Error::MissingBinding {
                key: key.name(),
                type_name: std::any::type_name::<T>(),
            })
    }

    /// Derive a new context equal to this one plus the given binding.
    ///
    /// Rebinding an already-bound key shadows the prior value in the derived
    /// context only; the receiver is unaffected.
    #[must_use]
    pub fn with<T: Send + Sync + 'static>(&self, key: &TypedKey<T>, value: T) -> Self {
        let mut bindings = self.bindings.clone();
        bindings.insert(key.erased(), Arc::new(value));
        Self { bindings }
    }

    /// Whether the slot named by `key` is bound.
    pub fn contains<T: 'static>(&self, key: &TypedKey<T>) -> bool {
        self.bindings.contains_key(&key.erased())
    }

    /// Type-erased membership check, used for pre-flight dependency checks
    /// where the concrete value type is not statically known.
    pub fn contains_ref(&self, key: &KeyRef) -> bool {
        self.bindings.contains_key(key)
    }

    /// Number of bound slots.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no slots are bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for EvalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self.bindings.keys().map(|k| k.to_string()).collect();
        keys.sort();
        f.debug_set().entries(&keys).finish()
    }
}
