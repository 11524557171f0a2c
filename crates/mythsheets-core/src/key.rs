//! Typed slot identifiers for the evaluation context
//!
//! A [`TypedKey<T>`] names one slot in an [`EvalContext`](crate::EvalContext)
//! and carries the slot's value type as a phantom parameter, so a value bound
//! under a key can only ever be retrieved as that type. Two keys denote the
//! same slot iff they have the same name *and* the same value type.

use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

/// A strongly-typed identifier for one context slot.
///
/// Keys are cheap value objects (`Copy`) and `const`-constructible, so
/// well-known slots are declared as constants (see [`keys`]).
pub struct TypedKey<T: 'static> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> TypedKey<T> {
    /// Create a key naming one logical slot of type `T`.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The slot name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The type-erased form of this key, usable as a map key or in
    /// dependency listings.
    pub fn erased(&self) -> KeyRef {
        KeyRef {
            name: self.name,
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }
}

// Manual impls: derives would bound `T`, but the key never holds a `T`.
impl<T: 'static> Clone for TypedKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for TypedKey<T> {}

impl<T: 'static> PartialEq for TypedKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T: 'static> Eq for TypedKey<T> {}

impl<T: 'static> fmt::Debug for TypedKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypedKey<{}>({})", std::any::type_name::<T>(), self.name)
    }
}

impl<T: 'static> fmt::Display for TypedKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Type-erased key: slot name plus value-type identity.
///
/// Used as the binding-map key inside the context and as the element type of
/// dependency sets, where the concrete `T` is not statically known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyRef {
    name: &'static str,
    type_name: &'static str,
    type_id: TypeId,
}

impl KeyRef {
    /// The slot name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable name of the slot's value type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Display for KeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_name)
    }
}

/// Well-known context slots shared between the engine and its callers.
pub mod keys {
    use super::TypedKey;
    use crate::dice::Dice;

    /// Name of the running-value slot.
    const VALUE_NAME: &str = "value";

    /// The running value of an arithmetic chain. The caller seeds it with
    /// the chain input; each step rebinds it with its result.
    pub const VALUE: TypedKey<f64> = TypedKey::new(VALUE_NAME);

    /// The running-value slot for a chain producing `T`. For `f64` chains
    /// this denotes the same slot as [`VALUE`].
    pub const fn running_value<T: 'static>() -> TypedKey<T> {
        TypedKey::new(VALUE_NAME)
    }

    /// The injected randomness capability.
    pub const DICE: TypedKey<Dice> = TypedKey::new("dice");

    /// Character level, read by level-scaled calculations.
    pub const LEVEL: TypedKey<i32> = TypedKey::new("level");

    /// Total attack bonus applied to an attack roll.
    pub const ATTACK_BONUS: TypedKey<i32> = TypedKey::new("attack_bonus");

    /// Armor class of the attack's target.
    pub const TARGET_AC: TypedKey<i32> = TypedKey::new("target_ac");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_same_name_same_type_is_same_slot() {
        let a: TypedKey<f64> = TypedKey::new("hp");
        let b: TypedKey<f64> = TypedKey::new("hp");
        assert_eq!(a, b);
        assert_eq!(a.erased(), b.erased());
    }

    #[test]
    fn test_same_name_different_type_is_different_slot() {
        let a: TypedKey<f64> = TypedKey::new("hp");
        let b: TypedKey<i32> = TypedKey::new("hp");
        assert_ne!(a.erased(), b.erased());
    }

    #[test]
    fn test_different_name_is_different_slot() {
        let a: TypedKey<f64> = TypedKey::new("hp");
        let b: TypedKey<f64> = TypedKey::new("ac");
        assert_ne!(a, b);
        assert_ne!(a.erased(), b.erased());
    }

    #[test]
    fn test_key_ref_display() {
        assert_eq!(keys::VALUE.erased().to_string(), "value: f64");
        assert_eq!(keys::LEVEL.erased().to_string(), "level: i32");
    }

    #[test]
    fn test_key_ref_orders_by_name() {
        let mut refs = vec![
            keys::VALUE.erased(),
            keys::LEVEL.erased(),
            keys::ATTACK_BONUS.erased(),
        ];
        refs.sort();
        let names: Vec<_> = refs.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["attack_bonus", "level", "value"]);
    }
}
