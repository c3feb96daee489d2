//! Nullability lattice shared by every field kind.
//!
//! A [`Field`] is parameterised by its [`Kind`] (what the value is) and its
//! [`State`] (what is known about presence and nullness). There are exactly
//! four states and transitions only narrow:
//!
//! ```text
//! OptionalNullable --required--> RequiredNullable --notnull--> RequiredNotnull
//! OptionalNullable --notnull---> OptionalNotnull  --required--> RequiredNotnull
//! any state ------------default(d)-----------------------------> RequiredNotnull
//! ```
//!
//! Each state stores the value in its own shape ([`State::Slot`]), so
//! [`Field::value`] returns `Slot<T>`, `Option<T>` or a bare `T` depending on
//! how far the chain has narrowed. Constraint methods are written once per
//! kind over `impl<S: State> Field<K, S>` and never fire on a missing value.
//!
//! # Examples
//!
//! ```
//! use argvalid::prelude::*;
//! use serde_json::json;
//!
//! let raw = json!("42");
//! let age = NumberField::new(Some(&raw), "age")?
//!     .required()?
//!     .notnull()?
//!     .min(18.0)?;
//! assert_eq!(*age.value(), 42.0);
//! # Ok::<(), FieldError>(())
//! ```

use std::fmt;

use serde_json::Value;

use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};

// ============================================================================
// KIND
// ============================================================================

/// A family of field validators, identified by the type of value it admits.
pub trait Kind {
    /// The admitted value, after coercion.
    type Value;

    /// Short name used in trace logs.
    const NAME: &'static str;
}

/// Kinds whose value is a collection of items.
pub trait ListKind: Kind {}

// ============================================================================
// SLOT
// ============================================================================

/// Value held by a field in the root state: absent, explicit null or present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slot<T> {
    /// The key was not supplied at all.
    #[default]
    Absent,
    /// The key was supplied with `null`.
    Null,
    /// The key was supplied with an admitted value.
    Present(T),
}

impl<T> Slot<T> {
    /// Borrows the present value.
    pub const fn as_ref(&self) -> Slot<&T> {
        match self {
            Slot::Absent => Slot::Absent,
            Slot::Null => Slot::Null,
            Slot::Present(v) => Slot::Present(v),
        }
    }

    /// Returns `true` when the key was not supplied.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Slot::Absent)
    }

    /// Returns `true` when the key was supplied with `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Slot::Null)
    }

    /// Collapses absent and null into `None`.
    pub fn present(self) -> Option<T> {
        match self {
            Slot::Present(v) => Some(v),
            Slot::Absent | Slot::Null => None,
        }
    }
}

// ============================================================================
// STATES
// ============================================================================

mod sealed {
    pub trait Sealed {}
}

/// One of the four presence/nullness combinations.
///
/// Sealed: the lattice is closed.
pub trait State: sealed::Sealed {
    /// How a value of type `T` is stored in this state.
    type Slot<T>;

    /// Borrows the value if it is concretely present.
    fn present<T>(slot: &Self::Slot<T>) -> Option<&T>;

    /// Mutably borrows the value if it is concretely present.
    fn present_mut<T>(slot: &mut Self::Slot<T>) -> Option<&mut T>;

    /// Requires presence then non-nullness, in that order.
    fn settle<T>(slot: Self::Slot<T>, name: &FieldName) -> FieldResult<T>;

    /// Keeps a present value, otherwise calls `fallback`.
    fn resolve<T>(slot: Self::Slot<T>, fallback: impl FnOnce() -> T) -> T;
}

/// Root state: `T | null | undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalNullable {}

/// Absence excluded: `T | null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredNullable {}

/// Null excluded: `T | undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalNotnull {}

/// Terminal state: the value is guaranteed present and non-null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredNotnull {}

impl sealed::Sealed for OptionalNullable {}
impl sealed::Sealed for RequiredNullable {}
impl sealed::Sealed for OptionalNotnull {}
impl sealed::Sealed for RequiredNotnull {}

fn undefined(name: &FieldName) -> FieldError {
    FieldError::new(ErrorCode::UndefinedNotAllowed, name.clone())
}

fn null(name: &FieldName) -> FieldError {
    FieldError::new(ErrorCode::NullNotAllowed, name.clone())
}

impl State for OptionalNullable {
    type Slot<T> = Slot<T>;

    fn present<T>(slot: &Slot<T>) -> Option<&T> {
        match slot {
            Slot::Present(v) => Some(v),
            Slot::Absent | Slot::Null => None,
        }
    }

    fn present_mut<T>(slot: &mut Slot<T>) -> Option<&mut T> {
        match slot {
            Slot::Present(v) => Some(v),
            Slot::Absent | Slot::Null => None,
        }
    }

    fn settle<T>(slot: Slot<T>, name: &FieldName) -> FieldResult<T> {
        match slot {
            Slot::Absent => Err(undefined(name)),
            Slot::Null => Err(null(name)),
            Slot::Present(v) => Ok(v),
        }
    }

    fn resolve<T>(slot: Slot<T>, fallback: impl FnOnce() -> T) -> T {
        slot.present().unwrap_or_else(fallback)
    }
}

impl State for RequiredNullable {
    /// `None` is an explicit null.
    type Slot<T> = Option<T>;

    fn present<T>(slot: &Option<T>) -> Option<&T> {
        slot.as_ref()
    }

    fn present_mut<T>(slot: &mut Option<T>) -> Option<&mut T> {
        slot.as_mut()
    }

    fn settle<T>(slot: Option<T>, name: &FieldName) -> FieldResult<T> {
        slot.ok_or_else(|| null(name))
    }

    fn resolve<T>(slot: Option<T>, fallback: impl FnOnce() -> T) -> T {
        slot.unwrap_or_else(fallback)
    }
}

impl State for OptionalNotnull {
    /// `None` is an absent key.
    type Slot<T> = Option<T>;

    fn present<T>(slot: &Option<T>) -> Option<&T> {
        slot.as_ref()
    }

    fn present_mut<T>(slot: &mut Option<T>) -> Option<&mut T> {
        slot.as_mut()
    }

    fn settle<T>(slot: Option<T>, name: &FieldName) -> FieldResult<T> {
        slot.ok_or_else(|| undefined(name))
    }

    fn resolve<T>(slot: Option<T>, fallback: impl FnOnce() -> T) -> T {
        slot.unwrap_or_else(fallback)
    }
}

impl State for RequiredNotnull {
    type Slot<T> = T;

    fn present<T>(slot: &T) -> Option<&T> {
        Some(slot)
    }

    fn present_mut<T>(slot: &mut T) -> Option<&mut T> {
        Some(slot)
    }

    fn settle<T>(slot: T, _name: &FieldName) -> FieldResult<T> {
        Ok(slot)
    }

    fn resolve<T>(slot: T, _fallback: impl FnOnce() -> T) -> T {
        slot
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// A named value of kind `K` in lattice state `S`.
///
/// Created once from raw input through a kind's root constructor; every
/// later step either hands `self` back, moves to a narrower state, or fails
/// with a [`FieldError`].
pub struct Field<K: Kind, S: State = OptionalNullable> {
    name: FieldName,
    slot: S::Slot<K::Value>,
}

impl<K: Kind, S: State> Field<K, S> {
    fn from_parts(name: FieldName, slot: S::Slot<K::Value>) -> Self {
        Self { name, slot }
    }

    /// Name of the input field, used in every error raised about it.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, shaped by the state.
    #[must_use]
    pub fn value(&self) -> &S::Slot<K::Value> {
        &self.slot
    }

    /// Consumes the field and returns its value, shaped by the state.
    pub fn into_value(self) -> S::Slot<K::Value> {
        self.slot
    }

    /// Collapses straight to the terminal state, substituting `fallback`
    /// when the value is absent or null.
    pub fn default(self, fallback: K::Value) -> Field<K, RequiredNotnull> {
        self.default_with(|| fallback)
    }

    pub(crate) fn default_with(
        self,
        fallback: impl FnOnce() -> K::Value,
    ) -> Field<K, RequiredNotnull> {
        Field::from_parts(self.name, S::resolve(self.slot, fallback))
    }

    /// Runs the remaining required and notnull checks in one step.
    pub(crate) fn settle(self) -> FieldResult<Field<K, RequiredNotnull>> {
        let value = S::settle(self.slot, &self.name)?;
        Ok(Field::from_parts(self.name, value))
    }

    /// Runs `check` against the present value; absent and null pass through.
    pub(crate) fn ensure(
        self,
        check: impl FnOnce(&K::Value, &FieldName) -> FieldResult<()>,
    ) -> FieldResult<Self> {
        if let Some(value) = S::present(&self.slot) {
            check(value, &self.name)?;
        }
        Ok(self)
    }

    /// Rewrites the present value in place, keeping the state.
    pub(crate) fn rewrite(mut self, f: impl FnOnce(&mut K::Value)) -> Self {
        if let Some(value) = S::present_mut(&mut self.slot) {
            f(value);
        }
        self
    }
}

impl<K: Kind> Field<K, OptionalNullable> {
    /// Builds the root state from a raw slot.
    ///
    /// Absent and `null` are stored as-is; anything else goes through the
    /// kind's `admit` check.
    pub(crate) fn admit(
        raw: Option<&Value>,
        name: impl Into<FieldName>,
        admit: impl FnOnce(&Value, &FieldName) -> FieldResult<K::Value>,
    ) -> FieldResult<Self> {
        let name = name.into();
        tracing::trace!(field = %name, kind = K::NAME, "admitting field");
        let slot = match raw {
            None => Slot::Absent,
            Some(Value::Null) => Slot::Null,
            Some(value) => Slot::Present(admit(value, &name)?),
        };
        Ok(Self::from_parts(name, slot))
    }

    /// Excludes absence; fails with `undefined-not-allowed`.
    pub fn required(self) -> FieldResult<Field<K, RequiredNullable>> {
        let slot = match self.slot {
            Slot::Absent => return Err(undefined(&self.name)),
            Slot::Null => None,
            Slot::Present(v) => Some(v),
        };
        Ok(Field::from_parts(self.name, slot))
    }

    /// Excludes null; fails with `null-not-allowed`.
    pub fn notnull(self) -> FieldResult<Field<K, OptionalNotnull>> {
        let slot = match self.slot {
            Slot::Null => return Err(null(&self.name)),
            Slot::Absent => None,
            Slot::Present(v) => Some(v),
        };
        Ok(Field::from_parts(self.name, slot))
    }
}

impl<K: Kind> Field<K, RequiredNullable> {
    /// Excludes null; fails with `null-not-allowed`.
    pub fn notnull(self) -> FieldResult<Field<K, RequiredNotnull>> {
        self.settle()
    }
}

impl<K: Kind> Field<K, OptionalNotnull> {
    /// Excludes absence; fails with `undefined-not-allowed`.
    pub fn required(self) -> FieldResult<Field<K, RequiredNotnull>> {
        self.settle()
    }
}

// ============================================================================
// LIST CONSTRAINTS
// ============================================================================

impl<T, K, S> Field<K, S>
where
    K: ListKind + Kind<Value = Vec<T>>,
    S: State,
{
    /// Requires at least `min` items.
    pub fn min_array_length(self, min: usize) -> FieldResult<Self> {
        self.ensure(|items, name| {
            if items.len() < min {
                Err(FieldError::new(ErrorCode::ArrayMinLength, name.clone())
                    .with_detail(min.to_string()))
            } else {
                Ok(())
            }
        })
    }

    /// Allows at most `max` items.
    pub fn max_array_length(self, max: usize) -> FieldResult<Self> {
        self.ensure(|items, name| {
            if items.len() > max {
                Err(FieldError::new(ErrorCode::ArrayMaxLength, name.clone())
                    .with_detail(max.to_string()))
            } else {
                Ok(())
            }
        })
    }

    /// Rejects an empty collection.
    pub fn not_empty_array(self) -> FieldResult<Self> {
        self.ensure(|items, name| {
            if items.is_empty() {
                Err(FieldError::new(ErrorCode::ArrayNotEmpty, name.clone()))
            } else {
                Ok(())
            }
        })
    }

    /// Collapses to the terminal state with an empty collection as fallback.
    pub fn default_empty_array(self) -> Field<K, RequiredNotnull> {
        self.default_with(Vec::new)
    }
}

// ============================================================================
// STANDARD TRAITS
// ============================================================================

impl<K: Kind, S: State> fmt::Debug for Field<K, S>
where
    S::Slot<K::Value>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("kind", &K::NAME)
            .field("name", &self.name)
            .field("value", &self.slot)
            .finish()
    }
}

impl<K: Kind, S: State> Clone for Field<K, S>
where
    S::Slot<K::Value>: Clone,
{
    fn clone(&self) -> Self {
        Self::from_parts(self.name.clone(), self.slot.clone())
    }
}

// ============================================================================
// TESTS
// ============================================================================
