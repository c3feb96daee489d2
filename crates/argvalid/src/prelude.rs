//! Prelude module for convenient imports.
//!
//! `use argvalid::prelude::*;` brings in the entry point, every field alias,
//! the lattice states and the error types.

// ============================================================================
// ENTRY POINT
// ============================================================================

pub use crate::payload::{FieldInput, Payload, Source};

// ============================================================================
// LATTICE
// ============================================================================

pub use crate::lattice::{
    Field, Kind, ListKind, OptionalNotnull, OptionalNullable, RequiredNotnull, RequiredNullable,
    Slot, State,
};

// ============================================================================
// KINDS
// ============================================================================

pub use crate::kinds::{
    BooleanField, DateField, EnumArrayField, EnumField, KeyOfField, KeySet, Metas, MetasField,
    NumberArrayField, NumberField, ObjectArrayField, ObjectField, ObjectId, ObjectIdArrayField,
    ObjectIdField, PasswordField, StringArrayField, StringField,
};

// ============================================================================
// ERRORS
// ============================================================================

pub use crate::error::{ErrorCode, FieldError, FieldName, FieldResult};

#[cfg(feature = "serde")]
pub use crate::response::{ErrorResponse, classify};
