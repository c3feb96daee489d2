//! Field kinds built on the lattice.
//!
//! # Categories
//!
//! - **Scalar**: string, password, number, boolean, date, enum, key-of, object id
//! - **Collection**: arrays of strings, numbers, object ids and enum values
//! - **Composite**: nested object, nested object array, metas
//!
//! Each kind is a marker type implementing [`Kind`](crate::lattice::Kind),
//! paired with a `XxxField<S = OptionalNullable>` alias whose root state has a
//! `new` constructor.

/// Declares a kind marker and its field alias.
macro_rules! kind {
    (
        $(#[$meta:meta])*
        $kind:ident($name:literal) => $value:ty;
        $(#[$alias_meta:meta])*
        $alias:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $kind {}

        impl $crate::lattice::Kind for $kind {
            type Value = $value;
            const NAME: &'static str = $name;
        }

        $(#[$alias_meta])*
        pub type $alias<S = $crate::lattice::OptionalNullable> = $crate::lattice::Field<$kind, S>;
    };
}

pub mod array;
pub mod boolean;
pub mod choice;
pub mod date;
pub mod metas;
pub mod number;
pub mod object;
pub mod object_id;
pub mod password;
pub mod string;

pub use array::{
    EnumArrayField, EnumArrayKind, NumberArrayField, NumberArrayKind, ObjectIdArrayField,
    ObjectIdArrayKind, StringArrayField, StringArrayKind,
};
pub use boolean::{BooleanField, BooleanKind};
pub use choice::{EnumField, EnumKind, KeyOfField, KeyOfKind, KeySet};
pub use date::{DateField, DateKind};
pub use metas::{Metas, MetasField, MetasKind};
pub use number::{NumberField, NumberKind};
pub use object::{ObjectArrayField, ObjectArrayKind, ObjectField, ObjectKind};
pub use object_id::{InvalidObjectId, ObjectId, ObjectIdField, ObjectIdKind};
pub use password::{PasswordField, PasswordKind};
pub use string::{StringField, StringKind};
