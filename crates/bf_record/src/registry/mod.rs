//! The process-wide candidate list.
//!
//! A [`TypeRegistry`] holds record descriptors in registration order. That
//! order is the matcher's tie-break, see [`crate::de`].
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`].
//!
//! Static registration is implemented with the [`inventory`] crate. Not all
//! platforms support it (although major platforms do); where it is not
//! supported, auto registration finds nothing and returns `false`.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use type_registry::TypeRegistry;
