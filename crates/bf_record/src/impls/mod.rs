//! [`Typed`](crate::Typed), [`ToDynamic`](crate::ToDynamic) and
//! [`FromDynamic`](crate::FromDynamic) for primitives and standard containers.
//!
//! | Rust type | field kind |
//! |---|---|
//! | `i8`..`i64`, `isize` | `Integer` |
//! | `u8`..`u64`, `usize` | `UnsignedInteger` |
//! | `f32`, `f64` | `Float` |
//! | `bool` | `Bool` |
//! | `String`, `char` | `String` |
//! | `Vec`, `VecDeque`, `BTreeSet`, `HashSet` | `Sequence` |
//! | `BTreeMap<String, _>`, `HashMap<String, _>` | `Mapping` |
//! | `Value` | `Any` |
//! | `Option<T>`, `Box<T>` | same as `T` |

mod collections;
mod primitives;
