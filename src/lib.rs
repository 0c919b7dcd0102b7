#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use bf_record as record;
pub use bf_utils as utils;

/// The most common imports.
pub mod prelude {
    pub use bf_record::prelude::*;
}
