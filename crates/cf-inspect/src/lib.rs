//! # cf-inspect — Property export for cosineful components
//!
//! Lets a component declare named, typed, metadata-rich properties once and
//! then be listed, read and written by name from a host that knows nothing
//! about the component's concrete shape.
//!
//! - **[`registry`]** — `PropertyRegistry` and its chained `PropertyBuilder`
//! - **[`descriptor`]** — `PropertyDescriptor`, the record a host renders from
//! - **[`hint`]** — editing hints, `RangeHint` encoding, `Usage` flags
//! - **[`command`]** — line-oriented host commands and value literals
//! - **[`error`]** — registration errors

pub mod command;
pub mod descriptor;
pub mod error;
pub mod hint;
pub mod registry;

pub use descriptor::PropertyDescriptor;
pub use error::{PropertyError, Result};
pub use hint::{PropertyHint, RangeHint, Usage};
pub use registry::{PropertyBuilder, PropertyRegistry};
