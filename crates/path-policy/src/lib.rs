//! # path-policy
//!
//! Decides which host executables a hermetic build may run from `$PATH`.
//! The PATH interposer consults a [`ToolPolicyRegistry`] for every tool it
//! shims: whether to install the shim, whether to log the usage, and whether
//! to refuse the invocation outright.
//!
//! ## Quick start
//!
//! ```rust
//! use path_policy::{Platform, ToolPolicyRegistry, FORBIDDEN, MISSING};
//!
//! let registry = ToolPolicyRegistry::for_platform(&Platform::Linux);
//! assert_eq!(registry.lookup("clang"), FORBIDDEN);
//! assert_eq!(registry.lookup("totally-unknown-tool"), MISSING);
//! ```

mod config;
mod decision;
pub mod loader;
mod platform;
mod registry;
mod schema;
pub mod table;

// Re-export primary public API at crate root.
pub use config::{PathConfig, Preset, ALLOWED, FORBIDDEN, LINUX_ONLY_PREBUILT, LOG, MISSING};
pub use decision::{ToolAction, ToolDecision};
pub use platform::Platform;
pub use registry::ToolPolicyRegistry;
pub use schema::{OverrideFile, ToolOverride};
