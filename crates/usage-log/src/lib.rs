//! Append-only JSON-lines record of host tools run through the PATH
//! interposer.
//!
//! Each [`UsageEntry`] becomes one newline-terminated JSON object. Entries
//! are handed to a [`UsageSink`], which forwards them to a background task
//! owning the [`UsageWriter`].
//!
//! ```rust,no_run
//! use usage_log::{UsageEntry, UsageEventType, UsageSink, UsageSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (sink, _handle) = UsageSink::start("out/tool_usage.jsonl").await?;
//! sink.log(UsageEntry::new(
//!     UsageEventType::ToolLogged,
//!     UsageSource::new("path-policy"),
//!     "make",
//! ))
//! .await;
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod sink;
pub mod writer;

pub use entry::{DecisionRecord, UsageEntry, UsageEventType, UsageSource};
pub use sink::UsageSink;
pub use writer::{UsageWriteError, UsageWriter};
