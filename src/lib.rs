//! Core library for the tb-tools command line application.
//!
//! The library turns loosely laid out trial balance sheets into a normalized
//! document and writes such documents back out as clean workbooks. Sheet
//! access is abstracted in [`sheet`], the keyword heuristics live in
//! [`extract`], the account hierarchy is rebuilt and flattened in
//! [`flatten`], file adapters sit under [`io`], and [`sync`] and
//! [`workspace`] orchestrate them for the CLI and embedding applications.

pub mod config;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod io;
pub mod model;
pub mod sheet;
pub mod sync;
pub mod workspace;

pub use config::ExtractOptions;
pub use error::{Result, ToolError};
pub use workspace::Workspace;
