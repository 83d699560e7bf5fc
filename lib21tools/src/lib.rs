//!
//! # Lib21 Tools
//!
//! The operator surface over [lib21]: LEF size extraction, memory-macro density,
//! and a per-file batch driver shared by the `libscale`, `libclean`, and `libarea` binaries.
//!

pub mod batch;
pub mod density;
pub mod lef;
pub mod ops;

pub use batch::{init_logging, resolve_jobs, BatchSummary, Job, Outcome};
