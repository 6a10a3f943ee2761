//! # subfuse
//!
//! Aggregates remote subscription lists and republishes them as
//! size-bounded base64 files.
//!
//! subfuse fetches a configured set of plain-text and base64-encoded
//! subscription lists over HTTP, merges their lines in declared order,
//! packs the merged sequence into chunks that stay within a per-file size
//! budget, and writes each chunk to disk as a base64-encoded file. Output
//! files from previous runs are removed first, so the output directory
//! always reflects exactly the latest run.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌─────────────┐
//! │   Fetcher   │──▶│   Chunker    │──▶│   Writer    │
//! │ HTTP + b64  │   │ greedy pack  │   │ b64 + files │
//! └─────────────┘   └──────────────┘   └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! subfuse run                   # fetch, merge, and write output files
//! subfuse run --dry-run         # counts only, no filesystem changes
//! subfuse sources               # list configured sources
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and embedded defaults |
//! | [`models`] | Core data types |
//! | [`fetch`] | Sequential source fetching with per-URL error isolation |
//! | [`chunk`] | Size-bounded line chunking |
//! | [`output`] | Output file writing and stale-file cleanup |

pub mod chunk;
pub mod config;
pub mod fetch;
pub mod models;
pub mod output;
