//! Correlation-Network Portfolio Analyzer
//!
//! Derives a "central" and a "peripheral" stock portfolio from the
//! correlation network of historical daily returns.
//!
//! ## Architecture
//!
//! ```text
//! Data (CSV) → Returns → Correlation Graph (MST) → Centrality Ranking
//!                                                       ↓
//!                     Server (HTTP API) ← Analysis ← Selection & Metrics
//! ```
//!
//! The pipeline is a pure, single-threaded batch computation over
//! immutable value objects; the server layer only loads the price table
//! once and runs independent pipeline invocations per request.

pub mod analysis;
pub mod centrality;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod portfolio;
pub mod returns;
pub mod server;
pub mod types;
