//! Order-Recon Core Library
//!
//! Reconciles a draft order, a submitted order and a forecast report into a
//! single unified change report.
//!
//! # Architecture
//!
//! ```text
//! Draft Order ────┐
//!                 ├─► Ingestion ─► Normalization ─► Key Builder ─► Differ
//! Submitted Order ┘                                                  │
//!                                          [Quantity Changed / Added / Removed]
//!                                                                    │
//! Forecast Report ─► Ingestion ─► Normalization ─► Enricher (left join)
//!                                                                    │
//!                                                      ┌─────────────┼─────────────┐
//!                                                      ▼             ▼             ▼
//!                                                    table          CSV          JSON
//! ```
//!
//! # Core Principle
//!
//! One synchronous pass over in-memory tables. The forecast table is an
//! explicit parameter of enrichment, never ambient state, and nothing
//! persists beyond the produced report.
//!
//! # Modules
//!
//! - [`ingest`]: file parsing into uniform string-typed tables
//! - [`models`]: domain types (OrderRow, ForecastRow, ChangeRecord, ...)
//! - [`recon`]: normalization, key building, diffing and enrichment
//! - [`export`]: display column selection, table rendering, CSV/JSON output

pub mod export;
pub mod ingest;
pub mod models;
pub mod recon;

// Re-export commonly used types
pub use export::{ChangeCounts, ExportError, UnifiedReport};
pub use ingest::{read_table, IngestError, RawTable};
pub use models::{ChangeRecord, ChangeType, ForecastRow, OrderRow};
pub use recon::{
    classify, coerce_quantity, normalize_ndc, MatchKey, ReconError, ReconResult, Reconciler,
    TableKind,
};
