/// Data layer: parsing, validation, tunability and aggregation.
///
/// Architecture:
/// ```text
///  tab-separated .txt / .csv (one per measurement)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  text → RecordSet (first 4 columns, all finite)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ frequency  │  per-file drift (fatal), cross-file mismatch (warning)
///   └───────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ tunability  │  Cp vs C(0 V) → TunabilityCurve        (series A)
///   └────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  nearest sample per target V → mean/std (series B)
///   └───────────┘
/// ```
/// `pipeline::Pipeline` chains the stages and fails fast on the first
/// fatal error.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod export;
pub mod frequency;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod tunability;
