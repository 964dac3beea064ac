/// Data layer: core types, loading, and violin statistics.
///
/// Architecture:
/// ```text
///  start,latency CSV        whitespace columns
///        │                         │
///        ▼                         ▼
///   ┌──────────────────────────────────┐
///   │  loader   parse file → dataset    │
///   └──────────────────────────────────┘
///        │                         │
///        ▼                         ▼
///   ┌──────────────┐        ┌───────────────┐
///   │ LatencyTable │        │ LatencySeries │
///   └──────────────┘        └───────────────┘
///                                  │
///                                  ▼
///                           ┌──────────┐
///                           │ density  │  KDE, median, extrema
///                           └──────────┘
/// ```

pub mod density;
pub mod loader;
pub mod model;
pub mod synthetic;
