//! Pipeline constants and runtime configuration defaults

// Edge extraction settings
/// Alpha value above which a sampled pixel counts as present
pub const ALPHA_OPAQUE_THRESHOLD: u8 = 128;

/// Number of leading path points inspected when validating an edge origin
pub const EDGE_ORIGIN_SCAN: usize = 10;

// Rejects edges that do not actually start at the claimed corner
/// Latest path index at which the first present pixel may occur
pub const EDGE_ORIGIN_MAX_START: usize = 5;

/// Default half-width of the sampling band around the corner-to-corner line
pub const DEFAULT_BAND_HALF_WIDTH: i64 = 0;

// Noise floor, distinct from the short/full edge classification below
/// Default minimum pixel count for an edge to be retained
pub const DEFAULT_MIN_EDGE_LENGTH: usize = 10;

// Connection analysis settings
/// Default length at or above which an edge counts as full rather than transitional
pub const DEFAULT_EDGE_TYPE_THRESHOLD: f64 = 40.0;

/// Default similarity percentage a candidate match must exceed to be retained
pub const DEFAULT_SIMILARITY_FLOOR: f64 = 50.0;

/// Matches shown per edge in the text report
pub const REPORT_MATCH_LIMIT: usize = 5;

// Default sheet geometry for the coastline transition sheet
/// Default number of sprite columns in a sheet
pub const DEFAULT_SHEET_COLS: u32 = 4;
/// Default number of content rows to analyze
pub const DEFAULT_SHEET_ROWS: u32 = 7;
/// Default total number of rows in the full sheet
pub const DEFAULT_SHEET_TOTAL_ROWS: u32 = 21;

// Card pipeline settings
/// Maximum number of concurrent download workers
pub const MAX_DOWNLOAD_WORKERS: usize = 8;

/// Width card images are resized to, also used in derived filenames
pub const CARD_RESIZE_WIDTH: u32 = 300;

/// Orphaned files listed before asking for deletion confirmation
pub const CLEANUP_PREVIEW_LIMIT: usize = 10;

/// Missing files listed in the cleanup report
pub const CLEANUP_MISSING_DETAIL_LIMIT: usize = 5;
