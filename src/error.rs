//! Library error type.

/// All errors returned by the cap-table engine.
///
/// Degenerate rounds (post-money valuation of zero) and normalization drift
/// are deliberately *not* errors — both get a defined fallback so the host
/// UI never fails mid-edit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Input validation ─────────────────────────────────────────────────────
    /// Negative monetary amount or negative percentage. Rejected at the edit
    /// boundary — invalid values are never stored, never silently coerced.
    #[error("Invalid input: {field} = {value}")]
    InvalidInput { field: &'static str, value: f64 },

    // ── Round addressing ─────────────────────────────────────────────────────
    /// An edit referenced a round id that is not in the series.
    #[error("Unknown round id \"{0}\"")]
    UnknownRound(String),

    // ── Seed parsing ─────────────────────────────────────────────────────────
    /// The seed record could not be read or written as JSON.
    #[error("Seed JSON error: {0}")]
    Seed(#[from] serde_json::Error),
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
