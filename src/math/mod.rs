//! Numeric primitives used by tile matching

/// Zero-mean normalized cross-correlation scoring
pub mod correlation;
/// Area-averaging resize for intensity arrays
pub mod resample;
