//! Transport contract constants and record encodings.
//!
//! This module holds the channel and method names shared with the
//! presentation layer, plus the keyed-mapping form of snapshot records.
//! Keep it free of transport-specific types.

pub mod channels;
pub mod keyed;
