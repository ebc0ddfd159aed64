//! The individual checks. Each one records its own findings and swallows its
//! own errors, so a failing probe never stops the ones after it.

pub mod health;
pub mod latency;
pub mod ping;
pub mod tools;
