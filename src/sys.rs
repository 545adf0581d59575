// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform-specific time types.
//!
//! On native platforms these come from `std::time`, on WASM from `web_time`.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
