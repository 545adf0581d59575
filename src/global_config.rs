// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide logging settings.
//!
//! Like the [global logger registry](crate::global_logger), settings are plain
//! functions over process-wide state; there are no configuration files.
//!
//! | Setting | Default |
//! |---|---|
//! | [minimum level](set_global_level) | [`Level::Info`] |
//! | [contextual data pattern](set_global_pattern) | `%vcl`, every entry |
//!
//! ```
//! use contextual_logging::global_config::{set_global_level, set_global_pattern};
//! use contextual_logging::pattern::Pattern;
//! use contextual_logging::Level;
//!
//! set_global_level(Level::Trace);
//! set_global_pattern(Pattern::parse("[%vcl{requestId:--}]").unwrap());
//! ```

use crate::Level;
use crate::context::Context;
use crate::pattern::Pattern;
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

#[derive(Debug)]
struct Settings {
    level: Level,
    pattern: Arc<Pattern>,
}

static GLOBAL_SETTINGS: OnceLock<RwLock<Settings>> = OnceLock::new();

fn settings() -> &'static RwLock<Settings> {
    GLOBAL_SETTINGS.get_or_init(|| {
        RwLock::new(Settings {
            level: Level::Info,
            pattern: Arc::new(Pattern::all()),
        })
    })
}

pub fn global_level() -> Level {
    settings().read().level
}

/// Records below `level` are discarded before they are built.
pub fn set_global_level(level: Level) {
    settings().write().level = level;
}

pub fn global_pattern() -> Arc<Pattern> {
    Arc::clone(&settings().read().pattern)
}

/// Sets the pattern used to render contextual data into each record.
pub fn set_global_pattern(pattern: Pattern) {
    settings().write().pattern = Arc::new(pattern);
}

/// Whether a record at `level` would be dispatched from this thread right now.
///
/// Trace records are also enabled while the current context is tracing.
pub fn log_enabled(level: Level) -> bool {
    level >= global_level() || (level == Level::Trace && Context::currently_tracing())
}
