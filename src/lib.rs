//! Sparplan offers the data model, recurrence projection engine, and
//! session/persistence primitives behind a monthly household budget planner.

pub mod cli;
pub mod errors;
pub mod format;
pub mod plan;
pub mod projection;
pub mod session;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Sparplan tracing initialized.");
    });
}
