//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (bind, merge, decode warnings, dispatch)
//!
//! Consumers:
//!     → logging.rs (EnvFilter + fmt layer to stdout)
//! ```

pub mod logging;
