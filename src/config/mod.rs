//! Route manifest subsystem.
//!
//! # Data Flow
//! ```text
//! manifest file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, all errors at once)
//!     → Manifest (validated, immutable)
//!     → compile.rs (group / using / bind / insert_global_pre_handlers)
//!     → Routes<Stage>
//!
//! On change:
//!     watcher.rs detects modification
//!     → loader.rs loads and validates the new manifest
//!     → result forwarded over an mpsc channel
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal manifests
//! - Validation separates syntactic (serde) from semantic checks
//! - Route conflicts are detected by the router, not re-implemented here

pub mod compile;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use compile::build_routes;
pub use loader::{load_manifest, parse_manifest, ConfigError};
pub use schema::{GroupConfig, HandlerAction, HandlerConfig, LogFormat, LoggingConfig, Manifest, RouteConfig, RouteTable, ServerConfig};
pub use validation::{validate_manifest, ValidationError};
pub use watcher::ManifestWatcher;
