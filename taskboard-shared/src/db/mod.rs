/// Database layer for Taskboard
///
/// # Modules
///
/// - [`pool`]: PostgreSQL connection pool creation and configuration
/// - [`migrations`]: Embedded migration runner

pub mod migrations;
pub mod pool;
