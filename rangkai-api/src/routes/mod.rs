/// API route handlers
///
/// - `root`: Static welcome endpoint
/// - `health`: Health and readiness endpoints

pub mod health;
pub mod root;
