/// Middleware modules for the API server
///
/// - `cors`: permissive CORS headers and preflight short-circuit

pub mod cors;
