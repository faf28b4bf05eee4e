//! Middleware for the handler chain.

mod logging;


pub use logging::LoggingMiddleware;
