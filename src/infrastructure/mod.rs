//! Infrastructure layer - External service implementations

pub mod credentials;
pub mod keyword;
pub mod llm;
pub mod logging;
pub mod page;
pub mod services;
pub mod session;
