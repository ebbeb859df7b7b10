//! Per-client workflow sessions

mod entity;
mod repository;

pub use entity::{Session, SessionId};
pub use repository::SessionRepository;
