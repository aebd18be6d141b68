//! Enrollment event emitters and the fire-and-forget notification service.

pub mod emitter;
pub mod service;

pub use emitter::{BroadcastEmitter, LogEmitter, build_emitter};
pub use service::NotificationService;
