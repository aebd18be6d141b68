//! Domain events emitted by EnrollHub operations.
//!
//! Events are handed to a [`NotificationEmitter`](crate::traits::NotificationEmitter)
//! after the operation that produced them has already completed.

pub mod enrollment;

pub use enrollment::{EnrollmentEvent, EventPayload};
