//! # enroll-entity
//!
//! Domain entity models for EnrollHub. The enrollment record is the only
//! state the admission engine owns; everything else is read from remote
//! directories. Database entities derive `sqlx::FromRow`.

pub mod enrollment;
