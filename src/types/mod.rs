// src/types/mod.rs
pub mod job;
pub mod profile;
pub mod swipe;

pub use job::Job;
pub use profile::{Profile, ProfileUpdate};
pub use swipe::{Direction, JobId, JoinedJob, SuperlikedRow, Swipe, UserId};
