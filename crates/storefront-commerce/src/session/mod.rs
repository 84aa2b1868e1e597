//! Session module.
//!
//! Contains the resume protocol run at start-up against the saved cart.

mod resume;

pub use resume::{ResumeAction, ResumeProtocol, ResumeState};
