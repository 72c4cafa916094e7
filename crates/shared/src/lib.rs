//! Wire and domain types shared by the labeling client and its front-ends.

pub mod domain;
pub mod error;
pub mod protocol;
