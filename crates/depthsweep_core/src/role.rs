//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// The speaker of a conversation turn.
///
/// # Examples
///
/// ```
/// use depthsweep_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "system");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System turns set the evaluator persona
    #[display("system")]
    System,
    /// User turns carry the task and the story
    #[display("user")]
    User,
    /// Assistant turns hold the constrained generation slots
    #[display("assistant")]
    Assistant,
}
