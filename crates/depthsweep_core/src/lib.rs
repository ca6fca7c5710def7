//! Core data types for depthsweep.
//!
//! This crate provides the data model shared by every depthsweep crate: the
//! conversation shapes sent to a model, the rating fields a model fills in,
//! and the story and annotation records that flow through a sweep.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod annotation;
mod conversation;
mod fields;
mod model;
mod persona;
mod rating;
mod role;
mod story;

pub use annotation::{AnnotationKey, AnnotationRecord};
pub use conversation::{Conversation, ConversationBuilder, Segment, Slot, Turn};
pub use fields::{FieldMap, FieldSource, extract};
pub use model::ModelId;
pub use persona::Persona;
pub use rating::{Rating, RatingField, Ratings, RATING_PATTERN};
pub use role::Role;
pub use story::{StoryRecord, deserialize_count};
