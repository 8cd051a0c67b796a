//! # RSVP Planner Core
//!
//! Domain model and availability reconciliation rules for RSVP Planner.
//!
//! An organizer proposes an event with a fixed set of candidate slots. Participants
//! declare, per slot, whether they accept. This crate owns every rule about that data:
//!
//! - [`aggregate`]: creating an event and its organizer/invitee participants
//! - [`registry`]: adding, updating and removing attendees
//! - [`validator`]: checking submitted availability against the event's slots
//! - [`projector`]: shaping the caller-facing view per visibility type
//! - [`service`]: the operations the HTTP layer calls, serialized per event
//!
//! Persistence is reached only through the traits in [`store`]; [`memory`] provides
//! in-process implementations used by tests and local runs.

pub mod aggregate;
pub mod errors;
pub mod locks;
pub mod memory;
pub mod models;
pub mod projector;
pub mod registry;
pub mod search;
pub mod service;
pub mod store;
pub mod validator;
