//! Conversation agent for vacay
//!
//! This crate provides the vacation booking agent, the booking state it
//! collects, the prompt context, and the factory that builds one agent per
//! session.

pub mod agent;
pub mod booking;
pub mod context;
pub mod factory;
pub mod vacation;

#[cfg(test)]
pub(crate) mod testing;

pub use agent::{BoxedAgent, ConversationAgent};
pub use booking::BookingState;
pub use factory::AgentFactory;
pub use vacation::{greeting_for, VacationAgent, FALLBACK_GREETING};
