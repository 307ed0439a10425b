//! Agent core: the tool-calling loop.
//!
//! One chat call turns a user message into a final answer by alternating
//! between the inference backend and the tool registry until the backend
//! stops requesting tools, a failure occurs, or the round limit is hit.

mod builder;
mod errors;
mod runner;


pub use builder::AgentBuilder;
pub use errors::AgentError;
pub use runner::{Agent, CancelHandle};
