//! C/FFI bindings for the astrolabe agent.
//!
//! Provides C-compatible functions for embedding the agent in other
//! languages. See `include/astrolabe.h` for the matching header.
//!
//! # Example (C)
//!
//! ```c
//! #include "astrolabe.h"
//!
//! int main() {
//!     AstrolabeAgent* agent = astrolabe_agent_new();
//!     if (agent == NULL) {
//!         return 1;
//!     }
//!
//!     char* response = astrolabe_agent_chat(agent, "What's my CPU usage?");
//!     if (response != NULL) {
//!         printf("Agent: %s\n", response);
//!         astrolabe_string_free(response);
//!     } else {
//!         fprintf(stderr, "chat failed: %s\n", astrolabe_last_error());
//!     }
//!
//!     astrolabe_agent_free(agent);
//!     return 0;
//! }
//! ```

mod agent;

pub use agent::*;
