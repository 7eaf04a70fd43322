//! Authentication and request authorization wiring.
//!
//! - [`filter_chain`]: ordered path rules deciding which requests need a
//!   principal
//! - [`user_details`]: where principals come from (provisioned in-memory
//!   accounts, then the user repository)
//!
//! The rules are enforced by [`crate::middleware::auth::authenticate`], which
//! runs in front of every route.

pub mod filter_chain;
pub mod user_details;

pub use filter_chain::{AccessRule, PathPattern, SecurityFilterChain};
pub use user_details::{
    DelegatingUserDetailsService, InMemoryUserDetailsManager, UserDetailsService,
    provisioned_users,
};
