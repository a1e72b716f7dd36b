//! Identity provider adapters.
//!
//! [`GoTrueIdentityProvider`] talks to a hosted GoTrue service. The
//! deterministic fixture provider lives with its port in
//! [`crate::domain::ports::FixtureIdentityProvider`].

mod dto;
mod gotrue;

pub use gotrue::GoTrueIdentityProvider;
