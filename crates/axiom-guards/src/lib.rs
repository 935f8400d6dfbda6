//! Caller-facing guards in front of the axiom core: numeric envelopes that
//! reject out-of-contract input with per-field messages, normalization of
//! the flat and nested input shapes, an injectable rate limiter, and
//! per-caller sessions.

pub mod envelope;
pub mod input;
pub mod rate_limit;
pub mod session;


pub use envelope::{
    check_number, into_result, validate_number, validate_state, NumberBounds, ParamEnvelope,
};
pub use input::{config_from_state, is_nested, normalize_input, state_or_args};
pub use rate_limit::{
    RateDecision, RateLimitConfig, RateLimiter, RemainingBudget, SlidingWindowLimiter,
};
pub use session::{AxiomSession, SessionInfo};
