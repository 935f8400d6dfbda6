use std::collections::{HashMap, VecDeque};

use axiom_core::{AxiomError, AxiomResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub max_requests_per_minute: u32,
    pub max_requests_per_hour: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests_per_minute: 60,
            max_requests_per_hour: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingBudget {
    pub minute: u32,
    pub hour: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub remaining: RemainingBudget,
}

/// Admission control for callers of the request layer.
///
/// Implementations are owned by whoever serves requests and passed in
/// explicitly; the clock is an argument so decisions are reproducible.
pub trait RateLimiter {
    fn check(&mut self, client_id: &str, now: DateTime<Utc>) -> RateDecision;

    /// Like [`check`](Self::check) but rejections become errors.
    fn enforce(&mut self, client_id: &str, now: DateTime<Utc>) -> AxiomResult<RateDecision> {
        let decision = self.check(client_id, now);
        if decision.allowed {
            Ok(decision)
        } else {
            let reason = decision
                .reason
                .unwrap_or_else(|| "rate limit exceeded".to_string());
            warn!(client_id, %reason, "request rejected");
            Err(AxiomError::RateLimited(reason))
        }
    }
}

/// Per-client sliding windows of one minute and one hour.
#[derive(Debug, Default)]
pub struct SlidingWindowLimiter {
    config: RateLimitConfig,
    requests: HashMap<String, VecDeque<DateTime<Utc>>>,
}

impl SlidingWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            requests: HashMap::new(),
        }
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    pub fn tracked_clients(&self) -> usize {
        self.requests.len()
    }

    /// Drops timestamps older than an hour and clients with none left.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        let horizon = now - Duration::hours(1);
        self.requests.retain(|_, stamps| {
            while stamps.front().is_some_and(|ts| *ts <= horizon) {
                stamps.pop_front();
            }
            !stamps.is_empty()
        });
    }

    pub fn forget(&mut self, client_id: &str) {
        self.requests.remove(client_id);
    }
}

impl RateLimiter for SlidingWindowLimiter {
    fn check(&mut self, client_id: &str, now: DateTime<Utc>) -> RateDecision {
        let hour_limit = self.config.max_requests_per_hour;
        let minute_limit = self.config.max_requests_per_minute;

        let stamps = self.requests.entry(client_id.to_string()).or_default();
        let hour_horizon = now - Duration::hours(1);
        while stamps.front().is_some_and(|ts| *ts <= hour_horizon) {
            stamps.pop_front();
        }

        let in_hour = u32::try_from(stamps.len()).unwrap_or(u32::MAX);
        if in_hour >= hour_limit {
            return RateDecision {
                allowed: false,
                reason: Some(format!(
                    "Rate limit exceeded: Maximum {hour_limit} requests per hour"
                )),
                remaining: RemainingBudget { minute: 0, hour: 0 },
            };
        }

        let minute_horizon = now - Duration::minutes(1);
        let in_minute = stamps.iter().filter(|ts| **ts > minute_horizon).count();
        let in_minute = u32::try_from(in_minute).unwrap_or(u32::MAX);
        if in_minute >= minute_limit {
            return RateDecision {
                allowed: false,
                reason: Some(format!(
                    "Rate limit exceeded: Maximum {minute_limit} requests per minute"
                )),
                remaining: RemainingBudget {
                    minute: 0,
                    hour: hour_limit.saturating_sub(in_hour),
                },
            };
        }

        stamps.push_back(now);
        RateDecision {
            allowed: true,
            reason: None,
            remaining: RemainingBudget {
                minute: minute_limit.saturating_sub(in_minute.saturating_add(1)),
                hour: hour_limit.saturating_sub(in_hour.saturating_add(1)),
            },
        }
    }
}
