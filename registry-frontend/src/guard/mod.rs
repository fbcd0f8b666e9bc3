//! Navigation guard.
//!
//! A route declares an ordered list of preconditions and a fallback path.
//! [`Guard::evaluate`] runs them strictly in sequence, starting from
//! [`GuardState::Pending`]; the first failing check moves the navigation to
//! [`GuardState::Redirect`] (the check's own target if it names one, the
//! route's fallback otherwise), and passing every check moves it to
//! [`GuardState::Proceed`]. Checks are never retried. An error raised by a
//! check aborts evaluation and is returned to the caller unchanged.

pub mod conditions;
pub mod context;

use async_trait::async_trait;
use std::sync::Arc;

use registry_core::error::AppError;

pub use conditions::{
    base_conditions, is_authenticated, is_authorized_user, load_runtime_config, process_log_out,
    refresh_session,
};
pub use context::NavigationContext;

/// Result of a single precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl From<bool> for Verdict {
    fn from(passed: bool) -> Self {
        if passed {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

/// Where a navigation stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Pending,
    Proceed,
    Redirect(String),
}

impl GuardState {
    pub fn label(&self) -> &'static str {
        match self {
            GuardState::Pending => "pending",
            GuardState::Proceed => "proceed",
            GuardState::Redirect(_) => "redirect",
        }
    }
}

/// Per-route data consumed by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteUserData {
    pub on_failure_redirect_to: String,
}

impl RouteUserData {
    pub fn redirect_to(path: &str) -> Self {
        Self {
            on_failure_redirect_to: path.to_string(),
        }
    }
}

/// An asynchronous check gating a navigation.
#[async_trait]
pub trait Precondition<C: Send>: Send + Sync {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    async fn check(&self, context: &mut C) -> Result<Verdict, AppError>;

    /// Target used instead of the route's fallback when this check fails.
    fn redirect_on_failure(&self) -> Option<&str> {
        None
    }
}

pub type SharedPrecondition<C> = Arc<dyn Precondition<C>>;

/// Ordered preconditions plus the fallback path of one route.
pub struct Guard<C> {
    conditions: Vec<SharedPrecondition<C>>,
    user_data: RouteUserData,
}

impl<C: Send> Guard<C> {
    pub fn new(conditions: Vec<SharedPrecondition<C>>, user_data: RouteUserData) -> Self {
        Self {
            conditions,
            user_data,
        }
    }

    pub fn user_data(&self) -> &RouteUserData {
        &self.user_data
    }

    pub fn condition_names(&self) -> Vec<&'static str> {
        self.conditions.iter().map(|c| c.name()).collect()
    }

    pub async fn evaluate(&self, context: &mut C) -> Result<GuardState, AppError> {
        let mut state = GuardState::Pending;

        for condition in &self.conditions {
            let verdict = condition.check(context).await?;
            tracing::debug!(precondition = condition.name(), ?verdict, "Precondition evaluated");

            if verdict == Verdict::Fail {
                let target = condition
                    .redirect_on_failure()
                    .unwrap_or(self.user_data.on_failure_redirect_to.as_str());
                state = GuardState::Redirect(target.to_string());
                break;
            }
        }

        if state == GuardState::Pending {
            state = GuardState::Proceed;
        }

        Ok(state)
    }
}
