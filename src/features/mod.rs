//! Operation descriptors and their handlers.
//!
//! Every operation is a plain value implementing [`Request`]; exactly one
//! [`RequestHandler`] per descriptor type is registered with the
//! [`Dispatcher`](crate::dispatcher::Dispatcher). Handlers follow the same
//! shape: validate, load current state for mutations, apply, persist, answer.

pub mod leave_allocations;
pub mod leave_requests;
pub mod leave_types;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use crate::error::{ApplicationError, ApplicationResult};
use crate::validation::Violations;

pub trait Request: Send + 'static {
    type Response: Send + 'static;
    /// Used in configuration errors and logs.
    const NAME: &'static str;
}

#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(&self, request: R, ctx: &RequestContext) -> ApplicationResult<R::Response>;
}

/// Binds descriptor types to their response type.
macro_rules! requests {
    ($($request:ty => $response:ty),+ $(,)?) => {$(
        impl $crate::features::Request for $request {
            type Response = $response;
            const NAME: &'static str = stringify!($request);
        }
    )+};
}
pub(crate) use requests;

/// Per-operation state: who is acting and whether the caller gave up.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub actor: String,
    pub cancellation: CancellationToken,
}

impl RequestContext {
    pub fn new(actor: impl Into<String>) -> Self {
        Self::with_cancellation(actor, CancellationToken::new())
    }

    pub fn with_cancellation(actor: impl Into<String>, cancellation: CancellationToken) -> Self {
        Self {
            actor: actor.into(),
            cancellation,
        }
    }

    /// Checked before every repository call.
    pub fn ensure_active(&self) -> ApplicationResult<()> {
        if self.cancellation.is_cancelled() {
            Err(ApplicationError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Outcome of a create command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CommandResponse {
    pub success: bool,
    #[schema(example = "Creation successful")]
    pub message: String,
    /// Identifier of the new row; `0` when nothing was written.
    #[schema(example = 1)]
    pub id: i32,
    pub errors: Vec<String>,
}

impl CommandResponse {
    pub fn created(id: i32) -> Self {
        Self {
            success: true,
            message: "Creation successful".to_string(),
            id,
            errors: Vec::new(),
        }
    }

    pub fn failed(violations: &Violations) -> Self {
        Self {
            success: false,
            message: "Creation failed".to_string(),
            id: 0,
            errors: violations.messages(),
        }
    }
}

/// What a handler does when a side effect after the write fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SideEffectPolicy {
    /// Log and carry on; the operation still succeeds.
    #[default]
    BestEffort,
    /// Surface the failure as [`ApplicationError::Downstream`].
    Required,
}
