//! Type-keyed routing from operation descriptors to their handlers.
//!
//! Registrations are checked once, when [`DispatcherBuilder::build`] runs:
//! a second handler for the same descriptor, or a required descriptor with no
//! handler, fails the build instead of the first request.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use mockable::Clock;

use crate::error::{ApplicationResult, ConfigurationError};
use crate::features::leave_allocations::*;
use crate::features::leave_requests::*;
use crate::features::leave_types::*;
use crate::features::{Request, RequestContext, RequestHandler};
use crate::notification::{EmailSender, EmailSettings};
use crate::repository::{LeaveAllocationRepository, LeaveRequestRepository, LeaveTypeRepository};

type ErasedHandler = Box<dyn Any + Send + Sync>;

#[derive(Default)]
pub struct DispatcherBuilder {
    handlers: HashMap<TypeId, ErasedHandler>,
    duplicates: Vec<&'static str>,
    required: Vec<(TypeId, &'static str)>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<R, H>(mut self, handler: H) -> Self
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        let handler: Arc<dyn RequestHandler<R>> = Arc::new(handler);
        if self
            .handlers
            .insert(TypeId::of::<R>(), Box::new(handler))
            .is_some()
        {
            self.duplicates.push(R::NAME);
        }
        self
    }

    /// Marks `R` as one that must have a handler by the time of `build`.
    pub fn require<R: Request>(mut self) -> Self {
        self.required.push((TypeId::of::<R>(), R::NAME));
        self
    }

    pub fn build(self) -> Result<Dispatcher, ConfigurationError> {
        if let Some(name) = self.duplicates.first() {
            return Err(ConfigurationError::DuplicateHandler(*name));
        }
        if let Some(&(_, name)) = self
            .required
            .iter()
            .find(|(type_id, _)| !self.handlers.contains_key(type_id))
        {
            return Err(ConfigurationError::MissingHandler(name));
        }

        tracing::debug!(handlers = self.handlers.len(), "Dispatcher built");
        Ok(Dispatcher {
            handlers: self.handlers,
        })
    }
}

pub struct Dispatcher {
    handlers: HashMap<TypeId, ErasedHandler>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Runs the handler registered for `R` and returns its result unchanged.
    pub async fn send<R: Request>(
        &self,
        request: R,
        ctx: &RequestContext,
    ) -> ApplicationResult<R::Response> {
        let handler = self
            .handlers
            .get(&TypeId::of::<R>())
            .and_then(|handler| handler.downcast_ref::<Arc<dyn RequestHandler<R>>>())
            .cloned()
            .ok_or(ConfigurationError::MissingHandler(R::NAME))?;
        handler.handle(request, ctx).await
    }
}

/// Collaborators the leave-management handlers are built from.
#[derive(Clone)]
pub struct Services {
    pub leave_types: Arc<dyn LeaveTypeRepository>,
    pub allocations: Arc<dyn LeaveAllocationRepository>,
    pub requests: Arc<dyn LeaveRequestRepository>,
    pub emails: Arc<dyn EmailSender>,
    pub email_settings: EmailSettings,
    pub clock: Arc<dyn Clock>,
}

pub fn leave_management_dispatcher(services: Services) -> Result<Dispatcher, ConfigurationError> {
    let Services {
        leave_types,
        allocations,
        requests,
        emails,
        email_settings,
        clock,
    } = services;

    Dispatcher::builder()
        .register::<CreateLeaveType, _>(CreateLeaveTypeHandler::new(leave_types.clone()))
        .register::<UpdateLeaveType, _>(UpdateLeaveTypeHandler::new(leave_types.clone()))
        .register::<DeleteLeaveType, _>(DeleteLeaveTypeHandler::new(leave_types.clone()))
        .register::<GetLeaveTypeList, _>(GetLeaveTypeListHandler::new(leave_types.clone()))
        .register::<GetLeaveTypeDetail, _>(GetLeaveTypeDetailHandler::new(leave_types.clone()))
        .register::<CreateLeaveAllocation, _>(CreateLeaveAllocationHandler::new(
            allocations.clone(),
            leave_types.clone(),
            clock.clone(),
        ))
        .register::<UpdateLeaveAllocation, _>(UpdateLeaveAllocationHandler::new(
            allocations.clone(),
            leave_types.clone(),
            clock.clone(),
        ))
        .register::<DeleteLeaveAllocation, _>(DeleteLeaveAllocationHandler::new(allocations.clone()))
        .register::<GetLeaveAllocationList, _>(GetLeaveAllocationListHandler::new(allocations.clone()))
        .register::<GetLeaveAllocationDetail, _>(GetLeaveAllocationDetailHandler::new(allocations))
        .register::<CreateLeaveRequest, _>(CreateLeaveRequestHandler::new(
            requests.clone(),
            leave_types.clone(),
            emails,
            email_settings,
            clock.clone(),
        ))
        .register::<UpdateLeaveRequest, _>(UpdateLeaveRequestHandler::new(
            requests.clone(),
            leave_types,
            clock,
        ))
        .register::<DeleteLeaveRequest, _>(DeleteLeaveRequestHandler::new(requests.clone()))
        .register::<GetLeaveRequestList, _>(GetLeaveRequestListHandler::new(requests.clone()))
        .register::<GetLeaveRequestDetail, _>(GetLeaveRequestDetailHandler::new(requests))
        .require::<CreateLeaveType>()
        .require::<UpdateLeaveType>()
        .require::<DeleteLeaveType>()
        .require::<GetLeaveTypeList>()
        .require::<GetLeaveTypeDetail>()
        .require::<CreateLeaveAllocation>()
        .require::<UpdateLeaveAllocation>()
        .require::<DeleteLeaveAllocation>()
        .require::<GetLeaveAllocationList>()
        .require::<GetLeaveAllocationDetail>()
        .require::<CreateLeaveRequest>()
        .require::<UpdateLeaveRequest>()
        .require::<DeleteLeaveRequest>()
        .require::<GetLeaveRequestList>()
        .require::<GetLeaveRequestDetail>()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use async_trait::async_trait;

    struct Ping(u32);
    struct Pong;

    impl Request for Ping {
        type Response = u32;
        const NAME: &'static str = "Ping";
    }

    impl Request for Pong {
        type Response = ();
        const NAME: &'static str = "Pong";
    }

    struct Doubler;

    #[async_trait]
    impl RequestHandler<Ping> for Doubler {
        async fn handle(&self, request: Ping, _: &RequestContext) -> ApplicationResult<u32> {
            Ok(request.0 * 2)
        }
    }

    #[tokio::test]
    async fn routes_to_the_registered_handler() {
        let dispatcher = Dispatcher::builder()
            .register::<Ping, _>(Doubler)
            .require::<Ping>()
            .build()
            .unwrap();

        let answer = dispatcher
            .send(Ping(21), &RequestContext::new("system"))
            .await
            .unwrap();

        assert_eq!(answer, 42);
    }

    #[test]
    fn second_registration_fails_the_build() {
        let result = Dispatcher::builder()
            .register::<Ping, _>(Doubler)
            .register::<Ping, _>(Doubler)
            .build();

        assert_eq!(
            result.err(),
            Some(ConfigurationError::DuplicateHandler("Ping"))
        );
    }

    #[test]
    fn required_request_without_handler_fails_the_build() {
        let result = Dispatcher::builder()
            .register::<Ping, _>(Doubler)
            .require::<Ping>()
            .require::<Pong>()
            .build();

        assert_eq!(result.err(), Some(ConfigurationError::MissingHandler("Pong")));
    }

    #[tokio::test]
    async fn unregistered_request_is_a_configuration_error() {
        let dispatcher = Dispatcher::builder().build().unwrap();

        let err = dispatcher
            .send(Pong, &RequestContext::new("system"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::Configuration(ConfigurationError::MissingHandler("Pong"))
        ));
    }
}
