//! Composable, possibly asynchronous input rules.
//!
//! A [`RuleSet`] runs every rule it holds and collects every violation before
//! reporting, so one round trip tells the caller everything that is wrong.
//! Only a storage failure during a lookup stops evaluation early.

mod rules;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::repository::{LeaveTypeRepository, RepositoryResult};

pub use rules::{
    LeaveAllocationFields, LeaveRequestFields, LeaveTypeFields, create_leave_request_rules,
    leave_allocation_rules, leave_request_rules, leave_type_rules, update_leave_request_rules,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(Violation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|v| v.message.clone()).collect()
    }

    pub fn into_result(self) -> Result<(), ValidationFailure> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure(self))
        }
    }
}

/// A non-empty set of violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .0.messages().join(" "))]
pub struct ValidationFailure(pub Violations);

impl ValidationFailure {
    pub fn violations(&self) -> &Violations {
        &self.0
    }
}

#[async_trait]
pub trait Rule<T: Sync>: Send + Sync {
    async fn check(&self, input: &T, violations: &mut Violations) -> RepositoryResult<()>;
}

/// Synchronous predicate over one input; reports `message` against `field`
/// when the predicate returns false.
pub struct FieldRule<T> {
    field: &'static str,
    message: String,
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> FieldRule<T> {
    pub fn new(
        field: &'static str,
        message: impl Into<String>,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            field,
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }
}

#[async_trait]
impl<T: Sync> Rule<T> for FieldRule<T> {
    async fn check(&self, input: &T, violations: &mut Violations) -> RepositoryResult<()> {
        if !(self.predicate)(input) {
            violations.push(self.field, self.message.clone());
        }
        Ok(())
    }
}

/// Fails when the referenced leave type does not exist.
pub struct LeaveTypeExists<T> {
    field: &'static str,
    leave_types: Arc<dyn LeaveTypeRepository>,
    leave_type_id: fn(&T) -> i32,
}

impl<T> LeaveTypeExists<T> {
    pub fn new(
        field: &'static str,
        leave_types: Arc<dyn LeaveTypeRepository>,
        leave_type_id: fn(&T) -> i32,
    ) -> Self {
        Self {
            field,
            leave_types,
            leave_type_id,
        }
    }
}

#[async_trait]
impl<T: Sync> Rule<T> for LeaveTypeExists<T> {
    async fn check(&self, input: &T, violations: &mut Violations) -> RepositoryResult<()> {
        let id = (self.leave_type_id)(input);
        if !self.leave_types.exists(id).await? {
            violations.push(self.field, format!("{} does not exist.", self.field));
        }
        Ok(())
    }
}

pub struct RuleSet<T> {
    rules: Vec<Box<dyn Rule<T>>>,
}

impl<T: Sync + 'static> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sync + 'static> RuleSet<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule(mut self, rule: impl Rule<T> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn field(
        self,
        field: &'static str,
        message: impl Into<String>,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.rule(FieldRule::new(field, message, predicate))
    }

    /// Appends every rule of `other`.
    pub fn include(mut self, other: RuleSet<T>) -> Self {
        self.rules.extend(other.rules);
        self
    }

    pub async fn validate(&self, input: &T) -> RepositoryResult<Violations> {
        let mut violations = Violations::default();
        for rule in &self.rules {
            rule.check(input, &mut violations).await?;
        }
        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        left: i32,
        right: i32,
    }

    #[tokio::test]
    async fn every_failing_rule_is_reported() {
        let rules = RuleSet::<Pair>::new()
            .field("left", "left must be positive.", |p| p.left > 0)
            .field("right", "right must be positive.", |p| p.right > 0)
            .field("left", "left must be below right.", |p| p.left < p.right);

        let violations = rules.validate(&Pair { left: -1, right: -5 }).await.unwrap();

        assert_eq!(violations.len(), 3);
        assert!(violations.has_field("left"));
        assert!(violations.has_field("right"));
    }

    #[tokio::test]
    async fn include_appends_rules_of_the_base_set() {
        let base = RuleSet::<Pair>::new().field("left", "left must be positive.", |p| p.left > 0);
        let extended = RuleSet::new()
            .include(base)
            .field("right", "right must be positive.", |p| p.right > 0);

        let violations = extended.validate(&Pair { left: 0, right: 0 }).await.unwrap();
        assert_eq!(
            violations.messages(),
            vec!["left must be positive.", "right must be positive."]
        );
    }

    #[test]
    fn empty_violations_are_valid() {
        assert!(Violations::default().into_result().is_ok());
    }
}
