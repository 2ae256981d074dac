//! # Operation Hooks
//!
//! Cross-cutting behavior around every dispatch.
//!
//! ## Design
//!
//! The [`Editor`](crate::Editor) calls two hooks for each request:
//! - `before_operation` runs after the request shape is validated and before
//!   any handler is applied. Returning a [`HookVeto`] aborts the dispatch with
//!   nothing applied, nothing published and history untouched.
//! - `after_operation` runs once the new snapshot has been published.
//!
//! Both default to no-ops. Typical uses are logging, validation, and
//! persistence triggers.

use crate::operation::OpRequest;
use mindmap_model::Model;
use thiserror::Error;
use tracing::{debug, info};

/// Reason a hook refused a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HookVeto(pub String);

impl HookVeto {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Observation and veto points around dispatch
pub trait OperationHooks {
    fn before_operation(&mut self, _request: &OpRequest, _model: &Model) -> Result<(), HookVeto> {
        Ok(())
    }

    fn after_operation(&mut self, _request: &OpRequest, _model: &Model) {}
}

/// Hooks that do nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl OperationHooks for NoopHooks {}

/// Log every request through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHooks;

impl OperationHooks for LoggingHooks {
    fn before_operation(&mut self, request: &OpRequest, model: &Model) -> Result<(), HookVeto> {
        let kinds: Vec<&str> = request.kinds().into_iter().map(|k| k.as_str()).collect();
        debug!(kinds = ?kinds, topics = model.len(), "before operation");
        Ok(())
    }

    fn after_operation(&mut self, request: &OpRequest, model: &Model) {
        let kinds: Vec<&str> = request.kinds().into_iter().map(|k| k.as_str()).collect();
        info!(
            kinds = ?kinds,
            topics = model.len(),
            focus_mode = ?model.focus_mode(),
            "operation applied"
        );
    }
}

/// Refuse everything except focus changes while the document is read-only
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadonlyGuard;

impl OperationHooks for ReadonlyGuard {
    fn before_operation(&mut self, request: &OpRequest, model: &Model) -> Result<(), HookVeto> {
        if !model.config().readonly {
            return Ok(());
        }
        match request.kinds().into_iter().find(|kind| !kind.is_focus_only()) {
            Some(kind) => Err(HookVeto::new(format!("document is read-only, refusing {}", kind))),
            None => Ok(()),
        }
    }
}

/// Several hooks run in registration order
///
/// The first veto stops the chain; later hooks do not see the request.
#[derive(Default)]
pub struct HookChain {
    hooks: Vec<Box<dyn OperationHooks + Send>>,
}

impl HookChain {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    pub fn with(mut self, hook: impl OperationHooks + Send + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn push(&mut self, hook: Box<dyn OperationHooks + Send>) {
        self.hooks.push(hook);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for HookChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookChain").field("hooks", &self.hooks.len()).finish()
    }
}

impl OperationHooks for HookChain {
    fn before_operation(&mut self, request: &OpRequest, model: &Model) -> Result<(), HookVeto> {
        for hook in &mut self.hooks {
            hook.before_operation(request, model)?;
        }
        Ok(())
    }

    fn after_operation(&mut self, request: &OpRequest, model: &Model) {
        for hook in &mut self.hooks {
            hook.after_operation(request, model);
        }
    }
}
