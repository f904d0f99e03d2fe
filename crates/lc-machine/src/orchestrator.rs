// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Orchestrator (§4.4): drives trigger selection, invocation,
//! suspension, and failure routing for one [`Model`].

use lc_catalog::{Catalog, HookArgs};
use lc_core::{CommandStatus, Event, Transition};

use crate::activity_reporter::ActivityReporter;
use crate::error::OrchestratorError;
use crate::model::Model;
use crate::resolved::ResolvedTransition;
use crate::state_machine::StateMachine;

/// Tagged result of running one resolved transition (§9 "Control-flow
/// suspension"), in place of the source's exception-based signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The trigger ran to completion (whether or not it changed state);
    /// the outer loop re-evaluates and keeps going.
    Continued,
    /// `stop_after_trigger`: stop this invocation, the next state's
    /// triggers fire on the *next* call.
    SuspendTrigger,
    /// `stop_after_state_change`: stop this invocation, awaiting the next
    /// external event before any further progress.
    SuspendEvent,
}

/// Drives a single [`Model`] through a compiled [`StateMachine`] until a
/// suspension point or a fatal error (§4.4).
pub struct Orchestrator {
    machine: StateMachine,
    model: Model,
    reporter: ActivityReporter,
}

impl Orchestrator {
    /// Builds the [`StateMachine`] from `catalog`, adopts `model`'s
    /// current state as the machine's starting point, then enables
    /// `Model::set_state` writes (§4.4).
    pub fn new(catalog: &Catalog, mut model: Model, reporter: ActivityReporter) -> Result<Self, OrchestratorError> {
        let machine = StateMachine::build(catalog)?;
        model.allow_state_updates(true);
        Ok(Self { machine, model, reporter })
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Run pre-flight checks, then the main loop, routing a first failure
    /// into the catalog's `failure` chain and treating a second failure as
    /// fatal (§4.4, §7).
    pub async fn run(&mut self) -> Result<(), OrchestratorError> {
        self.preflight()?;
        match self.run_loop().await {
            Ok(()) => Ok(()),
            Err(first_error) => self.enter_failure_handling(first_error).await,
        }
    }

    fn preflight(&self) -> Result<(), OrchestratorError> {
        let event = self.model.event();
        let node = self.model.node();
        match event.transition() {
            Some(Transition::Launching) if event.is_lifecycle() && !node.is_new() => {
                return Err(OrchestratorError::IllegalTransition(format!(
                    "node '{}' is not new but received a LAUNCHING event",
                    node.id()
                )));
            }
            Some(Transition::Terminating) if node.is_new() => {
                return Err(OrchestratorError::IllegalTransition(format!(
                    "node '{}' is new but received a TERMINATING event",
                    node.id()
                )));
            }
            _ => {}
        }
        if self.machine.triggers_for(self.model.state()).is_empty() {
            return Err(OrchestratorError::NoTriggers(self.model.state().to_string()));
        }
        Ok(())
    }

    /// First failure marks the event failed, forces the model into
    /// `failure`, and re-enters the loop with `failure`'s own triggers.
    /// `run_loop` already reports the error that got us here; a second
    /// failure from inside the `failure` chain is reported the same way
    /// before we wrap it as fatal (§4.4, §7, P6).
    async fn enter_failure_handling(&mut self, first_error: OrchestratorError) -> Result<(), OrchestratorError> {
        tracing::error!(error = %first_error, state = self.model.state(), "entering failure handling");
        self.model.event_mut().set_has_failure();
        self.model.set_state(lc_core::STATE_FAILURE.to_string()).await?;
        match self.run_loop().await {
            Ok(()) => Ok(()),
            Err(second_error) => Err(OrchestratorError::FailureDuringFailureHandling(Box::new(second_error))),
        }
    }

    /// The main loop (§4.4): fires triggers for the current state until a
    /// full pass makes no progress, or a suspension/error ends it early.
    async fn run_loop(&mut self) -> Result<(), OrchestratorError> {
        let mut triggers = self.machine.triggers_for(self.model.state());
        while !triggers.is_empty() {
            let start_state = self.model.state().to_string();
            for name in &triggers {
                let Some(resolved) = self.machine.transition_for(name, &start_state) else {
                    continue;
                };
                match self.dispatch_single(&resolved).await {
                    Ok(DispatchOutcome::SuspendEvent) => return Ok(()),
                    Ok(DispatchOutcome::SuspendTrigger) => break,
                    Ok(DispatchOutcome::Continued) => {}
                    Err(e) => {
                        self.reporter.report_failure(resolved.trigger(), &e).await?;
                        if resolved.ignore_errors {
                            tracing::warn!(trigger = resolved.trigger(), error = %e, "ignoring failure");
                            if let Some(dest) = resolved.dest() {
                                self.model.set_state(dest.to_string()).await?;
                            }
                        } else {
                            return Err(e);
                        }
                    }
                }
                if self.model.state() != start_state {
                    break;
                }
            }
            if self.model.state() == start_state {
                break;
            }
            triggers = self.machine.triggers_for(self.model.state());
        }
        Ok(())
    }

    /// Dispatch semantics of one resolved transition (§4.4.1).
    async fn dispatch_single(&mut self, resolved: &ResolvedTransition) -> Result<DispatchOutcome, OrchestratorError> {
        let info = resolved.info.clone();

        for hook in &resolved.prepare {
            self.run_hook(hook, &info).await?;
        }

        if !resolved.ignore_errors {
            match self.check_event_successful()? {
                true => {}
                false => return Ok(DispatchOutcome::Continued),
            }
        }

        {
            let event = self.model.event().clone();
            let node = self.model.node().clone();
            if !resolved.conditions.iter().all(|g| g(&event, &node, &info)) {
                return Ok(DispatchOutcome::Continued);
            }
            if resolved.unless.iter().any(|g| g(&event, &node, &info)) {
                return Ok(DispatchOutcome::Continued);
            }
        }

        self.reporter.report_transition(self.model.event(), "Transitioning", &info.trigger, &info.source, info.dest.as_deref()).await?;
        for hook in &resolved.before {
            self.run_hook(hook, &info).await?;
        }

        if let Some(dest) = info.dest.clone() {
            self.model.set_state(dest).await?;
            if resolved.stop_after_state_change {
                return Ok(DispatchOutcome::SuspendEvent);
            }
        }

        for hook in &resolved.after {
            self.run_hook(hook, &info).await?;
        }
        self.reporter.report_transition(self.model.event(), "Transitioned", &info.trigger, &info.source, info.dest.as_deref()).await?;

        if resolved.stop_after_trigger {
            return Ok(DispatchOutcome::SuspendTrigger);
        }
        Ok(DispatchOutcome::Continued)
    }

    /// `__is_event_successful` (§4.4.2): a hybrid guard. Returns `Ok(true)`
    /// if the transition's conditions should be evaluated, `Ok(false)` if
    /// the trigger should be silently skipped, or `Err(CommandUnsuccessful)`
    /// if a failed command result must instead route into failure handling.
    fn check_event_successful(&self) -> Result<bool, OrchestratorError> {
        if self.model.event().is_successful() {
            return Ok(true);
        }
        if let Event::RemoteCommandResult { status, .. } = self.model.event() {
            if *status != CommandStatus::Success {
                return Err(OrchestratorError::CommandUnsuccessful);
            }
        }
        Ok(false)
    }

    async fn run_hook(
        &mut self,
        hook: &lc_catalog::HookFn,
        info: &lc_catalog::TransitionInfo,
    ) -> Result<(), OrchestratorError> {
        let args = HookArgs { event: self.model.event().clone(), node: self.model.node().clone(), transition: info.clone() };
        let outcome = hook(args)
            .await
            .map_err(|source| OrchestratorError::Operation { trigger: info.trigger.clone(), source })?;
        *self.model.event_mut() = outcome.event;
        self.model.set_node(outcome.node);
        Ok(())
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
