//! Action resolution, gating, and invocation.
//!
//! The dispatcher takes the handlers resolved by the registry and, for each
//! one, picks the action to run from the argument list, applies the
//! eligibility and capability gates, and invokes the surviving action with
//! trimmed arguments. Host collaborators (eligibility and capability
//! predicates) are injected through [`HostContext`] rather than read from
//! global state.

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::descriptor::{ActionDescriptor, ActionRole, HandlerDescriptor};
use crate::errors::{DispatchError, ResolutionError};
use crate::registry::CommandRegistry;

/// Host-supplied predicates consulted during gating.
///
/// The framework never interprets capability strings itself; it only
/// forwards them to `has_capability`.
pub trait HostContext<P> {
    /// True when the principal is the kind of actor allowed to execute
    /// commands at all (an interactive actor, as opposed to a console or
    /// automation actor).
    fn is_eligible(&self, principal: &P) -> bool;

    /// True when the principal possesses the given capability.
    fn has_capability(&self, principal: &P, capability: &str) -> bool;
}

/// Which gate, if any, redirected the invocation to a fallback action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateResult {
    Passed,
    EligibilityFailed,
    CapabilityFailed,
}

/// What happened for one handler during a dispatch pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerOutcome {
    /// First primary alias of the handler.
    pub handler: String,
    /// Role of the action that was actually invoked. For a redirect this is
    /// the fallback role, not the originally resolved one.
    pub invoked: ActionRole,
    pub gate: GateResult,
    /// True when the invoked callback returned an error. The error is
    /// logged at the dispatch boundary and not propagated.
    pub action_failed: bool,
}

/// Result of one invocation across all matching handlers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchSummary {
    pub outcomes: Vec<HandlerOutcome>,
}

impl DispatchSummary {
    /// Number of handlers that matched the command name.
    pub fn matched(&self) -> usize {
        self.outcomes.len()
    }

    /// False when no handler matched, which by host convention means "show
    /// usage". Carries no other framework-internal meaning.
    pub fn handled(&self) -> bool {
        !self.outcomes.is_empty()
    }
}

/// Stateless dispatch engine bound to a host context.
pub struct Dispatcher<C> {
    ctx: C,
}

impl<C> Dispatcher<C> {
    pub fn new(ctx: C) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    /// Pick the action to run for `args` from the handler's action table.
    ///
    /// Empty arguments select the Default action. Otherwise the first
    /// argument is matched case-insensitively against the aliases of Named
    /// actions in declaration order; the first declared match wins. An
    /// unmatched first argument is a fatal resolution error, never a silent
    /// no-op.
    pub fn resolve_action<'h, P>(
        &self,
        handler: &'h HandlerDescriptor<P>,
        args: &[String],
    ) -> Result<&'h ActionDescriptor<P>, ResolutionError> {
        match args.first() {
            None => handler
                .action_with_role(ActionRole::Default)
                .ok_or_else(|| ResolutionError::NoDefaultAction {
                    handler: handler.name().to_string(),
                }),
            Some(token) => handler
                .actions
                .iter()
                .find(|a| a.role == ActionRole::Named && a.matches_alias(token))
                .ok_or_else(|| ResolutionError::UnknownSubcommand {
                    handler: handler.name().to_string(),
                    token: token.clone(),
                }),
        }
    }

    /// Resolve, gate, and invoke for a single handler.
    ///
    /// Gate transitions are terminal: an ineligible principal gets the
    /// Ineligible action, a principal lacking the effective capability gets
    /// the Unauthorized action, and in both cases the resolved action never
    /// runs. Callback errors are logged here and reported in the outcome,
    /// not propagated.
    pub fn dispatch_handler<P>(
        &self,
        handler: &HandlerDescriptor<P>,
        principal: &P,
        args: &[String],
    ) -> Result<HandlerOutcome, ResolutionError>
    where
        C: HostContext<P>,
    {
        let resolved = self.resolve_action(handler, args)?;
        let trimmed = trimmed_arguments(args);

        let (action, gate) = if !self.ctx.is_eligible(principal) {
            warn!(
                "handler '{}': principal not eligible, redirecting to {} action",
                handler.name(),
                ActionRole::Ineligible
            );
            let fallback = handler
                .action_with_role(ActionRole::Ineligible)
                .ok_or_else(|| ResolutionError::MissingFallback {
                    handler: handler.name().to_string(),
                    role: ActionRole::Ineligible,
                })?;
            (fallback, GateResult::EligibilityFailed)
        } else if let Some(cap) = handler.effective_capability(resolved) {
            if self.ctx.has_capability(principal, cap) {
                (resolved, GateResult::Passed)
            } else {
                warn!(
                    "handler '{}': principal lacks capability '{}', redirecting to {} action",
                    handler.name(),
                    cap,
                    ActionRole::Unauthorized
                );
                let fallback = handler
                    .action_with_role(ActionRole::Unauthorized)
                    .ok_or_else(|| ResolutionError::MissingFallback {
                        handler: handler.name().to_string(),
                        role: ActionRole::Unauthorized,
                    })?;
                (fallback, GateResult::CapabilityFailed)
            }
        } else {
            (resolved, GateResult::Passed)
        };

        let action_failed = match action.invoke(principal, trimmed) {
            Ok(()) => false,
            Err(err) => {
                error!(
                    "handler '{}': {} action failed: {:#}",
                    handler.name(),
                    action.role,
                    err
                );
                true
            }
        };

        Ok(HandlerOutcome {
            handler: handler.name().to_string(),
            invoked: action.role,
            gate,
            action_failed,
        })
    }

    /// Invocation entry point, matching the host command-callback shape.
    ///
    /// Runs every handler the registry resolves for `command`, in order.
    /// Action failures are recorded per handler and do not stop the pass;
    /// resolution errors abort it, leaving handlers already processed
    /// committed and the rest unprocessed.
    pub fn on_command<P>(
        &self,
        registry: &CommandRegistry<P>,
        principal: &P,
        command: &str,
        label: &str,
        args: &[String],
    ) -> Result<DispatchSummary, DispatchError>
    where
        C: HostContext<P>,
    {
        debug!(
            "dispatching '{}' (label '{}', {} args)",
            command,
            label,
            args.len()
        );

        let mut summary = DispatchSummary::default();
        for handler in registry.resolve_handlers(command) {
            let outcome = self.dispatch_handler(handler, principal, args)?;
            summary.outcomes.push(outcome);
        }
        Ok(summary)
    }
}

/// Strip the leading sub-action token from a raw argument list.
///
/// Returns `None` whenever fewer than two raw tokens were supplied, so an
/// action can distinguish "invoked with no arguments at all" (and "invoked
/// with only a sub-action name") from an argument list that happens to be
/// empty.
pub fn trimmed_arguments(args: &[String]) -> Option<&[String]> {
    if args.len() < 2 {
        None
    } else {
        Some(&args[1..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::HandlerSpec;

    struct AllowAll;

    impl HostContext<String> for AllowAll {
        fn is_eligible(&self, _: &String) -> bool {
            true
        }
        fn has_capability(&self, _: &String, _: &str) -> bool {
            true
        }
    }

    fn handler() -> HandlerDescriptor<String> {
        let mut registry = CommandRegistry::new();
        registry
            .register(
                HandlerSpec::new(["repair", "fix"])
                    .default_named(["hand"], Some("repair"), |_, _| Ok(()))
                    .named(["all"], Some("repair.all"), |_, _| Ok(()))
                    .unauthorized(|_, _| Ok(()))
                    .ineligible(|_, _| Ok(())),
            )
            .unwrap();
        registry.handlers()[0].clone()
    }

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_args_resolve_to_default() {
        let dispatcher = Dispatcher::new(AllowAll);
        let handler = handler();
        let action = dispatcher.resolve_action(&handler, &[]).unwrap();
        assert_eq!(action.role, ActionRole::Default);
    }

    #[test]
    fn test_named_resolution_ignores_case() {
        let dispatcher = Dispatcher::new(AllowAll);
        let handler = handler();
        let action = dispatcher
            .resolve_action(&handler, &strings(&["ALL"]))
            .unwrap();
        assert_eq!(action.role, ActionRole::Named);
        assert!(action.matches_alias("all"));
    }

    #[test]
    fn test_unknown_subcommand_is_fatal() {
        let dispatcher = Dispatcher::new(AllowAll);
        let handler = handler();
        let err = dispatcher
            .resolve_action(&handler, &strings(&["sideways"]))
            .unwrap_err();
        assert_eq!(
            err,
            ResolutionError::UnknownSubcommand {
                handler: "repair".to_string(),
                token: "sideways".to_string(),
            }
        );
    }

    #[test]
    fn test_trimming() {
        assert_eq!(trimmed_arguments(&[]), None);
        assert_eq!(trimmed_arguments(&strings(&["all"])), None);
        let args = strings(&["all", "sword"]);
        assert_eq!(trimmed_arguments(&args), Some(&args[1..]));
    }
}
