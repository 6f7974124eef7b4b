//! Action and handler descriptors plus the declarative registration builder.
//!
//! A handler is declared as an ordered table of actions rather than being
//! discovered by runtime introspection. Each action carries its role, its
//! aliases (named sub-actions only), an optional required capability, and an
//! opaque callback. The [`HandlerSpec`] builder assembles the table; the
//! registry validates it once at registration time.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Result type for action callbacks. Failures are caught and logged at the
/// dispatch boundary; they never abort the surrounding dispatch pass.
pub type ActionResult = anyhow::Result<()>;

/// Opaque action callback.
///
/// The second parameter is the trimmed argument list: `None` when fewer than
/// two raw tokens were supplied, so handler code can tell "invoked bare"
/// apart from "invoked with a sub-action token and nothing else".
pub type ActionFn<P> = dyn Fn(&P, Option<&[String]>) -> ActionResult + Send + Sync;

/// Role of a single handler action. Mutually exclusive per descriptor; one
/// underlying callback may still back both a `Default` and a `Named`
/// descriptor (see [`HandlerSpec::default_named`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionRole {
    /// Runs when the command is invoked with no arguments.
    Default,
    /// Runs when the first argument matches one of the action's aliases.
    Named,
    /// Fallback when the principal lacks the required capability.
    Unauthorized,
    /// Fallback when the principal is not an eligible invocation context.
    Ineligible,
}

impl ActionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionRole::Default => "default",
            ActionRole::Named => "named",
            ActionRole::Unauthorized => "unauthorized",
            ActionRole::Ineligible => "ineligible",
        }
    }
}

impl fmt::Display for ActionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata and callback for a single handler action.
pub struct ActionDescriptor<P> {
    pub role: ActionRole,
    /// Sub-action aliases; non-empty only for [`ActionRole::Named`].
    /// Matched case-insensitively.
    pub aliases: Vec<String>,
    /// Capability required to run this action. `None` means no check is
    /// performed. Fallback roles never carry one; they run precisely
    /// because a requirement failed.
    pub capability: Option<String>,
    pub(crate) invoke: Arc<ActionFn<P>>,
}

impl<P> ActionDescriptor<P> {
    /// True when `token` matches one of this action's aliases, ignoring
    /// ASCII case.
    pub fn matches_alias(&self, token: &str) -> bool {
        self.aliases.iter().any(|a| a.eq_ignore_ascii_case(token))
    }

    /// Run the underlying callback.
    pub fn invoke(&self, principal: &P, args: Option<&[String]>) -> ActionResult {
        (self.invoke)(principal, args)
    }
}

impl<P> Clone for ActionDescriptor<P> {
    fn clone(&self) -> Self {
        Self {
            role: self.role,
            aliases: self.aliases.clone(),
            capability: self.capability.clone(),
            invoke: Arc::clone(&self.invoke),
        }
    }
}

impl<P> fmt::Debug for ActionDescriptor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("role", &self.role)
            .field("aliases", &self.aliases)
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}

/// A validated, immutable description of one registered command handler.
///
/// Created by the registry from a [`HandlerSpec`]; never mutated afterwards.
pub struct HandlerDescriptor<P> {
    /// Names under which this handler is externally reachable, matched
    /// case-insensitively against the inbound command name.
    pub primary_aliases: Vec<String>,
    /// Handler-level default capability. Used as the Default action's
    /// requirement when that action declares none of its own.
    pub capability: Option<String>,
    /// All actions in declaration order. Order is semantically meaningful:
    /// when two named actions share an alias, the first declared wins.
    pub actions: Vec<ActionDescriptor<P>>,
}

impl<P> HandlerDescriptor<P> {
    /// Display name used in errors and logs: the first primary alias.
    pub fn name(&self) -> &str {
        self.primary_aliases
            .first()
            .map(String::as_str)
            .unwrap_or("<unnamed>")
    }

    /// True when `command` matches one of the primary aliases, ignoring
    /// ASCII case.
    pub fn matches_command(&self, command: &str) -> bool {
        self.primary_aliases
            .iter()
            .any(|a| a.eq_ignore_ascii_case(command))
    }

    /// The single action with the given fallback or default role, if present.
    pub fn action_with_role(&self, role: ActionRole) -> Option<&ActionDescriptor<P>> {
        self.actions.iter().find(|a| a.role == role)
    }

    /// Effective capability requirement for an action: the action's own, or
    /// the handler default when a Default action declares none.
    pub fn effective_capability<'a>(&'a self, action: &'a ActionDescriptor<P>) -> Option<&'a str> {
        match (&action.capability, action.role) {
            (Some(cap), _) => Some(cap.as_str()),
            (None, ActionRole::Default) => self.capability.as_deref(),
            (None, _) => None,
        }
    }
}

impl<P> Clone for HandlerDescriptor<P> {
    fn clone(&self) -> Self {
        Self {
            primary_aliases: self.primary_aliases.clone(),
            capability: self.capability.clone(),
            actions: self.actions.clone(),
        }
    }
}

impl<P> fmt::Debug for HandlerDescriptor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("primary_aliases", &self.primary_aliases)
            .field("capability", &self.capability)
            .field("actions", &self.actions)
            .finish()
    }
}

/// Declarative handler specification, consumed by
/// [`crate::CommandRegistry::register`].
///
/// Actions are recorded in declaration order. The builder performs no
/// validation itself; the registry checks the role invariants when the spec
/// is registered.
pub struct HandlerSpec<P> {
    primary_aliases: Vec<String>,
    capability: Option<String>,
    actions: Vec<ActionDescriptor<P>>,
}

impl<P> HandlerSpec<P> {
    /// Start a spec reachable under the given primary aliases.
    pub fn new<I, S>(primary_aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            primary_aliases: primary_aliases.into_iter().map(Into::into).collect(),
            capability: None,
            actions: Vec::new(),
        }
    }

    /// Set the handler-level default capability.
    pub fn capability(mut self, capability: impl Into<String>) -> Self {
        self.capability = Some(capability.into());
        self
    }

    /// Declare the action that runs when the command is invoked with no
    /// arguments.
    pub fn default_action<F>(mut self, capability: Option<&str>, action: F) -> Self
    where
        F: Fn(&P, Option<&[String]>) -> ActionResult + Send + Sync + 'static,
    {
        self.actions.push(ActionDescriptor {
            role: ActionRole::Default,
            aliases: Vec::new(),
            capability: capability.map(str::to_string),
            invoke: Arc::new(action),
        });
        self
    }

    /// Declare a named sub-action reachable via `aliases`.
    pub fn named<I, S, F>(mut self, aliases: I, capability: Option<&str>, action: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&P, Option<&[String]>) -> ActionResult + Send + Sync + 'static,
    {
        self.actions.push(ActionDescriptor {
            role: ActionRole::Named,
            aliases: aliases.into_iter().map(Into::into).collect(),
            capability: capability.map(str::to_string),
            invoke: Arc::new(action),
        });
        self
    }

    /// Declare one callback reachable both as the default action and under
    /// explicit aliases. Registers two descriptors sharing the callback.
    pub fn default_named<I, S, F>(mut self, aliases: I, capability: Option<&str>, action: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&P, Option<&[String]>) -> ActionResult + Send + Sync + 'static,
    {
        let shared: Arc<ActionFn<P>> = Arc::new(action);
        self.actions.push(ActionDescriptor {
            role: ActionRole::Default,
            aliases: Vec::new(),
            capability: capability.map(str::to_string),
            invoke: Arc::clone(&shared),
        });
        self.actions.push(ActionDescriptor {
            role: ActionRole::Named,
            aliases: aliases.into_iter().map(Into::into).collect(),
            capability: capability.map(str::to_string),
            invoke: shared,
        });
        self
    }

    /// Declare the fallback that runs when the principal lacks the required
    /// capability.
    pub fn unauthorized<F>(mut self, action: F) -> Self
    where
        F: Fn(&P, Option<&[String]>) -> ActionResult + Send + Sync + 'static,
    {
        self.actions.push(ActionDescriptor {
            role: ActionRole::Unauthorized,
            aliases: Vec::new(),
            capability: None,
            invoke: Arc::new(action),
        });
        self
    }

    /// Declare the fallback that runs when the principal is not an eligible
    /// invocation context.
    pub fn ineligible<F>(mut self, action: F) -> Self
    where
        F: Fn(&P, Option<&[String]>) -> ActionResult + Send + Sync + 'static,
    {
        self.actions.push(ActionDescriptor {
            role: ActionRole::Ineligible,
            aliases: Vec::new(),
            capability: None,
            invoke: Arc::new(action),
        });
        self
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Option<String>, Vec<ActionDescriptor<P>>) {
        (self.primary_aliases, self.capability, self.actions)
    }
}
