//! Command registry: registration-time validation and handler resolution.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::descriptor::{ActionRole, HandlerDescriptor, HandlerSpec};
use crate::errors::MalformedHandlerError;

/// How the registry resolves an inbound command name to handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionMode {
    /// Every handler whose primary aliases contain the command name is
    /// dispatched, in registration order. This is the legacy behavior: two
    /// handlers registered under the same alias both fire for one
    /// invocation.
    #[default]
    AllMatches,
    /// Only the most-recently-registered matching handler is dispatched.
    SingleMatch,
}

/// Owns the registered handler descriptors.
///
/// Registration is expected to happen during a startup phase; dispatch only
/// reads. The registry performs no interior locking; a host that registers
/// after dispatch has begun must supply its own guard.
pub struct CommandRegistry<P> {
    handlers: Vec<HandlerDescriptor<P>>,
    resolution: ResolutionMode,
}

impl<P> CommandRegistry<P> {
    /// Create a registry with the legacy all-matches-fire resolution.
    pub fn new() -> Self {
        Self::with_resolution(ResolutionMode::AllMatches)
    }

    pub fn with_resolution(resolution: ResolutionMode) -> Self {
        Self {
            handlers: Vec::new(),
            resolution,
        }
    }

    pub fn resolution(&self) -> ResolutionMode {
        self.resolution
    }

    /// Validate a handler spec and append its descriptor.
    ///
    /// Checks that the spec declares exactly one Default, exactly one
    /// Unauthorized, and exactly one Ineligible action, and that every
    /// Named action carries at least one alias. On any violation nothing is
    /// appended and the error names the offending role.
    pub fn register(&mut self, spec: HandlerSpec<P>) -> Result<(), MalformedHandlerError> {
        let (primary_aliases, capability, actions) = spec.into_parts();

        if primary_aliases.is_empty() {
            return Err(MalformedHandlerError::NoPrimaryAliases);
        }
        let name = primary_aliases[0].clone();

        for role in [
            ActionRole::Default,
            ActionRole::Unauthorized,
            ActionRole::Ineligible,
        ] {
            match actions.iter().filter(|a| a.role == role).count() {
                0 => {
                    return Err(MalformedHandlerError::MissingRole {
                        handler: name,
                        role,
                    })
                }
                1 => {}
                _ => {
                    return Err(MalformedHandlerError::DuplicateRole {
                        handler: name,
                        role,
                    })
                }
            }
        }

        if actions
            .iter()
            .any(|a| a.role == ActionRole::Named && a.aliases.is_empty())
        {
            return Err(MalformedHandlerError::NamedWithoutAliases { handler: name });
        }

        debug!(
            "registered command handler '{}' ({} aliases, {} actions)",
            name,
            primary_aliases.len(),
            actions.len()
        );

        self.handlers.push(HandlerDescriptor {
            primary_aliases,
            capability,
            actions,
        });

        Ok(())
    }

    /// Resolve the handlers that should run for an inbound command name.
    ///
    /// Under [`ResolutionMode::AllMatches`] this returns every matching
    /// descriptor in registration order; under
    /// [`ResolutionMode::SingleMatch`] at most the last-registered match.
    pub fn resolve_handlers(&self, command: &str) -> Vec<&HandlerDescriptor<P>> {
        let mut matches: Vec<&HandlerDescriptor<P>> = self
            .handlers
            .iter()
            .filter(|h| h.matches_command(command))
            .collect();
        if self.resolution == ResolutionMode::SingleMatch && matches.len() > 1 {
            matches.drain(..matches.len() - 1);
        }
        matches
    }

    /// All registered handlers in registration order.
    pub fn handlers(&self) -> &[HandlerDescriptor<P>] {
        &self.handlers
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// True when some handler is reachable under `command`.
    pub fn has_command(&self, command: &str) -> bool {
        self.handlers.iter().any(|h| h.matches_command(command))
    }

    /// Every primary alias of every handler, in registration order. This is
    /// what the host command-input source should associate with this
    /// registry as their executor.
    pub fn known_aliases(&self) -> Vec<&str> {
        self.handlers
            .iter()
            .flat_map(|h| h.primary_aliases.iter().map(String::as_str))
            .collect()
    }
}

impl<P> Default for CommandRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}
