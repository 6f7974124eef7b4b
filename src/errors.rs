//! Error types for the command routing framework.
//!
//! Three failure domains with different propagation rules: malformed
//! registrations surface to the registering caller, resolution failures
//! abort the current dispatch pass, and action failures are caught and
//! logged at the dispatch boundary.

use serde::{Deserialize, Serialize};

use crate::descriptor::ActionRole;

/// A handler failed registration-time validation.
///
/// Registration never partially succeeds: when one of these is returned,
/// nothing was appended to the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum MalformedHandlerError {
    #[error("handler '{handler}' declares no {role} action")]
    MissingRole { handler: String, role: ActionRole },

    #[error("handler '{handler}' declares more than one {role} action")]
    DuplicateRole { handler: String, role: ActionRole },

    #[error("handler '{handler}' declares a named action with no aliases")]
    NamedWithoutAliases { handler: String },

    #[error("handler registered with no primary aliases")]
    NoPrimaryAliases,
}

/// Dispatch-time failure to pick an action for a handler.
///
/// These indicate a configuration bug and abort the dispatch pass; they are
/// never downgraded to a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ResolutionError {
    #[error("handler '{handler}' has no default action for an empty invocation")]
    NoDefaultAction { handler: String },

    #[error("handler '{handler}' has no sub-action matching '{token}'")]
    UnknownSubcommand { handler: String, token: String },

    /// A gate tried to redirect to a fallback action that does not exist.
    /// Cannot happen for registry-validated handlers; only reachable when a
    /// descriptor was hand-built without going through registration.
    #[error("handler '{handler}' has no {role} fallback action")]
    MissingFallback { handler: String, role: ActionRole },
}

/// Top-level dispatch failure returned from the invocation entry point.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Action resolution failed partway through a pass. Handlers already
    /// processed in the pass stay committed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_handler_error_display() {
        let err = MalformedHandlerError::MissingRole {
            handler: "repair".to_string(),
            role: ActionRole::Unauthorized,
        };
        assert_eq!(
            err.to_string(),
            "handler 'repair' declares no unauthorized action"
        );
    }

    #[test]
    fn test_resolution_error_display() {
        let err = ResolutionError::UnknownSubcommand {
            handler: "repair".to_string(),
            token: "sideways".to_string(),
        };
        assert!(err.to_string().contains("sideways"));
    }
}
