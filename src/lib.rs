//! Declarative command routing.
//!
//! Callers register command handlers, each exposing primary aliases, a
//! default action, zero or more named sub-actions, and two mandatory
//! fallback actions (for unauthorized principals and for ineligible
//! invocation contexts). At invocation time the framework resolves the
//! action from the command name and argument list, enforces eligibility and
//! capability checks against host-supplied predicates, and invokes the
//! resolved action with trimmed arguments.
//!
//! ```
//! use command_router::{CommandRegistry, Dispatcher, HandlerSpec, HostContext};
//!
//! struct Host;
//!
//! impl HostContext<String> for Host {
//!     fn is_eligible(&self, _player: &String) -> bool {
//!         true
//!     }
//!     fn has_capability(&self, _player: &String, _capability: &str) -> bool {
//!         true
//!     }
//! }
//!
//! let mut registry = CommandRegistry::new();
//! registry
//!     .register(
//!         HandlerSpec::new(["repair", "fix"])
//!             .default_named(["hand"], Some("repair"), |player, _args| {
//!                 println!("repairing {player}'s held item");
//!                 Ok(())
//!             })
//!             .named(["all"], Some("repair.all"), |player, _args| {
//!                 println!("repairing all of {player}'s items");
//!                 Ok(())
//!             })
//!             .unauthorized(|_, _| Ok(()))
//!             .ineligible(|_, _| Ok(())),
//!     )
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::new(Host);
//! let summary = dispatcher
//!     .on_command(&registry, &"steve".to_string(), "repair", "repair", &[])
//!     .unwrap();
//! assert!(summary.handled());
//! ```

pub mod descriptor;
pub mod dispatcher;
pub mod errors;
pub mod registry;

#[cfg(test)]
mod tests;

pub use descriptor::{
    ActionDescriptor, ActionFn, ActionResult, ActionRole, HandlerDescriptor, HandlerSpec,
};
pub use dispatcher::{
    trimmed_arguments, DispatchSummary, Dispatcher, GateResult, HandlerOutcome, HostContext,
};
pub use errors::{DispatchError, MalformedHandlerError, ResolutionError};
pub use registry::{CommandRegistry, ResolutionMode};
