//! Property-based tests for the routing core.

#[cfg(test)]
mod tests {
    use crate::descriptor::{ActionResult, ActionRole, HandlerSpec};
    use crate::dispatcher::{trimmed_arguments, Dispatcher, HostContext};
    use crate::registry::CommandRegistry;
    use proptest::prelude::*;

    struct AllowAll;

    impl HostContext<String> for AllowAll {
        fn is_eligible(&self, _: &String) -> bool {
            true
        }
        fn has_capability(&self, _: &String, _: &str) -> bool {
            true
        }
    }

    fn noop(_: &String, _: Option<&[String]>) -> ActionResult {
        Ok(())
    }

    /// Generate arbitrary alias tokens.
    fn arb_alias() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{0,11}".prop_map(|s| s.to_string())
    }

    /// Generate arbitrary argument lists.
    fn arb_args() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-zA-Z0-9]{1,8}", 0..6)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Primary alias resolution ignores case: a handler registered
        /// under any alias is found under every casing of that alias.
        #[test]
        fn prop_primary_alias_resolution_ignores_case(alias in arb_alias()) {
            let mut registry = CommandRegistry::new();
            registry
                .register(
                    HandlerSpec::new([alias.clone()])
                        .default_action(None, noop)
                        .unauthorized(noop)
                        .ineligible(noop),
                )
                .unwrap();

            prop_assert_eq!(registry.resolve_handlers(&alias).len(), 1);
            prop_assert_eq!(registry.resolve_handlers(&alias.to_uppercase()).len(), 1);
        }

        /// Sub-action alias resolution ignores case and picks the Named role.
        #[test]
        fn prop_sub_alias_resolution_ignores_case(alias in arb_alias()) {
            let mut registry = CommandRegistry::new();
            registry
                .register(
                    HandlerSpec::new(["cmd"])
                        .default_action(None, noop)
                        .named([alias.clone()], Some("cap"), noop)
                        .unauthorized(noop)
                        .ineligible(noop),
                )
                .unwrap();

            let dispatcher = Dispatcher::new(AllowAll);
            let handler = &registry.handlers()[0];
            let args = vec![alias.to_uppercase()];
            let action = dispatcher.resolve_action(handler, &args).unwrap();
            prop_assert_eq!(action.role, ActionRole::Named);
        }

        /// Empty arguments always resolve to the Default action for any
        /// validly registered handler.
        #[test]
        fn prop_empty_args_resolve_to_default(aliases in prop::collection::vec(arb_alias(), 1..4)) {
            let mut registry = CommandRegistry::new();
            registry
                .register(
                    HandlerSpec::new(aliases)
                        .default_action(Some("cap"), noop)
                        .unauthorized(noop)
                        .ineligible(noop),
                )
                .unwrap();

            let dispatcher = Dispatcher::new(AllowAll);
            let action = dispatcher
                .resolve_action(&registry.handlers()[0], &[])
                .unwrap();
            prop_assert_eq!(action.role, ActionRole::Default);
        }

        /// Trimming drops exactly the leading token, and signals absence
        /// whenever fewer than two raw tokens were supplied.
        #[test]
        fn prop_trimming(args in arb_args()) {
            match trimmed_arguments(&args) {
                None => prop_assert!(args.len() < 2),
                Some(rest) => {
                    prop_assert!(args.len() >= 2);
                    prop_assert_eq!(rest, &args[1..]);
                }
            }
        }

        /// Under all-matches resolution, every handler sharing an alias is
        /// returned, in registration order.
        #[test]
        fn prop_all_matches_fire(alias in arb_alias(), extra in 1usize..5) {
            let mut registry = CommandRegistry::new();
            for _ in 0..extra {
                registry
                    .register(
                        HandlerSpec::new([alias.clone()])
                            .default_action(None, noop)
                            .unauthorized(noop)
                            .ineligible(noop),
                    )
                    .unwrap();
            }
            prop_assert_eq!(registry.resolve_handlers(&alias).len(), extra);
        }
    }
}
