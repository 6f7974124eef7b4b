//! Wires the canonical repair/msgtoggle handlers against a toy host and
//! walks through the gating paths.

use std::collections::HashSet;

use command_router::{CommandRegistry, Dispatcher, HandlerSpec, HostContext};

/// Toy principal: either an interactive player or the console.
#[derive(Debug, Clone)]
enum Actor {
    Player { name: String, caps: HashSet<String> },
    Console,
}

impl Actor {
    fn player(name: &str, caps: &[&str]) -> Self {
        Actor::Player {
            name: name.to_string(),
            caps: caps.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Actor::Player { name, .. } => name,
            Actor::Console => "console",
        }
    }
}

struct DemoHost;

impl HostContext<Actor> for DemoHost {
    fn is_eligible(&self, actor: &Actor) -> bool {
        matches!(actor, Actor::Player { .. })
    }

    fn has_capability(&self, actor: &Actor, capability: &str) -> bool {
        match actor {
            Actor::Player { caps, .. } => caps.contains(capability),
            Actor::Console => false,
        }
    }
}

fn main() {
    let mut registry = CommandRegistry::new();

    registry
        .register(
            HandlerSpec::new(["repair", "fix", "erepair", "efix"])
                .capability("infrastructure.repair")
                .default_named(["hand"], Some("infrastructure.repair"), |actor: &Actor, _| {
                    println!("  -> repaired the item in {}'s hand", actor.name());
                    Ok(())
                })
                .named(["all"], Some("infrastructure.repair.all"), |actor: &Actor, _| {
                    println!("  -> repaired every item in {}'s inventory", actor.name());
                    Ok(())
                })
                .unauthorized(|actor: &Actor, _| {
                    println!("  -> {}: you do not have permission to do that", actor.name());
                    Ok(())
                })
                .ineligible(|actor: &Actor, _| {
                    println!("  -> {}: only players can run this command", actor.name());
                    Ok(())
                }),
        )
        .expect("repair handler is well-formed");

    registry
        .register(
            HandlerSpec::new(["msgtoggle", "emsgtoggle"])
                .capability("infrastructure.chat.msgtoggle")
                .default_action(None, |actor: &Actor, _| {
                    println!("  -> toggled private messages for {}", actor.name());
                    Ok(())
                })
                .named(["on"], Some("infrastructure.chat.msgtoggle"), |actor: &Actor, _| {
                    println!("  -> private messages enabled for {}", actor.name());
                    Ok(())
                })
                .named(["off"], Some("infrastructure.chat.msgtoggle"), |actor: &Actor, _| {
                    println!("  -> private messages disabled for {}", actor.name());
                    Ok(())
                })
                .unauthorized(|actor: &Actor, _| {
                    println!("  -> {}: you do not have permission to do that", actor.name());
                    Ok(())
                })
                .ineligible(|actor: &Actor, _| {
                    println!("  -> {}: only players can run this command", actor.name());
                    Ok(())
                }),
        )
        .expect("msgtoggle handler is well-formed");

    let dispatcher = Dispatcher::new(DemoHost);

    let admin = Actor::player(
        "alice",
        &["infrastructure.repair", "infrastructure.repair.all"],
    );
    let newbie = Actor::player("bob", &["infrastructure.repair"]);
    let console = Actor::Console;

    let invocations: &[(&Actor, &str, &[&str])] = &[
        (&admin, "repair", &[]),
        (&admin, "fix", &["all"]),
        (&newbie, "repair", &["all", "sword"]),
        (&console, "repair", &[]),
        (&newbie, "msgtoggle", &["off"]),
    ];

    for (actor, command, args) in invocations {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        println!("{} runs /{} {}", actor.name(), command, args.join(" "));
        match dispatcher.on_command(&registry, actor, command, command, &args) {
            Ok(summary) => {
                for outcome in &summary.outcomes {
                    println!(
                        "     [{}] invoked {} action (gate: {:?})",
                        outcome.handler, outcome.invoked, outcome.gate
                    );
                }
                if !summary.handled() {
                    println!("     no handler matched, showing usage");
                }
            }
            Err(err) => println!("     dispatch failed: {err}"),
        }
    }
}
