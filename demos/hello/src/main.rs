//! Drives one faked election round through the two local primitives: the
//! role state machine and the term counter.
//!
//! Run with `RUST_LOG=debug cargo run -p hello` to see the machine's own
//! log lines interleaved with the round.

use std::sync::Arc;
use std::time::Duration;

use election::Role;
use election::StateMachine;
use election::Term;
use tracing_subscriber::EnvFilter;

fn init_logging(default_level: &str) {
    // Use env RUST_LOG to initialize log if present.
    // Otherwise, use the specified level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging("info");

    let term = Arc::new(Term::new());

    let sm = StateMachine::builder()
        .add_transition(Role::Follower, Role::Candidate)
        .add_transition(Role::Candidate, Role::Leader)
        .add_transition(Role::Candidate, Role::Follower)
        .add_transition(Role::Leader, Role::Follower)
        .init(Role::Follower)
        .build()?;

    // The surrounding protocol would start heartbeats here; the demo only
    // reports the role change.
    {
        let term = term.clone();
        sm.on(Role::Leader, move |role| {
            tracing::info!("became {} for {}, starting heartbeats", role, term);
        })?;
    }
    sm.on(Role::Follower, |role| {
        tracing::info!("stepping down to {}, stopping heartbeats", role);
    })?;

    // A new round: bump the term, campaign, win.
    let round = term.next_term();
    tracing::info!("initiating election round {}", round);

    sm.transition(Role::Candidate).await?.unwrap();
    sm.transition(Role::Leader).await?.unwrap();

    tracing::info!(
        "current role: {}, allowed next: {:?}",
        sm.current_state(),
        sm.allowed()
    );

    // A leader never campaigns while leading: the machine rejects it.
    let rejected = sm.transition(Role::Candidate).await?;
    tracing::info!("rejected as expected: {}", rejected.unwrap_err());

    // A peer reports a higher term: adopt it and step down.
    let peer_term = round + 3;
    if term.is_before(peer_term) {
        term.set(peer_term);
        sm.transition(Role::Follower).await?.unwrap();
    }

    tracing::info!(
        "final role: {}, local term: {}",
        sm.current_state(),
        term
    );

    tokio::time::sleep(Duration::from_millis(100)).await;

    Ok(())
}
