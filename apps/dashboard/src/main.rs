//! dashboard — keeps a local copy of the spreading simulation in step with the
//! server, frame by frame.
//!
//! Each sync cycle asks the server for everything newer than the last merged
//! frame, appends it to `merged.csv`, writes the frame's snapshot and
//! refreshes the map description.  Cycles are driven by an adaptive timer and
//! by the user pressing Enter; both funnel through one channel into this
//! thread, so a cycle never starts while another is running.

mod args;
mod observer;

use std::io::BufRead;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sv_store::{DataLayout, FrameStore, load_reference};
use sv_sync::{CycleOutcome, PollSchedule, Synchronizer};
use sv_transport::{Command, TcpTransport};

use args::Args;
use observer::MapObserver;

// ── Triggers ──────────────────────────────────────────────────────────────────

enum Trigger {
    /// Poll now.
    User,
    Quit,
}

/// Forward stdin lines as triggers: `q`/`quit` ends the loop, anything else
/// polls immediately.
fn spawn_stdin_triggers(tx: Sender<Trigger>) {
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let trigger = match line.trim() {
                "q" | "quit" => Trigger::Quit,
                _ => Trigger::User,
            };
            if tx.send(trigger).is_err() {
                break;
            }
        }
    });
}

/// Block until the timer expires or a trigger arrives; further queued
/// triggers are coalesced into the same cycle.  Returns `false` on quit.
fn wait_for_trigger(rx: &Receiver<Trigger>, poll: &PollSchedule) -> bool {
    match rx.recv_timeout(poll.next_delay()) {
        Ok(Trigger::Quit) => return false,
        Ok(Trigger::User) | Err(RecvTimeoutError::Timeout) => {}
        Err(RecvTimeoutError::Disconnected) => return false,
    }
    while let Ok(trigger) = rx.try_recv() {
        if matches!(trigger, Trigger::Quit) {
            return false;
        }
    }
    true
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    // 1. Process-lifetime reference table.
    let reference = load_reference(&args.reference)
        .with_context(|| format!("loading reference table {}", args.reference.display()))?;

    // 2. Frame store with its frame-0 seed, independent of the server.
    let store = FrameStore::new(DataLayout::under(&args.data_dir), Arc::new(reference));
    let transport = TcpTransport::new(args.endpoint(), args.transport_config());
    let mut sync = Synchronizer::new(transport, store);
    sync.initialize().context("initializing frame store")?;
    info!(server = %args.endpoint(), data = %args.data_dir.display(), "dashboard ready");

    // 3. Ask the simulation to run.  Not fatal: the server may already be
    //    running, or come up later.
    if !args.no_start {
        if let Err(e) = sync.send_command(Command::Start) {
            warn!(error = %e, "could not send start; polling anyway");
        }
    }

    // 4. Poll loop.
    let mut observer = MapObserver::with_initial(sync.store());
    let mut poll = PollSchedule::new(args.poll_config());
    let (tx, rx) = mpsc::channel();
    spawn_stdin_triggers(tx.clone());
    // Holding a sender keeps the channel open after stdin closes.
    let _keepalive = tx;

    let mut cycles = 0u64;
    let result = loop {
        match sync.cycle(&mut observer) {
            Ok(outcome) => {
                if let CycleOutcome::Failed(e) = &outcome {
                    info!(error = %e, retry_in = ?poll.next_delay(), "server unavailable");
                }
                poll.record(&outcome);
            }
            Err(e) if e.is_fatal() => {
                break Err(anyhow::Error::new(e).context(
                    "server data does not match the reference table; check --reference",
                ));
            }
            Err(e) => {
                warn!(error = %e, "cycle abandoned");
                poll.slow_down();
            }
        }

        cycles += 1;
        if args.max_cycles.is_some_and(|max| cycles >= max) {
            break Ok(());
        }
        if !wait_for_trigger(&rx, &poll) {
            break Ok(());
        }
    };

    if args.stop_on_exit {
        if let Err(e) = sync.send_command(Command::Stop) {
            warn!(error = %e, "could not send stop");
        }
    }

    let shown = observer.current().map(|d| d.frame);
    info!(
        trend = %sync.state().trend(),
        shown_frame = ?shown,
        dataset_rows = sync.store().dataset_len(),
        "dashboard stopped"
    );
    result
}
