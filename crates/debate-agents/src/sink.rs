//! Output sinks for live debate progress.
//!
//! The controller reports every step to an injected `DebateSink` instead of
//! printing directly, so the CLI can stream to stdout while tests capture
//! events in memory.

use coordination::debate::{ArgumentRecord, Verdict};

pub trait DebateSink: Send + Sync {
    fn debate_started(&self, _topic: &str) {}
    fn argument(&self, _record: &ArgumentRecord) {}
    fn memory_updated(&self, _summary: &str) {}
    fn judging(&self) {}
    fn verdict(&self, _verdict: &Verdict) {}
}

/// Prints the live transcript to stdout.
pub struct ConsoleSink;

impl DebateSink for ConsoleSink {
    fn debate_started(&self, topic: &str) {
        println!("Starting debate between Scientist and Philosopher on: {topic}\n");
    }

    fn argument(&self, record: &ArgumentRecord) {
        println!("--- Round {} ---", record.round);
        println!("{}", record.display_line());
    }

    fn judging(&self) {
        println!("\n[Judge] Reviewing debate...");
    }

    fn verdict(&self, verdict: &Verdict) {
        println!("{}", verdict.summary);
        println!("\nWinner: {}", verdict.winner);
    }
}

/// Discards everything.
pub struct SilentSink;

impl DebateSink for SilentSink {}
