use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::AgentId;

/// Agent-level transitions worth recording for replay and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TraceKind {
    /// Patrol started or resumed; `value` is the checkpoint.
    Patrol,
    /// Patrol advanced; `value` is the new checkpoint.
    Checkpoint,
    /// Target acquired; `value` is its id.
    Engage,
    /// Shot fired; `value` is the target id, or `u64::MAX` for a point.
    Fire,
    /// Attack dropped; `value` is 1 when patrol resumed.
    Disengage,
    Arrived,
    Destroyed,
}

impl TraceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TraceKind::Patrol => "patrol",
            TraceKind::Checkpoint => "checkpoint",
            TraceKind::Engage => "engage",
            TraceKind::Fire => "fire",
            TraceKind::Disengage => "disengage",
            TraceKind::Arrived => "arrived",
            TraceKind::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for TraceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub agent: AgentId,
    pub kind: TraceKind,
    pub value: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, agent: AgentId, kind: TraceKind) -> Self {
        Self {
            tick,
            agent,
            kind,
            value: 0,
        }
    }

    pub fn with_value(mut self, value: u64) -> Self {
        self.value = value;
        self
    }
}

/// Streaming consumer for trace events (debug overlays, replay files).
pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

impl TraceSink for Vec<TraceEvent> {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn kinds(&self) -> impl Iterator<Item = TraceKind> + '_ {
        self.events.iter().map(|e| e.kind)
    }

    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds().map(TraceKind::as_str)
    }

    pub fn for_agent(&self, agent: AgentId) -> impl Iterator<Item = &TraceEvent> + '_ {
        self.events.iter().filter(move |e| e.agent == agent)
    }
}

/// Per-agent trace routing: an optional in-memory log plus an optional sink.
///
/// The default tracer records nothing.
#[derive(Default)]
pub struct Tracer {
    log: Option<TraceLog>,
    sink: Option<Box<dyn TraceSink>>,
}

impl Tracer {
    pub fn recording() -> Self {
        Self {
            log: Some(TraceLog::default()),
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.log.is_some() || self.sink.is_some()
    }

    pub fn log(&self) -> Option<&TraceLog> {
        self.log.as_ref()
    }

    /// Take the recorded events, leaving an empty log behind.
    pub fn take_log(&mut self) -> Option<TraceLog> {
        self.log.as_mut().map(core::mem::take)
    }

    pub fn emit(&mut self, event: TraceEvent) {
        if let Some(log) = self.log.as_mut() {
            log.events.push(event);
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.emit(event);
        }
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("events", &self.log.as_ref().map(|l| l.events.len()))
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
