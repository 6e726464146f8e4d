use std::fmt;

use serde::Serialize;

use crate::bake::channel::ChannelKey;
use crate::overshoot::simulationtrace::SimulationTrace;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMessage {
    severity: Severity,
    text: String,
}

impl ReportMessage {
    pub fn new(severity: Severity, text: impl Into<String>) -> ReportMessage {
        ReportMessage { severity, text: text.into() }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ReportMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.text)
    }
}

/// 單條曲線的烘焙結果。
#[derive(Debug, Clone, Serialize)]
pub struct ChannelOutcome {
    key: ChannelKey,
    velocity: f64,
    removed_stale: usize,
    trace: SimulationTrace,
}

impl ChannelOutcome {
    pub fn new(key: ChannelKey, velocity: f64, removed_stale: usize, trace: SimulationTrace) -> ChannelOutcome {
        ChannelOutcome { key, velocity, removed_stale, trace }
    }

    pub fn key(&self) -> &ChannelKey {
        &self.key
    }

    /// 估計速度（尚未乘上 amplitude）。
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn removed_stale(&self) -> usize {
        self.removed_stale
    }

    pub fn trace(&self) -> &SimulationTrace {
        &self.trace
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BakeReport {
    outcomes: Vec<ChannelOutcome>,
    messages: Vec<ReportMessage>,
}

impl BakeReport {
    pub fn new() -> BakeReport {
        BakeReport::default()
    }

    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }

    pub fn outcomes(&self) -> &[ChannelOutcome] {
        &self.outcomes
    }

    pub fn messages(&self) -> &[ReportMessage] {
        &self.messages
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ReportMessage> {
        self.messages
            .iter()
            .filter(|m| m.severity() == Severity::Warning)
    }

    pub(crate) fn push_outcome(&mut self, outcome: ChannelOutcome) {
        self.outcomes.push(outcome);
    }

    pub(crate) fn push(&mut self, severity: Severity, text: impl Into<String>) {
        let message = ReportMessage::new(severity, text);
        match severity {
            Severity::Info => log::info!("{}", message.text()),
            Severity::Warning => log::warn!("{}", message.text()),
            Severity::Error => log::error!("{}", message.text()),
        }
        self.messages.push(message);
    }
}
