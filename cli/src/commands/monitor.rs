//! Start command - continuously monitor a port list and highlight changes.

use std::time::Duration;

use anyhow::Result;
use crossterm::style::Stylize;
use portpulse_core::{
    PortProbePort, PortState, PriorStates, ProcessLookupPort, Settings, StatusEntry,
    StatusService, SystemStatusService, Transition,
};

use crate::term::{self, Frame, Mode, Screen};

pub async fn run(ports: Vec<u16>, interval: Duration, settings: Settings) -> Result<()> {
    let mut monitor = Monitor::new(SystemStatusService::system(settings), ports, interval);
    let mut screen = Screen::stdout();
    term::run(&mut monitor, &mut screen, interval, term::shutdown_signal()).await
}

/// Redraws every port each tick, marking the ones that changed.
pub struct Monitor<P: PortProbePort, L: ProcessLookupPort> {
    service: StatusService<P, L>,
    ports: Vec<u16>,
    interval: Duration,
    prior: PriorStates,
}

impl<P: PortProbePort, L: ProcessLookupPort> Monitor<P, L> {
    pub fn new(service: StatusService<P, L>, ports: Vec<u16>, interval: Duration) -> Self {
        Self {
            service,
            ports,
            interval,
            prior: PriorStates::new(),
        }
    }

    fn header(&self) -> String {
        format!(
            "{} {} ports, every {}s {}",
            "PortPulse monitor".cyan().bold(),
            self.ports.len(),
            self.interval.as_secs(),
            term::hint("(Ctrl+C to stop)")
        )
    }
}

impl<P: PortProbePort, L: ProcessLookupPort> Mode for Monitor<P, L> {
    fn banner(&self) -> Option<String> {
        Some(format!("Starting monitor on {} ports...", self.ports.len()))
    }

    async fn tick(&mut self) -> Frame {
        let entries = self.service.snapshot(&self.ports).await;

        let mut lines = vec![self.header(), String::new()];
        for entry in &entries {
            let transition = self.prior.observe(entry.port, entry.state);
            lines.push(line(entry, transition));
        }

        Frame::redraw(lines)
    }
}

fn line(entry: &StatusEntry, transition: Transition) -> String {
    let owner = term::owner(entry.process.as_ref());
    match transition {
        Transition::BecameBusy => format!(
            "{} {:<6} {}  {}",
            "▲".red().bold(),
            entry.port,
            "now BUSY".red().bold(),
            owner
        ),
        Transition::BecameFree => format!(
            "{} {:<6} {}",
            "▼".green().bold(),
            entry.port,
            "now FREE".green().bold()
        ),
        Transition::Initial(PortState::Busy) | Transition::Unchanged(PortState::Busy) => format!(
            "{} {:<6} {}  {}",
            "●".red(),
            entry.port,
            term::state_label(PortState::Busy, 8),
            owner
        ),
        Transition::Initial(PortState::Free) | Transition::Unchanged(PortState::Free) => format!(
            "{} {:<6} {}",
            "○".dark_grey(),
            entry.port,
            term::state_label(PortState::Free, 8)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ScriptedProbe, StaticLookup};
    use portpulse_core::PortState::{Busy, Free};

    fn monitor(probe: ScriptedProbe, ports: &[u16]) -> Monitor<ScriptedProbe, StaticLookup> {
        Monitor::new(
            StatusService::new(probe, StaticLookup),
            ports.to_vec(),
            Duration::from_secs(5),
        )
    }

    fn port_lines(frame: &Frame) -> &[String] {
        // Header and blank line come first.
        &frame.lines[2..]
    }

    #[tokio::test]
    async fn test_first_tick_shows_steady_state() {
        let probe = ScriptedProbe::default().script(3000, &[Busy]);
        let mut monitor = monitor(probe, &[3000, 3001]);

        let frame = monitor.tick().await;
        assert!(frame.clear);

        let lines = port_lines(&frame);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("●"));
        assert!(lines[0].contains("PID 13000: cmd-3000"));
        assert!(lines[1].contains("○"));
        assert!(lines[1].contains("FREE"));
        assert!(!lines.iter().any(|l| l.contains("now")));
    }

    #[tokio::test]
    async fn test_transitions_highlighted() {
        let probe = ScriptedProbe::default()
            .script(3000, &[Free, Busy, Busy])
            .script(8080, &[Busy, Free]);
        let mut monitor = monitor(probe, &[3000, 8080]);

        monitor.tick().await;
        let second = monitor.tick().await;
        let lines = port_lines(&second);
        assert!(lines[0].contains("▲"));
        assert!(lines[0].contains("now BUSY"));
        assert!(lines[0].contains("cmd-3000"));
        assert!(lines[1].contains("▼"));
        assert!(lines[1].contains("now FREE"));

        let third = monitor.tick().await;
        let lines = port_lines(&third);
        assert!(lines[0].contains("●"));
        assert!(lines[1].contains("○"));
    }

    #[tokio::test]
    async fn test_header_describes_session() {
        let mut monitor = monitor(ScriptedProbe::default(), &[3000, 3001, 3002]);
        let frame = monitor.tick().await;
        assert!(frame.lines[0].contains("3 ports, every 5s"));
        assert_eq!(frame.lines.len(), 5);
    }
}
