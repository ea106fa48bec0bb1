//! Watch command - report state changes of a single port.

use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::style::Stylize;
use portpulse_core::{
    PortProbePort, PortState, PriorStates, ProcessLookupPort, Settings, StatusService,
    SystemStatusService, Transition,
};

use crate::term::{self, Frame, Mode, Screen};

pub async fn run(port: u16, interval: Duration, settings: Settings) -> Result<()> {
    let mut watch = Watch::new(SystemStatusService::system(settings), port, interval);
    let mut screen = Screen::stdout();
    term::run(&mut watch, &mut screen, interval, term::shutdown_signal()).await
}

/// Prints a line whenever the watched port changes state.
pub struct Watch<P: PortProbePort, L: ProcessLookupPort> {
    service: StatusService<P, L>,
    port: u16,
    interval: Duration,
    prior: PriorStates,
}

impl<P: PortProbePort, L: ProcessLookupPort> Watch<P, L> {
    pub fn new(service: StatusService<P, L>, port: u16, interval: Duration) -> Self {
        Self {
            service,
            port,
            interval,
            prior: PriorStates::new(),
        }
    }
}

impl<P: PortProbePort, L: ProcessLookupPort> Mode for Watch<P, L> {
    fn banner(&self) -> Option<String> {
        Some(format!(
            "{} port {} every {}s {}",
            "Watching".cyan().bold(),
            self.port,
            self.interval.as_secs(),
            term::hint("(Ctrl+C to stop)")
        ))
    }

    async fn tick(&mut self) -> Frame {
        let entry = self.service.check(self.port).await;
        let transition = self.prior.observe(self.port, entry.state);

        // The first observation counts as a change from "unknown".
        let verb = match transition {
            Transition::Unchanged(_) => return Frame::default(),
            Transition::Initial(_) => "is",
            Transition::BecameBusy | Transition::BecameFree => "is now",
        };

        let timestamp = Local::now().format("%H:%M:%S").to_string();
        let mut line = format!(
            "{} Port {} {} {}",
            term::hint(&format!("[{}]", timestamp)),
            self.port,
            verb,
            term::state_label(entry.state, 0)
        );
        if entry.state == PortState::Busy {
            line.push_str(&format!("  ({})", term::owner(entry.process.as_ref())));
        }

        Frame::append(vec![line])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ScriptedProbe, StaticLookup};

    fn watch(states: &[PortState]) -> Watch<ScriptedProbe, StaticLookup> {
        let probe = ScriptedProbe::default().script(3000, states);
        Watch::new(
            StatusService::new(probe, StaticLookup),
            3000,
            Duration::from_secs(2),
        )
    }

    #[tokio::test]
    async fn test_prints_only_on_change() {
        use portpulse_core::PortState::{Busy, Free};
        let mut watch = watch(&[Free, Busy, Busy, Free]);

        let mut frames = Vec::new();
        for _ in 0..4 {
            frames.push(watch.tick().await);
        }

        let printed: usize = frames.iter().map(|f| f.lines.len()).sum();
        assert_eq!(printed, 3);

        assert!(frames[0].lines[0].contains("Port 3000 is"));
        assert!(frames[0].lines[0].contains("FREE"));
        assert!(frames[1].lines[0].contains("is now"));
        assert!(frames[1].lines[0].contains("BUSY"));
        assert!(frames[1].lines[0].contains("PID 13000: cmd-3000"));
        assert!(frames[2].is_empty());
        assert!(frames[3].lines[0].contains("FREE"));
    }

    #[tokio::test]
    async fn test_initial_busy_state_is_reported() {
        let mut watch = watch(&[PortState::Busy]);

        let first = watch.tick().await;
        let second = watch.tick().await;

        assert_eq!(first.lines.len(), 1);
        assert!(first.lines[0].contains("BUSY"));
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn test_watch_never_clears_screen() {
        let mut watch = watch(&[PortState::Free]);
        assert!(!watch.tick().await.clear);
    }
}
