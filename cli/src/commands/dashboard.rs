//! Dashboard command - refreshing table over the default port set.

use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::style::Stylize;
use portpulse_core::config::{dashboard_ports, DASHBOARD_COMMAND_WIDTH};
use portpulse_core::{
    tally, PortProbePort, ProcessLookupPort, Settings, StatusEntry, StatusService,
    SystemStatusService,
};

use crate::term::{self, Frame, Mode, Screen};

pub async fn run(ports: &[u16], interval: Duration, settings: Settings) -> Result<()> {
    let mut dashboard = Dashboard::new(SystemStatusService::system(settings), ports, interval);
    let mut screen = Screen::stdout();
    term::run(&mut dashboard, &mut screen, interval, term::shutdown_signal()).await
}

/// Full status table, redrawn every tick. No transition tracking.
pub struct Dashboard<P: PortProbePort, L: ProcessLookupPort> {
    service: StatusService<P, L>,
    ports: Vec<u16>,
    interval: Duration,
}

impl<P: PortProbePort, L: ProcessLookupPort> Dashboard<P, L> {
    /// Only the first 20 of `ports` are shown.
    pub fn new(service: StatusService<P, L>, ports: &[u16], interval: Duration) -> Self {
        Self {
            service,
            ports: dashboard_ports(ports),
            interval,
        }
    }

    pub fn ports(&self) -> &[u16] {
        &self.ports
    }
}

impl<P: PortProbePort, L: ProcessLookupPort> Mode for Dashboard<P, L> {
    async fn tick(&mut self) -> Frame {
        let entries = self.service.snapshot(&self.ports).await;
        Frame::redraw(table(&entries, self.interval))
    }
}

fn table(entries: &[StatusEntry], interval: Duration) -> Vec<String> {
    let mut lines = vec![
        format!("{}", "PortPulse dashboard".cyan().bold()),
        String::new(),
        format!("{:<7} {:<6} {}", "PORT", "STATUS", "PROCESS")
            .yellow()
            .bold()
            .to_string(),
        "-".repeat(16 + DASHBOARD_COMMAND_WIDTH),
    ];

    for entry in entries {
        let process = match entry.command() {
            Some(command) => term::truncate(command, DASHBOARD_COMMAND_WIDTH),
            None if entry.state.is_busy() => term::hint("?"),
            None => term::hint("-"),
        };
        lines.push(format!(
            "{:<7} {} {}",
            entry.port,
            term::state_label(entry.state, 6),
            process
        ));
    }

    let (busy, free) = tally(entries);
    lines.push(String::new());
    lines.push(format!(
        "{} busy  {} free",
        busy.to_string().red().bold(),
        free.to_string().green().bold()
    ));
    lines.push(term::hint(&format!(
        "Updated {} | refresh every {}s | Ctrl+C to quit",
        Local::now().format("%H:%M:%S"),
        interval.as_secs()
    )));
    lines
}
