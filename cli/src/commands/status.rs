//! Status command - one-shot snapshot of a port list.

use anyhow::Result;
use portpulse_core::{
    PortProbePort, ProcessLookupPort, Settings, StatusEntry, StatusService, SystemStatusService,
};

use crate::term::{self, Frame, Screen};

pub async fn run(ports: Vec<u16>, settings: Settings) -> Result<()> {
    let service = SystemStatusService::system(settings);
    let lines = collect(&service, &ports).await;

    let mut screen = Screen::stdout();
    screen.draw(&Frame::append(lines))?;
    Ok(())
}

/// One line per entry, in snapshot order.
pub fn render(entries: &[StatusEntry]) -> Vec<String> {
    entries.iter().map(line).collect()
}

fn line(entry: &StatusEntry) -> String {
    let label = term::state_label(entry.state, 4);
    if entry.state.is_busy() {
        format!("{:<6} {}  {}", entry.port, label, term::owner(entry.process.as_ref()))
    } else {
        format!("{:<6} {}", entry.port, label)
    }
}

/// Snapshot `ports` with an injected service.
pub async fn collect<P, L>(service: &StatusService<P, L>, ports: &[u16]) -> Vec<String>
where
    P: PortProbePort,
    L: ProcessLookupPort,
{
    render(&service.snapshot(ports).await)
}
