//! Windows process lookup using netstat and tasklist.
//!
//! Windows has no portable way to fetch another process's full command
//! line from the shell, so the image name from `tasklist` stands in for it.

use crate::error::Result;

use super::utils::{parse_port_column, run_command};

/// Windows-specific process lookup.
pub struct WindowsLookup;

impl WindowsLookup {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_pid(&self, port: u16) -> Result<Option<u32>> {
        let output = run_command("netstat", &["-ano", "-p", "TCP"]).await?;
        Ok(parse_netstat_pid(&output, port))
    }

    pub async fn command_line(&self, pid: u32) -> Result<Option<String>> {
        let filter = format!("PID eq {}", pid);
        let output = run_command("tasklist", &["/FI", &filter, "/FO", "CSV", "/NH"]).await?;
        Ok(parse_tasklist_image(&output))
    }
}

impl Default for WindowsLookup {
    fn default() -> Self {
        Self::new()
    }
}

/// PID of the first LISTENING row bound to `port`.
///
/// Example output:
/// ```text
///   Proto  Local Address          Foreign Address        State           PID
///   TCP    0.0.0.0:135            0.0.0.0:0              LISTENING       1020
///   TCP    127.0.0.1:3000         0.0.0.0:0              LISTENING       5432
/// ```
fn parse_netstat_pid(output: &str, port: u16) -> Option<u32> {
    output.lines().find_map(|line| {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 5 || parts[0] != "TCP" || parts[3] != "LISTENING" {
            return None;
        }
        if parse_port_column(parts[1]) != Some(port) {
            return None;
        }
        parts[4].parse().ok()
    })
}

/// Image name from `tasklist /FO CSV /NH` output.
///
/// Example output:
/// ```text
/// "node.exe","5432","Console","1","45,000 K"
/// ```
/// When no process matches, tasklist prints an `INFO:` line instead.
fn parse_tasklist_image(output: &str) -> Option<String> {
    let line = output.lines().map(str::trim).find(|l| l.starts_with('"'))?;
    let image = line.trim_start_matches('"').split("\",\"").next()?;
    (!image.is_empty()).then(|| image.to_string())
}
