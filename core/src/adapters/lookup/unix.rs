//! Unix process lookup using lsof and ps.
//!
//! Uses the following system commands:
//! - `lsof -nP -iTCP:<port> -sTCP:LISTEN -t` to find the listening PID
//! - `ss -Htlnp sport = :<port>` as a fallback on Linux when lsof finds nothing
//! - `ps -p <pid> -o command=` to fetch the command line

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::Result;

use super::utils::{parse_port_column, run_command};

/// Unix process lookup.
pub struct UnixLookup;

impl UnixLookup {
    pub fn new() -> Self {
        Self
    }

    /// Find the listening PID with lsof.
    ///
    /// Flags explained:
    /// -n   don't resolve host names
    /// -P   don't resolve port names
    /// -t   terse output, one PID per line
    async fn lsof_pid(&self, port: u16) -> Result<Option<u32>> {
        let selector = format!("-iTCP:{}", port);
        let output = run_command("lsof", &["-nP", &selector, "-sTCP:LISTEN", "-t"]).await?;
        Ok(parse_lsof_pids(&output))
    }

    /// Find the listening PID with ss.
    ///
    /// Flags explained:
    /// -H   suppress header line
    /// -t   TCP sockets only
    /// -l   listening sockets only
    /// -n   don't resolve service names
    /// -p   show process using socket
    #[cfg(target_os = "linux")]
    async fn ss_pid(&self, port: u16) -> Result<Option<u32>> {
        let filter = format!("sport = :{}", port);
        let output = run_command("ss", &["-Htlnp", &filter]).await?;
        Ok(parse_ss_pid(&output, port))
    }

    pub async fn find_pid(&self, port: u16) -> Result<Option<u32>> {
        let lsof = self.lsof_pid(port).await;

        #[cfg(target_os = "linux")]
        if !matches!(lsof, Ok(Some(_))) {
            if let Err(e) = &lsof {
                debug!(port = port, error = %e, "lsof unavailable, trying ss");
            }
            return self.ss_pid(port).await;
        }

        lsof
    }

    pub async fn command_line(&self, pid: u32) -> Result<Option<String>> {
        let pid_arg = pid.to_string();
        let output = run_command("ps", &["-p", &pid_arg, "-o", "command="]).await?;
        let command = parse_ps_command(&output);
        if command.is_none() {
            debug!(pid = pid, "Process exited before its command line was read");
        }
        Ok(command)
    }
}

impl Default for UnixLookup {
    fn default() -> Self {
        Self::new()
    }
}

/// First PID in `lsof -t` output.
///
/// Expected lsof output format:
/// ```text
/// 34805
/// 34811
/// ```
fn parse_lsof_pids(output: &str) -> Option<u32> {
    output
        .lines()
        .map(str::trim)
        .find_map(|line| line.parse().ok())
}

/// First PID listening on `port` in ss output.
///
/// Expected ss output format:
/// ```text
/// LISTEN 0 511 127.0.0.1:3000 0.0.0.0:* users:(("node",pid=53561,fd=22))
/// ```
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_ss_pid(output: &str, port: u16) -> Option<u32> {
    static USERS: OnceLock<Regex> = OnceLock::new();
    let users = USERS.get_or_init(|| {
        Regex::new(r#"users:\(\(".*?",pid=(\d+),fd=\d+\)"#).expect("valid ss regex")
    });

    output.lines().find_map(|line| {
        // [State] [Recv-Q] [Send-Q] [Local Address:Port] [Peer Address:Port] [Process]
        let components: Vec<&str> = line.split_whitespace().collect();
        if components.len() < 6 || parse_port_column(components[3]) != Some(port) {
            return None;
        }
        // Process names may contain spaces, so match the whole line.
        users.captures(line)?[1].parse().ok()
    })
}

/// Command line from `ps -o command=` output; `None` when empty.
fn parse_ps_command(output: &str) -> Option<String> {
    let command = output.trim();
    (!command.is_empty()).then(|| command.to_string())
}
