use std::process::Stdio;

use tokio::process::Command;

use crate::error::{Error, Result};

/// Run an inspection utility and return its stdout.
///
/// A non-zero exit status is not an error here: `lsof` and `ps` exit 1
/// when nothing matches, which callers read as empty output. Failing to
/// spawn the program at all is an error. The child is killed if the
/// returned future is dropped.
pub async fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| Error::CommandFailed(format!("Failed to run {}: {}", program, e)))?;

    String::from_utf8(output.stdout)
        .map_err(|e| Error::ParseError(format!("Invalid UTF-8 in {} output: {}", program, e)))
}

/// Extract the port from an `address:port` column.
///
/// Handles multiple address formats:
/// - IPv4: "127.0.0.1:3000" or "*:8080"
/// - IPv6: "\[::1]:3000" or "\[::ffff:127.0.0.1]:8080"
#[cfg_attr(not(any(target_os = "linux", target_os = "windows")), allow(dead_code))]
pub fn parse_port_column(address: &str) -> Option<u16> {
    let port_str = if address.starts_with('[') {
        let bracket_end = address.find(']')?;
        address.get(bracket_end + 1..)?.strip_prefix(':')?
    } else {
        let last_colon = address.rfind(':')?;
        &address[last_colon + 1..]
    };
    port_str.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipv4_port() {
        assert_eq!(parse_port_column("127.0.0.1:3000"), Some(3000));
        assert_eq!(parse_port_column("*:8080"), Some(8080));
        assert_eq!(parse_port_column("0.0.0.0:135"), Some(135));
    }

    #[test]
    fn test_parse_ipv6_port() {
        assert_eq!(parse_port_column("[::1]:3000"), Some(3000));
        assert_eq!(parse_port_column("[::ffff:127.0.0.1]:63342"), Some(63342));
        assert_eq!(parse_port_column("[::]"), None);
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_port_column("no-port-here"), None);
        assert_eq!(parse_port_column("127.0.0.1:http"), None);
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let result = run_command("portpulse-definitely-not-a-binary", &[]).await;
        assert!(matches!(result, Err(Error::CommandFailed(_))));
    }
}
