use sysinfo::System;

use super::network::current_user;
use super::{run_command, UNKNOWN};

const NEVER: &str = "Never logged in";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginInfo {
    pub time: String,
    /// Remote address of the last login, when it came over the network.
    pub ip: Option<String>,
    pub uptime: String,
}

impl LoginInfo {
    pub(super) fn unknown() -> Self {
        Self {
            time: UNKNOWN.to_string(),
            ip: None,
            uptime: UNKNOWN.to_string(),
        }
    }
}

pub(super) fn collect_login() -> LoginInfo {
    let user = current_user();
    let (time, ip) = match run_command("last", &["-1", user.as_str()]) {
        Ok(output) => parse_last(&output),
        Err(err) => {
            tracing::debug!(error = %err, "last unavailable");
            (NEVER.to_string(), None)
        }
    };
    LoginInfo {
        time,
        ip,
        uptime: format_uptime(System::uptime()),
    }
}

/// Extracts the login time and remote address from `last -1 <user>` output.
fn parse_last(output: &str) -> (String, Option<String>) {
    let line = output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();
    if line.is_empty()
        || line.contains("never logged in")
        || line.starts_with("wtmp begins")
        || line.starts_with("wtmpx begins")
    {
        return (NEVER.to_string(), None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let ip = parts
        .get(2)
        .filter(|part| part.starts_with(|ch: char| ch.is_ascii_digit()) && part.contains('.'))
        .map(|part| part.to_string());
    let date_start = if ip.is_some() { 3 } else { 2 };

    let time = match parts.get(date_start..date_start + 4) {
        Some(date) => date.join(" "),
        None => line.to_string(),
    };
    (time, ip)
}

fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let minutes = seconds % 3_600 / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else {
        format!("{hours}h {minutes}m")
    }
}
