use std::fs;
use std::net::{IpAddr, UdpSocket};

use super::{or_sentinel, run_command, CollectError, UNKNOWN};

pub(super) const NO_CLIENT: &str = "Not connected";
const LOCAL_SESSION: &str = "Local Session";
const NO_IP: &str = "No IP found";
const MAX_DNS_SERVERS: usize = 3;
const RESOLV_CONF: &str = "/etc/resolv.conf";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkInfo {
    pub hostname: String,
    pub machine_ip: String,
    pub client_ip: String,
    pub dns: Vec<String>,
    pub user: String,
}

/// Address of the interface that carries the default route. Connecting a UDP
/// socket only selects a route, nothing is sent.
pub(super) fn machine_ip() -> String {
    or_sentinel(outbound_ipv4(), "machine ip", NO_IP)
}

fn outbound_ipv4() -> Result<String, CollectError> {
    let io_err = |source| CollectError::Io {
        what: "route lookup",
        source,
    };
    let socket = UdpSocket::bind("0.0.0.0:0").map_err(io_err)?;
    socket.connect("192.0.2.1:9").map_err(io_err)?;
    match socket.local_addr().map_err(io_err)?.ip() {
        IpAddr::V4(ip) if !ip.is_loopback() && !ip.is_unspecified() => Ok(ip.to_string()),
        _ => Err(CollectError::Missing { what: "ipv4 address" }),
    }
}

pub(super) fn client_ip() -> String {
    if let Some(ip) = std::env::var("SSH_CLIENT").ok().as_deref().and_then(ssh_client_ip) {
        return ip;
    }
    match run_command("who", &["am", "i"]) {
        Ok(output) => parse_who_am_i(&output),
        Err(err) => {
            tracing::debug!(error = %err, "who am i unavailable");
            NO_CLIENT.to_string()
        }
    }
}

fn ssh_client_ip(var: &str) -> Option<String> {
    var.split_whitespace().next().map(str::to_string)
}

fn parse_who_am_i(output: &str) -> String {
    if output.trim().is_empty() {
        return NO_CLIENT.to_string();
    }
    let host = output
        .find('(')
        .zip(output.find(')'))
        .filter(|(start, end)| end > start)
        .map(|(start, end)| &output[start + 1..end]);
    match host {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => LOCAL_SESSION.to_string(),
    }
}

/// Up to three distinct resolvers, in configuration order.
pub(super) fn dns_servers() -> Vec<String> {
    let result = if cfg!(target_os = "macos") {
        run_command("scutil", &["--dns"]).map(|output| parse_scutil(&output))
    } else {
        fs::read_to_string(RESOLV_CONF)
            .map(|content| parse_resolv_conf(&content))
            .map_err(|source| CollectError::Io {
                what: RESOLV_CONF,
                source,
            })
    };
    result.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "no dns servers");
        Vec::new()
    })
}

fn parse_resolv_conf(content: &str) -> Vec<String> {
    let servers = content.lines().filter_map(|line| {
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("nameserver"), Some(addr)) => Some(addr),
            _ => None,
        }
    });
    first_distinct(servers)
}

fn parse_scutil(output: &str) -> Vec<String> {
    let servers = output.lines().filter_map(|line| {
        let (key, value) = line.split_once(':')?;
        (key.trim() == "nameserver[0]").then(|| value.trim())
    });
    first_distinct(servers)
}

fn first_distinct<'a>(servers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(MAX_DNS_SERVERS);
    for server in servers.filter(|server| !server.is_empty()) {
        if out.len() == MAX_DNS_SERVERS {
            break;
        }
        if !out.iter().any(|seen| seen == server) {
            out.push(server.to_string());
        }
    }
    out
}

pub(super) fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| UNKNOWN.to_string())
}
