mod cpu;
mod disk;
mod login;
mod memory;
mod network;
mod os;

use std::io;
use std::process::{Command, ExitStatus};
use std::thread::{self, ScopedJoinHandle};

use sysinfo::{CpuRefreshKind, System};
use thiserror::Error;

pub use cpu::CpuInfo;
pub use login::LoginInfo;
pub use memory::UsageInfo;
pub use network::NetworkInfo;
pub use os::OsInfo;

pub(crate) const UNKNOWN: &str = "unknown";

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` exited with {status}")]
    Status { command: String, status: ExitStatus },
    #[error("{what}: {source}")]
    Io {
        what: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("no {what} found")]
    Missing { what: &'static str },
}

/// Everything the report needs, gathered once per run.
#[derive(Clone, Debug)]
pub struct Facts {
    pub os: OsInfo,
    pub network: NetworkInfo,
    pub cpu: CpuInfo,
    pub memory: UsageInfo,
    pub disk: UsageInfo,
    pub login: LoginInfo,
}

/// Runs every collector. The ones that shell out run on their own threads;
/// the rest share one `System` snapshot on the calling thread.
///
/// Never fails: anything that cannot be determined comes back as a sentinel,
/// with the underlying [`CollectError`] logged.
pub fn collect_facts() -> Facts {
    thread::scope(|scope| {
        let dns = scope.spawn(network::dns_servers);
        let client_ip = scope.spawn(network::client_ip);
        let login = scope.spawn(login::collect_login);
        let sockets = scope.spawn(cpu::socket_count);
        let hypervisor = scope.spawn(cpu::hypervisor);

        let mut system = System::new();
        system.refresh_cpu_specifics(CpuRefreshKind::everything());
        system.refresh_memory();

        let os = os::collect_os();
        let machine_ip = network::machine_ip();
        let memory = memory::collect_memory(&system);
        let disk = disk::collect_disk();

        let network = NetworkInfo {
            hostname: os.hostname.clone(),
            machine_ip,
            client_ip: join_or(client_ip, "client ip", || network::NO_CLIENT.to_string()),
            dns: join_or(dns, "dns", Vec::new),
            user: network::current_user(),
        };
        let cpu = cpu::collect_cpu(
            &system,
            join_or(sockets, "sockets", || 1),
            join_or(hypervisor, "hypervisor", || cpu::BARE_METAL.to_string()),
        );
        let login = join_or(login, "login", LoginInfo::unknown);

        Facts {
            os,
            network,
            cpu,
            memory,
            disk,
            login,
        }
    })
}

fn join_or<T>(handle: ScopedJoinHandle<'_, T>, collector: &str, fallback: impl FnOnce() -> T) -> T {
    handle.join().unwrap_or_else(|_| {
        tracing::warn!(collector, "collector thread panicked");
        fallback()
    })
}

/// Runs a command and returns its stdout without the trailing newline.
pub(crate) fn run_command(program: &str, args: &[&str]) -> Result<String, CollectError> {
    let command = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    tracing::trace!(%command, "running");

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| CollectError::Spawn {
            command: command.clone(),
            source,
        })?;
    if !output.status.success() {
        return Err(CollectError::Status {
            command,
            status: output.status,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.trim_end_matches(['\r', '\n']).to_string())
}

/// Substitutes `sentinel` for a failed lookup.
pub(crate) fn or_sentinel(result: Result<String, CollectError>, fact: &str, sentinel: &str) -> String {
    match result {
        Ok(value) if !value.trim().is_empty() => value,
        Ok(_) => {
            tracing::debug!(fact, sentinel, "empty value");
            sentinel.to_string()
        }
        Err(err) => {
            tracing::warn!(fact, error = %err, "falling back to {sentinel}");
            sentinel.to_string()
        }
    }
}
