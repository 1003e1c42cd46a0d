use std::collections::BTreeSet;
use std::fs;

use sysinfo::System;

use super::{run_command, CollectError, UNKNOWN};

pub(super) const BARE_METAL: &str = "Bare Metal";
const CPUINFO: &str = "/proc/cpuinfo";

#[derive(Clone, Debug, PartialEq)]
pub struct CpuInfo {
    pub model: String,
    pub physical_cores: usize,
    pub logical_cores: usize,
    /// Clock of the first core; zero when the platform does not report one.
    pub frequency_ghz: f64,
    pub sockets: usize,
    pub hypervisor: String,
    pub load_1: f64,
    pub load_5: f64,
    pub load_15: f64,
}

impl CpuInfo {
    /// Load average as a share of logical cores; exceeds 100 when overloaded.
    pub fn load_percent(&self, load: f64) -> f64 {
        if self.logical_cores == 0 {
            return 0.0;
        }
        load / self.logical_cores as f64 * 100.0
    }

    pub fn usage_percent(&self) -> f64 {
        self.load_percent(self.load_1)
    }

    pub fn cores_label(&self) -> String {
        format!(
            "{} vCPU(s) / {} Socket(s)",
            self.physical_cores, self.sockets
        )
    }

    pub fn frequency_label(&self) -> String {
        if self.frequency_ghz > 0.0 {
            format!("{:.2} GHz", self.frequency_ghz)
        } else {
            UNKNOWN.to_string()
        }
    }
}

pub(super) fn collect_cpu(system: &System, sockets: usize, hypervisor: String) -> CpuInfo {
    let model = system
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());
    let logical_cores = system.cpus().len();
    let frequency_ghz = system
        .cpus()
        .first()
        .map(|cpu| mhz_to_ghz(cpu.frequency()))
        .unwrap_or(0.0);
    let load = System::load_average();

    CpuInfo {
        model,
        physical_cores: system.physical_core_count().unwrap_or(logical_cores),
        logical_cores,
        frequency_ghz,
        sockets,
        hypervisor,
        load_1: load.one,
        load_5: load.five,
        load_15: load.fifteen,
    }
}

fn mhz_to_ghz(mhz: u64) -> f64 {
    mhz as f64 / 1000.0
}

pub(super) fn socket_count() -> usize {
    let result = if cfg!(target_os = "macos") {
        run_command("sysctl", &["-n", "hw.packages"]).and_then(|out| {
            out.trim()
                .parse::<usize>()
                .map_err(|_| CollectError::Missing { what: "package count" })
        })
    } else {
        fs::read_to_string(CPUINFO)
            .map(|content| count_sockets(&content))
            .map_err(|source| CollectError::Io {
                what: CPUINFO,
                source,
            })
    };
    match result {
        Ok(count) if count > 0 => count,
        Ok(_) => 1,
        Err(err) => {
            tracing::debug!(error = %err, "assuming one socket");
            1
        }
    }
}

fn count_sockets(cpuinfo: &str) -> usize {
    cpuinfo
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            (key.trim() == "physical id").then(|| value.trim())
        })
        .collect::<BTreeSet<_>>()
        .len()
}

pub(super) fn hypervisor() -> String {
    let detected = if cfg!(target_os = "macos") {
        run_command("sysctl", &["-n", "kern.hv_vmm_present"])
            .map(|out| if out.trim() == "1" { "Virtual Machine".to_string() } else { String::new() })
    } else {
        // exits non-zero and prints "none" on bare metal
        run_command("systemd-detect-virt", &[])
    };
    match detected {
        Ok(name) => hypervisor_label(&name),
        Err(err) => {
            tracing::debug!(error = %err, "no hypervisor detected");
            BARE_METAL.to_string()
        }
    }
}

fn hypervisor_label(detected: &str) -> String {
    match detected.trim() {
        "" | "none" => BARE_METAL.to_string(),
        name => name.to_string(),
    }
}
