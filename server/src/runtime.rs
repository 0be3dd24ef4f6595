//! Process metadata read fresh on every request.

use std::time::Instant;

use anyhow::Context;
use serde::Serialize;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

const TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

pub const PLATFORM: &str = std::env::consts::OS;
pub const ARCH: &str = std::env::consts::ARCH;

/// Compiler the binary was built with, recorded by the build script.
pub const RUNTIME_VERSION: &str = env!("RUSTC_VERSION");

/// Current UTC time, e.g. `2025-08-01T12:34:56.789Z`.
pub fn timestamp() -> anyhow::Result<String> {
    OffsetDateTime::now_utc()
        .format(TIMESTAMP)
        .context("format timestamp")
}

/// Seconds since `started_at`, with sub-second precision.
pub fn uptime(started_at: Instant) -> f64 {
    started_at.elapsed().as_secs_f64()
}

/// Memory figures in bytes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    /// Resident set size of this process.
    pub rss: u64,
    #[serde(rename = "virtual")]
    pub virtual_memory: u64,
    pub system_total: u64,
    pub system_used: u64,
}

impl MemoryUsage {
    pub fn current() -> anyhow::Result<Self> {
        let pid = sysinfo::get_current_pid()
            .map_err(anyhow::Error::msg)
            .context("current pid")?;

        let mut system = System::new();
        system.refresh_memory();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );

        let process = system
            .process(pid)
            .with_context(|| format!("process {pid} not found"))?;

        Ok(Self {
            rss: process.memory(),
            virtual_memory: process.virtual_memory(),
            system_total: system.total_memory(),
            system_used: system.used_memory(),
        })
    }
}
