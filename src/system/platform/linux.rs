use std::fs;
use std::os::unix::fs::MetadataExt;

use crate::error::Error;
use crate::model::record::ProcessRecord;

/// Walks /proc and reads one record per live pid.
///
/// A pid that vanishes mid-scan (stat read fails) is skipped; only a
/// failure to enumerate /proc itself fails the whole sample.
pub fn sample_all() -> Result<Vec<ProcessRecord>, Error> {
    let page_size = page_size();
    let mut records = Vec::new();

    for dir_entry in fs::read_dir("/proc")? {
        let Ok(dir_entry) = dir_entry else { continue };
        let Some(pid) = dir_entry
            .file_name()
            .to_str()
            .and_then(|name| name.parse::<u32>().ok())
        else {
            continue;
        };
        if let Some(record) = read_process(pid, page_size) {
            records.push(record);
        }
    }

    Ok(records)
}

fn read_process(pid: u32, page_size: u64) -> Option<ProcessRecord> {
    let stat = fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
    let owner_user_id = fs::metadata(format!("/proc/{pid}"))
        .map(|meta| meta.uid())
        .unwrap_or(0);
    parse_stat(pid, &stat, owner_user_id, page_size)
}

/// Parses /proc/<pid>/stat. Linux procfs does not expose a syscall
/// count or split out copy-on-write faults, so those counters read 0;
/// majflt stands in for inode-backed faults and minflt for zero-fill.
fn parse_stat(pid: u32, stat: &str, owner_user_id: u32, page_size: u64) -> Option<ProcessRecord> {
    // comm may contain spaces and parens, so find the closing )
    let open = stat.find('(')?;
    let close = stat.rfind(')')?;
    let name = stat.get(open + 1..close)?.to_string();

    let fields: Vec<&str> = stat[close + 1..].split_whitespace().collect();
    // Fields after comm: state(0) ppid(1) pgrp(2) session(3) tty_nr(4)
    // tpgid(5) flags(6) minflt(7) cminflt(8) majflt(9) cmajflt(10)
    // utime(11) stime(12) cutime(13) cstime(14) priority(15) nice(16)
    // num_threads(17) itrealvalue(18) starttime(19) vsize(20) rss(21)
    let state = state_label(fields.first()?).to_string();
    let zero_faults: u64 = fields.get(7)?.parse().ok()?;
    let inode_faults: u64 = fields.get(9)?.parse().ok()?;
    let utime: u64 = fields.get(11)?.parse().ok()?;
    let stime: u64 = fields.get(12)?.parse().ok()?;
    let priority_class: i64 = fields.get(15)?.parse().ok()?;
    let virtual_size: u64 = fields.get(20)?.parse().ok()?;
    let rss_pages: i64 = fields.get(21)?.parse().ok()?;

    Some(ProcessRecord {
        pid,
        scheduled_ticks: utime + stime,
        name,
        state,
        priority_class,
        owner_user_id,
        virtual_size,
        resident_size: rss_pages.max(0) as u64 * page_size,
        syscall_count: 0,
        inode_faults,
        zero_faults,
        cow_faults: 0,
    })
}

fn state_label(code: &str) -> &'static str {
    match code {
        "R" => "Running",
        "S" => "Sleeping",
        "D" => "DiskSleep",
        "Z" => "Zombie",
        "T" => "Stopped",
        "t" => "Traced",
        "I" => "Idle",
        "X" | "x" => "Dead",
        _ => "Unknown",
    }
}

fn page_size() -> u64 {
    // SAFETY: sysconf(_SC_PAGESIZE) takes no pointers; -1 on error is
    // handled by the > 0 check.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 { size as u64 } else { 4096 }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT: &str = "1234 (fancy (name)) S 1 1234 1234 0 -1 4194304 812 0 45 0 \
                        150 75 0 0 20 0 1 0 9999 123456789 2048 18446744073709551615 \
                        0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0";

    #[test]
    fn parses_stat_with_parenthesized_name() {
        let record = parse_stat(1234, STAT, 1000, 4096).expect("stat should parse");
        assert_eq!(record.pid, 1234);
        assert_eq!(record.name, "fancy (name)");
        assert_eq!(record.state, "Sleeping");
        assert_eq!(record.scheduled_ticks, 150 + 75);
        assert_eq!(record.priority_class, 20);
        assert_eq!(record.owner_user_id, 1000);
        assert_eq!(record.zero_faults, 812);
        assert_eq!(record.inode_faults, 45);
        assert_eq!(record.virtual_size, 123456789);
        assert_eq!(record.resident_size, 2048 * 4096);
        assert_eq!(record.syscall_count, 0);
        assert_eq!(record.cow_faults, 0);
    }

    #[test]
    fn truncated_stat_is_rejected() {
        assert!(parse_stat(1, "1 (short) R 1 1", 0, 4096).is_none());
    }

    #[test]
    fn read_own_process() {
        let record = read_process(std::process::id(), 4096).expect("own stat should be readable");
        assert!(!record.name.is_empty());
        assert!(record.resident_size > 0);
    }
}
