/// One process's raw counter readings at a single sampling instant.
///
/// Counters (`scheduled_ticks`, `syscall_count`, the fault counts) are
/// cumulative since process start and non-decreasing while the process
/// lives. Descriptive fields are replaced wholesale each sample.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessRecord {
    pub pid: u32,
    /// Cumulative scheduling quanta granted to the process.
    pub scheduled_ticks: u64,
    pub name: String,
    pub state: String,
    pub priority_class: i64,
    pub owner_user_id: u32,
    pub virtual_size: u64,
    pub resident_size: u64,
    pub syscall_count: u64,
    pub inode_faults: u64,
    pub zero_faults: u64,
    pub cow_faults: u64,
}

/// Icon class for the first table column, derived from
/// `priority_class` alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriorityBucket {
    High,
    Normal,
    Low,
    Other,
}

impl PriorityBucket {
    /// Buckets a Linux-style priority value: 20 is the default
    /// timeshare priority, lower values run sooner, negative values
    /// are realtime.
    pub fn from_priority(priority: i64) -> Self {
        match priority {
            p if p < 0 => PriorityBucket::Other,
            p if p < 20 => PriorityBucket::High,
            20 => PriorityBucket::Normal,
            _ => PriorityBucket::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriorityBucket::High => "high",
            PriorityBucket::Normal => "normal",
            PriorityBucket::Low => "low",
            PriorityBucket::Other => "other",
        }
    }

    /// Single-cell glyph used by the icon column.
    pub fn glyph(self) -> &'static str {
        match self {
            PriorityBucket::High => "\u{25b4}",
            PriorityBucket::Normal => "\u{00b7}",
            PriorityBucket::Low => "\u{25be}",
            PriorityBucket::Other => "\u{2022}",
        }
    }
}
