use std::collections::HashMap;
use std::time::Instant;

use crate::error::Error;
use crate::model::record::{PriorityBucket, ProcessRecord};
use crate::model::table::{CellValue, Column};
use crate::model::users::UserCache;
use crate::system::sampler::{Sampler, TickCapacity};

/// Two generations of one pid's counters plus the values derived from
/// them. `previous` is always the immediately preceding generation's
/// `current`, or absent on first observation.
#[derive(Debug)]
pub struct ProcessEntry {
    pub current: ProcessRecord,
    pub previous: Option<ProcessRecord>,
    /// Recomputed from the tick delta on every refresh, never reused.
    pub cpu_percent: f64,
    pub user_name: String,
}

/// The live process table.
///
/// One writer calls `refresh` on a timer; everything else reads through
/// the accessors. A refresh stages the next generation in full and
/// commits it in one assignment block, so a failed sample leaves the
/// last-known-good table and a reader never sees a mix of generations.
pub struct SnapshotStore {
    entries: HashMap<u32, ProcessEntry>,
    /// Row order for the table view. Always exactly the key set of
    /// `entries`: cpu descending, ties by pid ascending.
    order: Vec<u32>,
    users: UserCache,
    capacity: TickCapacity,
    clamp_aggregate: bool,
    last_refresh: Option<Instant>,
    aggregate_cpu: f64,
    on_cpu_data_point: Option<Box<dyn FnMut(f64)>>,
}

impl SnapshotStore {
    pub fn new(users: UserCache, capacity: TickCapacity, clamp_aggregate: bool) -> Self {
        SnapshotStore {
            entries: HashMap::new(),
            order: Vec::new(),
            users,
            capacity,
            clamp_aggregate,
            last_refresh: None,
            aggregate_cpu: 0.0,
            on_cpu_data_point: None,
        }
    }

    /// Registers the aggregate CPU observer, replacing any previous
    /// one. It is called synchronously once per successful refresh.
    pub fn set_on_cpu_data_point(&mut self, observer: impl FnMut(f64) + 'static) {
        self.on_cpu_data_point = Some(Box::new(observer));
    }

    pub fn refresh(&mut self, sampler: &mut dyn Sampler) -> Result<(), Error> {
        self.refresh_at(sampler, Instant::now())
    }

    /// Deterministic refresh used by tests; `now` supplies the wall
    /// clock for the elapsed-interval computation.
    pub fn refresh_at(&mut self, sampler: &mut dyn Sampler, now: Instant) -> Result<(), Error> {
        #[cfg(feature = "perf-tracing")]
        let _refresh_span = tracing::debug_span!("store.refresh").entered();

        let sampled = sampler.sample_all()?;

        let elapsed = self
            .last_refresh
            .map(|at| now.saturating_duration_since(at).as_secs_f64())
            .unwrap_or(0.0);

        let mut next: HashMap<u32, ProcessEntry> = HashMap::with_capacity(sampled.len());
        for record in sampled {
            let previous = self.entries.remove(&record.pid).map(|entry| entry.current);
            let cpu_percent = self.derive_cpu_percent(previous.as_ref(), &record, elapsed);
            let user_name = self.users.resolve(record.owner_user_id).to_string();
            next.insert(
                record.pid,
                ProcessEntry {
                    current: record,
                    previous,
                    cpu_percent,
                    user_name,
                },
            );
        }

        let mut order: Vec<u32> = next.keys().copied().collect();
        order.sort_unstable_by(|a, b| {
            next[b]
                .cpu_percent
                .total_cmp(&next[a].cpu_percent)
                .then_with(|| a.cmp(b))
        });

        let mut aggregate: f64 = next.values().map(|entry| entry.cpu_percent).sum();
        if self.clamp_aggregate {
            aggregate = aggregate.clamp(0.0, self.capacity.max_aggregate_percent());
        }

        // Commit. Entries not carried into `next` are the pids that
        // disappeared from the sampled set; they drop here, same cycle.
        self.entries = next;
        self.order = order;
        self.aggregate_cpu = aggregate;
        self.last_refresh = Some(now);

        if let Some(observer) = self.on_cpu_data_point.as_mut() {
            observer(aggregate);
        }
        Ok(())
    }

    /// Tick delta scaled by the capacity available over the elapsed
    /// interval. Zero on first observation and on clock anomalies.
    fn derive_cpu_percent(
        &self,
        previous: Option<&ProcessRecord>,
        current: &ProcessRecord,
        elapsed: f64,
    ) -> f64 {
        let Some(previous) = previous else {
            return 0.0;
        };
        if elapsed <= 0.0 {
            return 0.0;
        }
        let delta = current
            .scheduled_ticks
            .saturating_sub(previous.scheduled_ticks) as f64;
        100.0 * delta / (elapsed * self.capacity.total_ticks_per_second())
    }

    pub fn row_count(&self) -> usize {
        self.order.len()
    }

    pub fn column_count(&self) -> usize {
        Column::ALL.len()
    }

    /// Aggregate CPU percentage delivered on the last successful
    /// refresh.
    pub fn aggregate_cpu(&self) -> f64 {
        self.aggregate_cpu
    }

    pub fn pid_at(&self, row: usize) -> Option<u32> {
        self.order.get(row).copied()
    }

    pub fn entry(&self, pid: u32) -> Option<&ProcessEntry> {
        self.entries.get(&pid)
    }

    /// Reads one cell of the table as of the last completed refresh.
    /// Side-effect-free; out-of-range indices are a caller fault.
    pub fn cell(&self, row: usize, column: usize) -> Result<CellValue, Error> {
        let out_of_range = || Error::AccessorOutOfRange { row, column };
        let pid = *self.order.get(row).ok_or_else(out_of_range)?;
        let col = Column::from_index(column).ok_or_else(out_of_range)?;
        // order and entries are kept in lockstep by refresh
        let entry = self.entries.get(&pid).ok_or_else(out_of_range)?;

        Ok(match col {
            Column::Icon => {
                CellValue::Icon(PriorityBucket::from_priority(entry.current.priority_class))
            }
            Column::Name => CellValue::Text(entry.current.name.clone()),
            Column::Cpu => CellValue::Percent(entry.cpu_percent),
            Column::State => CellValue::Text(entry.current.state.clone()),
            Column::Priority => CellValue::Signed(entry.current.priority_class),
            Column::User => CellValue::Text(entry.user_name.clone()),
            Column::Pid => CellValue::Number(u64::from(entry.current.pid)),
            Column::Virtual => CellValue::Bytes(entry.current.virtual_size),
            Column::Physical => CellValue::Bytes(entry.current.resident_size),
            Column::Syscalls => CellValue::Number(entry.current.syscall_count),
            Column::InodeFaults => CellValue::Number(entry.current.inode_faults),
            Column::ZeroFaults => CellValue::Number(entry.current.zero_faults),
            Column::CowFaults => CellValue::Number(entry.current.cow_faults),
        })
    }
}
