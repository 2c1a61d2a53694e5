use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use proctable::error::Error;
use proctable::model::record::{PriorityBucket, ProcessRecord};
use proctable::model::store::SnapshotStore;
use proctable::model::table::{CellKind, CellValue, Column};
use proctable::model::users::{UserCache, UserLookup};
use proctable::system::sampler::{Sampler, TickCapacity};

struct OneShotSampler {
    records: Vec<ProcessRecord>,
}

impl Sampler for OneShotSampler {
    fn sample_all(&mut self) -> Result<Vec<ProcessRecord>, Error> {
        Ok(self.records.clone())
    }
}

struct CountingUsers {
    calls: Rc<Cell<usize>>,
}

impl UserLookup for CountingUsers {
    fn lookup(&self, uid: u32) -> Result<String, Error> {
        self.calls.set(self.calls.get() + 1);
        if uid == 1000 {
            Ok("alice".to_string())
        } else {
            Err(Error::IdentityResolutionFailed(uid))
        }
    }
}

fn detailed_record() -> ProcessRecord {
    ProcessRecord {
        pid: 42,
        scheduled_ticks: 900,
        name: "renderer".to_string(),
        state: "Sleeping".to_string(),
        priority_class: 12,
        owner_user_id: 1000,
        virtual_size: 256 * 1024 * 1024,
        resident_size: 32 * 1024 * 1024,
        syscall_count: 77_001,
        inode_faults: 11,
        zero_faults: 22,
        cow_faults: 33,
    }
}

#[test]
fn every_cell_reads_back_typed_values() {
    let calls = Rc::new(Cell::new(0));
    let mut store = SnapshotStore::new(
        UserCache::new(Box::new(CountingUsers {
            calls: Rc::clone(&calls),
        })),
        TickCapacity::new(100.0, 1),
        true,
    );
    let mut sampler = OneShotSampler {
        records: vec![detailed_record()],
    };
    store.refresh(&mut sampler).unwrap();

    assert_eq!(store.row_count(), 1);
    assert_eq!(store.column_count(), 13);

    assert_eq!(
        store.cell(0, 0).unwrap(),
        CellValue::Icon(PriorityBucket::High)
    );
    assert_eq!(
        store.cell(0, 1).unwrap(),
        CellValue::Text("renderer".to_string())
    );
    assert_eq!(store.cell(0, 2).unwrap(), CellValue::Percent(0.0));
    assert_eq!(
        store.cell(0, 3).unwrap(),
        CellValue::Text("Sleeping".to_string())
    );
    assert_eq!(store.cell(0, 4).unwrap(), CellValue::Signed(12));
    assert_eq!(
        store.cell(0, 5).unwrap(),
        CellValue::Text("alice".to_string())
    );
    assert_eq!(store.cell(0, 6).unwrap(), CellValue::Number(42));
    assert_eq!(
        store.cell(0, 7).unwrap(),
        CellValue::Bytes(256 * 1024 * 1024)
    );
    assert_eq!(
        store.cell(0, 8).unwrap(),
        CellValue::Bytes(32 * 1024 * 1024)
    );
    assert_eq!(store.cell(0, 9).unwrap(), CellValue::Number(77_001));
    assert_eq!(store.cell(0, 10).unwrap(), CellValue::Number(11));
    assert_eq!(store.cell(0, 11).unwrap(), CellValue::Number(22));
    assert_eq!(store.cell(0, 12).unwrap(), CellValue::Number(33));
}

#[test]
fn user_resolution_happens_once_per_uid_not_per_accessor_call() {
    let calls = Rc::new(Cell::new(0));
    let mut store = SnapshotStore::new(
        UserCache::new(Box::new(CountingUsers {
            calls: Rc::clone(&calls),
        })),
        TickCapacity::new(100.0, 1),
        true,
    );
    let mut sampler = OneShotSampler {
        records: vec![detailed_record()],
    };

    let start = Instant::now();
    store.refresh_at(&mut sampler, start).unwrap();
    assert_eq!(calls.get(), 1);

    // Accessors are side-effect-free: repeated reads do not resolve.
    for _ in 0..5 {
        assert_eq!(
            store.cell(0, 5).unwrap(),
            CellValue::Text("alice".to_string())
        );
    }
    assert_eq!(calls.get(), 1);

    // Subsequent refreshes reuse the cache for a known uid.
    store
        .refresh_at(&mut sampler, start + Duration::from_secs(1))
        .unwrap();
    assert_eq!(calls.get(), 1);
}

#[test]
fn column_metadata_matches_display_contract() {
    let names: Vec<&str> = Column::ALL.iter().map(|c| c.meta().name).collect();
    assert_eq!(
        names,
        vec![
            "", "Name", "CPU", "State", "Priority", "User", "PID", "Virtual", "Physical",
            "Syscalls", "F:Inode", "F:Zero", "F:CoW",
        ]
    );
    assert_eq!(Column::Icon.meta().kind, CellKind::Icon);
    assert_eq!(Column::Cpu.meta().kind, CellKind::Percent);
    assert_eq!(Column::Virtual.meta().kind, CellKind::Bytes);
    assert_eq!(Column::Physical.meta().kind, CellKind::Bytes);
}

#[test]
fn out_of_range_is_not_a_sampling_error() {
    let mut store = SnapshotStore::new(
        UserCache::new(Box::new(CountingUsers {
            calls: Rc::new(Cell::new(0)),
        })),
        TickCapacity::new(100.0, 1),
        true,
    );
    let mut sampler = OneShotSampler {
        records: vec![detailed_record()],
    };
    store.refresh(&mut sampler).unwrap();

    assert!(matches!(
        store.cell(1, 0),
        Err(Error::AccessorOutOfRange { row: 1, column: 0 })
    ));
    assert!(matches!(
        store.cell(0, 99),
        Err(Error::AccessorOutOfRange { row: 0, column: 99 })
    ));
}
