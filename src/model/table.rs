use crate::model::record::PriorityBucket;

/// Table columns, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Icon,
    Name,
    Cpu,
    State,
    Priority,
    User,
    Pid,
    Virtual,
    Physical,
    Syscalls,
    InodeFaults,
    ZeroFaults,
    CowFaults,
}

impl Column {
    pub const ALL: [Column; 13] = [
        Column::Icon,
        Column::Name,
        Column::Cpu,
        Column::State,
        Column::Priority,
        Column::User,
        Column::Pid,
        Column::Virtual,
        Column::Physical,
        Column::Syscalls,
        Column::InodeFaults,
        Column::ZeroFaults,
        Column::CowFaults,
    ];

    pub fn from_index(index: usize) -> Option<Column> {
        Column::ALL.get(index).copied()
    }

    /// Stable machine-readable key, used for JSON output.
    pub fn key(self) -> &'static str {
        match self {
            Column::Icon => "icon",
            Column::Name => "name",
            Column::Cpu => "cpu",
            Column::State => "state",
            Column::Priority => "priority",
            Column::User => "user",
            Column::Pid => "pid",
            Column::Virtual => "virtual",
            Column::Physical => "physical",
            Column::Syscalls => "syscalls",
            Column::InodeFaults => "inode_faults",
            Column::ZeroFaults => "zero_faults",
            Column::CowFaults => "cow_faults",
        }
    }

    pub fn meta(self) -> ColumnMeta {
        match self {
            Column::Icon => ColumnMeta::new("", CellKind::Icon, 2, false),
            Column::Name => ColumnMeta::new("Name", CellKind::Text, 18, false),
            Column::Cpu => ColumnMeta::new("CPU", CellKind::Percent, 6, true),
            Column::State => ColumnMeta::new("State", CellKind::Text, 9, false),
            Column::Priority => ColumnMeta::new("Priority", CellKind::Number, 8, true),
            Column::User => ColumnMeta::new("User", CellKind::Text, 10, false),
            Column::Pid => ColumnMeta::new("PID", CellKind::Number, 6, true),
            Column::Virtual => ColumnMeta::new("Virtual", CellKind::Bytes, 9, true),
            Column::Physical => ColumnMeta::new("Physical", CellKind::Bytes, 9, true),
            Column::Syscalls => ColumnMeta::new("Syscalls", CellKind::Number, 9, true),
            Column::InodeFaults => ColumnMeta::new("F:Inode", CellKind::Number, 8, true),
            Column::ZeroFaults => ColumnMeta::new("F:Zero", CellKind::Number, 8, true),
            Column::CowFaults => ColumnMeta::new("F:CoW", CellKind::Number, 8, true),
        }
    }
}

/// Display hint for a column's cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Icon,
    Text,
    Number,
    Bytes,
    Percent,
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnMeta {
    pub name: &'static str,
    pub kind: CellKind,
    /// Minimum content width in terminal cells.
    pub width: u16,
    pub right_aligned: bool,
}

impl ColumnMeta {
    const fn new(name: &'static str, kind: CellKind, width: u16, right_aligned: bool) -> Self {
        ColumnMeta {
            name,
            kind,
            width,
            right_aligned,
        }
    }
}

/// A single table cell as of the last completed refresh.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Icon(PriorityBucket),
    Text(String),
    Number(u64),
    /// Priority values can be negative (realtime classes).
    Signed(i64),
    Bytes(u64),
    Percent(f64),
}
