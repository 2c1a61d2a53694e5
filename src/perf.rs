use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::Result;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Installs a JSON tracing subscriber writing to `path`.
///
/// Spans go to a file rather than stderr so they never corrupt the
/// terminal the TUI is drawing on.
pub fn init_tracing_json(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BoxMakeWriter::new(Mutex::new(file));

    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::DEBUG)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(writer)
        .init();

    Ok(())
}
