use crate::error::Error;
use crate::model::record::ProcessRecord;

#[cfg(target_os = "linux")]
mod linux;

/// Reads the full current process table.
#[cfg(target_os = "linux")]
pub fn sample_all() -> Result<Vec<ProcessRecord>, Error> {
    linux::sample_all()
}

#[cfg(not(target_os = "linux"))]
pub fn sample_all() -> Result<Vec<ProcessRecord>, Error> {
    Err(Error::SamplingFailed(
        "process sampling is only implemented for Linux".to_string(),
    ))
}
