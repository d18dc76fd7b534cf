//! Report writer shared by the sentiment and protocol stages.

use std::path::Path;
use tracing::info;

use super::counts::write_atomically;
use crate::error::AuditResult;

/// Write a rendered report, creating the containing directory if needed.
/// The previous report (if any) is replaced in one step.
pub fn write_report(path: &Path, rendered: &str) -> AuditResult<()> {
    write_atomically(path, rendered.as_bytes())?;
    info!("Report written to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_creates_parent_and_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports").join("call_sentimiento.txt");

        write_report(&path, "primero\n").unwrap();
        write_report(&path, "segundo\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "segundo\n");
    }
}
