use crate::model::ExperimentRecord;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

impl ExperimentRecord {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open experiment record: {}", path.display()))?;
        let record: ExperimentRecord = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse experiment record: {}", path.display()))?;
        Ok(record)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create experiment record: {}", path.display()))?;

        // Pretty print for diffability
        serde_json::to_writer_pretty(file, self).context("failed to write experiment record")?;
        Ok(())
    }
}
