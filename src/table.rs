// src/table.rs
use anyhow::{Context, Result};
use csv::{ReaderBuilder, Writer, WriterBuilder};
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Open a comma-delimited, double-quote-quoted table and consume `skip_rows`
/// leading records. The reader is flexible about field counts; arity is
/// validated by the typed parse step of each pipeline, not here.
pub fn open_table(path: &Path, skip_rows: usize) -> Result<csv::Reader<File>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening table {}", path.display()))?;

    let mut record = csv::StringRecord::new();
    for i in 0..skip_rows {
        let got = rdr
            .read_record(&mut record)
            .with_context(|| format!("reading header {} of {}", i + 1, path.display()))?;
        if !got {
            anyhow::bail!(
                "{} ended before its {} header row(s)",
                path.display(),
                skip_rows
            );
        }
    }
    Ok(rdr)
}

/// Writes a delimited table to a temp file beside the destination and renames
/// it into place on `commit`. A run that dies mid-write leaves no output.
pub struct TableWriter {
    wtr: Writer<NamedTempFile>,
    dest: PathBuf,
}

impl TableWriter {
    pub fn create(dest: &Path) -> Result<Self> {
        let dir = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temp file next to {}", dest.display()))?;
        let wtr = WriterBuilder::new().from_writer(tmp);
        Ok(TableWriter {
            wtr,
            dest: dest.to_path_buf(),
        })
    }

    pub fn write_record<I, T>(&mut self, record: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.wtr
            .write_record(record)
            .with_context(|| format!("writing record to {}", self.dest.display()))
    }

    /// Flush and move the temp file over the destination.
    pub fn commit(self) -> Result<()> {
        let dest = self.dest;
        let tmp = self
            .wtr
            .into_inner()
            .map_err(|e| anyhow::anyhow!("flushing {}: {}", dest.display(), e))?;
        tmp.persist(&dest)
            .with_context(|| format!("replacing {}", dest.display()))?;
        debug!(path = %dest.display(), "table committed");
        Ok(())
    }
}
