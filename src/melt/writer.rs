use crate::error::{MeltError, Result};
use crate::melt::relation::Relation;
use crate::melt::tables::Tables;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

struct Sink<W: Write> {
    path: PathBuf,
    writer: W,
}

/// Writes accumulated tables to one output per relation
pub struct TableWriter<W: Write> {
    sinks: HashMap<Relation, Sink<W>>,
}

impl TableWriter<File> {
    /// Open (creating if needed) the five load files in `output_dir` for
    /// appending. Existing rows are never truncated.
    pub fn open_dir<P: AsRef<Path>>(output_dir: P) -> Result<Self> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir).map_err(|e| MeltError::io(output_dir, e))?;

        let mut sinks = HashMap::new();
        for relation in Relation::ALL {
            let path = output_dir.join(relation.file_name());
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| MeltError::io(&path, e))?;
            sinks.insert(relation, Sink { path, writer: file });
        }

        Ok(TableWriter { sinks })
    }
}

impl<W: Write> TableWriter<W> {
    /// Wrap arbitrary writers; relations without a writer are not written
    pub fn from_writers(writers: impl IntoIterator<Item = (Relation, W)>) -> Self {
        let sinks = writers
            .into_iter()
            .map(|(relation, writer)| {
                let path = PathBuf::from(relation.file_name());
                (relation, Sink { path, writer })
            })
            .collect();
        TableWriter { sinks }
    }

    /// Write every relation's rows to its output
    pub fn write_tables(&mut self, tables: &Tables) -> Result<()> {
        for (relation, rows) in tables.iter() {
            let Some(sink) = self.sinks.get_mut(&relation) else {
                continue;
            };
            sink.writer
                .write_all(rows.as_bytes())
                .map_err(|e| MeltError::io(&sink.path, e))?;
        }
        Ok(())
    }

    /// Flush all writers
    pub fn flush(&mut self) -> Result<()> {
        for sink in self.sinks.values_mut() {
            sink.writer.flush().map_err(|e| MeltError::io(&sink.path, e))?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> HashMap<Relation, W> {
        self.sinks
            .into_iter()
            .map(|(relation, sink)| (relation, sink.writer))
            .collect()
    }
}
