//! Writing the serialized graph to disk.
//!
//! Output goes to a temporary file next to the destination and is renamed
//! into place only once it is complete, so a failed run never leaves a
//! truncated file behind.

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::serializer::Format;

/// Serializes `graph` to `path` in `format`, replacing any existing file.
///
/// # Errors
///
/// Returns [`Error::OutputWrite`] if the temporary file cannot be created,
/// written, flushed, or renamed.
pub fn write_graph(graph: &Graph, path: &Path, format: Format) -> Result<()> {
    let write_err = |source: std::io::Error| Error::OutputWrite {
        path: path.to_owned(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        graph.serialize(format, &mut out).map_err(write_err)?;
        out.flush().map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|err| write_err(err.error))?;

    debug!(path = %path.display(), %format, triples = graph.len(), "output written");
    Ok(())
}
