use crate::error::Re;
use anyhow::Context;
use std::io::{ErrorKind, Write};
use std::path::Path;

pub(crate) fn file(path: impl AsRef<Path>) -> Re<std::fs::File> {
    let path = path.as_ref();
    std::fs::File::create(path).context(format!("Unable to create file {}", path.display()))
}

/// Writes `data` to `path` and flushes it to disk before returning.
pub(crate) fn write_all(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Re<()> {
    let path = path.as_ref();
    let mut f = file(path)?;
    f.write_all(data.as_ref())
        .context(format!("Unable to write data to {}", path.display()))?;
    f.sync_all()
        .context(format!("Unable to flush data to {}", path.display()))
}

/// Reads a file to a `String`. Returns `None` if the file does not exist.
pub(crate) fn read_optional(path: impl AsRef<Path>) -> Re<Option<String>> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).context(format!("Unable to read file {}", path.display())),
    }
}

pub(crate) fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Re<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    std::fs::rename(from, to).with_context(|| {
        format!(
            "Unable to move file from '{}' to '{}'",
            from.display(),
            to.display()
        )
    })
}
