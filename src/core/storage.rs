//! Purpose: Persist finished buffers and map them back for zero-copy reads.
//! Exports: `write_buffer`, `MappedBuffer`.
//! Role: The only filesystem boundary for buffer bytes.
//! Invariants: Writes land via a sibling temp file and rename; readers never see partial files.
//! Invariants: Mapped files are read-only; decoding borrows straight from the mapping.
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::core::error::{Error, ErrorKind};

pub fn write_buffer(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), Error> {
    let path = path.as_ref();
    let tmp = temp_sibling(path);

    let result = File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path));
    if let Err(err) = result {
        let _ = fs::remove_file(&tmp);
        return Err(Error::from_io(err, path).with_message("failed to write buffer"));
    }

    tracing::info!(path = %path.display(), len = bytes.len(), "wrote buffer");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(format!(".tmp-{}", std::process::id()));
    path.with_file_name(name)
}

/// A read-only memory mapping of a buffer file.
pub struct MappedBuffer {
    path: PathBuf,
    mmap: Mmap,
}

impl MappedBuffer {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|err| {
            Error::from_io(err, &path).with_message("failed to open buffer file")
        })?;
        let len = file
            .metadata()
            .map(|meta| meta.len())
            .map_err(|err| Error::from_io(err, &path))?;
        if len == 0 {
            return Err(Error::new(ErrorKind::Corrupt)
                .with_message("buffer file is empty")
                .with_path(&path));
        }

        // The mapping is private to this process and only ever read.
        let mmap = unsafe { Mmap::map(&file).map_err(|err| Error::from_io(err, &path))? };
        tracing::debug!(path = %path.display(), len, "mapped buffer");
        Ok(Self { path, mmap })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }
}

#[cfg(test)]
mod tests {
    use super::{MappedBuffer, write_buffer};
    use crate::core::error::ErrorKind;

    #[test]
    fn written_bytes_map_back_unchanged() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("orc.bin");

        write_buffer(&path, b"\x0c\x00\x00\x00orc").expect("write");
        let mapped = MappedBuffer::open(&path).expect("open");
        assert_eq!(mapped.bytes(), b"\x0c\x00\x00\x00orc");
        assert_eq!(mapped.path(), path.as_path());

        let leftovers = std::fs::read_dir(temp.path()).expect("read_dir").count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn rewrite_replaces_previous_contents() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("orc.bin");

        write_buffer(&path, b"first version").expect("write");
        write_buffer(&path, b"second").expect("rewrite");
        let mapped = MappedBuffer::open(&path).expect("open");
        assert_eq!(mapped.bytes(), b"second");
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = MappedBuffer::open(temp.path().join("nope.bin"))
            .err()
            .expect("should fail");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.path().is_some());
    }

    #[test]
    fn empty_file_is_corrupt() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("empty.bin");
        std::fs::write(&path, b"").expect("write");

        let err = MappedBuffer::open(&path).err().expect("should fail");
        assert_eq!(err.kind(), ErrorKind::Corrupt);
    }

    #[test]
    fn write_into_missing_directory_fails_cleanly() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("missing").join("orc.bin");

        let err = write_buffer(&path, b"orc").expect_err("should fail");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
