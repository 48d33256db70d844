use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// Convenience helpers for reading files with consistent error handling.
pub struct FileReader;

impl FileReader {
    /// Open the file at `path` with buffered reading.
    pub fn open_buffered(path: &Path) -> std::io::Result<BufReader<File>> {
        File::open(path).map(BufReader::new)
    }

    /// Read the whole file as text, replacing invalid UTF-8 with U+FFFD.
    pub fn read_text(path: &Path) -> std::io::Result<String> {
        let mut buf = Vec::new();
        Self::open_buffered(path)?.read_to_end(&mut buf)?;
        Ok(match String::from_utf8(buf) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        })
    }
}
