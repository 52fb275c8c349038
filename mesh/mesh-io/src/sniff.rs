//! STL encoding sniffer.
//!
//! Decides whether a file is ASCII or binary STL before it is parsed:
//!
//! 1. Read the 80-byte header. If it starts with `solid ` and the first
//!    1024 bytes contain `facet normal` (case-insensitive), it is ASCII.
//! 2. Otherwise read the little-endian `u32` triangle count `T` at offset 80.
//!    The file is binary exactly when its size is `84 + 50 * T`.
//! 3. Anything else, including any I/O failure, is reported as ASCII.
//!
//! This is a heuristic. A corrupt binary file is classified as ASCII and
//! then fails to parse, which is the intended outcome.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, warn};

use crate::stl::{HEADER_SIZE, TRIANGLE_SIZE};

/// Bytes scanned for the `facet normal` keyword.
const ASCII_PROBE_SIZE: u64 = 1024;

/// STL encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StlFormat {
    /// Text encoding (`solid` / `facet normal` / `vertex` ...).
    Ascii,
    /// 80-byte header, `u32` count, 50 bytes per triangle.
    Binary,
}

impl StlFormat {
    /// Whether this is the binary encoding.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, Self::Binary)
    }
}

impl std::fmt::Display for StlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascii => write!(f, "ASCII"),
            Self::Binary => write!(f, "BINARY"),
        }
    }
}

/// Classify an STL file as ASCII or binary.
///
/// Never fails: unreadable files are logged and reported as
/// [`StlFormat::Ascii`].
///
/// # Example
///
/// ```no_run
/// use mesh_io::{classify, StlFormat};
///
/// if classify("femur.stl") == StlFormat::Binary {
///     println!("binary STL");
/// }
/// ```
#[must_use]
pub fn classify<P: AsRef<Path>>(path: P) -> StlFormat {
    let path = path.as_ref();
    let result = File::open(path).and_then(|mut file| classify_reader(&mut file));
    match result {
        Ok(format) => {
            debug!("{} classified as {format} STL", path.display());
            format
        }
        Err(e) => {
            warn!("Error checking STL file type of {}: {e}", path.display());
            StlFormat::Ascii
        }
    }
}

/// Classify an STL stream.
///
/// The stream is read from its start; its total length is taken from
/// seeking to the end.
///
/// # Errors
///
/// Returns any I/O error raised while reading or seeking.
pub fn classify_reader<R: Read + Seek>(reader: &mut R) -> std::io::Result<StlFormat> {
    reader.seek(SeekFrom::Start(0))?;
    let header = read_up_to(reader, HEADER_SIZE as u64)?;

    if header.starts_with(b"solid ") {
        // Some binary exporters also start their header with "solid ".
        reader.seek(SeekFrom::Start(0))?;
        let mut probe = read_up_to(reader, ASCII_PROBE_SIZE)?;
        probe.make_ascii_lowercase();
        if contains(&probe, b"facet normal") {
            return Ok(StlFormat::Ascii);
        }
    }

    reader.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
    let count_bytes = read_up_to(reader, 4)?;
    let mut count = [0u8; 4];
    count[..count_bytes.len()].copy_from_slice(&count_bytes);
    let triangles = u64::from(u32::from_le_bytes(count));

    let expected = (HEADER_SIZE as u64 + 4) + TRIANGLE_SIZE as u64 * triangles;
    let actual = reader.seek(SeekFrom::End(0))?;

    if actual == expected {
        Ok(StlFormat::Binary)
    } else {
        debug!("binary size check failed: expected {expected} bytes, found {actual}");
        Ok(StlFormat::Ascii)
    }
}

fn read_up_to<R: Read>(reader: &mut R, limit: u64) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.by_ref().take(limit).read_to_end(&mut buf)?;
    Ok(buf)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
