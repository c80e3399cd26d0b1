//! the score file holds a single IEEE-754 double in big-endian byte order.
use std::fs::File;
use std::io::{Error, ErrorKind, Write};
use std::path::Path;

pub const SCORE_FILE_BYTES: usize = 8;

/// writes `score` as exactly [`SCORE_FILE_BYTES`] bytes, creating missing
/// parent directories. the handle is closed before returning on every path.
pub fn write_score<P>(filepath: P, score: f64) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    let path = filepath.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(&score.to_be_bytes())?;
    file.flush()
}

/// reads a score file written by [`write_score`].
pub fn read_score<P>(filepath: P) -> Result<f64, Error>
where
    P: AsRef<Path>,
{
    let bytes = std::fs::read(filepath)?;
    let buf: [u8; SCORE_FILE_BYTES] = bytes.as_slice().try_into().map_err(|_| {
        Error::new(
            ErrorKind::InvalidData,
            format!(
                "score file should contain {SCORE_FILE_BYTES} bytes, found {}",
                bytes.len()
            ),
        )
    })?;
    Ok(f64::from_be_bytes(buf))
}
