//! `PpmFrameSource` — reads a directory of binary PPM (`P6`) images, in
//! sorted filename order, as the frame sequence.

use std::path::{Path, PathBuf};

use crate::error::GitFlixError;
use crate::raw_frame::RawFrame;
use crate::util::create_file_list;

use super::FrameSource;

/// Reads frames from a directory of `.ppm` files, enumerated with the same
/// recursive walk the teacher's CLI uses to build its input file list
/// (`util/file_list.rs`).
pub struct PpmFrameSource {
    paths: Vec<PathBuf>,
    cursor: usize,
    width: u32,
    height: u32,
    channels: u32,
}

impl PpmFrameSource {
    /// Opens `dir`, sorting discovered `.ppm` files by path so playback
    /// order is deterministic, and reads the first file's header to fix the
    /// dimensions every subsequent frame must match.
    pub fn open(dir: &Path) -> Result<Self, GitFlixError> {
        let mut paths: Vec<PathBuf> = create_file_list(&[dir])
            .map_err(|e| GitFlixError::ObjectStoreError { commit_id: None, detail: format!("reading frame directory: {e}") })?
            .into_iter()
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("ppm"))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(GitFlixError::ObjectStoreError {
                commit_id: None,
                detail: format!("no .ppm files found under {}", dir.display()),
            });
        }

        let (width, height) = read_ppm_header(&paths[0])?;
        Ok(PpmFrameSource { paths, cursor: 0, width, height, channels: 3 })
    }
}

impl FrameSource for PpmFrameSource {
    fn next_frame(&mut self) -> Result<Option<RawFrame>, GitFlixError> {
        if self.cursor >= self.paths.len() {
            return Ok(None);
        }
        let path = &self.paths[self.cursor];
        let (width, height, pixels) = read_ppm(path)?;
        if width != self.width || height != self.height {
            return Err(GitFlixError::ObjectStoreError {
                commit_id: None,
                detail: format!("{} has dimensions {width}x{height}, expected {}x{}", path.display(), self.width, self.height),
            });
        }
        self.cursor += 1;
        Ok(Some(RawFrame::new(width, height, self.channels, pixels)))
    }

    fn dimensions(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.channels)
    }
}

fn read_ppm_header(path: &Path) -> Result<(u32, u32), GitFlixError> {
    let bytes = std::fs::read(path)
        .map_err(|e| GitFlixError::ObjectStoreError { commit_id: None, detail: format!("{}: {e}", path.display()) })?;
    let (width, height, _) = parse_ppm(&bytes, path)?;
    Ok((width, height))
}

fn read_ppm(path: &Path) -> Result<(u32, u32, Vec<u8>), GitFlixError> {
    let bytes = std::fs::read(path)
        .map_err(|e| GitFlixError::ObjectStoreError { commit_id: None, detail: format!("{}: {e}", path.display()) })?;
    parse_ppm(&bytes, path)
}

/// Parses the binary PPM (`P6`) subset: magic, whitespace-separated
/// `width height maxval` header (comments starting with `#` allowed between
/// tokens), a single whitespace byte, then `width * height * 3` raw bytes.
fn parse_ppm(bytes: &[u8], path: &Path) -> Result<(u32, u32, Vec<u8>), GitFlixError> {
    let fail = |detail: String| GitFlixError::ObjectStoreError { commit_id: None, detail: format!("{}: {detail}", path.display()) };

    if !bytes.starts_with(b"P6") {
        return Err(fail("not a binary PPM (P6) file".into()));
    }
    let mut cursor = 2usize;
    let mut tokens = Vec::with_capacity(3);
    while tokens.len() < 3 {
        while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
            cursor += 1;
        }
        if cursor < bytes.len() && bytes[cursor] == b'#' {
            while cursor < bytes.len() && bytes[cursor] != b'\n' {
                cursor += 1;
            }
            continue;
        }
        let start = cursor;
        while cursor < bytes.len() && !bytes[cursor].is_ascii_whitespace() {
            cursor += 1;
        }
        if start == cursor {
            return Err(fail("truncated PPM header".into()));
        }
        let token = std::str::from_utf8(&bytes[start..cursor]).map_err(|_| fail("non-UTF8 PPM header token".into()))?;
        tokens.push(token.parse::<u32>().map_err(|_| fail("non-numeric PPM header token".into()))?);
    }
    // Exactly one whitespace byte separates maxval from the pixel data.
    cursor += 1;

    let width = tokens[0];
    let height = tokens[1];
    let maxval = tokens[2];
    if maxval != 255 {
        return Err(fail(format!("unsupported PPM maxval {maxval}, expected 255")));
    }

    let expected = (width as usize) * (height as usize) * 3;
    let pixels = bytes.get(cursor..cursor + expected).ok_or_else(|| fail("pixel data shorter than header implies".into()))?;
    Ok((width, height, pixels.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_ppm(path: &Path, width: u32, height: u32, fill: u8) {
        let mut f = std::fs::File::create(path).unwrap();
        write!(f, "P6\n{width} {height}\n255\n").unwrap();
        f.write_all(&vec![fill; (width * height * 3) as usize]).unwrap();
    }

    #[test]
    fn reads_frames_in_sorted_order() {
        let dir = tempdir().unwrap();
        write_ppm(&dir.path().join("b.ppm"), 2, 2, 20);
        write_ppm(&dir.path().join("a.ppm"), 2, 2, 10);

        let mut source = PpmFrameSource::open(dir.path()).unwrap();
        assert_eq!(source.dimensions(), (2, 2, 3));
        let f0 = source.next_frame().unwrap().unwrap();
        assert_eq!(f0.pixels[0], 10);
        let f1 = source.next_frame().unwrap().unwrap();
        assert_eq!(f1.pixels[0], 20);
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn dimension_mismatch_across_files_is_rejected() {
        let dir = tempdir().unwrap();
        write_ppm(&dir.path().join("a.ppm"), 2, 2, 1);
        write_ppm(&dir.path().join("b.ppm"), 4, 4, 1);

        let mut source = PpmFrameSource::open(dir.path()).unwrap();
        source.next_frame().unwrap();
        assert!(source.next_frame().is_err());
    }
}
