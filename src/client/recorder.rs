//! Game recording: raw state payloads, one JSON document per line.
//!
//! The recorder persists exactly what the server sent, so a recording
//! replays through the same parse path as live play.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends raw state payloads to a `.jsonl` file as they arrive.
#[derive(Debug)]
pub struct Recorder {
    /// Buffered sink, flushed per line so a crash loses at most one turn.
    out: BufWriter<File>,
    /// Where the recording lives.
    path: PathBuf,
}

impl Recorder {
    /// Create `<dir>/<game_id>.jsonl`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created.
    pub fn create(dir: &Path, game_id: &str) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{game_id}.jsonl"));
        let out = BufWriter::new(File::create(&path)?);
        Ok(Self { out, path })
    }

    /// Where the recording is being written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one raw state payload.
    ///
    /// Newlines inside the payload are stripped so the file stays one
    /// document per line.
    ///
    /// # Errors
    ///
    /// Returns an error on write failure.
    pub fn record(&mut self, raw: &str) -> io::Result<()> {
        let compact: String = raw.chars().filter(|&c| c != '\n' && c != '\r').collect();
        writeln!(self.out, "{compact}")?;
        self.out.flush()
    }
}

/// Load every recorded state payload from a `.jsonl` recording.
///
/// Blank lines are skipped; payloads come back in recorded order.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_recording(path: &Path) -> io::Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut states = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            states.push(line);
        }
    }
    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = Recorder::create(dir.path(), "game42").unwrap();
        recorder.record("{\"turn\": 1}").unwrap();
        recorder.record("{\n  \"turn\": 2\n}").unwrap();

        let states = load_recording(recorder.path()).unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0], "{\"turn\": 1}");
        // Embedded newlines were flattened.
        assert_eq!(states[1], "{  \"turn\": 2}");
    }

    #[test]
    fn test_create_makes_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("saves").join("deep");
        let recorder = Recorder::create(&nested, "g").unwrap();
        assert!(recorder.path().starts_with(&nested));
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.jsonl");
        fs::write(&path, "{\"a\":1}\n\n{\"b\":2}\n").unwrap();
        let states = load_recording(&path).unwrap();
        assert_eq!(states.len(), 2);
    }
}
