// vespa-logfmt - platform/follow.rs
//
// Follow mode: a reader over a growing file that waits for appended data
// instead of reporting end-of-file.
//
// Runs on the calling thread. When the file has no new data the reader
// sleeps for the poll interval and checks the file size again:
//   - size grew: the path is reopened at the current offset, so a file
//     replaced by rotation is picked up as well.
//   - size shrank: the file was truncated or rotated; reading restarts
//     from offset 0.
// A path that is briefly missing (mid-rotation) is treated as "no data yet".

use crate::util::constants::FOLLOW_POLL_INTERVAL_MS;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::time::Duration;

/// Never-ending reader over a file that may keep growing.
pub struct FollowReader {
    path: PathBuf,
    file: File,
    offset: u64,
    poll_interval: Duration,
}

impl FollowReader {
    /// Follow `file`, freshly opened from `path` and positioned at its start.
    pub fn new(path: PathBuf, file: File) -> Self {
        Self {
            path,
            file,
            offset: 0,
            poll_interval: Duration::from_millis(FOLLOW_POLL_INTERVAL_MS),
        }
    }

    /// Override the poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Bytes consumed from the current file.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Block until the file at `path` differs in size from `offset`.
    fn wait_for_data(&mut self) -> io::Result<()> {
        loop {
            std::thread::sleep(self.poll_interval);

            let size = match std::fs::metadata(&self.path) {
                Ok(meta) => meta.len(),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            };

            if size < self.offset {
                tracing::info!(
                    path = %self.path.display(),
                    old_offset = self.offset,
                    new_size = size,
                    "File truncated or rotated; restarting from the beginning"
                );
                self.offset = 0;
            }
            if size > self.offset {
                let mut file = File::open(&self.path)?;
                file.seek(SeekFrom::Start(self.offset))?;
                self.file = file;
                return Ok(());
            }
        }
    }
}

impl Read for FollowReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let n = self.file.read(buf)?;
            if n > 0 {
                self.offset += n as u64;
                return Ok(n);
            }
            self.wait_for_data()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn follower(path: &std::path::Path) -> FollowReader {
        let file = File::open(path).unwrap();
        FollowReader::new(path.to_path_buf(), file).with_poll_interval(Duration::from_millis(5))
    }

    fn read_exact_string(reader: &mut FollowReader, len: usize) -> String {
        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_reads_appended_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vespa.log");
        std::fs::write(&path, "first\n").unwrap();

        let mut reader = follower(&path);
        assert_eq!(read_exact_string(&mut reader, 6), "first\n");

        let mut appender = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        appender.write_all(b"second\n").unwrap();
        appender.flush().unwrap();

        assert_eq!(read_exact_string(&mut reader, 7), "second\n");
        assert_eq!(reader.offset(), 13);
    }

    #[test]
    fn test_restarts_after_truncation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vespa.log");
        std::fs::write(&path, "a long first line\n").unwrap();

        let mut reader = follower(&path);
        assert_eq!(read_exact_string(&mut reader, 18), "a long first line\n");

        std::fs::write(&path, "new\n").unwrap();
        assert_eq!(read_exact_string(&mut reader, 4), "new\n");
        assert_eq!(reader.offset(), 4);
    }

    #[test]
    fn test_waits_for_data_written_later() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vespa.log");
        std::fs::write(&path, "").unwrap();

        let writer_path = path.clone();
        let writer = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            std::fs::write(&writer_path, "late\n").unwrap();
        });

        let mut reader = follower(&path);
        assert_eq!(read_exact_string(&mut reader, 5), "late\n");
        writer.join().unwrap();
    }
}
