use std::io::{self, Read};

use crate::job::domain::speech_api::ProgressFn;

/// Wraps an upload body and reports cumulative bytes read.
pub(crate) struct ProgressReader<R> {
    inner: R,
    sent: u64,
    total: u64,
    progress: ProgressFn,
}

impl<R: Read> ProgressReader<R> {
    pub(crate) fn new(inner: R, total: u64, progress: ProgressFn) -> Self {
        Self {
            inner,
            sent: 0,
            total,
            progress,
        }
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.sent += n as u64;
            (self.progress)(self.sent, self.total);
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_reports_cumulative_progress() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let progress: ProgressFn = Arc::new(move |sent, total| {
            sink.lock().unwrap().push((sent, total));
        });

        let mut reader = ProgressReader::new(Cursor::new(vec![7u8; 10]), 10, progress);
        let mut buf = [0u8; 4];
        while reader.read(&mut buf).unwrap() > 0 {}

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![(4, 10), (8, 10), (10, 10)]);
    }

    #[test]
    fn test_empty_body_reports_nothing() {
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let progress: ProgressFn = Arc::new(move |_, _| *counter.lock().unwrap() += 1);

        let mut reader = ProgressReader::new(Cursor::new(Vec::new()), 0, progress);
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(*calls.lock().unwrap(), 0);
    }
}
