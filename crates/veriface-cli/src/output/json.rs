//! JSON output adapter.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use veriface_core::{RecordOutput, VerificationRecord};

/// JSON output adapter: one document per write, compact (JSON Lines) or pretty.
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    pretty: bool,
}

impl JsonOutput {
    /// Creates a new JSON output writing to stdout.
    #[must_use]
    pub fn stdout(pretty: bool) -> Self {
        Self::new(Box::new(io::stdout()), pretty)
    }

    /// Creates a new JSON output writing to a freshly created file.
    pub fn file(path: &Path, pretty: bool) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(Self::new(Box::new(BufWriter::new(file)), pretty))
    }

    /// Creates a new JSON output writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>, pretty: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            pretty,
        }
    }

    /// Writes any serializable value as one JSON document.
    #[allow(clippy::significant_drop_tightening)]
    pub fn write_value<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl RecordOutput for JsonOutput {
    fn write(&self, record: &VerificationRecord) -> Result<()> {
        self.write_value(record)
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Shared in-memory sink.
    #[derive(Clone, Default)]
    struct Sink(Arc<Mutex<Vec<u8>>>);

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Sink {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn record() -> VerificationRecord {
        VerificationRecord {
            analysis_id: "a1".into(),
            filename: "clip.mp4".into(),
            file_hash: "h".into(),
            verification_hash: "d".into(),
            is_deepfake: true,
            confidence_score: 0.91,
            analysis_details: serde_json::json!({"is_deepfake": true, "confidence": 0.91}),
            metadata: serde_json::json!({"filename": "clip.mp4"}),
            sealed_at: "2024-01-01T00:00:00Z".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn test_compact_is_one_line() {
        let sink = Sink::default();
        let output = JsonOutput::new(Box::new(sink.clone()), false);
        output.write(&record()).unwrap();
        output.write(&record()).unwrap();
        output.flush().unwrap();

        let text = sink.text();
        assert_eq!(text.lines().count(), 2);
        let parsed: VerificationRecord = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(parsed, record());
    }

    #[test]
    fn test_pretty_round_trips() {
        let sink = Sink::default();
        let output = JsonOutput::new(Box::new(sink.clone()), true);
        output.write(&record()).unwrap();

        let text = sink.text();
        assert!(text.lines().count() > 1);
        let parsed: VerificationRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, record());
    }
}
