//! JSONL file writer for conversation events.
//!
//! Each [`ConversationEvent`] becomes one JSON line: the payload's fields plus
//! `type` and `timestamp`. Runs append to the same file, so a log can hold
//! several conversations distinguished by `conversation_id`.

use chrono::{SecondsFormat, Utc};
use sandbox_application::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// JSONL conversation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`; every record is flushed as soon
/// as it is written.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!("Conversation log: {}", path.display());

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Merge `type` and `timestamp` into the payload; non-object payloads go under `data`.
fn to_record(event: ConversationEvent, timestamp: String) -> Value {
    let mut record = match event.payload {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    record.insert("type".to_string(), Value::String(event.event_type.to_string()));
    record.insert("timestamp".to_string(), Value::String(timestamp));
    Value::Object(record)
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let record = to_record(event, timestamp);

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Failed to write conversation log {}: {}", self.path.display(), e);
        }
    }
}
