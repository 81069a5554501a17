//! Transcript files: the conversation JSON written by `run --save`.
//!
//! `--output json` documents (`{"conversation": ..., "report": ...}`) are
//! accepted as input too.

use anyhow::{Context, Result};
use sandbox_domain::SandboxConversation;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub fn load(path: &Path) -> Result<SandboxConversation> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript {}", path.display()))?;
    let mut value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    if let Some(conversation) = value.get_mut("conversation") {
        value = conversation.take();
    }

    serde_json::from_value(value)
        .with_context(|| format!("{} is not a sandbox transcript", path.display()))
}

pub fn save(path: &Path, conversation: &SandboxConversation) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(conversation)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox_domain::SandboxMessage;
    use sandbox_domain::presets::agent_preset;
    use sandbox_presentation::ConsoleFormatter;
    use serde_json::json;

    fn conversation() -> SandboxConversation {
        let mut conv = SandboxConversation::new("c1", "topic", "objective", None);
        conv.push(SandboxMessage::new("c1", "a", "hello"));
        conv
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("t.json");
        let original = conversation();
        save(&path, &original).unwrap();

        assert_eq!(load(&path).unwrap(), original);
    }

    #[test]
    fn test_saved_transcript_keeps_speaker_names() {
        let critic = agent_preset("critical-thinker").unwrap().to_agent_config();
        let mut conv = SandboxConversation::new("c1", "topic", "objective", None);
        conv.push(SandboxMessage::new("c1", &critic.id, "Let's consider option X?").with_agent(critic.clone()));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.json");
        save(&path, &conv).unwrap();
        let loaded = load(&path).unwrap();

        ConsoleFormatter::set_color(false);
        let output = ConsoleFormatter::format_transcript(&loaded, &loaded.agents());
        assert!(output.contains(&format!("[1] {}", critic.name)));
        assert!(!output.contains(&format!("[1] {}", critic.id)));
    }

    #[test]
    fn test_load_json_output_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let doc = json!({ "conversation": conversation(), "report": { "topic": "topic" } });
        fs::write(&path, doc.to_string()).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.id, "c1");
        assert_eq!(loaded.messages.len(), 1);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"foo\": 1}").unwrap();
        assert!(load(&path).is_err());
        assert!(load(&dir.path().join("missing.json")).is_err());
    }
}
