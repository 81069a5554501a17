//! Console output formatter for transcripts and analytics reports

use colored::Colorize;
use sandbox_application::ConversationReport;
use sandbox_domain::analytics::CognitiveDimension;
use sandbox_domain::presets::{AGENT_PRESETS, CONVERSATION_TEMPLATES, INTERACTION_STYLES};
use sandbox_domain::{AgentConfig, SandboxConversation, SandboxMessage};
use serde_json::json;

/// Formats sandbox results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colors on or off (`[output].color`)
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format the conversation header and every message.
    ///
    /// `agents` supplies display names; speakers not in the list are shown
    /// by id.
    pub fn format_transcript(conversation: &SandboxConversation, agents: &[AgentConfig]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Sandbox Conversation"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), conversation.topic));
        output.push_str(&format!(
            "{} {}\n",
            "Objective:".cyan().bold(),
            conversation.objective
        ));
        if !agents.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Agents:".cyan().bold(),
                agents
                    .iter()
                    .map(|a| format!("{} {}", a.avatar, a.name).trim().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        output.push_str(&Self::section_header("Transcript"));
        for (i, message) in conversation.messages.iter().enumerate() {
            let name = agents
                .iter()
                .find(|a| a.id == message.agent_id)
                .map(|a| a.name.as_str())
                .unwrap_or(&message.agent_id);

            output.push_str(&format!(
                "\n{} {}\n{}\n",
                format!("[{}] {}", i + 1, name).yellow().bold(),
                Self::message_stats(message).dimmed(),
                message.content
            ));
            if let Some(thinking) = &message.thinking {
                output.push_str(&format!(
                    "{}\n",
                    Self::indent(&format!("Thinking: {}", thinking), "  ").dimmed()
                ));
            }
        }

        output
    }

    /// Format the analytics report
    pub fn format_report(report: &ConversationReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header("Analytics"));

        let avg = &report.average_sentiment;
        output.push_str(&format!(
            "\n{} {} (score {:.2}, confidence {:.2})\n",
            "Overall sentiment:".cyan().bold(),
            avg.most_common_label.as_str(),
            avg.avg_score,
            avg.avg_confidence
        ));
        for entry in &report.agent_sentiment {
            output.push_str(&format!(
                "  * {}: {} ({:.2})\n",
                entry.agent_id,
                entry.sentiment.most_common_label.as_str(),
                entry.sentiment.avg_score
            ));
        }

        output.push_str(&format!("\n{}\n", "Leadership:".cyan().bold()));
        let leader = report.leadership.leader().map(|(id, _)| id);
        for (id, score) in &report.leadership.scores {
            let line = format!("  * {}: {:.2}", id, score);
            if Some(id.as_str()) == leader && *score > 0.0 {
                output.push_str(&format!("{} {}\n", line.green().bold(), "(leader)".green()));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }

        let flow = &report.information_flow;
        if !report.agent_ids.is_empty() {
            output.push_str(&format!("\n{}\n", "Information flow (from -> to):".cyan().bold()));
            for from in &report.agent_ids {
                for to in &report.agent_ids {
                    if let Some(weight) = flow.flow(from, to)
                        && weight > 0.0
                    {
                        output.push_str(&format!("  * {} -> {}: {:.2}\n", from, to, weight));
                    }
                }
            }
        }

        output.push_str(&format!("\n{}\n", "Average cognitive profile:".cyan().bold()));
        for dimension in CognitiveDimension::ALL {
            output.push_str(&format!(
                "  {:<28} {:.2}\n",
                dimension.name(),
                report.average_cognitive[dimension.index()]
            ));
        }

        if report.shifts.is_empty() {
            output.push_str(&format!("\n{}\n", "No cognitive shifts detected.".dimmed()));
        } else {
            output.push_str(&format!("\n{}\n", "Cognitive shifts:".yellow().bold()));
            for shift in &report.shifts {
                let dims = shift
                    .dimensions
                    .iter()
                    .map(|d| d.name())
                    .collect::<Vec<_>>()
                    .join(", ");
                output.push_str(&format!(
                    "  * {} magnitude {:.2}: {}\n",
                    shift.timestamp.format("%H:%M:%S"),
                    shift.magnitude,
                    dims
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format the transcript followed by the report
    pub fn format_full(
        conversation: &SandboxConversation,
        agents: &[AgentConfig],
        report: &ConversationReport,
    ) -> String {
        let mut output = Self::format_transcript(conversation, agents);
        output.push_str(&Self::format_report(report));
        output
    }

    /// Format as JSON; the report is omitted when `None`
    pub fn format_json(
        conversation: &SandboxConversation,
        report: Option<&ConversationReport>,
    ) -> String {
        let value = match report {
            Some(report) => json!({ "conversation": conversation, "report": report }),
            None => json!({ "conversation": conversation }),
        };
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a query answer
    pub fn format_answer(query: &str, answer: &str) -> String {
        format!("{} {}\n\n{}\n", "Q:".bold(), query, answer)
    }

    /// List every built-in preset, style and template
    pub fn format_presets() -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header("Agent presets"));
        for preset in AGENT_PRESETS {
            output.push_str(&format!(
                "\n{} {} {}\n  {}\n",
                preset.avatar,
                preset.id.yellow().bold(),
                format!("({}, {})", preset.name, preset.role).dimmed(),
                preset.description
            ));
            if !preset.expertise.is_empty() {
                output.push_str(&format!("  expertise: {}\n", preset.expertise.join(", ")));
            }
        }

        output.push_str(&Self::section_header("Interaction styles"));
        for style in INTERACTION_STYLES {
            output.push_str(&format!(
                "\n{} {}\n  {}\n",
                style.id.yellow().bold(),
                format!("(temperature {:.1})", style.temperature).dimmed(),
                style.description
            ));
        }

        output.push_str(&Self::section_header("Conversation templates"));
        for template in CONVERSATION_TEMPLATES {
            output.push_str(&format!(
                "\n{} {}\n  {}\n  agents: {}\n",
                template.id.yellow().bold(),
                format!("({})", template.name).dimmed(),
                template.description,
                template.suggested_agents.join(", ")
            ));
        }

        output
    }

    fn message_stats(message: &SandboxMessage) -> String {
        if message.tokens.truncated {
            format!(
                "({} tokens, {} ms, truncated)",
                message.tokens.total, message.latency_ms
            )
        } else {
            format!("({} tokens, {} ms)", message.tokens.total, message.latency_ms)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sandbox_application::AnalyzeConversationUseCase;
    use sandbox_domain::presets::agent_preset;

    fn sample() -> (SandboxConversation, Vec<AgentConfig>) {
        colored::control::set_override(false);
        let agents = vec![
            agent_preset("critical-thinker").unwrap().to_agent_config(),
            agent_preset("creative-explorer").unwrap().to_agent_config(),
        ];
        let mut conv = SandboxConversation::new("c1", "Free will", "Find common ground", None);
        conv.push(
            SandboxMessage::new("c1", "critical-thinker", "Let's consider option X?")
                .with_thinking(Some("Open with a question".to_string())),
        );
        conv.push(SandboxMessage::new("c1", "creative-explorer", "This is great and wonderful"));
        (conv, agents)
    }

    #[test]
    fn test_transcript_uses_agent_names() {
        let (conv, agents) = sample();
        let output = ConsoleFormatter::format_transcript(&conv, &agents);
        assert!(output.contains("Topic: Free will"));
        assert!(output.contains(&format!("[1] {}", agents[0].name)));
        assert!(output.contains("Thinking: Open with a question"));
        assert!(output.contains("This is great and wonderful"));
    }

    #[test]
    fn test_truncated_message_is_flagged() {
        let (mut conv, agents) = sample();
        conv.messages[1].tokens.truncated = true;
        conv.messages[1].tokens.total = 600;
        let output = ConsoleFormatter::format_transcript(&conv, &agents);
        assert!(output.contains("(600 tokens, 0 ms, truncated)"));
        assert!(output.contains("(0 tokens, 0 ms)"));
    }

    #[test]
    fn test_transcript_falls_back_to_ids() {
        let (conv, _) = sample();
        let output = ConsoleFormatter::format_transcript(&conv, &[]);
        assert!(output.contains("[2] creative-explorer"));
        assert!(!output.contains("Agents:"));
    }

    #[test]
    fn test_report_lists_leader() {
        let (conv, _) = sample();
        let report = AnalyzeConversationUseCase::default().execute(&conv);
        let output = ConsoleFormatter::format_report(&report);
        assert!(output.contains("critical-thinker: 10.00 (leader)"));
        assert!(output.contains("RECURSIVE_DEPTH"));
    }

    #[test]
    fn test_json_contains_conversation_and_report() {
        let (conv, _) = sample();
        let report = AnalyzeConversationUseCase::default().execute(&conv);
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&conv, Some(&report))).unwrap();
        assert_eq!(value["conversation"]["topic"], "Free will");
        assert_eq!(value["report"]["conversation_id"], "c1");

        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&conv, None)).unwrap();
        assert!(value.get("report").is_none());
    }

    #[test]
    fn test_presets_listing() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_presets();
        assert!(output.contains("critical-thinker"));
        assert!(output.contains("exploratory"));
        assert!(output.contains("ethical-dilemma"));
    }
}
