//! Progress reporting for conversation runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sandbox_application::ConversationProgress;
use sandbox_domain::{AgentConfig, SandboxMessage};
use std::sync::Mutex;

/// Reports progress during a conversation with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn turn_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationProgress for ProgressReporter {
    fn on_turn_start(&self, turn: usize, total_turns: usize, agent: &AgentConfig) {
        let Ok(mut guard) = self.bar.lock() else {
            return;
        };
        let pb = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new(total_turns as u64);
            pb.set_style(Self::turn_style());
            pb.set_prefix("Conversation");
            pb
        });
        pb.set_message(format!("turn {}: {} is thinking...", turn, agent.name));
    }

    fn on_turn_complete(&self, _turn: usize, agent: &AgentConfig, message: &SandboxMessage) {
        self.with_bar(|pb| {
            pb.set_message(format!("{} {} ({} tokens)", "v".green(), agent.name, message.tokens.total));
            pb.inc(1);
        });
    }

    fn on_turn_failed(&self, turn: usize, agent: &AgentConfig, error: &str) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.abandon_with_message(format!(
                "{} turn {} by {} failed: {}",
                "x".red(),
                turn,
                agent.name,
                error
            ));
        }
    }

    fn on_run_complete(&self, total_messages: usize) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_with_message(format!("{} ({} messages)", "complete!".green(), total_messages));
        }
    }
}

/// Simple text-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl ConversationProgress for SimpleProgress {
    fn on_turn_start(&self, turn: usize, total_turns: usize, agent: &AgentConfig) {
        eprintln!(
            "{} {} ({}/{})",
            "->".cyan(),
            agent.name.bold(),
            turn,
            total_turns
        );
    }

    fn on_turn_complete(&self, _turn: usize, _agent: &AgentConfig, message: &SandboxMessage) {
        eprintln!("  {} {} tokens, {} ms", "v".green(), message.tokens.total, message.latency_ms);
    }

    fn on_turn_failed(&self, _turn: usize, agent: &AgentConfig, error: &str) {
        eprintln!("  {} {} failed: {}", "x".red(), agent.name, error);
    }

    fn on_run_complete(&self, _total_messages: usize) {
        eprintln!();
    }
}
