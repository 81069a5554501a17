//! Turns `run` arguments plus configuration into a concrete conversation plan.

use anyhow::{Context, Result, anyhow, bail};
use sandbox_domain::AgentConfig;
use sandbox_domain::presets::{agent_preset, conversation_template, interaction_style};
use sandbox_infrastructure::FileConfig;
use sandbox_presentation::cli::commands::RunArgs;

/// Everything needed to start a conversation
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub agents: Vec<AgentConfig>,
    pub topic: String,
    pub objective: String,
    pub system_prompt: Option<String>,
    pub turns: usize,
    pub model: String,
    pub temperature: f64,
}

impl RunPlan {
    /// Explicit arguments win over the template, the template over config.
    pub fn resolve(args: &RunArgs, config: &FileConfig) -> Result<Self> {
        let template = args
            .template
            .as_deref()
            .map(|id| {
                conversation_template(id)
                    .ok_or_else(|| anyhow!("Unknown conversation template '{}'", id))
            })
            .transpose()?;

        let agent_ids: Vec<String> = if !args.agents.is_empty() {
            args.agents.clone()
        } else if let Some(template) = template {
            template.suggested_agents.iter().map(|s| s.to_string()).collect()
        } else {
            bail!("No agents given. Use --agent <preset> (see `llm-sandbox presets`) or --template <id>.");
        };

        let model = args
            .model
            .clone()
            .unwrap_or_else(|| config.provider.default_model.clone());

        let agents = agent_ids
            .iter()
            .map(|id| {
                let preset =
                    agent_preset(id).with_context(|| format!("Unknown agent preset '{}'", id))?;
                let mut agent = preset.to_agent_config();
                agent.model = model.clone();
                Ok(agent)
            })
            .collect::<Result<Vec<_>>>()?;

        let topic = match (&args.topic, template) {
            (Some(topic), _) => topic.clone(),
            (None, Some(template)) => template.topic.to_string(),
            (None, None) => bail!("--topic is required unless --template is given"),
        };

        let objective = match (&args.objective, template) {
            (Some(objective), _) => objective.clone(),
            (None, Some(template)) => template.objective.to_string(),
            (None, None) => bail!("--objective is required unless --template is given"),
        };

        let system_prompt = args
            .system_prompt
            .clone()
            .or_else(|| template.map(|t| t.system_prompt_with_constraints()));

        let turns = args.turns.unwrap_or(config.conversation.turns);
        if turns == 0 {
            bail!("--turns must be at least 1");
        }

        let temperature = match &args.style {
            Some(style) => {
                interaction_style(style)
                    .with_context(|| format!("Unknown interaction style '{}'", style))?
                    .temperature
            }
            None => config.conversation.effective_temperature(),
        };

        Ok(Self {
            agents,
            topic,
            objective,
            system_prompt,
            turns,
            model,
            temperature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_supplies_defaults() {
        let args = RunArgs {
            template: Some("ethical-dilemma".to_string()),
            ..RunArgs::default()
        };
        let plan = RunPlan::resolve(&args, &FileConfig::default()).unwrap();
        let template = conversation_template("ethical-dilemma").unwrap();

        assert_eq!(plan.topic, template.topic);
        assert_eq!(plan.agents.len(), template.suggested_presets().len());
        assert!(plan.agents.iter().all(|a| a.model == "llama3-70b-8192"));
        assert_eq!(plan.system_prompt, Some(template.system_prompt_with_constraints()));
        assert_eq!(plan.turns, 6);
        assert_eq!(plan.temperature, 0.7);
    }

    #[test]
    fn test_explicit_arguments_win() {
        let args = RunArgs {
            agents: vec!["critical-thinker".to_string(), "synthesizer".to_string()],
            template: Some("ethical-dilemma".to_string()),
            topic: Some("Remote work".to_string()),
            turns: Some(3),
            model: Some("llama3-8b-8192".to_string()),
            style: Some("exploratory".to_string()),
            ..RunArgs::default()
        };
        let plan = RunPlan::resolve(&args, &FileConfig::default()).unwrap();

        assert_eq!(plan.topic, "Remote work");
        assert_eq!(plan.agents[1].id, "synthesizer");
        assert_eq!(plan.agents[0].model, "llama3-8b-8192");
        assert_eq!(plan.turns, 3);
        assert_eq!(plan.temperature, 0.9);
    }

    #[test]
    fn test_missing_agents_or_topic() {
        assert!(RunPlan::resolve(&RunArgs::default(), &FileConfig::default()).is_err());

        let args = RunArgs {
            agents: vec!["synthesizer".to_string()],
            ..RunArgs::default()
        };
        let err = RunPlan::resolve(&args, &FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--topic"));
    }

    #[test]
    fn test_unknown_ids_are_rejected() {
        let args = RunArgs {
            agents: vec!["nobody".to_string()],
            topic: Some("t".to_string()),
            objective: Some("o".to_string()),
            ..RunArgs::default()
        };
        let err = RunPlan::resolve(&args, &FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("nobody"));

        let args = RunArgs {
            template: Some("nope".to_string()),
            ..RunArgs::default()
        };
        assert!(RunPlan::resolve(&args, &FileConfig::default()).is_err());
    }
}
