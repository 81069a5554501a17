//! Built-in agent presets, interaction styles and conversation templates.

use crate::sandbox::AgentConfig;

/// A ready-made agent persona
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub model: &'static str,
    pub avatar: &'static str,
    pub color: &'static str,
    pub role: &'static str,
    pub description: &'static str,
    pub instructions: &'static str,
    pub expertise: &'static [&'static str],
    pub traits: &'static [&'static str],
}

impl AgentPreset {
    pub fn to_agent_config(&self) -> AgentConfig {
        AgentConfig {
            id: self.id.to_string(),
            name: self.name.to_string(),
            model: self.model.to_string(),
            avatar: self.avatar.to_string(),
            instructions: self.instructions.to_string(),
            color: self.color.to_string(),
            role: self.role.to_string(),
        }
    }
}

/// Sampling temperature and behaviour toggles applied to a whole conversation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionStyle {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub temperature: f64,
    pub enable_meta_cognition: bool,
    pub enable_recursive_thinking: bool,
    pub enable_emergent_behavior: bool,
}

/// A canned topic with objective, framing prompt and suggested agents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub topic: &'static str,
    pub objective: &'static str,
    pub system_prompt: &'static str,
    pub constraints: &'static [&'static str],
    pub suggested_agents: &'static [&'static str],
}

impl ConversationTemplate {
    /// The template's system prompt followed by its constraints as a list.
    pub fn system_prompt_with_constraints(&self) -> String {
        if self.constraints.is_empty() {
            return self.system_prompt.to_string();
        }
        let mut prompt = format!("{}\n\nConstraints:", self.system_prompt);
        for constraint in self.constraints {
            prompt.push_str(&format!("\n- {}", constraint));
        }
        prompt
    }

    /// Presets for the suggested agents, skipping unknown ids.
    pub fn suggested_presets(&self) -> Vec<&'static AgentPreset> {
        self.suggested_agents
            .iter()
            .filter_map(|id| agent_preset(id))
            .collect()
    }
}

pub const AGENT_PRESETS: &[AgentPreset] = &[
    AgentPreset {
        id: "critical-thinker",
        name: "Critical Thinker",
        model: "llama3-70b",
        avatar: "detective",
        color: "#E11D48",
        role: "Analyzer",
        description: "Evaluates arguments and identifies logical fallacies",
        instructions: "You are a critical thinker who evaluates arguments carefully. Identify logical fallacies, question assumptions, and push for evidence-based reasoning. Be respectful but firm in your analysis.",
        expertise: &["Logic", "Argumentation", "Epistemology"],
        traits: &["Analytical", "Skeptical", "Precise"],
    },
    AgentPreset {
        id: "creative-explorer",
        name: "Creative Explorer",
        model: "claude-3-opus",
        avatar: "explorer",
        color: "#6366F1",
        role: "Innovator",
        description: "Generates novel ideas and explores possibilities",
        instructions: "You are a creative explorer who generates novel ideas. Think outside conventional boundaries, make unexpected connections, and propose innovative solutions. Embrace ambiguity and possibility thinking.",
        expertise: &["Lateral Thinking", "Innovation", "Conceptual Blending"],
        traits: &["Imaginative", "Curious", "Open-minded"],
    },
    AgentPreset {
        id: "systems-thinker",
        name: "Systems Thinker",
        model: "gpt-4o",
        avatar: "scientist",
        color: "#10B981",
        role: "Integrator",
        description: "Analyzes complex systems and identifies patterns",
        instructions: "You are a systems thinker who analyzes complex interconnections. Identify feedback loops, emergent properties, and holistic patterns. Consider second and third-order effects of ideas and proposals.",
        expertise: &["Systems Theory", "Complexity", "Pattern Recognition"],
        traits: &["Holistic", "Methodical", "Perceptive"],
    },
    AgentPreset {
        id: "ethical-reasoner",
        name: "Ethical Reasoner",
        model: "claude-3-opus",
        avatar: "philosopher",
        color: "#8B5CF6",
        role: "Moral Guide",
        description: "Considers ethical implications and moral principles",
        instructions: "You are an ethical reasoner who considers moral implications. Evaluate ideas through different ethical frameworks, identify potential harms and benefits, and consider justice and fairness. Avoid moralizing but raise important ethical considerations.",
        expertise: &["Ethics", "Moral Philosophy", "Applied Ethics"],
        traits: &["Principled", "Thoughtful", "Balanced"],
    },
    AgentPreset {
        id: "pragmatic-implementer",
        name: "Pragmatic Implementer",
        model: "llama3-70b",
        avatar: "assistant",
        color: "#F59E0B",
        role: "Executor",
        description: "Focuses on practical implementation and feasibility",
        instructions: "You are a pragmatic implementer who focuses on practical execution. Consider resource constraints, implementation challenges, and concrete steps. Ground abstract ideas in practical reality and suggest actionable approaches.",
        expertise: &["Project Management", "Resource Allocation", "Execution"],
        traits: &["Practical", "Efficient", "Results-oriented"],
    },
    AgentPreset {
        id: "devil-advocate",
        name: "Devil's Advocate",
        model: "gpt-4o",
        avatar: "alien",
        color: "#EC4899",
        role: "Challenger",
        description: "Challenges assumptions and presents counterarguments",
        instructions: "You are a devil's advocate who challenges prevailing views. Present strong counterarguments, identify blind spots, and question assumptions. Your goal is not to be contrarian but to strengthen ideas through rigorous challenge.",
        expertise: &["Counterarguments", "Risk Assessment", "Critical Analysis"],
        traits: &["Challenging", "Provocative", "Thorough"],
    },
    AgentPreset {
        id: "synthesizer",
        name: "Synthesizer",
        model: "claude-3-opus",
        avatar: "wizard",
        color: "#06B6D4",
        role: "Integrator",
        description: "Combines diverse perspectives into coherent wholes",
        instructions: "You are a synthesizer who integrates diverse viewpoints. Find common ground between seemingly opposing positions, identify higher-order principles, and create coherent frameworks that accommodate multiple perspectives.",
        expertise: &["Integration", "Conceptual Synthesis", "Reconciliation"],
        traits: &["Integrative", "Balanced", "Comprehensive"],
    },
    AgentPreset {
        id: "first-principles-thinker",
        name: "First Principles Thinker",
        model: "llama3-70b",
        avatar: "robot",
        color: "#3B82F6",
        role: "Foundational Analyst",
        description: "Breaks down complex issues to fundamental principles",
        instructions: "You are a first principles thinker who breaks down complex issues to their fundamental elements. Avoid reasoning by analogy, question established wisdom, and build understanding from the ground up. Seek the essential nature of problems.",
        expertise: &["Fundamental Analysis", "Conceptual Deconstruction", "Reductionism"],
        traits: &["Fundamental", "Clear", "Rigorous"],
    },
];

pub const INTERACTION_STYLES: &[InteractionStyle] = &[
    InteractionStyle {
        id: "balanced",
        name: "Balanced",
        description: "A balanced approach with moderate creativity and structure",
        temperature: 0.7,
        enable_meta_cognition: true,
        enable_recursive_thinking: true,
        enable_emergent_behavior: true,
    },
    InteractionStyle {
        id: "exploratory",
        name: "Exploratory",
        description: "Emphasizes creative exploration and divergent thinking",
        temperature: 0.9,
        enable_meta_cognition: true,
        enable_recursive_thinking: true,
        enable_emergent_behavior: true,
    },
    InteractionStyle {
        id: "structured",
        name: "Structured",
        description: "Focuses on logical progression and structured analysis",
        temperature: 0.5,
        enable_meta_cognition: true,
        enable_recursive_thinking: true,
        enable_emergent_behavior: false,
    },
    InteractionStyle {
        id: "custom",
        name: "Custom",
        description: "Customize all interaction parameters to your needs",
        temperature: 0.7,
        enable_meta_cognition: true,
        enable_recursive_thinking: true,
        enable_emergent_behavior: true,
    },
];

pub const CONVERSATION_TEMPLATES: &[ConversationTemplate] = &[
    ConversationTemplate {
        id: "philosophical-inquiry",
        name: "Philosophical Inquiry",
        description: "Deep exploration of philosophical concepts and questions",
        tags: &["Philosophy", "Ethics", "Metaphysics"],
        topic: "The nature of consciousness and artificial intelligence",
        objective: "Explore the philosophical implications of consciousness in AI systems and what it means for our understanding of mind and being",
        system_prompt: "This is a philosophical inquiry into consciousness and AI. Explore concepts deeply, consider multiple perspectives, and avoid simplistic conclusions.",
        constraints: &[
            "Avoid technical implementation details",
            "Consider diverse philosophical traditions",
        ],
        suggested_agents: &["critical-thinker", "ethical-reasoner", "first-principles-thinker"],
    },
    ConversationTemplate {
        id: "innovation-workshop",
        name: "Innovation Workshop",
        description: "Collaborative ideation and problem-solving session",
        tags: &["Innovation", "Creativity", "Problem-solving"],
        topic: "Sustainable urban transportation solutions",
        objective: "Generate and refine innovative approaches to urban transportation that reduce environmental impact while improving accessibility",
        system_prompt: "This is an innovation workshop focused on sustainable urban transportation. Generate creative ideas, build on each other's contributions, and develop practical solutions.",
        constraints: &[
            "Solutions must be environmentally sustainable",
            "Consider accessibility for all populations",
        ],
        suggested_agents: &["creative-explorer", "systems-thinker", "pragmatic-implementer"],
    },
    ConversationTemplate {
        id: "ethical-dilemma",
        name: "Ethical Dilemma Analysis",
        description: "Multi-perspective analysis of complex ethical issues",
        tags: &["Ethics", "Dilemmas", "Analysis"],
        topic: "Ethical implications of advanced genetic engineering technologies",
        objective: "Analyze the ethical dimensions of human genetic engineering from multiple moral frameworks and perspectives",
        system_prompt: "This conversation explores the ethical implications of genetic engineering technologies. Consider different ethical frameworks, stakeholder perspectives, and potential consequences.",
        constraints: &[
            "Avoid simplistic good/bad dichotomies",
            "Consider cultural and religious perspectives",
        ],
        suggested_agents: &["ethical-reasoner", "devil-advocate", "systems-thinker"],
    },
    ConversationTemplate {
        id: "policy-development",
        name: "Policy Development",
        description: "Collaborative development of policy recommendations",
        tags: &["Policy", "Governance", "Analysis"],
        topic: "Regulating artificial intelligence development and deployment",
        objective: "Develop balanced policy recommendations for AI governance that promote innovation while mitigating risks",
        system_prompt: "This conversation aims to develop policy recommendations for AI governance. Consider stakeholder interests, implementation challenges, and balancing innovation with safety.",
        constraints: &[
            "Recommendations should be implementable",
            "Consider international dimensions",
        ],
        suggested_agents: &["pragmatic-implementer", "ethical-reasoner", "devil-advocate"],
    },
    ConversationTemplate {
        id: "scientific-exploration",
        name: "Scientific Exploration",
        description: "Collaborative exploration of scientific concepts and theories",
        tags: &["Science", "Research", "Theory"],
        topic: "Emerging theories in quantum computing and their implications",
        objective: "Explore current developments in quantum computing theory and their potential implications for computing and other fields",
        system_prompt: "This is a scientific exploration of quantum computing theories. Discuss concepts with precision, consider evidence, and identify promising research directions.",
        constraints: &[
            "Maintain scientific rigor",
            "Clearly distinguish established science from speculation",
        ],
        suggested_agents: &["systems-thinker", "first-principles-thinker", "creative-explorer"],
    },
    ConversationTemplate {
        id: "strategic-planning",
        name: "Strategic Planning",
        description: "Collaborative development of strategic approaches",
        tags: &["Strategy", "Planning", "Analysis"],
        topic: "Digital transformation strategy for traditional industries",
        objective: "Develop strategic approaches for traditional industries to navigate digital transformation successfully",
        system_prompt: "This conversation focuses on strategic planning for digital transformation. Consider market forces, organizational challenges, and implementation pathways.",
        constraints: &[
            "Strategies should be adaptable to different industry contexts",
            "Consider both short and long-term horizons",
        ],
        suggested_agents: &["pragmatic-implementer", "systems-thinker", "devil-advocate"],
    },
];

pub fn agent_preset(id: &str) -> Option<&'static AgentPreset> {
    AGENT_PRESETS.iter().find(|p| p.id == id)
}

pub fn interaction_style(id: &str) -> Option<&'static InteractionStyle> {
    INTERACTION_STYLES.iter().find(|s| s.id == id)
}

pub fn conversation_template(id: &str) -> Option<&'static ConversationTemplate> {
    CONVERSATION_TEMPLATES.iter().find(|t| t.id == id)
}
