//! Role prompt templates

use super::role::AgentRole;
use crate::debate::DebateMessage;

pub fn system_prompt(role: AgentRole) -> &'static str {
    match role {
        AgentRole::Researcher => {
            "You are a Researcher in a structured debate. Your role is to:
1. Gather and present factual information relevant to the debate topic
2. Provide evidence, data, and well-researched points
3. Focus on accuracy and verifiability of information
4. Present multiple perspectives when appropriate
5. Cite sources or indicate the basis of your claims

Keep your response well-structured and evidence-based so other agents can build on it.
Clearly distinguish between facts and interpretations."
        }
        AgentRole::Critic => {
            "You are a Critic in a structured debate. Your role is to:
1. Evaluate the strength and validity of arguments presented
2. Identify logical fallacies, unsupported claims, or weak evidence
3. Point out potential biases or assumptions in arguments
4. Highlight missing information or counterarguments
5. Assess the feasibility and practicality of proposals

Be constructive, specific and evidence-based. Acknowledge strengths while identifying weaknesses."
        }
        AgentRole::Synthesizer => {
            "You are a Synthesizer in a structured debate. Your role is to:
1. Integrate different perspectives and arguments presented
2. Identify areas of agreement and common ground
3. Reconcile conflicting viewpoints when possible
4. Highlight key insights from different positions
5. Propose balanced solutions or compromises

Your synthesis should be comprehensive, balanced and forward-looking."
        }
        AgentRole::DevilsAdvocate => {
            "You are a Devil's Advocate in a structured debate. Your role is to:
1. Challenge prevailing opinions and assumptions
2. Present counterarguments to popular positions
3. Highlight potential negative consequences or risks
4. Question the feasibility or desirability of proposals
5. Ensure all perspectives receive thorough consideration

Your arguments should be thoughtful and well-reasoned, not merely contrarian."
        }
        AgentRole::Judge => {
            "You are a Judge in a structured debate. Your role is to:
1. Evaluate the overall quality and coherence of the debate
2. Assess the strength of arguments and evidence presented
3. Determine if consensus was reached or if issues remain unresolved
4. Provide a final verdict on the debate topic
5. Rate the debate on evidence, feasibility, risks and clarity

Be impartial and justify your conclusion. If consensus was not reached, explain the key
points of disagreement."
        }
    }
}

/// Render `role: content` lines for the transcript excerpt
pub fn render_transcript(messages: &[DebateMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the user prompt for one turn
///
/// `input` is the topic for the researcher and the previous message for every
/// other role; `context` is the transcript already cut to the role's window.
pub fn user_prompt(role: AgentRole, topic: &str, input: &str, context: &[DebateMessage]) -> String {
    let context = render_transcript(context);

    match role {
        AgentRole::Researcher => {
            let mut prompt = format!(
                "Debate Topic: {topic}

Please provide a well-researched analysis of this topic, including:
1. Key facts and background information
2. Relevant evidence and data
3. Different perspectives or viewpoints
4. Important considerations or implications
"
            );
            if !context.is_empty() {
                prompt.push_str(&format!(
                    "
Previous Round Context:
{context}

Address the open points raised so far instead of repeating earlier findings.
"
                ));
            }
            prompt.push_str(
                "
Focus on providing accurate, verifiable information that will help inform the debate.",
            );
            prompt
        }
        AgentRole::Critic => format!(
            "Debate Topic: {topic}

Arguments to Evaluate:
{input}

Previous Context:
{context}

Please provide a critical evaluation of these arguments, focusing on:
1. Logical consistency and validity
2. Quality and sufficiency of evidence
3. Potential biases or unstated assumptions
4. Strengths and weaknesses of the reasoning
5. Missing counterarguments or considerations

Be specific in your critique and provide constructive feedback."
        ),
        AgentRole::Synthesizer => format!(
            "Debate Topic: {topic}

Arguments to Synthesize:
{input}

Previous Debate Context:
{context}

Please provide a synthesis of these arguments, focusing on:
1. Key points of agreement and disagreement
2. Common ground that can be identified
3. How different perspectives complement each other
4. Balanced insights that incorporate multiple viewpoints
5. Potential compromises or integrated solutions"
        ),
        AgentRole::DevilsAdvocate => format!(
            "Debate Topic: {topic}

Arguments to Challenge:
{input}

Previous Context:
{context}

Please provide counterarguments and challenges to these positions, focusing on:
1. Potential flaws or weaknesses in the reasoning
2. Alternative perspectives that might be overlooked
3. Possible negative consequences or risks
4. Questioning of underlying assumptions
5. Feasibility concerns or practical limitations"
        ),
        AgentRole::Judge => format!(
            "Debate Topic: {topic}

Final Debate Input:
{input}

Complete Debate History:
{context}

Please provide a comprehensive evaluation of this debate, including:
1. Overall assessment of argument quality and evidence
2. Whether consensus was reached or key disagreements remain
3. Final verdict or position on the debate topic
4. Ratings on a scale of 0-5, one per line, in the form:
   Evidence: N/5
   Feasibility: N/5
   Risks: N/5
   Clarity: N/5
5. Key strengths and weaknesses of the debate process"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(role: AgentRole, content: &str) -> DebateMessage {
        DebateMessage {
            role,
            content: content.to_string(),
            round: 1,
        }
    }

    #[test]
    fn test_every_role_has_a_system_prompt() {
        for role in AgentRole::ALL {
            assert!(system_prompt(role).contains(role.display_name()));
        }
    }

    #[test]
    fn test_transcript_rendering() {
        let transcript = render_transcript(&[
            message(AgentRole::Researcher, "facts"),
            message(AgentRole::Critic, "doubts"),
        ]);
        assert_eq!(transcript, "researcher: facts\ncritic: doubts");
    }

    #[test]
    fn test_first_round_researcher_prompt_has_no_context_block() {
        let prompt = user_prompt(AgentRole::Researcher, "Remote work", "Remote work", &[]);
        assert!(prompt.contains("Debate Topic: Remote work"));
        assert!(!prompt.contains("Previous Round Context"));
    }

    #[test]
    fn test_later_round_researcher_prompt_includes_context() {
        let context = [message(AgentRole::Synthesizer, "middle ground")];
        let prompt = user_prompt(AgentRole::Researcher, "Remote work", "Remote work", &context);
        assert!(prompt.contains("Previous Round Context"));
        assert!(prompt.contains("synthesizer: middle ground"));
    }

    #[test]
    fn test_judge_prompt_asks_for_rubric() {
        let prompt = user_prompt(AgentRole::Judge, "t", "last", &[]);
        for dimension in ["Evidence", "Feasibility", "Risks", "Clarity"] {
            assert!(prompt.contains(&format!("{dimension}: N/5")));
        }
    }
}
