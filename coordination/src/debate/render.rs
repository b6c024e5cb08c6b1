//! Presentation artifacts emitted after a run: the readable transcript and
//! a Graphviz description of the debate workflow with the winner annotated.

use petgraph::dot::{Config, Dot};
use petgraph::graph::DiGraph;

use super::state::{DebateState, ParticipantRole, Winner, MEMORY_SENTINEL};

/// Human-readable transcript of a (possibly unfinished) debate.
pub fn render_transcript(state: &DebateState) -> String {
    let mut out = String::new();
    out.push_str(&format!("Debate topic: {}\n", state.topic));
    out.push_str(&format!(
        "Participants: {} vs {}\n\n",
        ParticipantRole::Scientist,
        ParticipantRole::Philosopher
    ));

    for record in &state.history {
        out.push_str(&format!("--- Round {} ---\n", record.round));
        out.push_str(&record.display_line());
        out.push('\n');
    }

    let memory = if state.memory.is_empty() {
        MEMORY_SENTINEL
    } else {
        state.memory.as_str()
    };
    out.push_str(&format!("\n[Memory] {memory}\n"));

    if let Some(summary) = &state.judge_summary {
        out.push_str("\n[Judge]\n");
        out.push_str(summary);
        out.push('\n');
    }
    let winner = state.winner.unwrap_or(Winner::Undecided);
    out.push_str(&format!("\nWinner: {winner}\n"));
    out
}

#[derive(Debug)]
struct WorkflowNode {
    label: String,
    outcome: bool,
}

impl WorkflowNode {
    fn step(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            outcome: false,
        }
    }
}

/// Graphviz DOT source for the five-node debate workflow plus the outcome box.
pub fn workflow_dot(winner: Option<Winner>) -> String {
    let mut graph: DiGraph<WorkflowNode, ()> = DiGraph::new();

    let user = graph.add_node(WorkflowNode::step("UserInput"));
    let agent_a = graph.add_node(WorkflowNode::step(format!(
        "Agent A ({})",
        ParticipantRole::Scientist
    )));
    let memory = graph.add_node(WorkflowNode::step("Memory"));
    let agent_b = graph.add_node(WorkflowNode::step(format!(
        "Agent B ({})",
        ParticipantRole::Philosopher
    )));
    let judge = graph.add_node(WorkflowNode::step("Judge"));
    let outcome = graph.add_node(WorkflowNode {
        label: format!("Winner: {}", winner.unwrap_or(Winner::Undecided)),
        outcome: true,
    });

    for (from, to) in [
        (user, agent_a),
        (agent_a, memory),
        (memory, agent_b),
        (agent_b, memory),
        (memory, agent_a),
        (agent_a, judge),
        (agent_b, judge),
        (judge, outcome),
    ] {
        graph.add_edge(from, to, ());
    }

    let dot = Dot::with_attr_getters(
        &graph,
        &[Config::NodeNoLabel, Config::EdgeNoLabel],
        &|_, _| String::new(),
        &|_, (_, node)| {
            if node.outcome {
                format!(
                    "label = \"{}\" shape = box style = filled color = lightgreen ",
                    node.label
                )
            } else {
                format!("label = \"{}\" ", node.label)
            }
        },
    );
    format!("{dot:?}")
}
