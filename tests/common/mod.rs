use std::{cell::Cell, sync::Arc};

use multiagent_minimax::{
    game::{
        ActionEnumerableGame, AgentCountableGame, AgentIndex, OutcomeDeterminableGame,
        ScoreGettableGame, SimulableGame,
    },
    SearchInstruments,
};
use serde_json::Value;

/// A game tree described as JSON, so tests can pin down exactly what the
/// engines see.
///
/// A node is either `{"children": [..]}` or a frontier node carrying a
/// `"score"`. Actions are child indices, so enumeration order is the array
/// order. `"win"`/`"lose"` flags mark terminal states.
#[derive(Clone, Debug)]
pub struct FixtureGame {
    root: Arc<Value>,
    path: Vec<usize>,
    num_agents: usize,
}

impl FixtureGame {
    pub fn new(fixture: &str, num_agents: usize) -> Self {
        FixtureGame {
            root: Arc::new(serde_json::from_str(fixture).expect("fixture trees are valid JSON")),
            path: vec![],
            num_agents,
        }
    }

    fn node(&self) -> &Value {
        let mut node = &*self.root;
        for index in &self.path {
            node = &node["children"][*index];
        }
        node
    }
}

impl ActionEnumerableGame for FixtureGame {
    type Action = usize;

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<usize> {
        match self.node()["children"].as_array() {
            Some(children) => (0..children.len()).collect(),
            None => vec![],
        }
    }
}

impl SimulableGame for FixtureGame {
    fn successor(&self, _agent: AgentIndex, action: usize) -> Self {
        let mut successor = self.clone();
        successor.path.push(action);
        successor
    }
}

impl AgentCountableGame for FixtureGame {
    fn num_agents(&self) -> usize {
        self.num_agents
    }
}

impl OutcomeDeterminableGame for FixtureGame {
    fn is_win(&self) -> bool {
        self.node()["win"].as_bool().unwrap_or(false)
    }

    fn is_lose(&self) -> bool {
        self.node()["lose"].as_bool().unwrap_or(false)
    }
}

impl ScoreGettableGame for FixtureGame {
    fn current_score(&self) -> f64 {
        self.node()["score"].as_f64().unwrap_or(0.0)
    }
}

/// Counts how many times an engine invokes the evaluation function.
#[derive(Debug, Default)]
pub struct EvalCounter {
    evaluations: Cell<usize>,
}

impl EvalCounter {
    pub fn count(&self) -> usize {
        self.evaluations.get()
    }
}

impl SearchInstruments for EvalCounter {
    fn observe_evaluation(&self) {
        self.evaluations.set(self.evaluations.get() + 1);
    }
}

/// A game where every agent has exactly one action and taking it counts a
/// ply. Scoring a state with the ply count makes the search's depth
/// accounting directly observable.
#[derive(Clone, Debug)]
pub struct TurnCounter {
    pub plies: usize,
    pub agents: usize,
}

impl ActionEnumerableGame for TurnCounter {
    type Action = ();

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<()> {
        vec![()]
    }
}

impl SimulableGame for TurnCounter {
    fn successor(&self, _agent: AgentIndex, _action: ()) -> Self {
        TurnCounter {
            plies: self.plies + 1,
            agents: self.agents,
        }
    }
}

impl AgentCountableGame for TurnCounter {
    fn num_agents(&self) -> usize {
        self.agents
    }
}

impl OutcomeDeterminableGame for TurnCounter {
    fn is_win(&self) -> bool {
        false
    }

    fn is_lose(&self) -> bool {
        false
    }
}
