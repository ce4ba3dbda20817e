use std::fmt::Debug;

use decorum::N64;
use text_trees::StringTreeNode;

use crate::game::AgentIndex;

#[derive(Debug, Clone)]
/// This is returned from a run of a search engine
/// It contains everything we learned about the explored game tree
pub enum SearchReturn<A: Copy + PartialEq + Debug> {
    /// A max or min node: one agent chose among its options
    Node {
        /// Which agent was moving at this node
        agent: AgentIndex,
        /// Every explored option, in enumeration order, with the subtree
        /// underneath it. If `pruned` is set the list stops at the option
        /// that triggered the cutoff.
        options: Vec<(A, SearchReturn<A>)>,
        /// The value backed up to this node
        value: N64,
        /// Whether the remaining siblings were cut off by an alpha-beta
        /// bound. Always false for the engines that don't prune.
        pruned: bool,
    },
    /// A chance node: an opponent modeled as choosing uniformly at random
    /// among its legal actions. Its value is the mean of its children, so
    /// no single option is chosen.
    Chance {
        /// Which agent was moving at this node
        agent: AgentIndex,
        /// Every option, in enumeration order, with the subtree underneath
        /// it
        options: Vec<(A, SearchReturn<A>)>,
        /// The expected value over all options
        value: N64,
    },
    /// A terminal or frontier state, scored by the evaluation function
    Leaf {
        /// The evaluation of the state
        value: N64,
    },
}

impl<A: Copy + PartialEq + Debug> SearchReturn<A> {
    /// The value backed up to this node.
    pub fn value(&self) -> N64 {
        match self {
            SearchReturn::Node { value, .. }
            | SearchReturn::Chance { value, .. }
            | SearchReturn::Leaf { value } => *value,
        }
    }

    /// The action chosen at this node: the first option, in enumeration
    /// order, whose subtree value equals this node's value.
    ///
    /// Chance nodes and leaves choose nothing, so they return `None`.
    pub fn best_action(&self) -> Option<A> {
        match self {
            SearchReturn::Node { options, value, .. } => options
                .iter()
                .find(|(_, result)| result.value() == *value)
                .map(|(action, _)| *action),
            SearchReturn::Chance { .. } | SearchReturn::Leaf { .. } => None,
        }
    }

    /// The principal line through the tree: each agent's chosen action,
    /// outermost first.
    ///
    /// This is useful for debugging as it shows the exchange of moves the
    /// search expects. The line stops at the first chance node or leaf.
    pub fn chosen_route(&self) -> Vec<(AgentIndex, A)> {
        match self {
            SearchReturn::Node {
                agent,
                options,
                value,
                ..
            } => {
                if let Some((action, rest)) = options
                    .iter()
                    .find(|(_, result)| result.value() == *value)
                {
                    let mut tail = rest.chosen_route();
                    tail.insert(0, (*agent, *action));
                    tail
                } else {
                    vec![]
                }
            }
            SearchReturn::Chance { .. } | SearchReturn::Leaf { .. } => vec![],
        }
    }

    /// A visual representation of the explored tree.
    ///
    /// It shows the moving agent, the backed-up value and any cutoff at each
    /// level. Returns `None` when the tree is a single leaf.
    pub fn to_text_tree(&self) -> Option<String> {
        let tree_node = self.to_text_tree_node("".to_owned())?;
        Some(format!("{}", tree_node))
    }

    fn to_text_tree_node(&self, label: String) -> Option<StringTreeNode> {
        let (options, header) = match self {
            SearchReturn::Leaf { .. } => return None,
            SearchReturn::Node {
                agent,
                options,
                value,
                pruned,
            } => {
                let cutoff = if *pruned { " (cutoff)" } else { "" };
                (
                    options,
                    format!("{} agent {} {:?}{}", label, agent, value, cutoff),
                )
            }
            SearchReturn::Chance {
                agent,
                options,
                value,
            } => (
                options,
                format!("{} chance agent {} {:?}", label, agent, value),
            ),
        };

        let mut node = StringTreeNode::new(header);
        for (action, result) in options {
            if let Some(next_node) = result.to_text_tree_node(format!("{:?}", action)) {
                node.push_node(next_node);
            }
        }

        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: f64) -> SearchReturn<usize> {
        SearchReturn::Leaf {
            value: N64::from(value),
        }
    }

    #[test]
    fn best_action_takes_the_first_option_matching_the_value() {
        let node = SearchReturn::Node {
            agent: 0,
            options: vec![(0, leaf(3.0)), (1, leaf(7.0)), (2, leaf(7.0))],
            value: N64::from(7.0),
            pruned: false,
        };

        assert_eq!(node.best_action(), Some(1));
    }

    #[test]
    fn leaves_and_chance_nodes_choose_nothing() {
        assert_eq!(leaf(1.0).best_action(), None);

        let chance = SearchReturn::Chance {
            agent: 1,
            options: vec![(0, leaf(2.0)), (1, leaf(4.0))],
            value: N64::from(3.0),
        };
        assert_eq!(chance.best_action(), None);
    }

    #[test]
    fn chosen_route_walks_the_principal_line() {
        let inner = SearchReturn::Node {
            agent: 1,
            options: vec![(0, leaf(5.0)), (1, leaf(9.0))],
            value: N64::from(5.0),
            pruned: false,
        };
        let root = SearchReturn::Node {
            agent: 0,
            options: vec![(7, inner), (8, leaf(2.0))],
            value: N64::from(5.0),
            pruned: false,
        };

        assert_eq!(root.chosen_route(), vec![(0, 7), (1, 0)]);
    }

    #[test]
    fn a_single_leaf_has_no_text_tree() {
        assert!(leaf(0.0).to_text_tree().is_none());
    }
}
