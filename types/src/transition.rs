use crate::{Action, AgentId, AgentLocation, Edge, GameState, Graph, IllegalAction, NodeId};

impl GameState {
    /// The actions the agent to move can legally take, in the order the successors are generated
    ///
    /// An agent at rest can commit to any neighboring edge (ascending neighbor id) or terminate,
    /// which always comes last. An agent that is mid-edge or terminated can only pass. A terminal
    /// state has no legal actions.
    pub fn legal_actions(&self, graph: &Graph) -> Vec<Action> {
        if self.is_terminal() {
            return vec![];
        }

        match self.location(self.turn_owner) {
            AgentLocation::AtRest { node } => graph
                .neighbors(node)
                .map(|(to, _)| Action::Move { from: node, to })
                .chain(std::iter::once(Action::Terminate))
                .collect(),
            AgentLocation::Moving { .. } | AgentLocation::Terminated => vec![Action::Noop],
        }
    }

    /// Every successor of this state, labeled with the action that leads to it
    ///
    /// Returns an empty list for terminal states.
    pub fn successors(&self, graph: &Graph) -> Vec<(Action, GameState)> {
        if self.is_terminal() {
            return vec![];
        }

        let agent = self.turn_owner;
        match self.location(agent) {
            AgentLocation::AtRest { node } => graph
                .neighbors(node)
                .map(|(to, edge)| {
                    (
                        Action::Move { from: node, to },
                        self.committing(agent, node, to, edge),
                    )
                })
                .chain(std::iter::once((
                    Action::Terminate,
                    self.terminating(agent),
                )))
                .collect(),
            AgentLocation::Moving { .. } | AgentLocation::Terminated => {
                vec![(Action::Noop, self.passing())]
            }
        }
    }

    /// The successor states without their action labels
    pub fn expand(&self, graph: &Graph) -> Vec<GameState> {
        self.successors(graph)
            .into_iter()
            .map(|(_, state)| state)
            .collect()
    }

    /// Check an externally chosen action and return the state it leads to
    ///
    /// Anything that is not one of [GameState::legal_actions] for `agent` is rejected with the
    /// reason why, and `self` is left as it was.
    pub fn apply(
        &self,
        graph: &Graph,
        agent: AgentId,
        action: Action,
    ) -> Result<GameState, IllegalAction> {
        if self.is_terminal() {
            return Err(IllegalAction::GameOver);
        }
        if agent != self.turn_owner {
            return Err(IllegalAction::NotYourTurn {
                agent,
                owner: self.turn_owner,
            });
        }

        match (self.location(agent), action) {
            (AgentLocation::AtRest { .. }, Action::Noop) => Err(IllegalAction::MustDecide(agent)),
            (AgentLocation::AtRest { .. }, Action::Terminate) => Ok(self.terminating(agent)),
            (AgentLocation::AtRest { node }, Action::Move { from, to }) => {
                if from != node {
                    return Err(IllegalAction::WrongOrigin {
                        agent,
                        at: node,
                        from,
                    });
                }
                let edge = graph
                    .edge(node, to)
                    .ok_or(IllegalAction::NotANeighbor { from, to })?;

                Ok(self.committing(agent, node, to, edge))
            }
            (AgentLocation::Moving { .. } | AgentLocation::Terminated, Action::Noop) => {
                Ok(self.passing())
            }
            (AgentLocation::Moving { .. }, _) => Err(IllegalAction::MidEdge(agent)),
            (AgentLocation::Terminated, _) => Err(IllegalAction::Terminated(agent)),
        }
    }

    fn committing(&self, agent: AgentId, from: NodeId, to: NodeId, edge: &Edge) -> GameState {
        let mut next = self.clone();
        next.locations[agent.index()] = AgentLocation::committed(from, to, edge.weight);
        next.committed_this_round[agent.index()] = true;
        next.end_ply();
        next
    }

    fn terminating(&self, agent: AgentId) -> GameState {
        let mut next = self.clone();
        next.locations[agent.index()] = AgentLocation::Terminated;
        next.end_ply();
        next
    }

    fn passing(&self) -> GameState {
        let mut next = self.clone();
        next.end_ply();
        next
    }

    fn end_ply(&mut self) {
        let acted = self.turn_owner;
        self.turn_owner = acted.next();

        if acted.closes_round() {
            self.close_round();
        }
    }

    /// Shared effects once every agent had its ply: movement, the clock, and rescuing people
    fn close_round(&mut self) {
        for (location, committed) in self
            .locations
            .iter_mut()
            .zip(std::mem::take(&mut self.committed_this_round))
        {
            if !committed {
                *location = location.advanced();
            }
        }

        self.current_time += 1;

        if self.within_deadline() {
            self.collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::{Deadline, GraphBuilder, NUM_AGENTS};

    /// 0 -(w2)- 1 -(w1)- 2, with 5 people on vertex 1
    fn line() -> Graph {
        GraphBuilder::new()
            .node(0, 0)
            .node(1, 5)
            .node(2, 0)
            .edge(1, 0, 1, 2)
            .edge(2, 1, 2, 1)
            .build()
            .unwrap()
    }

    /// A small graph with several valued vertices and mixed weights
    fn diamond() -> Graph {
        GraphBuilder::new()
            .node(0, 0)
            .node(1, 2)
            .node(2, 3)
            .node(3, 4)
            .edge(1, 0, 1, 1)
            .edge(2, 0, 2, 2)
            .edge(3, 1, 3, 1)
            .edge(4, 2, 3, 3)
            .build()
            .unwrap()
    }

    /// Every state reachable from `root` in at most `depth` plies, root included
    fn reachable(graph: &Graph, root: GameState, depth: usize) -> Vec<(GameState, GameState)> {
        let mut transitions = vec![];
        let mut frontier = vec![root];

        for _ in 0..depth {
            let mut next_frontier = vec![];
            for state in frontier {
                for next in state.expand(graph) {
                    transitions.push((state.clone(), next.clone()));
                    next_frontier.push(next);
                }
            }
            frontier = next_frontier;
        }

        transitions
    }

    fn conserved_total(state: &GameState) -> u32 {
        state.people_remaining() + state.scores().iter().sum::<u32>()
    }

    #[test]
    fn test_at_rest_successor_order() {
        let graph = diamond();
        let state = GameState::new(&graph, [0, 0], Deadline::at(20)).unwrap();

        let actions = state
            .successors(&graph)
            .into_iter()
            .map(|(a, _)| a)
            .collect_vec();

        assert_eq!(
            actions,
            vec![
                Action::Move { from: 0, to: 1 },
                Action::Move { from: 0, to: 2 },
                Action::Terminate,
            ]
        );
        assert_eq!(actions, state.legal_actions(&graph));
    }

    #[test]
    fn test_commit_consumes_first_step() {
        let graph = diamond();
        let state = GameState::new(&graph, [0, 0], Deadline::at(20)).unwrap();

        let successors = state.expand(&graph);

        assert_eq!(successors[0].location(AgentId::FIRST), AgentLocation::at(1));
        assert_eq!(
            successors[1].location(AgentId::FIRST),
            AgentLocation::Moving {
                from: 0,
                to: 2,
                steps_remaining: 1
            }
        );
        assert_eq!(
            successors[2].location(AgentId::FIRST),
            AgentLocation::Terminated
        );
        for successor in &successors {
            assert_eq!(successor.turn_owner(), AgentId::SECOND);
            assert_eq!(successor.current_time(), 0);
            assert_eq!(successor.scores(), &[0, 0]);
        }
    }

    #[test]
    fn test_moving_agent_only_passes() {
        let graph = line();
        let state = GameState::new(&graph, [0, 2], Deadline::at(20))
            .unwrap()
            .apply(&graph, AgentId::FIRST, Action::Move { from: 0, to: 1 })
            .unwrap()
            .apply(&graph, AgentId::SECOND, Action::Terminate)
            .unwrap();

        assert!(state.is_agent_moving(AgentId::FIRST));
        let successors = state.successors(&graph);
        assert_eq!(successors.len(), 1);
        assert_eq!(successors[0].0, Action::Noop);
        assert_eq!(state.legal_actions(&graph), vec![Action::Noop]);
    }

    #[test]
    fn test_round_close_advances_time_and_collects() {
        let graph = diamond();
        let state = GameState::new(&graph, [0, 0], Deadline::at(20))
            .unwrap()
            .apply(&graph, AgentId::FIRST, Action::Move { from: 0, to: 1 })
            .unwrap();
        assert_eq!(state.current_time(), 0);
        assert_eq!(state.scores(), &[0, 0]);

        let state = state
            .apply(&graph, AgentId::SECOND, Action::Move { from: 0, to: 2 })
            .unwrap();

        assert_eq!(state.current_time(), 1);
        assert_eq!(state.turn_owner(), AgentId::FIRST);
        assert_eq!(state.scores(), &[2, 0]);
        assert_eq!(state.node_values(), &[0, 0, 3, 4]);
        assert_eq!(
            state.location(AgentId::SECOND),
            AgentLocation::Moving {
                from: 0,
                to: 2,
                steps_remaining: 1
            }
        );

        let state = state
            .apply(&graph, AgentId::FIRST, Action::Move { from: 1, to: 3 })
            .unwrap()
            .apply(&graph, AgentId::SECOND, Action::Noop)
            .unwrap();

        assert_eq!(state.current_time(), 2);
        assert_eq!(state.scores(), &[6, 3]);
        assert_eq!(state.people_remaining(), 0);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_traversal_takes_weight_time_units() {
        let graph = GraphBuilder::new()
            .node(0, 0)
            .node(1, 7)
            .edge(1, 0, 1, 3)
            .build()
            .unwrap();

        for first_mover in AgentId::all() {
            let mut state = GameState::new(&graph, [0, 0], None).unwrap();
            let mut arrived_at = None;

            while !state.is_terminal() {
                let agent = state.turn_owner();
                let action = match state.location(agent) {
                    AgentLocation::AtRest { .. } if agent == first_mover => {
                        Action::Move { from: 0, to: 1 }
                    }
                    AgentLocation::AtRest { .. } => Action::Terminate,
                    _ => Action::Noop,
                };
                state = state.apply(&graph, agent, action).unwrap();

                if arrived_at.is_none() && state.score(first_mover) > 0 {
                    arrived_at = Some(state.current_time());
                }
            }

            assert_eq!(arrived_at, Some(3), "agent {first_mover} arrived late");
        }
    }

    #[test]
    fn test_no_collection_past_deadline() {
        let graph = GraphBuilder::new()
            .node(0, 0)
            .node(1, 7)
            .edge(1, 0, 1, 3)
            .build()
            .unwrap();
        let mut state = GameState::new(&graph, [0, 0], Deadline::at(2)).unwrap();

        while !state.is_terminal() {
            let agent = state.turn_owner();
            let action = state.legal_actions(&graph)[0];
            state = state.apply(&graph, agent, action).unwrap();
        }

        assert_eq!(state.termination(), Some(crate::Termination::DeadlineReached));
        assert_eq!(state.scores(), &[0, 0]);
        assert_eq!(state.people_remaining(), 7);
    }

    #[test]
    fn test_collects_on_the_deadline_itself() {
        let graph = line();
        let state = GameState::new(&graph, [2, 0], Deadline::at(1))
            .unwrap()
            .apply(&graph, AgentId::FIRST, Action::Move { from: 2, to: 1 })
            .unwrap()
            .apply(&graph, AgentId::SECOND, Action::Terminate)
            .unwrap();

        assert_eq!(state.current_time(), 1);
        assert_eq!(state.scores(), &[5, 0]);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_fractional_deadline_plays_on_but_stops_collecting() {
        let graph = line();
        let play = |deadline| {
            GameState::new(&graph, [0, 2], deadline)
                .unwrap()
                .apply(&graph, AgentId::FIRST, Action::Move { from: 0, to: 1 })
                .unwrap()
                .apply(&graph, AgentId::SECOND, Action::Terminate)
                .unwrap()
        };

        let halfway = play(Deadline::try_from(1.5).ok());
        assert_eq!(halfway.current_time(), 1);
        assert!(!halfway.is_terminal());

        let over = halfway
            .apply(&graph, AgentId::FIRST, Action::Noop)
            .unwrap()
            .apply(&graph, AgentId::SECOND, Action::Noop)
            .unwrap();
        assert_eq!(over.location(AgentId::FIRST), AgentLocation::at(1));
        assert_eq!(over.termination(), Some(crate::Termination::DeadlineReached));
        assert_eq!(over.scores(), &[0, 0]);

        let whole = play(Deadline::at(2))
            .apply(&graph, AgentId::FIRST, Action::Noop)
            .unwrap()
            .apply(&graph, AgentId::SECOND, Action::Noop)
            .unwrap();
        assert_eq!(whole.scores(), &[5, 0]);
    }

    #[test]
    fn test_terminal_states_have_no_successors() {
        let graph = diamond();
        let root = GameState::new(&graph, [0, 3], Deadline::at(4)).unwrap();

        for (_, state) in reachable(&graph, root, 8) {
            if state.is_terminal() {
                assert!(state.successors(&graph).is_empty());
                assert!(state.legal_actions(&graph).is_empty());
            } else {
                assert!(!state.successors(&graph).is_empty());
            }
        }
    }

    #[test]
    fn test_value_conservation_and_monotone_scores() {
        let graph = diamond();
        let root = GameState::new(&graph, [0, 3], None).unwrap();
        let total = conserved_total(&root);

        for (before, after) in reachable(&graph, root, 8) {
            assert_eq!(conserved_total(&after), total);
            for agent in AgentId::all() {
                assert!(after.score(agent) >= before.score(agent));
                let gained = after.score(agent) - before.score(agent);
                if gained > 0 {
                    let node = after.location(agent).node().unwrap();
                    assert_eq!(gained, before.node_values()[node]);
                }
            }
        }
    }

    #[test]
    fn test_turn_owner_cycles_and_terminated_stays_terminated() {
        let graph = diamond();
        let root = GameState::new(&graph, [1, 2], None).unwrap();

        for (before, after) in reachable(&graph, root, 7) {
            assert_eq!(after.turn_owner(), before.turn_owner().next());
            assert_eq!(
                after.current_time(),
                before.current_time() + u32::from(before.turn_owner().closes_round())
            );
            for agent in AgentId::all() {
                if before.is_agent_terminated(agent) {
                    assert!(after.is_agent_terminated(agent));
                }
            }
        }
    }

    #[test]
    fn test_apply_rejects_illegal_actions() {
        let graph = line();
        let state = GameState::new(&graph, [0, 2], Deadline::at(10)).unwrap();

        assert_eq!(
            state.apply(&graph, AgentId::SECOND, Action::Terminate),
            Err(IllegalAction::NotYourTurn {
                agent: AgentId::SECOND,
                owner: AgentId::FIRST
            })
        );
        assert_eq!(
            state.apply(&graph, AgentId::FIRST, Action::Noop),
            Err(IllegalAction::MustDecide(AgentId::FIRST))
        );
        assert_eq!(
            state.apply(&graph, AgentId::FIRST, Action::Move { from: 1, to: 2 }),
            Err(IllegalAction::WrongOrigin {
                agent: AgentId::FIRST,
                at: 0,
                from: 1
            })
        );
        assert_eq!(
            state.apply(&graph, AgentId::FIRST, Action::Move { from: 0, to: 2 }),
            Err(IllegalAction::NotANeighbor { from: 0, to: 2 })
        );

        let moving = state
            .apply(&graph, AgentId::FIRST, Action::Move { from: 0, to: 1 })
            .unwrap()
            .apply(&graph, AgentId::SECOND, Action::Terminate)
            .unwrap();
        assert_eq!(
            moving.apply(&graph, AgentId::FIRST, Action::Terminate),
            Err(IllegalAction::MidEdge(AgentId::FIRST))
        );

        let passed = moving.apply(&graph, AgentId::FIRST, Action::Noop).unwrap();
        assert_eq!(
            passed.apply(&graph, AgentId::SECOND, Action::Move { from: 2, to: 1 }),
            Err(IllegalAction::Terminated(AgentId::SECOND))
        );
    }

    #[test]
    fn test_apply_on_terminal_state() {
        let graph = line();
        let state = GameState::new(&graph, [0, 2], Deadline::at(10))
            .unwrap()
            .apply(&graph, AgentId::FIRST, Action::Terminate)
            .unwrap()
            .apply(&graph, AgentId::SECOND, Action::Terminate)
            .unwrap();

        assert!(state.all_agents_terminated());
        assert_eq!(
            state.apply(&graph, AgentId::FIRST, Action::Noop),
            Err(IllegalAction::GameOver)
        );
    }

    #[test]
    fn test_apply_matches_successors() {
        let graph = diamond();
        let root = GameState::new(&graph, [0, 3], Deadline::at(6)).unwrap();

        for (_, state) in reachable(&graph, root, 5) {
            for (action, successor) in state.successors(&graph) {
                assert_eq!(
                    state.apply(&graph, state.turn_owner(), action).as_ref(),
                    Ok(&successor)
                );
            }
        }
    }

    #[test]
    fn test_apply_leaves_state_untouched() {
        let graph = line();
        let state = GameState::new(&graph, [0, 2], Deadline::at(10)).unwrap();
        let before = state.clone();

        let _ = state.apply(&graph, AgentId::FIRST, Action::Move { from: 0, to: 2 });
        let _ = state.successors(&graph);

        assert_eq!(state, before);
        assert_eq!(state.locations().len(), NUM_AGENTS);
    }
}
