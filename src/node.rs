use super::{action::Policy, player::AgentId};

/// Regret-matching state of one information set.
///
/// Created lazily on first visit, keyed by observation in the trainer's
/// table, never deleted. The learned (average) policy is the externally
/// consumed artifact; the current policy drives traversal.
#[derive(Clone, Debug)]
pub struct Node {
    agent: AgentId,
    num_actions: usize,
    cum_regrets: Vec<f64>,
    cum_policy: Vec<f64>,
    curr_policy: Policy,
    learned_policy: Policy,
    niter: usize,
}

impl Node {
    pub fn new(agent: AgentId, num_actions: usize) -> Self {
        let uniform = vec![1.0 / num_actions as f64; num_actions];
        Node {
            agent,
            num_actions,
            cum_regrets: vec![0.0; num_actions],
            cum_policy: vec![0.0; num_actions],
            curr_policy: uniform.clone(),
            learned_policy: uniform,
            niter: 1,
        }
    }

    /// Add `probability * (utility[a] - node_utility)` to each action's
    /// cumulative regret.
    pub fn accumulate_regret(&mut self, utility: &[f64], node_utility: f64, probability: f64) {
        for (regret, util) in self.cum_regrets.iter_mut().zip(utility) {
            *regret += probability * (util - node_utility);
        }
    }

    /// Set the current policy to the normalized positive part of the
    /// cumulative regret, or uniform when no regret is positive.
    pub fn refresh_current_policy(&mut self) {
        let positive: Vec<f64> = self.cum_regrets.iter().map(|r| r.max(0.0)).collect();
        let norm: f64 = positive.iter().sum();
        if norm > 0.0 {
            self.curr_policy = positive.iter().map(|r| r / norm).collect();
        } else {
            self.curr_policy = vec![1.0 / self.num_actions as f64; self.num_actions];
        }
    }

    /// Fold the current policy into the running average. The counter starts
    /// at 1, so after `k` calls the denominator is `1 + k`.
    pub fn advance_average_policy(&mut self) {
        self.niter += 1;
        for (cum, curr) in self.cum_policy.iter_mut().zip(&self.curr_policy) {
            *cum += curr;
        }
        self.learned_policy = self.cum_policy.iter().map(|p| p / self.niter as f64).collect();
    }

    /// The learned (average) policy.
    pub fn policy(&self) -> &Policy {
        &self.learned_policy
    }

    pub fn current_policy(&self) -> &Policy {
        &self.curr_policy
    }

    pub fn cumulative_regrets(&self) -> &[f64] {
        &self.cum_regrets
    }

    pub fn cumulative_policy(&self) -> &[f64] {
        &self.cum_policy
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }
}
