//! Solver configuration.

use u_metaheur::tabu::TabuConfig;

/// Parameters of a [`Solver`](super::Solver) run.
///
/// Round counts left as `None` default to the number of customers.
///
/// # Examples
///
/// ```
/// use u_cvrp::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_outer_rounds(5)
///     .with_candidate_neighbors(10);
/// assert_eq!(config.outer_rounds, Some(5));
///
/// let sized = SolverConfig::for_customers(200);
/// assert_eq!(sized.tabu.max_iterations, 200);
/// assert_eq!(sized.tabu.tabu_tenure, 20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Tabu phases (each followed by an operator phase).
    pub outer_rounds: Option<usize>,
    /// Inner iterations of an operator phase.
    pub opt_rounds: Option<usize>,
    /// Tenure, aspiration and per-phase step bounds of the tabu search.
    pub tabu: TabuConfig,
    /// Granular candidate list size for tabu moves; `None` scores all moves.
    pub candidate_neighbors: Option<usize>,
}

impl SolverConfig {
    /// Configuration sized for `customers` customers: one tabu step per
    /// customer in every phase and tenure `max(7, customers / 10)`.
    pub fn for_customers(customers: usize) -> Self {
        let tabu = TabuConfig::default()
            .with_max_iterations(customers)
            .with_tabu_tenure(default_tenure(customers))
            .with_max_no_improve(customers.max(1));
        Self {
            tabu,
            ..Self::default()
        }
    }

    /// Sets the number of outer rounds.
    pub fn with_outer_rounds(mut self, n: usize) -> Self {
        self.outer_rounds = Some(n);
        self
    }

    /// Sets the inner iteration cap of operator phases.
    pub fn with_opt_rounds(mut self, n: usize) -> Self {
        self.opt_rounds = Some(n);
        self
    }

    /// Replaces the tabu parameters.
    pub fn with_tabu(mut self, tabu: TabuConfig) -> Self {
        self.tabu = tabu;
        self
    }

    /// Restricts tabu candidates to the `k` nearest neighbors.
    pub fn with_candidate_neighbors(mut self, k: usize) -> Self {
        self.candidate_neighbors = Some(k);
        self
    }
}

/// Tenure used when none is configured.
pub fn default_tenure(customers: usize) -> usize {
    (customers / 10).max(7)
}
