//! Short-term memory of broken adjacencies.

use std::collections::HashMap;

/// A directed adjacency `from -> to` between two stops of a route.
///
/// Index 0 is the depot, so the first and last legs of a route are
/// signatures too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveSignature {
    /// Tail of the arc.
    pub from: usize,
    /// Head of the arc.
    pub to: usize,
}

impl MoveSignature {
    /// Creates the signature of arc `from -> to`.
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// All arcs of the depot-to-depot tour over `seq`; empty for an empty
    /// route.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_cvrp::tabu::MoveSignature;
    ///
    /// let arcs = MoveSignature::arcs_of(&[3, 1]);
    /// assert_eq!(
    ///     arcs,
    ///     vec![MoveSignature::new(0, 3), MoveSignature::new(3, 1), MoveSignature::new(1, 0)]
    /// );
    /// ```
    pub fn arcs_of(seq: &[usize]) -> Vec<Self> {
        if seq.is_empty() {
            return Vec::new();
        }
        let mut arcs = Vec::with_capacity(seq.len() + 1);
        let mut prev = 0;
        for &c in seq {
            arcs.push(Self::new(prev, c));
            prev = c;
        }
        arcs.push(Self::new(prev, 0));
        arcs
    }
}

/// Maps broken arcs to the round at which they stop being tabu.
///
/// An arc is tabu while the current round is below its expiry. Expired
/// entries are dropped when the round advances.
#[derive(Debug, Clone, Default)]
pub struct TabuMemory {
    tenure: usize,
    round: usize,
    expiry: HashMap<MoveSignature, usize>,
}

impl TabuMemory {
    /// Creates an empty memory with the given tenure.
    pub fn new(tenure: usize) -> Self {
        Self {
            tenure,
            round: 0,
            expiry: HashMap::new(),
        }
    }

    /// Number of rounds a recorded arc stays forbidden.
    pub fn tenure(&self) -> usize {
        self.tenure
    }

    /// Current round.
    pub fn round(&self) -> usize {
        self.round
    }

    /// Forbids re-creating `arc` until `round + tenure`.
    pub fn record(&mut self, arc: MoveSignature) {
        self.expiry.insert(arc, self.round + self.tenure);
    }

    /// Whether `arc` is currently forbidden.
    pub fn is_tabu(&self, arc: MoveSignature) -> bool {
        self.expiry.get(&arc).is_some_and(|&e| self.round < e)
    }

    /// Expiry round of `arc`, if it is remembered.
    pub fn expiry(&self, arc: MoveSignature) -> Option<usize> {
        self.expiry.get(&arc).copied()
    }

    /// Moves to the next round and forgets expired arcs.
    pub fn advance(&mut self) {
        self.round += 1;
        let round = self.round;
        self.expiry.retain(|_, e| *e > round);
    }

    /// Number of remembered arcs.
    pub fn len(&self) -> usize {
        self.expiry.len()
    }

    /// Returns `true` if nothing is remembered.
    pub fn is_empty(&self) -> bool {
        self.expiry.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arcs_of_empty() {
        assert!(MoveSignature::arcs_of(&[]).is_empty());
        assert_eq!(
            MoveSignature::arcs_of(&[5]),
            vec![MoveSignature::new(0, 5), MoveSignature::new(5, 0)]
        );
    }

    #[test]
    fn test_record_and_expire() {
        let mut memory = TabuMemory::new(2);
        let arc = MoveSignature::new(1, 2);
        memory.record(arc);
        assert!(memory.is_tabu(arc));
        assert!(!memory.is_tabu(MoveSignature::new(2, 1)));
        assert_eq!(memory.expiry(arc), Some(2));

        memory.advance();
        assert!(memory.is_tabu(arc));
        memory.advance();
        assert!(!memory.is_tabu(arc));
        assert!(memory.is_empty());
    }

    #[test]
    fn test_rerecord_extends() {
        let mut memory = TabuMemory::new(3);
        let arc = MoveSignature::new(0, 4);
        memory.record(arc);
        memory.advance();
        memory.record(arc);
        assert_eq!(memory.expiry(arc), Some(4));
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_zero_tenure_never_tabu() {
        let mut memory = TabuMemory::new(0);
        let arc = MoveSignature::new(1, 2);
        memory.record(arc);
        assert!(!memory.is_tabu(arc));
        memory.advance();
        assert!(memory.is_empty());
    }
}
