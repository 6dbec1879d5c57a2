//! Visited-position tracking for a single run.

/// Dense bitset of visited positions, sized to the program.
///
/// Position 0 is marked visited before anything executes. Positions outside
/// the program are never recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    visited: Vec<bool>,
}

impl History {
    pub fn new(len: usize) -> Self {
        let mut visited = vec![false; len];
        if let Some(first) = visited.first_mut() {
            *first = true;
        }
        Self { visited }
    }

    fn slot(&self, position: i64) -> Option<usize> {
        usize::try_from(position)
            .ok()
            .filter(|&index| index < self.visited.len())
    }

    pub fn contains(&self, position: i64) -> bool {
        self.slot(position).map_or(false, |index| self.visited[index])
    }

    /// Record a position. Returns true if it was not visited before.
    pub fn insert(&mut self, position: i64) -> bool {
        match self.slot(position) {
            Some(index) => !std::mem::replace(&mut self.visited[index], true),
            None => false,
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }
}
