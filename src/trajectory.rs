use serde::Serialize;

use crate::boundary::Position;

/// Positions of one walker over time, starting with its initial cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trajectory {
    points: Vec<Position>,
}

impl Trajectory {
    pub fn starting_at(origin: Position) -> Self {
        Self { points: vec![origin] }
    }

    pub fn record(&mut self, position: Position) {
        self.points.push(position);
    }

    pub fn points(&self) -> &[Position] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a trajectory holds at least its origin.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn origin(&self) -> Position {
        self.points[0]
    }

    pub fn latest(&self) -> Position {
        self.points[self.points.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_after_the_origin() {
        let mut trajectory = Trajectory::starting_at(Position::new(2, 2));
        trajectory.record(Position::new(2, 3));
        trajectory.record(Position::new(1, 3));

        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.origin(), Position::new(2, 2));
        assert_eq!(trajectory.latest(), Position::new(1, 3));
        assert_eq!(
            trajectory.points(),
            &[Position::new(2, 2), Position::new(2, 3), Position::new(1, 3)]
        );
    }
}
