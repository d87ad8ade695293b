use glam::IVec2;
use miette::*;
use rayon::prelude::*;

use crate::grid::Grid;

/// Every roll that is accessible in `grid` as it stands right now.
///
/// Only a shared borrow is taken, so no removal can be applied until the
/// whole round has been evaluated. Positions come back in row-major order.
pub fn round_candidates(grid: &Grid) -> Vec<IVec2> {
    let width = grid.width() as i32;

    (0..grid.height() as i32)
        .into_par_iter()
        .flat_map_iter(move |y| {
            (0..width)
                .map(move |x| IVec2::new(x, y))
                .filter(move |&pos| grid.is_accessible(pos))
        })
        .collect()
}

/// Removes accessible rolls round after round until none are left to take.
#[derive(Debug, Clone)]
pub struct Cascade {
    grid: Grid,
    removed: usize,
    rounds: Vec<usize>,
}

impl Cascade {
    pub fn new(grid: Grid) -> Self {
        Cascade {
            grid,
            removed: 0,
            rounds: Vec::new(),
        }
    }

    /// Runs a single round and returns how many rolls it removed.
    pub fn step(&mut self) -> usize {
        let candidates = round_candidates(&self.grid);

        for &pos in &candidates {
            self.grid.remove(pos);
        }

        let removed = candidates.len();
        if removed > 0 {
            self.removed += removed;
            self.rounds.push(removed);
            tracing::debug!(round = self.rounds.len(), removed, "removed rolls");
        }
        removed
    }

    /// Steps until a round removes nothing, returning the running total.
    ///
    /// Each productive round removes at least one roll and rolls never come
    /// back, so this finishes within `width * height` rounds.
    pub fn run(&mut self) -> usize {
        while self.step() > 0 {}
        tracing::trace!("settled grid:\n{}", self.grid);
        self.removed
    }

    /// Rolls removed so far.
    pub fn removed(&self) -> usize {
        self.removed
    }

    /// Removal count of every round that removed something, in order.
    pub fn rounds(&self) -> &[usize] {
        &self.rounds
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid: Grid = input.parse()?;

    let mut cascade = Cascade::new(grid);
    let total_removed = cascade.run();
    tracing::debug!(total_removed, rounds = cascade.rounds().len(), "cascade settled");

    Ok(total_removed.to_string())
}
