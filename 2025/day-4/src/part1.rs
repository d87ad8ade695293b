use glam::IVec2;
use miette::*;
use rayon::prelude::*;

use crate::grid::Grid;

/// Counts the rolls a forklift can reach without moving anything.
pub fn count_accessible(grid: &Grid) -> usize {
    let width = grid.width() as i32;

    (0..grid.height() as i32)
        .into_par_iter()
        .map(|y| {
            (0..width)
                .filter(|&x| grid.is_accessible(IVec2::new(x, y)))
                .count()
        })
        .sum()
}

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid: Grid = input.parse()?;

    let accessible_count = count_accessible(&grid);
    tracing::debug!(accessible_count, rolls = grid.occupied_count(), "scanned grid");

    Ok(accessible_count.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn it_works() -> Result<()> {
        let input = "..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.";
        assert_eq!("13", process(input)?);
        Ok(())
    }

    #[rstest]
    #[case("@@\n@@", 4)]
    #[case("@@@\n@@@\n@@@", 4)]
    #[case("@", 1)]
    #[case("...\n...", 0)]
    #[case("", 0)]
    fn counts_small_grids(#[case] input: &str, #[case] expected: usize) -> Result<()> {
        let grid: Grid = input.parse()?;
        assert_eq!(expected, count_accessible(&grid));
        Ok(())
    }

    #[test]
    fn scan_leaves_grid_untouched() -> Result<()> {
        let grid: Grid = "@@@\n@@@\n@@@".parse()?;
        let before = grid.clone();
        count_accessible(&grid);
        assert_eq!(before, grid);
        Ok(())
    }

    #[test]
    fn reports_bad_input() {
        assert!(process("@@\n@").is_err());
        assert!(process("@#").is_err());
    }
}
