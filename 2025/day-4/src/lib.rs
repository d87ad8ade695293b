pub mod error;
pub mod grid;
pub mod part1;
pub mod part2;
