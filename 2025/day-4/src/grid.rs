use std::fmt;
use std::str::FromStr;

use chumsky::prelude::*;
use glam::IVec2;
use itertools::Itertools;

use crate::error::GridError;

/// A roll is accessible when fewer than this many rolls surround it.
pub const ACCESS_THRESHOLD: usize = 4;

/// The Moore neighborhood, `x` is the column and `y` the row.
pub const NEIGHBOR_OFFSETS: [IVec2; 8] = [
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

/// Occupancy grid of paper rolls.
///
/// The interior is `width * height` cells, stored with a one-cell frame of
/// empty floor on every side so neighbor lookups never leave the buffer.
/// The frame is never written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    // true = '@' (paper), false = '.' (empty), row-major with the frame included
    cells: Vec<bool>,
}

impl Grid {
    /// Builds a grid from rows of cells, rejecting ragged input.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, GridError>
    where
        R: AsRef<[bool]>,
    {
        let rows = rows.into_iter().collect::<Vec<_>>();
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);

        if let Some((row, found)) = rows
            .iter()
            .map(|r| r.as_ref().len())
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(GridError::Shape {
                row,
                expected: width,
                found,
            });
        }

        let stride = width + 2;
        let mut cells = vec![false; stride * (height + 2)];
        for (y, row) in rows.iter().enumerate() {
            let start = (y + 1) * stride + 1;
            cells[start..start + width].copy_from_slice(row.as_ref());
        }

        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn stride(&self) -> usize {
        self.width + 2
    }

    /// Buffer index of `pos`, or `None` when it lies outside the frame.
    fn index(&self, pos: IVec2) -> Option<usize> {
        let x = usize::try_from(pos.x.checked_add(1)?).ok()?;
        let y = usize::try_from(pos.y.checked_add(1)?).ok()?;
        (x < self.stride() && y < self.height + 2).then(|| y * self.stride() + x)
    }

    fn in_interior(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Whether `pos` holds a roll. Anything outside the interior is empty.
    pub fn get(&self, pos: IVec2) -> bool {
        self.index(pos).is_some_and(|idx| self.cells[idx])
    }

    /// Takes the roll at an interior position, returning whether there was one.
    pub(crate) fn remove(&mut self, pos: IVec2) -> bool {
        if !self.in_interior(pos) {
            return false;
        }
        match self.index(pos) {
            Some(idx) => std::mem::replace(&mut self.cells[idx], false),
            None => false,
        }
    }

    /// Interior positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = IVec2> {
        (0..self.height as i32)
            .cartesian_product(0..self.width as i32)
            .map(|(y, x)| IVec2::new(x, y))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Counts how many neighbors (including diagonals) contain paper.
    pub fn occupied_neighbors(&self, pos: IVec2) -> usize {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&offset| self.get(pos + offset))
            .count()
    }

    /// A forklift can reach the roll at `pos` when fewer than
    /// [`ACCESS_THRESHOLD`] rolls surround it. Empty cells are never accessible.
    pub fn is_accessible(&self, pos: IVec2) -> bool {
        self.get(pos) && self.occupied_neighbors(pos) < ACCESS_THRESHOLD
    }
}

/// Parses the diagram into rows of cells.
fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Vec<bool>>, extra::Err<Rich<'a, char>>> {
    let cell = just('@').to(true).or(just('.').to(false));

    cell.repeated()
        .collect::<Vec<_>>()
        .separated_by(text::newline())
        .allow_trailing()
        .collect::<Vec<_>>()
        .map(|mut rows| {
            // Trailing blank lines at EOF are not rows
            while rows.last().is_some_and(Vec::is_empty) {
                rows.pop();
            }
            rows
        })
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rows = parser().parse(input).into_result().map_err(|errors| {
            let (offset, found) = errors
                .first()
                .map(|e| (e.span().start, e.found().copied()))
                .unwrap_or((input.len(), None));
            GridError::Parse {
                found: found.map_or_else(|| "end of input".to_string(), |c| format!("{c:?}")),
                src: input.to_string(),
                span: (offset, found.map_or(0, char::len_utf8)).into(),
            }
        })?;

        Grid::from_rows(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let c = if self.get(IVec2::new(x, y)) { '@' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
