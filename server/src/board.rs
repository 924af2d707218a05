//! Letter grid generation and word tracing
//!
//! A board is an N×N grid of uppercase letters. Generation makes `size`
//! best-effort attempts to lay dictionary words horizontally or vertically into
//! empty cells, then fills whatever is left with random letters. Nothing
//! guarantees how many words land; zero is a valid outcome.
//!
//! A word is on the board when a path of 8-way adjacent cells spells it
//! without visiting any cell twice.

use crate::dictionary::Dictionary;
use rand::seq::SliceRandom;
use rand::Rng;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Neighbour offsets, orthogonal and diagonal
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A dictionary word that was written into the grid during generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Row-major cells
    cells: Vec<char>,
    placements: Vec<Placement>,
}

impl Board {
    /// Generates a board of the given size from dictionary words
    pub fn generate<R: Rng>(size: usize, dictionary: &Dictionary, rng: &mut R) -> Self {
        let mut grid: Vec<Option<char>> = vec![None; size * size];
        let mut placements = Vec::new();
        let words = dictionary.words();

        if !words.is_empty() {
            for _ in 0..size {
                let Some(word) = words.choose(rng) else {
                    break;
                };
                let letters: Vec<char> = word.chars().collect();
                if letters.len() > size {
                    continue;
                }

                let row = rng.gen_range(0..size);
                let col = rng.gen_range(0..size);
                let orientation = if rng.gen_bool(0.5) {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };

                if let Some(targets) = free_span(&grid, size, letters.len(), row, col, orientation) {
                    for (index, letter) in targets.into_iter().zip(letters) {
                        grid[index] = Some(letter);
                    }
                    placements.push(Placement {
                        word: word.clone(),
                        row,
                        col,
                        orientation,
                    });
                }
            }
        }

        let cells = grid
            .into_iter()
            .map(|cell| cell.unwrap_or_else(|| random_letter(rng)))
            .collect();

        Self {
            size,
            cells,
            placements,
        }
    }

    /// Builds a board from explicit rows. Returns `None` for an empty or
    /// non-square grid.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Option<Self> {
        let size = rows.len();
        if size == 0 {
            return None;
        }

        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let letters: Vec<char> = row.as_ref().to_uppercase().chars().collect();
            if letters.len() != size {
                return None;
            }
            cells.extend(letters);
        }

        Some(Self {
            size,
            cells,
            placements: Vec::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        if row < self.size && col < self.size {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    /// Grid as one string per row, the form sent to clients
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| row.iter().collect())
            .collect()
    }

    /// Words laid down during generation
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Returns true if `word` can be traced through adjacent cells without
    /// reusing a cell. Case-insensitive.
    pub fn verify(&self, word: &str) -> bool {
        let letters: Vec<char> = word.trim().to_uppercase().chars().collect();
        let Some(&first) = letters.first() else {
            return false;
        };
        if letters.len() > self.cells.len() {
            return false;
        }

        let mut visited = vec![false; self.cells.len()];
        (0..self.size).any(|row| {
            (0..self.size).any(|col| {
                self.cells[row * self.size + col] == first
                    && self.trace(&letters, 0, row, col, &mut visited)
            })
        })
    }

    /// Depth-first search. `visited` is restored on every return path.
    fn trace(
        &self,
        letters: &[char],
        index: usize,
        row: usize,
        col: usize,
        visited: &mut [bool],
    ) -> bool {
        let cell = row * self.size + col;
        if visited[cell] || self.cells[cell] != letters[index] {
            return false;
        }
        if index + 1 == letters.len() {
            return true;
        }

        visited[cell] = true;
        let found = DIRECTIONS.iter().any(|&(dr, dc)| {
            match (row.checked_add_signed(dr), col.checked_add_signed(dc)) {
                (Some(r), Some(c)) if r < self.size && c < self.size => {
                    self.trace(letters, index + 1, r, c, visited)
                }
                _ => false,
            }
        });
        visited[cell] = false;

        found
    }
}

/// Cell indices a word of `len` letters would cover, if it fits inside the
/// grid and every cell is still empty
fn free_span(
    grid: &[Option<char>],
    size: usize,
    len: usize,
    row: usize,
    col: usize,
    orientation: Orientation,
) -> Option<Vec<usize>> {
    let (end_row, end_col) = match orientation {
        Orientation::Horizontal => (row, col + len),
        Orientation::Vertical => (row + len, col),
    };
    if end_row > size || end_col > size {
        return None;
    }

    let targets: Vec<usize> = (0..len)
        .map(|i| match orientation {
            Orientation::Horizontal => row * size + col + i,
            Orientation::Vertical => (row + i) * size + col,
        })
        .collect();

    targets
        .iter()
        .all(|&index| grid[index].is_none())
        .then_some(targets)
}

fn random_letter<R: Rng>(rng: &mut R) -> char {
    ALPHABET[rng.gen_range(0..ALPHABET.len())] as char
}
