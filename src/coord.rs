use std::fmt;
use std::ops;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BoardShape {
    pub num_rows: u8,
    pub num_cols: u8,
}

impl BoardShape {
    pub const fn standard() -> Self { BoardShape { num_rows: 8, num_cols: 8 } }

    pub fn num_squares(self) -> usize { self.num_rows as usize * self.num_cols as usize }

    pub fn contains_row(self, row: Row) -> bool { (0..self.num_rows as i8).contains(&row.idx) }
    pub fn contains_col(self, col: Col) -> bool { (0..self.num_cols as i8).contains(&col.idx) }
    pub fn contains_coord(self, coord: Coord) -> bool {
        self.contains_row(coord.row) && self.contains_col(coord.col)
    }

    pub fn rows(self) -> impl DoubleEndedIterator<Item = Row> + Clone {
        (0..self.num_rows as i8).map(Row::from_zero_based)
    }
    pub fn cols(self) -> impl DoubleEndedIterator<Item = Col> + Clone {
        (0..self.num_cols as i8).map(Col::from_zero_based)
    }
    // Rank-major order: a1, b1, ..., h1, a2, ...
    pub fn coords(self) -> impl Iterator<Item = Coord> + Clone {
        self.rows().cartesian_product(self.cols()).map(|(row, col)| Coord { row, col })
    }

    // Square index in rank-major order. This numbering is what the ghost draws from.
    pub fn square_index(self, coord: Coord) -> Option<usize> {
        if !self.contains_coord(coord) {
            return None;
        }
        Some(coord.row.idx as usize * self.num_cols as usize + coord.col.idx as usize)
    }
    pub fn coord_from_index(self, index: usize) -> Option<Coord> {
        if index >= self.num_squares() {
            return None;
        }
        let num_cols = self.num_cols as usize;
        Some(Coord::new(
            Row::from_zero_based((index / num_cols) as i8),
            Col::from_zero_based((index % num_cols) as i8),
        ))
    }
}


// Row form a force's point of view
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct SubjectiveRow {
    idx: i8, // 0-based
}

impl SubjectiveRow {
    pub const fn from_zero_based(idx: i8) -> Self { Self { idx } }
    pub const fn first() -> Self { Self::from_zero_based(0) }
    pub fn last(board_shape: BoardShape) -> Self {
        Self::from_zero_based(board_shape.num_rows as i8 - 1)
    }
    pub fn to_row(self, board_shape: BoardShape, force: Force) -> Row {
        match force {
            Force::White => Row::from_zero_based(self.idx),
            Force::Black => Row::from_zero_based(board_shape.num_rows as i8 - self.idx - 1),
        }
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Row {
    idx: i8, // 0-based
}

impl Row {
    pub const fn from_zero_based(idx: i8) -> Self { Self { idx } }
    pub const fn to_zero_based(self) -> i8 { self.idx }
    pub fn to_algebraic(self) -> String { (self.idx + 1).to_string() }
    pub fn from_algebraic(s: &str) -> Option<Self> {
        if s.is_empty() || !s.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
        let one_based: i8 = s.parse().ok()?;
        if one_based < 1 {
            return None;
        }
        Some(Self::from_zero_based(one_based - 1))
    }
}

impl ops::Add<i8> for Row {
    type Output = Self;
    fn add(self, other: i8) -> Self::Output { Self::from_zero_based(self.idx + other) }
}

impl ops::Sub for Row {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output { self.idx - other.idx }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Col {
    idx: i8, // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: i8) -> Self { Self { idx } }
    pub const fn to_zero_based(self) -> i8 { self.idx }
    pub fn to_algebraic(self) -> char { (b'a' + self.idx as u8) as char }
    pub fn from_algebraic(ch: char) -> Option<Self> {
        if ch.is_ascii_lowercase() {
            Some(Self::from_zero_based((ch as u8 - b'a') as i8))
        } else {
            None
        }
    }
}

impl ops::Add<i8> for Col {
    type Output = Self;
    fn add(self, other: i8) -> Self::Output { Self::from_zero_based(self.idx + other) }
}

impl ops::Sub for Col {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output { self.idx - other.idx }
}


// Board square: `col` is the file, `row` is the rank. Validity is relative to a `BoardShape`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }
    pub const fn from_file_rank(file: i8, rank: i8) -> Self {
        Self::new(Row::from_zero_based(rank), Col::from_zero_based(file))
    }
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let col = Col::from_algebraic(chars.next()?)?;
        let row = Row::from_algebraic(chars.as_str())?;
        Some(Coord { row, col })
    }
}

impl ops::Add<(i8, i8)> for Coord {
    type Output = Self;
    fn add(self, other: (i8, i8)) -> Self::Output {
        Self { row: self.row + other.0, col: self.col + other.1 }
    }
}

impl ops::Sub for Coord {
    type Output = (i8, i8);
    fn sub(self, other: Self) -> Self::Output { (self.row - other.row, self.col - other.col) }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({})", self.to_algebraic())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}


// Squares of the standard 8x8 board.
impl Coord {
    #![allow(dead_code)]
    pub const A1: Coord = Coord::from_file_rank(0, 0);
    pub const A2: Coord = Coord::from_file_rank(0, 1);
    pub const A3: Coord = Coord::from_file_rank(0, 2);
    pub const A4: Coord = Coord::from_file_rank(0, 3);
    pub const A5: Coord = Coord::from_file_rank(0, 4);
    pub const A6: Coord = Coord::from_file_rank(0, 5);
    pub const A7: Coord = Coord::from_file_rank(0, 6);
    pub const A8: Coord = Coord::from_file_rank(0, 7);
    pub const B1: Coord = Coord::from_file_rank(1, 0);
    pub const B2: Coord = Coord::from_file_rank(1, 1);
    pub const B3: Coord = Coord::from_file_rank(1, 2);
    pub const B4: Coord = Coord::from_file_rank(1, 3);
    pub const B5: Coord = Coord::from_file_rank(1, 4);
    pub const B6: Coord = Coord::from_file_rank(1, 5);
    pub const B7: Coord = Coord::from_file_rank(1, 6);
    pub const B8: Coord = Coord::from_file_rank(1, 7);
    pub const C1: Coord = Coord::from_file_rank(2, 0);
    pub const C2: Coord = Coord::from_file_rank(2, 1);
    pub const C3: Coord = Coord::from_file_rank(2, 2);
    pub const C4: Coord = Coord::from_file_rank(2, 3);
    pub const C5: Coord = Coord::from_file_rank(2, 4);
    pub const C6: Coord = Coord::from_file_rank(2, 5);
    pub const C7: Coord = Coord::from_file_rank(2, 6);
    pub const C8: Coord = Coord::from_file_rank(2, 7);
    pub const D1: Coord = Coord::from_file_rank(3, 0);
    pub const D2: Coord = Coord::from_file_rank(3, 1);
    pub const D3: Coord = Coord::from_file_rank(3, 2);
    pub const D4: Coord = Coord::from_file_rank(3, 3);
    pub const D5: Coord = Coord::from_file_rank(3, 4);
    pub const D6: Coord = Coord::from_file_rank(3, 5);
    pub const D7: Coord = Coord::from_file_rank(3, 6);
    pub const D8: Coord = Coord::from_file_rank(3, 7);
    pub const E1: Coord = Coord::from_file_rank(4, 0);
    pub const E2: Coord = Coord::from_file_rank(4, 1);
    pub const E3: Coord = Coord::from_file_rank(4, 2);
    pub const E4: Coord = Coord::from_file_rank(4, 3);
    pub const E5: Coord = Coord::from_file_rank(4, 4);
    pub const E6: Coord = Coord::from_file_rank(4, 5);
    pub const E7: Coord = Coord::from_file_rank(4, 6);
    pub const E8: Coord = Coord::from_file_rank(4, 7);
    pub const F1: Coord = Coord::from_file_rank(5, 0);
    pub const F2: Coord = Coord::from_file_rank(5, 1);
    pub const F3: Coord = Coord::from_file_rank(5, 2);
    pub const F4: Coord = Coord::from_file_rank(5, 3);
    pub const F5: Coord = Coord::from_file_rank(5, 4);
    pub const F6: Coord = Coord::from_file_rank(5, 5);
    pub const F7: Coord = Coord::from_file_rank(5, 6);
    pub const F8: Coord = Coord::from_file_rank(5, 7);
    pub const G1: Coord = Coord::from_file_rank(6, 0);
    pub const G2: Coord = Coord::from_file_rank(6, 1);
    pub const G3: Coord = Coord::from_file_rank(6, 2);
    pub const G4: Coord = Coord::from_file_rank(6, 3);
    pub const G5: Coord = Coord::from_file_rank(6, 4);
    pub const G6: Coord = Coord::from_file_rank(6, 5);
    pub const G7: Coord = Coord::from_file_rank(6, 6);
    pub const G8: Coord = Coord::from_file_rank(6, 7);
    pub const H1: Coord = Coord::from_file_rank(7, 0);
    pub const H2: Coord = Coord::from_file_rank(7, 1);
    pub const H3: Coord = Coord::from_file_rank(7, 2);
    pub const H4: Coord = Coord::from_file_rank(7, 3);
    pub const H5: Coord = Coord::from_file_rank(7, 4);
    pub const H6: Coord = Coord::from_file_rank(7, 5);
    pub const H7: Coord = Coord::from_file_rank(7, 6);
    pub const H8: Coord = Coord::from_file_rank(7, 7);
}
