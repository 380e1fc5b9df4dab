use chess_variants::coord::Coord;
use chess_variants::piece::piece_to_ascii;
use chess_variants::{Force, Grid};
use console::Style;
use itertools::Itertools;


fn format_square(ch: char) -> String { format!(" {} ", ch) }

// White at the bottom, files left to right.
pub fn render_grid(grid: &Grid) -> String {
    let colors = [
        Style::new().color256(233).on_color256(222),
        Style::new().color256(233).on_color256(230),
    ];
    let board_shape = grid.shape();
    let col_header = format!(
        "{}{}\n",
        format_square(' '),
        board_shape.cols().map(|col| format_square(col.to_algebraic())).join("")
    );
    let mut ret = col_header.clone();
    for row in board_shape.rows().rev() {
        let row_name = row.to_algebraic();
        ret.push_str(&format!("{row_name:>2} "));
        for col in board_shape.cols() {
            let coord = Coord::new(row, col);
            let color_idx = (row.to_zero_based() + col.to_zero_based()) % 2;
            let ch = match grid[coord] {
                Some(piece) => piece_to_ascii(piece.kind, piece.force),
                None => ' ',
            };
            ret.push_str(&colors[color_idx as usize].apply_to(format_square(ch)).to_string());
        }
        ret.push_str(&format!(" {row_name:<2}\n"));
    }
    ret.push_str(&col_header);
    ret
}

pub fn force_name(force: Force) -> &'static str {
    match force {
        Force::White => "White",
        Force::Black => "Black",
    }
}
