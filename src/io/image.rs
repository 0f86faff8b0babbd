//! PNG export of solution levels

use crate::io::configuration::{CELL_PIXELS, LEVEL_IMAGE_PREFIX};
use crate::io::error::{Nmbr9Error, Result, WithPath};
use crate::model::solution::Solution;
use image::{ImageBuffer, Rgba, RgbaImage};
use ndarray::Array2;
use std::path::{Path, PathBuf};

// One fill color per tile value
const VALUE_COLORS: [[u8; 4]; 10] = [
    [230, 230, 230, 255],
    [231, 76, 60, 255],
    [230, 126, 34, 255],
    [241, 196, 15, 255],
    [46, 204, 113, 255],
    [26, 188, 156, 255],
    [52, 152, 219, 255],
    [155, 89, 182, 255],
    [149, 165, 166, 255],
    [52, 73, 94, 255],
];

const OUTLINE: Rgba<u8> = Rgba([20, 20, 20, 255]);
const EMPTY: Rgba<u8> = Rgba([0, 0, 0, 0]);

fn fill_color(value: i32) -> Rgba<u8> {
    usize::try_from(value)
        .ok()
        .and_then(|v| VALUE_COLORS.get(v))
        .map_or(EMPTY, |&rgba| Rgba(rgba))
}

// Whether the cell next to (row, col) in direction (dr, dc) belongs to another part
fn differs(board: &Array2<i32>, row: usize, col: usize, dr: isize, dc: isize) -> bool {
    let here = board[(row, col)];
    let neighbor = row
        .checked_add_signed(dr)
        .zip(col.checked_add_signed(dc))
        .and_then(|(r, c)| board.get((r, c)).copied())
        .unwrap_or(0);
    neighbor != here
}

/// Render one level: cells colored by tile value, outlined per part, empty
/// cells transparent
pub fn render_level(board: &Array2<i32>, values: &Array2<i32>) -> RgbaImage {
    let (rows, cols) = board.dim();
    let cell = CELL_PIXELS;
    let mut img = ImageBuffer::from_pixel(cols as u32 * cell, rows as u32 * cell, EMPTY);

    for ((row, col), &color) in board.indexed_iter() {
        if color == 0 {
            continue;
        }
        let fill = fill_color(values[(row, col)]);
        let top = differs(board, row, col, -1, 0);
        let bottom = differs(board, row, col, 1, 0);
        let left = differs(board, row, col, 0, -1);
        let right = differs(board, row, col, 0, 1);
        let (x0, y0) = (col as u32 * cell, row as u32 * cell);
        for dy in 0..cell {
            for dx in 0..cell {
                let edge = (top && dy == 0)
                    || (bottom && dy == cell - 1)
                    || (left && dx == 0)
                    || (right && dx == cell - 1);
                img.put_pixel(x0 + dx, y0 + dy, if edge { OUTLINE } else { fill });
            }
        }
    }
    img
}

/// Write `level_<l>.png` for every level of `solution` into `directory`
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be created and
/// `ImageExport` if an image cannot be written.
pub fn export_solution(solution: &Solution, directory: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(directory).with_path(directory, "create directory")?;

    let mut written = Vec::with_capacity(solution.levels());
    for (level, (board, values)) in solution
        .boards
        .iter()
        .zip(&solution.value_boards)
        .enumerate()
    {
        let path = directory.join(format!("{LEVEL_IMAGE_PREFIX}{level}.png"));
        render_level(board, values)
            .save(&path)
            .map_err(|source| Nmbr9Error::ImageExport {
                path: path.clone(),
                source,
            })?;
        written.push(path);
    }
    Ok(written)
}
