//! Board loading: text boards with inferred glyphs, random boards, and
//! writing boards back out

use super::grid::check_dimensions;
use crate::error::{LifeError, LifeResult};
use anyhow::Context;
use itertools::Itertools;
use rand::Rng;
use std::path::Path;
use tracing::{debug, info};

/// Glyphs that force the `o`/`.` convention when they dominate a board
const DEFAULT_GLYPHS: [char; 3] = ['.', 'o', 'O'];
pub const DEFAULT_ALIVE_GLYPH: char = 'o';
pub const DEFAULT_DEAD_GLYPH: char = '.';

/// Only plain text boards are accepted
pub const BOARD_EXTENSION: &str = "txt";

/// Terminator line for pasted boards
pub const PASTE_TERMINATOR: &str = "e";

/// An initial population decoded from a board source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    pub width: usize,
    pub height: usize,
    pub alive_glyph: char,
    pub dead_glyph: char,
    /// Row-major, `width * height` entries
    cells: Vec<bool>,
}

impl Population {
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Live cell coordinates in row-major order
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .positions(|&alive| alive)
            .map(move |i| (i % width, i / width))
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}

/// Decode a text board.
///
/// Lines are split on `\n` (a trailing `\r` is dropped), the height is the
/// number of lines including a final unterminated one, and the width is the
/// longest line. The most frequent byte is the alive glyph and the runner-up
/// the dead glyph, with ties going to the lower byte value. If either of the
/// two is `.`, `o` or `O` the glyphs are forced to `o`/`.`.
///
/// Everything is counted per byte, so each byte of a multi-byte UTF-8
/// character is its own column and glyphs are the Latin-1 reading of a
/// single byte. Boards are expected to be ASCII.
pub fn infer_population(text: &[u8], max_dimension: usize) -> LifeResult<Population> {
    let mut lines: Vec<&[u8]> = text
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect();
    // A terminating newline does not start another row
    if text.ends_with(b"\n") {
        lines.pop();
    }

    let height = lines.len();
    let width = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    check_dimensions(width, height, max_dimension)?;

    let (alive_glyph, dead_glyph) = infer_glyphs(&lines);

    let mut cells = vec![false; width * height];
    for (y, line) in lines.iter().enumerate() {
        for (x, &byte) in line.iter().enumerate() {
            cells[y * width + x] = char::from(byte) == alive_glyph;
        }
    }

    debug!(width, height, %alive_glyph, %dead_glyph, "inferred population");
    Ok(Population {
        width,
        height,
        alive_glyph,
        dead_glyph,
        cells,
    })
}

/// Pick (alive, dead) glyphs from byte frequencies
fn infer_glyphs(lines: &[&[u8]]) -> (char, char) {
    let mut counts = [0usize; 256];
    for &byte in lines.iter().flat_map(|line| line.iter()) {
        counts[byte as usize] += 1;
    }

    let mut ranked = (0..=u8::MAX)
        .filter(|&byte| counts[byte as usize] > 0)
        .sorted_by(|a, b| {
            counts[*b as usize]
                .cmp(&counts[*a as usize])
                .then_with(|| a.cmp(b))
        })
        .map(char::from);
    let most = ranked.next();
    let second = ranked.next();

    let forced = [most, second]
        .iter()
        .flatten()
        .any(|glyph| DEFAULT_GLYPHS.contains(glyph));

    match (most, second) {
        _ if forced => (DEFAULT_ALIVE_GLYPH, DEFAULT_DEAD_GLYPH),
        (Some(alive), Some(dead)) => (alive, dead),
        (Some(alive), None) => (alive, DEFAULT_DEAD_GLYPH),
        (None, _) => (DEFAULT_ALIVE_GLYPH, DEFAULT_DEAD_GLYPH),
    }
}

/// Load a board from a `.txt` file
pub fn load_board_file<P: AsRef<Path>>(path: P, max_dimension: usize) -> LifeResult<Population> {
    let path = path.as_ref();

    let content = std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LifeError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LifeError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    if path.extension().and_then(|ext| ext.to_str()) != Some(BOARD_EXTENSION) {
        return Err(LifeError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let population = infer_population(&content, max_dimension)?;
    info!(
        path = %path.display(),
        width = population.width,
        height = population.height,
        "loaded board file"
    );
    Ok(population)
}

/// Collect pasted board lines up to the terminator line and decode them.
///
/// Returns `None` when the lines run out before a terminator was seen.
pub fn parse_pasted_board<I, S>(lines: I, max_dimension: usize) -> Option<LifeResult<Population>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for line in lines {
        let line = line.as_ref().trim_end_matches(['\r', '\n']);
        if line == PASTE_TERMINATOR {
            return Some(infer_population(text.as_bytes(), max_dimension));
        }
        text.push_str(line);
        text.push('\n');
    }
    None
}

/// Random dimensions in `[1, max_side]` with each cell alive at even odds
pub fn random_population<R: Rng>(rng: &mut R, max_side: usize) -> LifeResult<Population> {
    check_dimensions(max_side, max_side, max_side)?;

    let width = rng.gen_range(1..=max_side);
    let height = rng.gen_range(1..=max_side);
    random_population_sized(rng, width, height, max_side)
}

/// A random population of a fixed size
pub fn random_population_sized<R: Rng>(
    rng: &mut R,
    width: usize,
    height: usize,
    max_dimension: usize,
) -> LifeResult<Population> {
    check_dimensions(width, height, max_dimension)?;

    let cells = (0..width * height).map(|_| rng.gen_bool(0.5)).collect();
    debug!(width, height, "generated random population");
    Ok(Population {
        width,
        height,
        alive_glyph: DEFAULT_ALIVE_GLYPH,
        dead_glyph: DEFAULT_DEAD_GLYPH,
        cells,
    })
}

/// Render a population as text using its own glyphs
pub fn population_to_string(population: &Population) -> String {
    let mut result = String::with_capacity(population.height * (population.width + 1));
    for y in 0..population.height {
        for x in 0..population.width {
            result.push(if population.is_alive(x, y) {
                population.alive_glyph
            } else {
                population.dead_glyph
            });
        }
        result.push('\n');
    }
    result
}

/// Save a population to a text file
pub fn save_board_file<P: AsRef<Path>>(population: &Population, path: P) -> anyhow::Result<()> {
    let content = population_to_string(population);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write board to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Create example board files
pub fn create_example_boards<P: AsRef<Path>>(output_dir: P) -> anyhow::Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let boards = [
        ("glider.txt", "..........\n....o.....\n.....o....\n...ooo....\n..........\n..........\n..........\n..........\n..........\n..........\n"),
        ("blinker.txt", ".....\n.....\n.ooo.\n.....\n.....\n"),
        ("block.txt", "....\n.oo.\n.oo.\n....\n"),
        ("beacon.txt", "oo....\noo....\n..oo..\n..oo..\n......\n"),
        // Custom glyphs: '-' is the most frequent byte, so it is read as alive
        ("dashes.txt", "--+\n-++\n+--\n"),
    ];

    for (name, content) in boards {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
