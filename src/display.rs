use bitvec::{order::Msb0, vec::BitVec};
use ndarray::{Array2, ArrayView1};

pub const DISPLAY_COLUMNS: usize = 64;
pub const DISPLAY_ROWS: usize = 32;

/// A fixed-size 2D grid of cells. The framebuffer is the only grid the
/// emulator needs, but renderers can be written against this instead.
pub trait PixelGrid {
    type Cell: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn get(&self, x: usize, y: usize) -> Option<Self::Cell>;
    /// Returns false when (x, y) is off the grid
    fn set(&mut self, x: usize, y: usize, cell: Self::Cell) -> bool;
    fn clear(&mut self);
}

/// Monochrome display, indexed by (column, row)
#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer {
    pixels: Array2<bool>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(DISPLAY_COLUMNS, DISPLAY_ROWS)
    }
}

impl PixelGrid for Framebuffer {
    type Cell = bool;

    fn width(&self) -> usize {
        self.pixels.ncols()
    }

    fn height(&self) -> usize {
        self.pixels.nrows()
    }

    fn get(&self, x: usize, y: usize) -> Option<bool> {
        self.pixels.get((y, x)).copied()
    }

    fn set(&mut self, x: usize, y: usize, cell: bool) -> bool {
        match self.pixels.get_mut((y, x)) {
            Some(pixel) => {
                *pixel = cell;
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.pixels.fill(false);
    }
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), false),
        }
    }

    pub fn width(&self) -> usize {
        PixelGrid::width(self)
    }

    pub fn height(&self) -> usize {
        PixelGrid::height(self)
    }

    /// Off-grid coordinates read as unlit
    pub fn pixel_at(&self, x: usize, y: usize) -> bool {
        self.get(x, y).unwrap_or(false)
    }

    /// XOR a lit sprite bit onto (x, y). Returns true if the pixel was lit
    /// before, i.e. the draw collided. Off-grid coordinates are ignored.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        match self.pixels.get_mut((y, x)) {
            Some(pixel) => {
                let was_lit = *pixel;
                *pixel = !was_lit;
                was_lit
            }
            None => false,
        }
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, bool>> {
        self.pixels.rows().into_iter()
    }

    /// Row-major, one bit per pixel, most significant bit first. Rows are
    /// padded to whole bytes.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let mut packed: BitVec<u8, Msb0> = BitVec::new();
        for row in self.rows() {
            packed.extend(row.iter().copied());
            let padding = (8 - row.len() % 8) % 8;
            packed.extend(std::iter::repeat(false).take(padding));
        }
        packed.into_vec()
    }

    pub fn render_text(&self) -> String {
        let mut display_str = String::with_capacity((self.width() + 1) * self.height());
        for row in self.rows() {
            for pixel in row.iter() {
                display_str.push(if *pixel { '*' } else { ' ' });
            }
            display_str.push('\n');
        }
        display_str
    }
}
