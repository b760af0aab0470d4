//! The shared trail field agents read and write.
//!
//! A dense W×H grid of 3-channel `f32` intensities, column-major
//! (x-major) so a whole grid column is contiguous. Channel values live
//! conceptually in [0, 255] but may transiently exceed that between deposit
//! and decay; export clamps. The grid and its diffusion scratch buffer are
//! allocated once and never resized.

use rayon::prelude::*;

use crate::kernel::DiffusionKernel;

/// Number of intensity channels per cell.
pub const CHANNELS: usize = 3;

/// An 8-bit-per-channel snapshot of the field, safe to hand to a renderer.
///
/// Same x-major layout as the field itself: `(x * height + y) * 3`.
#[derive(Debug, Clone)]
pub struct ColorBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl ColorBuffer {
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (x * self.height + y) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

pub struct TrailField {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<f32>,
    scratch: Vec<f32>,
}

impl TrailField {
    /// Allocates a zero-filled field.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height * CHANNELS;
        Self {
            width,
            height,
            cells: vec![0.0; len],
            scratch: vec![0.0; len],
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        (x * self.height + y) * CHANNELS
    }

    /// Overwrites the cell at `(x, y)` with `color`. Deposits replace, they
    /// do not accumulate; colliding writers resolve last-write-wins.
    #[inline]
    pub fn deposit(&mut self, x: usize, y: usize, color: [f32; CHANNELS]) {
        let i = self.index(x, y);
        self.cells[i..i + CHANNELS].copy_from_slice(&color);
    }

    /// Reads the cell at `(x, y)`.
    #[inline]
    #[must_use]
    pub fn sample(&self, x: usize, y: usize) -> [f32; CHANNELS] {
        let i = self.index(x, y);
        [self.cells[i], self.cells[i + 1], self.cells[i + 2]]
    }

    /// Multiplies every channel of every cell by `factor`. With no
    /// redeposits, a cell's value after k ticks is its value times factor^k.
    pub fn decay(&mut self, factor: f32) {
        let stride = self.height * CHANNELS;
        self.cells.par_chunks_mut(stride).for_each(|col| {
            for v in col {
                *v *= factor;
            }
        });
    }

    /// Convolves each channel independently with the kernel.
    ///
    /// The kernel is an outer product of a 1D profile with itself, so this
    /// runs as two separable passes: along y within each column, then along
    /// x across columns. Cells outside the grid contribute zero
    /// (zero-padding), so border cells lose a little mass off-grid each
    /// tick.
    pub fn diffuse(&mut self, kernel: &DiffusionKernel) {
        if kernel.radius() == 0 {
            // single unit tap, convolution is the identity
            return;
        }
        let stride = self.height * CHANNELS;
        let weights = kernel.weights();
        let r = kernel.radius() as isize;
        let h = self.height as isize;
        let w = self.width as isize;

        // vertical pass: cells -> scratch
        let (cells, scratch) = (&self.cells, &mut self.scratch);
        scratch
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(x, out)| {
                let col = &cells[x * stride..(x + 1) * stride];
                out.fill(0.0);
                for (k, &wk) in weights.iter().enumerate() {
                    let dy = k as isize - r;
                    let y0 = (-dy).max(0);
                    let y1 = (h - dy).min(h);
                    for y in y0..y1 {
                        let src = ((y + dy) as usize) * CHANNELS;
                        let dst = (y as usize) * CHANNELS;
                        for c in 0..CHANNELS {
                            out[dst + c] += wk * col[src + c];
                        }
                    }
                }
            });

        // horizontal pass: scratch -> cells
        let (cells, scratch) = (&mut self.cells, &self.scratch);
        cells
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(x, out)| {
                out.fill(0.0);
                for (k, &wk) in weights.iter().enumerate() {
                    let sx = x as isize + k as isize - r;
                    if sx < 0 || sx >= w {
                        continue;
                    }
                    let src = &scratch[sx as usize * stride..(sx as usize + 1) * stride];
                    for (o, s) in out.iter_mut().zip(src) {
                        *o += wk * s;
                    }
                }
            });
    }

    /// Total intensity summed over all cells and channels.
    #[must_use]
    pub fn total_intensity(&self) -> f64 {
        self.cells.iter().map(|&v| v as f64).sum()
    }

    /// Copies the field into an 8-bit snapshot, clamping each channel to
    /// [0, 255]. The returned buffer is owned, so the caller can hold it
    /// across ticks without synchronizing against the simulation.
    #[must_use]
    pub fn export(&self) -> ColorBuffer {
        let data = self
            .cells
            .par_iter()
            .map(|&v| v.clamp(0.0, 255.0) as u8)
            .collect();
        ColorBuffer {
            width: self.width,
            height: self.height,
            data,
        }
    }
}
