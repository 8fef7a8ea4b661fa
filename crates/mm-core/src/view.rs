//! Windows over square sub-regions of a row-major buffer.
//!
//! A [`Window`] is pure addressing: a row offset, a column offset and an edge
//! length. [`MatrixView`] pairs a window with a shared borrow of the buffer for
//! reading; [`BlockMut`] holds the window's row slices as disjoint mutable
//! borrows for writing. Splitting a `BlockMut` into quadrants reborrows its
//! rows, so sibling quadrants can be handed to concurrent tasks without locks.

use crate::error::{MatrixError, Result};

/// One of the four equal sub-blocks of a square window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];
}

/// A square sub-region `(row, col, len)` of an N x N matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub row: usize,
    pub col: usize,
    pub len: usize,
}

impl Window {
    pub fn new(row: usize, col: usize, len: usize) -> Self {
        Window { row, col, len }
    }

    /// The window covering an entire N x N matrix.
    pub fn whole(n: usize) -> Self {
        Window::new(0, 0, n)
    }

    /// Returns true if the window lies inside an N x N matrix.
    pub fn fits(&self, n: usize) -> bool {
        self.row + self.len <= n && self.col + self.len <= n
    }

    /// Flat index of local element `(i, j)` in a buffer of edge `n`.
    pub fn index(&self, n: usize, i: usize, j: usize) -> usize {
        (self.row + i) * n + self.col + j
    }

    /// The sub-window for quadrant `q`, splitting at `len / 2`.
    pub fn quadrant(&self, q: Quadrant) -> Window {
        let h = self.len / 2;
        match q {
            Quadrant::TopLeft => Window::new(self.row, self.col, h),
            Quadrant::TopRight => Window::new(self.row, self.col + h, h),
            Quadrant::BottomLeft => Window::new(self.row + h, self.col, h),
            Quadrant::BottomRight => Window::new(self.row + h, self.col + h, h),
        }
    }

    /// All four quadrants in `Quadrant::ALL` order.
    pub fn quadrants(&self) -> [Window; 4] {
        Quadrant::ALL.map(|q| self.quadrant(q))
    }
}

/// Read-only view of a square window over a row-major buffer of edge `n`.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a> {
    data: &'a [f32],
    n: usize,
    window: Window,
}

impl<'a> MatrixView<'a> {
    /// Create a view of `window` over `data`.
    ///
    /// # Errors
    /// Returns `LengthMismatch` if `data` is not `n * n` long, and
    /// `WindowOutOfBounds` if the window does not fit.
    pub fn new(data: &'a [f32], n: usize, window: Window) -> Result<Self> {
        if data.len() != n * n {
            return Err(MatrixError::LengthMismatch {
                n,
                len: data.len(),
            });
        }
        if !window.fits(n) {
            return Err(MatrixError::WindowOutOfBounds {
                row: window.row,
                col: window.col,
                len: window.len,
                n,
            });
        }
        Ok(MatrixView { data, n, window })
    }

    pub(crate) fn whole(data: &'a [f32], n: usize) -> Self {
        debug_assert_eq!(data.len(), n * n);
        MatrixView {
            data,
            n,
            window: Window::whole(n),
        }
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Edge length of the viewed block.
    pub fn len(&self) -> usize {
        self.window.len
    }

    pub fn is_empty(&self) -> bool {
        self.window.len == 0
    }

    /// Element `(i, j)` relative to the window.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[self.window.index(self.n, i, j)]
    }

    /// Row `i` of the window, `len` elements long.
    pub fn row(&self, i: usize) -> &'a [f32] {
        let start = self.window.index(self.n, i, 0);
        &self.data[start..start + self.window.len]
    }

    pub fn quadrant(&self, q: Quadrant) -> MatrixView<'a> {
        MatrixView {
            data: self.data,
            n: self.n,
            window: self.window.quadrant(q),
        }
    }

    pub fn quadrants(&self) -> [MatrixView<'a>; 4] {
        Quadrant::ALL.map(|q| self.quadrant(q))
    }
}

/// Mutable block of a square window: one `len`-long slice per row.
#[derive(Debug)]
pub struct BlockMut<'a> {
    rows: Vec<&'a mut [f32]>,
    window: Window,
}

impl<'a> BlockMut<'a> {
    pub(crate) fn whole(data: &'a mut [f32], n: usize) -> Self {
        debug_assert_eq!(data.len(), n * n);
        let rows = if n == 0 {
            Vec::new()
        } else {
            data.chunks_mut(n).collect()
        };
        BlockMut {
            rows,
            window: Window::whole(n),
        }
    }

    /// Absolute position of this block in the owning matrix.
    pub fn window(&self) -> Window {
        self.window
    }

    pub fn len(&self) -> usize {
        self.window.len
    }

    pub fn is_empty(&self) -> bool {
        self.window.len == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.rows[i][j]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f32] {
        &mut *self.rows[i]
    }

    /// Splits the block into its four quadrants, in `Quadrant::ALL` order.
    ///
    /// The quadrants borrow from `self`, so they are disjoint from each other
    /// and `self` is usable again once all of them are dropped.
    pub fn quadrants(&mut self) -> [BlockMut<'_>; 4] {
        debug_assert!(self.window.len % 2 == 0, "odd block edge {}", self.window.len);
        let h = self.window.len / 2;
        let [w11, w12, w21, w22] = self.window.quadrants();
        let (top, bottom) = self.rows.split_at_mut(h);
        let (tl, tr) = split_rows(top, h);
        let (bl, br) = split_rows(bottom, h);
        [
            BlockMut {
                rows: tl,
                window: w11,
            },
            BlockMut {
                rows: tr,
                window: w12,
            },
            BlockMut {
                rows: bl,
                window: w21,
            },
            BlockMut {
                rows: br,
                window: w22,
            },
        ]
    }
}

fn split_rows<'b>(rows: &'b mut [&mut [f32]], at: usize) -> (Vec<&'b mut [f32]>, Vec<&'b mut [f32]>) {
    rows.iter_mut().map(|row| row.split_at_mut(at)).unzip()
}
