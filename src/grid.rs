/// A 2D grid over an island map. Unlike a planetary map there is no
/// horizontal wrapping; out-of-range neighbor lookups clamp to the edge.
#[derive(Clone)]
pub struct Grid<T> {
    pub width: usize,
    pub depth: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, depth: usize) -> Self {
        Self {
            width,
            depth,
            data: vec![T::default(); width * depth],
        }
    }
}

impl<T: Clone> Grid<T> {
    pub fn new_with(width: usize, depth: usize, value: T) -> Self {
        Self {
            width,
            depth,
            data: vec![value; width * depth],
        }
    }

    fn index(&self, x: usize, z: usize) -> usize {
        let x = x.min(self.width - 1);
        let z = z.min(self.depth - 1);
        z * self.width + x
    }

    pub fn get(&self, x: usize, z: usize) -> &T {
        &self.data[self.index(x, z)]
    }

    pub fn set(&mut self, x: usize, z: usize, value: T) {
        let idx = self.index(x, z);
        self.data[idx] = value;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % self.width;
            let z = idx / self.width;
            (x, z, val)
        })
    }
}

impl Grid<f32> {
    /// Central differences at a cell, clamped at the grid edge.
    /// Returns the raw height deltas along x and z together with the
    /// cell span each delta covers (1 at edges, 2 in the interior).
    pub fn central_diff(&self, x: usize, z: usize) -> ((f32, usize), (f32, usize)) {
        let x0 = x.saturating_sub(1);
        let x1 = (x + 1).min(self.width - 1);
        let z0 = z.saturating_sub(1);
        let z1 = (z + 1).min(self.depth - 1);

        let dx = *self.get(x1, z) - *self.get(x0, z);
        let dz = *self.get(x, z1) - *self.get(x, z0);
        ((dx, x1 - x0), (dz, z1 - z0))
    }

    pub fn min_max(&self) -> (f32, f32) {
        let mut min_v = f32::MAX;
        let mut max_v = f32::MIN;
        for (_, _, &v) in self.iter() {
            if v < min_v {
                min_v = v;
            }
            if v > max_v {
                max_v = v;
            }
        }
        (min_v, max_v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let mut grid = Grid::new_with(4, 3, 0.0f32);
        grid.set(2, 1, 0.5);
        assert_eq!(*grid.get(2, 1), 0.5);
        assert_eq!(*grid.get(0, 0), 0.0);
    }

    #[test]
    fn test_out_of_range_access_clamps() {
        let mut grid = Grid::new_with(4, 4, 0.0f32);
        grid.set(3, 3, 1.0);
        // Reads past the edge land on the last cell instead of panicking.
        assert_eq!(*grid.get(10, 10), 1.0);
    }

    #[test]
    fn test_central_diff_spans() {
        let mut grid = Grid::new_with(3, 3, 0.0f32);
        grid.set(0, 1, 0.1);
        grid.set(2, 1, 0.5);

        let ((dx, span_x), _) = grid.central_diff(1, 1);
        assert!((dx - 0.4).abs() < 1e-6);
        assert_eq!(span_x, 2);

        // Edge cell falls back to a one-sided difference.
        let ((_, span_edge), _) = grid.central_diff(0, 1);
        assert_eq!(span_edge, 1);
    }

    #[test]
    fn test_iter_covers_all_cells() {
        let grid = Grid::new_with(5, 4, 1.0f32);
        assert_eq!(grid.iter().count(), 20);
    }
}
