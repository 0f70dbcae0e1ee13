//! Scalar field storage
//!
//! A 2D array of `f32` stored row-major, used for the wave field snapshots,
//! the boundary mask and the distance map.

/// Scalar field over the tank grid
///
/// Stores values as a flat `Vec<f32>` in row-major order. Row index is the
/// y cell, column index is the x cell, so `(x, y)` lives at `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl ScalarField {
    /// Create a new field with given dimensions, initialized to zero
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_value(width, height, 0.0)
    }

    /// Create a new field with given dimensions, initialized to a value
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: f32) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` in cells
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// One row (fixed y) of the field
    pub fn row(&self, y: usize) -> &[f32] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    /// Flat index of `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        y * self.width + x
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.index(x, y)]
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Add to the value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn add(&mut self, x: usize, y: usize, value: f32) {
        let idx = self.index(x, y);
        self.data[idx] += value;
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Largest absolute value in the field (0 for an empty field)
    pub fn max_abs(&self) -> f32 {
        self.data.iter().fold(0.0_f32, |acc, v| acc.max(v.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_creation() {
        let field = ScalarField::new(10, 20);
        assert_eq!(field.shape(), (10, 20));
        assert_eq!(field.as_slice().len(), 200);
        assert!(field.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_field_get_set_add() {
        let mut field = ScalarField::new(10, 10);
        field.set(3, 4, 1.5);
        field.add(3, 4, 0.25);
        assert_eq!(field.get(3, 4), 1.75);

        // Row-major: y selects the row
        assert_eq!(field.as_slice()[4 * 10 + 3], 1.75);
        assert_eq!(field.row(4)[3], 1.75);
    }

    #[test]
    fn test_field_max_abs() {
        let mut field = ScalarField::new(4, 4);
        field.set(1, 1, 0.5);
        field.set(2, 3, -2.0);
        assert_eq!(field.max_abs(), 2.0);
        field.fill(0.0);
        assert_eq!(field.max_abs(), 0.0);
    }

    #[test]
    #[should_panic(expected = "Coordinates out of bounds")]
    fn test_field_bounds_check() {
        let field = ScalarField::new(10, 10);
        let _ = field.get(10, 5);
    }
}
