//! Cost map implementation for the grid publisher.
//!
//! The cost map is a row-major 2D grid of [`CellCost`] values anchored at a
//! world-frame origin. It is sized from a bounding box, starts out fully
//! [`CellCost::Unknown`], and is then edited through [`CellEdit`] lists.

use crate::error::CostmapError;
use nalgebra::SVector;

/// Represents the cost of traversing a cell in the costmap.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CellCost {
    /// Free cell, no cost to traverse
    Free = 0,
    /// Cell with inflated obstacle cost (1 - 252)
    /// Higher values indicate higher traversal cost
    Inflated(u8),
    /// Cell that is guaranteed to be in collision with obstacles
    Inscribed = 253,
    /// Cell that contains an obstacle
    #[cfg_attr(feature = "serde", serde(alias = "occupied"))]
    Lethal = 254,
    /// Unknown cell - no information available about this cell
    Unknown = 255,
}

impl CellCost {
    /// Alias for [`CellCost::Lethal`].
    pub const OCCUPIED: CellCost = CellCost::Lethal;

    /// Converts the CellCost to its u8 representation
    pub fn as_u8(&self) -> u8 {
        match self {
            CellCost::Free => 0,
            CellCost::Inflated(cost) => *cost,
            CellCost::Inscribed => 253,
            CellCost::Lethal => 254,
            CellCost::Unknown => 255,
        }
    }

    /// Creates a CellCost from a u8 value
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => CellCost::Free,
            253 => CellCost::Inscribed,
            254 => CellCost::Lethal,
            255 => CellCost::Unknown,
            _ => CellCost::Inflated(value),
        }
    }
}

impl std::fmt::Display for CellCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellCost::Free => write!(f, "Free"),
            CellCost::Inflated(cost) => write!(f, "Inflated({})", cost),
            CellCost::Inscribed => write!(f, "Inscribed"),
            CellCost::Lethal => write!(f, "Lethal"),
            CellCost::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A single `(x, y, cost)` write applied by [`CostMap2D::apply_edits`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellEdit {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
    /// Cost written into the cell.
    pub cost: CellCost,
}

impl CellEdit {
    /// Construct a new edit.
    pub const fn new(x: usize, y: usize, cost: CellCost) -> Self {
        CellEdit { x, y, cost }
    }
}

/// 2-D cost map with square cells.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostMap2D {
    /// Size in cells along x and y.
    dims: SVector<usize, 2>,
    /// Edge length of a cell in world meters.
    resolution: f64,
    /// World coordinates of the bottom-left corner of cell (0, 0).
    origin: SVector<f64, 2>,
    /// Row-major cost values, index = y * width + x.
    data: Vec<CellCost>,
}

impl CostMap2D {
    /// Creates a new CostMap2D with every cell set to [`CellCost::Unknown`].
    ///
    /// # Arguments
    /// * `dims` - Size in cells along each axis
    /// * `resolution` - World meters per cell
    /// * `origin` - World coordinates of the bottom-left corner of cell (0, 0)
    ///
    /// # Returns
    /// * `Result<Self, CostmapError>` - The created map or an error if parameters are invalid
    pub fn new(
        dims: SVector<usize, 2>,
        resolution: f64,
        origin: SVector<f64, 2>,
    ) -> Result<Self, CostmapError> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(CostmapError::InvalidResolution(
                "Resolution must be positive and finite",
            ));
        }
        if dims.iter().any(|&d| d == 0) {
            return Err(CostmapError::InvalidDimensions(
                "All dimensions must be non-zero",
            ));
        }

        let total_cells = dims[0]
            .checked_mul(dims[1])
            .ok_or(CostmapError::InvalidDimensions(
                "Map dimensions too large, would cause overflow",
            ))?;

        Ok(CostMap2D {
            dims,
            resolution,
            origin,
            data: vec![CellCost::Unknown; total_cells],
        })
    }

    /// Creates a map covering the box from `bottom_left` to `top_right`.
    ///
    /// The cell count per axis is `floor((top_right - bottom_left) / resolution)`,
    /// so a partial cell at the top/right edge is dropped. The map is anchored at
    /// `bottom_left` and every cell starts out unknown.
    ///
    /// A box that is empty or inverted on either axis is rejected with
    /// [`CostmapError::InvalidDimensions`].
    pub fn from_bounds(
        bottom_left: SVector<f64, 2>,
        top_right: SVector<f64, 2>,
        resolution: f64,
    ) -> Result<Self, CostmapError> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(CostmapError::InvalidResolution(
                "Resolution must be positive and finite",
            ));
        }

        let mut dims = SVector::<usize, 2>::zeros();
        for i in 0..2 {
            let cells = ((top_right[i] - bottom_left[i]) / resolution).floor();
            if !cells.is_finite() || cells < 1.0 {
                return Err(CostmapError::InvalidDimensions(
                    "Bounding box must span at least one cell on each axis",
                ));
            }
            if cells > usize::MAX as f64 {
                return Err(CostmapError::InvalidDimensions(
                    "Map dimensions too large, would cause overflow",
                ));
            }
            dims[i] = cells as usize;
        }

        Self::new(dims, resolution, bottom_left)
    }

    /// Gets the dimensions of the costmap.
    pub fn dims(&self) -> &SVector<usize, 2> {
        &self.dims
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.dims[0]
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.dims[1]
    }

    /// Gets the resolution of the costmap.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Gets the origin of the costmap.
    pub fn origin(&self) -> &SVector<f64, 2> {
        &self.origin
    }

    fn check_bounds(&self, coords: &SVector<usize, 2>) -> Result<(), CostmapError> {
        if coords[0] >= self.dims[0] || coords[1] >= self.dims[1] {
            return Err(CostmapError::OutOfBounds {
                x: coords[0],
                y: coords[1],
                width: self.dims[0],
                height: self.dims[1],
            });
        }
        Ok(())
    }

    fn get_index(&self, coords: &SVector<usize, 2>) -> usize {
        coords[1] * self.dims[0] + coords[0]
    }

    /// Converts grid coordinates to world coordinates (center of cell).
    pub fn grid_to_world(&self, grid_coords: &SVector<usize, 2>) -> Option<SVector<f64, 2>> {
        self.check_bounds(grid_coords).ok()?;

        let mut world_coords = SVector::<f64, 2>::zeros();
        for i in 0..2 {
            world_coords[i] = self.origin[i] + (grid_coords[i] as f64 + 0.5) * self.resolution;
        }

        Some(world_coords)
    }

    /// Gets the cost at grid coordinates.
    pub fn get_cost(&self, grid_coords: &SVector<usize, 2>) -> Result<CellCost, CostmapError> {
        self.check_bounds(grid_coords)?;
        Ok(self.data[self.get_index(grid_coords)])
    }

    /// Sets the cost at grid coordinates.
    pub fn set_cost(
        &mut self,
        grid_coords: &SVector<usize, 2>,
        cost: CellCost,
    ) -> Result<(), CostmapError> {
        self.check_bounds(grid_coords)?;
        let index = self.get_index(grid_coords);
        self.data[index] = cost;
        Ok(())
    }

    /// Applies `edits` in order, later writes overwriting earlier ones.
    ///
    /// Every edit must address a cell inside the map. The first edit that does
    /// not stops the pass with [`CostmapError::OutOfBounds`]; edits before it
    /// stay applied.
    pub fn apply_edits(&mut self, edits: &[CellEdit]) -> Result<(), CostmapError> {
        for edit in edits {
            self.set_cost(&SVector::<usize, 2>::new(edit.x, edit.y), edit.cost)?;
        }
        Ok(())
    }

    /// Gets a reference to the underlying cost data.
    pub fn data(&self) -> &[CellCost] {
        &self.data
    }

    /// Gets the total number of cells in the costmap.
    pub fn total_cells(&self) -> usize {
        self.data.len()
    }

    /// Counts the cells holding exactly `cost`.
    pub fn count(&self, cost: CellCost) -> usize {
        self.data.iter().filter(|&&c| c == cost).count()
    }
}

impl std::fmt::Display for CostMap2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "CostMap2D ({}x{}, resolution: {:.3}m)",
            self.dims[0], self.dims[1], self.resolution
        )?;
        writeln!(f, "Origin: ({:.3}, {:.3})", self.origin[0], self.origin[1])?;

        // Top row first so the dump reads like a map.
        for y in (0..self.dims[1]).rev() {
            write!(f, "{:3} ", y)?;
            for x in 0..self.dims[0] {
                let symbol = match self.data[y * self.dims[0] + x] {
                    CellCost::Free => '.',
                    CellCost::Inflated(_) => 'I',
                    CellCost::Inscribed => '#',
                    CellCost::Lethal => 'X',
                    CellCost::Unknown => '?',
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_map() -> CostMap2D {
        CostMap2D::from_bounds(
            SVector::<f64, 2>::new(0.0, 0.0),
            SVector::<f64, 2>::new(4.5, 4.5),
            0.3,
        )
        .unwrap()
    }

    fn reference_edits() -> Vec<CellEdit> {
        let mut edits: Vec<CellEdit> = [(5, 2), (5, 3), (5, 4), (4, 4)]
            .iter()
            .map(|&(x, y)| CellEdit::new(x, y, CellCost::Free))
            .collect();
        edits.push(CellEdit::new(5, 5, CellCost::OCCUPIED));
        edits.extend(
            [(4, 5), (4, 6), (5, 6), (5, 7), (5, 8), (5, 9), (5, 10), (5, 11), (5, 12)]
                .iter()
                .map(|&(x, y)| CellEdit::new(x, y, CellCost::Free)),
        );
        edits
    }

    #[test]
    fn test_costmap_creation() {
        let dims = SVector::<usize, 2>::new(10, 4);
        let origin = SVector::<f64, 2>::new(-1.0, 2.0);
        let costmap = CostMap2D::new(dims, 0.1, origin).unwrap();
        assert_eq!(costmap.width(), 10);
        assert_eq!(costmap.height(), 4);
        assert_eq!(costmap.resolution(), 0.1);
        assert_eq!(costmap.origin()[0], -1.0);
        assert_eq!(costmap.total_cells(), 40);
        assert!(costmap.data().iter().all(|c| *c == CellCost::Unknown));
    }

    #[test]
    fn test_invalid_creation() {
        let origin = SVector::<f64, 2>::new(0.0, 0.0);

        assert!(matches!(
            CostMap2D::new(SVector::<usize, 2>::new(0, 10), 0.1, origin),
            Err(CostmapError::InvalidDimensions(_))
        ));
        assert!(matches!(
            CostMap2D::new(SVector::<usize, 2>::new(10, 10), 0.0, origin),
            Err(CostmapError::InvalidResolution(_))
        ));
        assert!(matches!(
            CostMap2D::new(SVector::<usize, 2>::new(usize::MAX, 2), 0.1, origin),
            Err(CostmapError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_from_bounds_reference_box() {
        let costmap = reference_map();
        assert_eq!(costmap.width(), 15);
        assert_eq!(costmap.height(), 15);
        assert_eq!(costmap.count(CellCost::Unknown), 225);
        assert_eq!(*costmap.origin(), SVector::<f64, 2>::new(0.0, 0.0));
    }

    #[test]
    fn test_from_bounds_floors_partial_cells() {
        let costmap = CostMap2D::from_bounds(
            SVector::<f64, 2>::new(1.0, -1.0),
            SVector::<f64, 2>::new(2.05, 0.5),
            0.5,
        )
        .unwrap();
        assert_eq!(costmap.width(), 2);
        assert_eq!(costmap.height(), 3);
        assert_eq!(costmap.origin()[1], -1.0);
    }

    #[test]
    fn test_from_bounds_rejects_degenerate_boxes() {
        let zero = SVector::<f64, 2>::new(0.0, 0.0);

        // Empty box.
        assert!(matches!(
            CostMap2D::from_bounds(zero, zero, 0.3),
            Err(CostmapError::InvalidDimensions(_))
        ));
        // Inverted on one axis.
        assert!(matches!(
            CostMap2D::from_bounds(zero, SVector::<f64, 2>::new(4.5, -4.5), 0.3),
            Err(CostmapError::InvalidDimensions(_))
        ));
        // Narrower than a single cell.
        assert!(matches!(
            CostMap2D::from_bounds(zero, SVector::<f64, 2>::new(0.2, 4.5), 0.3),
            Err(CostmapError::InvalidDimensions(_))
        ));
        assert!(matches!(
            CostMap2D::from_bounds(zero, SVector::<f64, 2>::new(4.5, 4.5), -0.3),
            Err(CostmapError::InvalidResolution(_))
        ));
        assert!(matches!(
            CostMap2D::from_bounds(zero, SVector::<f64, 2>::new(f64::NAN, 4.5), 0.3),
            Err(CostmapError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_cost_operations() {
        let mut costmap = CostMap2D::new(
            SVector::<usize, 2>::new(5, 5),
            0.1,
            SVector::<f64, 2>::new(0.0, 0.0),
        )
        .unwrap();
        let coords = SVector::<usize, 2>::new(2, 3);

        costmap.set_cost(&coords, CellCost::Lethal).unwrap();
        assert_eq!(costmap.get_cost(&coords).unwrap(), CellCost::Lethal);
        // Row-major layout.
        assert_eq!(costmap.data()[3 * 5 + 2], CellCost::Lethal);

        let out_of_bounds = SVector::<usize, 2>::new(5, 2);
        assert_eq!(
            costmap.set_cost(&out_of_bounds, CellCost::Free),
            Err(CostmapError::OutOfBounds {
                x: 5,
                y: 2,
                width: 5,
                height: 5
            })
        );
        assert!(matches!(
            costmap.get_cost(&SVector::<usize, 2>::new(2, 5)),
            Err(CostmapError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_reference_edits() {
        let mut costmap = reference_map();
        let edits = reference_edits();
        costmap.apply_edits(&edits).unwrap();

        let occupied = SVector::<usize, 2>::new(5, 5);
        assert_eq!(costmap.get_cost(&occupied).unwrap(), CellCost::Lethal);
        for edit in edits.iter().filter(|e| (e.x, e.y) != (5, 5)) {
            let coords = SVector::<usize, 2>::new(edit.x, edit.y);
            assert_eq!(costmap.get_cost(&coords).unwrap(), CellCost::Free);
        }

        // Everything else is untouched.
        for y in 0..costmap.height() {
            for x in 0..costmap.width() {
                if edits.iter().any(|e| (e.x, e.y) == (x, y)) {
                    continue;
                }
                let coords = SVector::<usize, 2>::new(x, y);
                assert_eq!(costmap.get_cost(&coords).unwrap(), CellCost::Unknown);
            }
        }
        assert_eq!(costmap.count(CellCost::Free), 13);
        assert_eq!(costmap.count(CellCost::Lethal), 1);
        assert_eq!(costmap.count(CellCost::Unknown), 225 - 14);
    }

    #[test]
    fn test_later_edits_overwrite_earlier_ones() {
        let mut costmap = reference_map();
        costmap
            .apply_edits(&[
                CellEdit::new(1, 1, CellCost::Lethal),
                CellEdit::new(1, 1, CellCost::Free),
            ])
            .unwrap();
        assert_eq!(
            costmap.get_cost(&SVector::<usize, 2>::new(1, 1)).unwrap(),
            CellCost::Free
        );
    }

    #[test]
    fn test_out_of_range_edit_stops_the_pass() {
        let mut costmap = reference_map();
        let result = costmap.apply_edits(&[
            CellEdit::new(0, 0, CellCost::Free),
            CellEdit::new(15, 0, CellCost::Free),
            CellEdit::new(1, 0, CellCost::Free),
        ]);
        assert!(matches!(
            result,
            Err(CostmapError::OutOfBounds { x: 15, y: 0, .. })
        ));
        assert_eq!(
            costmap.get_cost(&SVector::<usize, 2>::new(0, 0)).unwrap(),
            CellCost::Free
        );
        assert_eq!(
            costmap.get_cost(&SVector::<usize, 2>::new(1, 0)).unwrap(),
            CellCost::Unknown
        );
    }

    #[test]
    fn test_grid_to_world_returns_cell_centers() {
        let costmap = reference_map();

        let start = costmap.grid_to_world(&SVector::<usize, 2>::new(5, 2)).unwrap();
        assert!((start[0] - 1.65).abs() < 1e-9);
        assert!((start[1] - 0.75).abs() < 1e-9);

        let goal = costmap.grid_to_world(&SVector::<usize, 2>::new(5, 12)).unwrap();
        assert!((goal[0] - 1.65).abs() < 1e-9);
        assert!((goal[1] - 3.75).abs() < 1e-9);

        assert!(
            costmap
                .grid_to_world(&SVector::<usize, 2>::new(15, 0))
                .is_none()
        );
    }

    #[test]
    fn test_cell_cost_u8_conversion() {
        for value in [0u8, 1, 128, 252, 253, 254, 255] {
            assert_eq!(CellCost::from_u8(value).as_u8(), value);
        }
        assert_eq!(CellCost::from_u8(254), CellCost::OCCUPIED);
        assert_eq!(CellCost::from_u8(42), CellCost::Inflated(42));
    }

    #[test]
    fn test_display_2d() {
        let mut costmap = CostMap2D::new(
            SVector::<usize, 2>::new(3, 2),
            0.1,
            SVector::<f64, 2>::new(0.0, 0.0),
        )
        .unwrap();
        costmap
            .apply_edits(&[
                CellEdit::new(0, 0, CellCost::Free),
                CellEdit::new(2, 1, CellCost::Lethal),
            ])
            .unwrap();

        let display_str = format!("{}", costmap);
        assert!(display_str.contains("CostMap2D (3x2, resolution: 0.100m)"));
        let rows: Vec<&str> = display_str.lines().skip(2).collect();
        assert_eq!(rows, vec!["  1 ? ? X ", "  0 . ? ? "]);
    }
}
