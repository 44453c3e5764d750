use lbm2d_core::lattice::OFFSETS;

/// Side of the rectangular domain a boundary node lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Side {
    Right,
    Top,
    Left,
    Bottom,
}

/// Corner of the rectangular domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Corner {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

/// Where a node sits on the domain boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Placement {
    Side(Side),
    Corner(Corner),
}

impl Placement {
    /// Classifies node `(x, y)` of an `nx` by `ny` grid.
    ///
    /// Returns `None` for interior nodes, and for every node of a grid too
    /// narrow to have distinct opposite sides.
    pub(super) fn classify(x: usize, y: usize, nx: usize, ny: usize) -> Option<Self> {
        if nx < 2 || ny < 2 {
            return None;
        }

        let left = x == 0;
        let right = x == nx - 1;
        let bottom = y == 0;
        let top = y == ny - 1;

        let placement = match (left, right, bottom, top) {
            (true, _, true, _) => Self::Corner(Corner::BottomLeft),
            (_, true, true, _) => Self::Corner(Corner::BottomRight),
            (true, _, _, true) => Self::Corner(Corner::TopLeft),
            (_, true, _, true) => Self::Corner(Corner::TopRight),
            (_, true, _, _) => Self::Side(Side::Right),
            (_, _, _, true) => Self::Side(Side::Top),
            (true, _, _, _) => Self::Side(Side::Left),
            (_, _, true, _) => Self::Side(Side::Bottom),
            _ => return None,
        };
        Some(placement)
    }
}

/// Edges of the domain a node touches, used to find directions whose
/// streamed value came from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Edges {
    pub left: bool,
    pub right: bool,
    pub bottom: bool,
    pub top: bool,
}

impl Edges {
    pub(super) fn of(x: usize, y: usize, nx: usize, ny: usize) -> Self {
        Self {
            left: x == 0,
            right: x + 1 == nx,
            bottom: y == 0,
            top: y + 1 == ny,
        }
    }

    /// Returns `true` if direction `d` streams into the node from outside
    /// the domain.
    pub(super) fn is_unknown(self, d: usize) -> bool {
        let [ox, oy] = OFFSETS[d];
        (ox > 0 && self.left) || (ox < 0 && self.right) || (oy > 0 && self.bottom) || (oy < 0 && self.top)
    }
}
