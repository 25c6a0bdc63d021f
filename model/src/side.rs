use Side::{Down, Left, Right, Up};

/// Direction of a swipe. Row `y = 0` is the top edge of the field.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    Down,
    Left,
    Up,
    Right,
}

impl Side {
    pub fn all() -> [Side; 4] {
        [Up, Down, Left, Right]
    }

    /// Unit step `(dx, dy)` towards this side.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// Order in which cells are visited during a pass towards this side.
    ///
    /// The scan starts on the line next to the destination edge and walks away
    /// from it, so a tile is always processed after every tile in front of it.
    /// The destination edge itself is skipped: tiles there can't move.
    pub fn scan_order(self, width: usize, height: usize) -> ScanOrder {
        let (w, h) = (width as isize, height as isize);
        let (start_x, step_x, start_y, step_y) = match self {
            Up => (0, 1, 1, 1),
            Down => (0, 1, h - 2, -1),
            Left => (1, 1, 0, 1),
            Right => (w - 2, -1, 0, 1),
        };
        ScanOrder {
            width: w,
            height: h,
            start_x,
            step_x,
            start_y,
            step_y,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ScanOrder {
    width: isize,
    height: isize,
    start_x: isize,
    step_x: isize,
    start_y: isize,
    step_y: isize,
}

impl ScanOrder {
    /// Visited coordinates, column-major: `x` in the outer loop, `y` in the inner one.
    pub fn cells(&self) -> Vec<(usize, usize)> {
        let in_range = |v: isize, limit: isize| v >= 0 && v < limit;
        let mut result = Vec::new();
        let mut x = self.start_x;
        while in_range(x, self.width) {
            let mut y = self.start_y;
            while in_range(y, self.height) {
                result.push((x as usize, y as usize));
                y += self.step_y;
            }
            x += self.step_x;
        }
        result
    }
}
