use geode_mesh::MAX_SUBDIVISION_DEPTH;

/// Subdivision level bounded to `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubdivisionDepth {
    value: u32,
    max: u32,
}

impl SubdivisionDepth {
    /// `max` is itself capped at [`MAX_SUBDIVISION_DEPTH`]; `initial` is
    /// clamped into range.
    pub fn new(initial: u32, max: u32) -> Self {
        let max = max.min(MAX_SUBDIVISION_DEPTH);
        Self {
            value: initial.min(max),
            max,
        }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Step up one level. Returns `false` (and changes nothing) at the cap.
    pub fn increase(&mut self) -> bool {
        if self.value >= self.max {
            return false;
        }
        self.value += 1;
        true
    }

    /// Step down one level. Returns `false` (and changes nothing) at zero.
    pub fn decrease(&mut self) -> bool {
        if self.value == 0 {
            return false;
        }
        self.value -= 1;
        true
    }
}

impl Default for SubdivisionDepth {
    fn default() -> Self {
        Self::new(5, MAX_SUBDIVISION_DEPTH)
    }
}
