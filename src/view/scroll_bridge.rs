// Scroll bridge
// Keeps the day header aligned with the horizontally scrolled grid

/// Forwards the grid's horizontal offset to the header while attached.
///
/// Attachment is tied to the widget lifecycle: attached on mount, detached
/// on unmount. Offsets arriving while detached are dropped.
#[derive(Debug, Clone, Default)]
pub struct ScrollBridge {
    attached: bool,
    header_offset: f64,
}

impl ScrollBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Current header scroll position
    pub fn header_offset(&self) -> f64 {
        self.header_offset
    }

    /// Propagate a grid offset; returns the header position to apply
    pub fn on_grid_scroll(&mut self, offset: f64) -> Option<f64> {
        if !self.attached {
            return None;
        }
        self.header_offset = offset;
        Some(offset)
    }
}
