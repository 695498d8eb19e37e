/// Tracks nested drag enter/leave events over a drop zone.
///
/// Entering a child element fires a new enter before the parent's leave, so
/// the zone stays highlighted until every enter has been matched.
#[derive(Debug, Default)]
pub struct DragTracker {
    depth: u32,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered the zone or one of its descendants.
    pub fn enter(&mut self) -> bool {
        self.depth += 1;
        self.is_active()
    }

    /// Pointer left the zone or one of its descendants.
    pub fn leave(&mut self) -> bool {
        self.depth = self.depth.saturating_sub(1);
        self.is_active()
    }

    /// Payload dropped; highlighting ends regardless of depth.
    pub fn finish(&mut self) {
        self.depth = 0;
    }

    pub fn is_active(&self) -> bool {
        self.depth > 0
    }
}
