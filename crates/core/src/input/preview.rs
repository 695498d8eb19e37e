use tracing::debug;

use super::PreviewRef;

/// Owns the preview currently shown by the search view.
///
/// Local handles are released when superseded and when the slot is dropped.
#[derive(Debug, Default)]
pub struct PreviewSlot {
    current: Option<PreviewRef>,
}

impl PreviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&PreviewRef> {
        self.current.as_ref()
    }

    /// Show a new preview. Returns the local handle that was released, if any.
    pub fn replace(&mut self, preview: Option<PreviewRef>) -> Option<PreviewRef> {
        let previous = std::mem::replace(&mut self.current, preview);
        match previous {
            Some(old) if old.is_local() && self.current.as_ref() != Some(&old) => {
                debug!("Released preview handle {}", old);
                Some(old)
            }
            _ => None,
        }
    }

    /// Release whatever is shown.
    pub fn clear(&mut self) -> Option<PreviewRef> {
        self.replace(None)
    }
}

impl Drop for PreviewSlot {
    fn drop(&mut self) {
        self.clear();
    }
}
