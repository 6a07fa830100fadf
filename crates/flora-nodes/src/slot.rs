//! Output slots with dirty tracking.

use flora_instancing::InstanceArrays;

/// A computed output and whether its inputs changed since it was written.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputSlot {
    value: InstanceArrays,
    dirty: bool,
}

impl Default for OutputSlot {
    /// Empty and dirty, so the first read computes.
    fn default() -> Self {
        Self {
            value: InstanceArrays::default(),
            dirty: true,
        }
    }
}

impl OutputSlot {
    pub fn value(&self) -> &InstanceArrays {
        &self.value
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Keep the current value and stop recomputing until the next edit.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Replace the value and mark the slot clean.
    pub fn write(&mut self, value: InstanceArrays) {
        self.value = value;
        self.dirty = false;
    }
}
