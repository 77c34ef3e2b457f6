use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{CanvasAnimError, CanvasAnimResult};
use crate::pool::slot_pool::SlotIndex;

/// Separator between descriptor fields. Fields are decimal integers, so it never occurs inside one.
pub const DESCRIPTOR_DELIMITER: &str = ",,,";

/// Links one task's slots across the nine attribute pools.
///
/// The text form is the nine indices joined with [`DESCRIPTOR_DELIMITER`], in field order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskDescriptor {
    /// Slot in the element-handle pool selected by `element_kind`.
    pub target: SlotIndex,
    /// Slot in the duration pool.
    pub duration: SlotIndex,
    /// Slot in the start-time pool.
    pub start_time: SlotIndex,
    /// Slot in the pixel-offset pool.
    pub pixel_offset: SlotIndex,
    /// Slot in the delay pool.
    pub delay: SlotIndex,
    /// Slot in the start-position pool.
    pub start_position: SlotIndex,
    /// Slot in the transition pool.
    pub transition: SlotIndex,
    /// Slot in the animation-mode pool.
    pub mode: SlotIndex,
    /// Slot in the element-kind pool.
    pub element_kind: SlotIndex,
}

impl TaskDescriptor {
    /// Number of fields in the record.
    pub const FIELD_COUNT: usize = 9;

    /// Field values in record order.
    pub fn to_fields(self) -> [u32; Self::FIELD_COUNT] {
        [
            self.target.0,
            self.duration.0,
            self.start_time.0,
            self.pixel_offset.0,
            self.delay.0,
            self.start_position.0,
            self.transition.0,
            self.mode.0,
            self.element_kind.0,
        ]
    }

    /// Inverse of [`TaskDescriptor::to_fields`].
    pub fn from_fields(f: [u32; Self::FIELD_COUNT]) -> Self {
        Self {
            target: SlotIndex(f[0]),
            duration: SlotIndex(f[1]),
            start_time: SlotIndex(f[2]),
            pixel_offset: SlotIndex(f[3]),
            delay: SlotIndex(f[4]),
            start_position: SlotIndex(f[5]),
            transition: SlotIndex(f[6]),
            mode: SlotIndex(f[7]),
            element_kind: SlotIndex(f[8]),
        }
    }

    /// Text record for this descriptor.
    pub fn encode(self) -> String {
        self.to_string()
    }

    /// Parse a text record produced by [`TaskDescriptor::encode`].
    pub fn decode(record: &str) -> CanvasAnimResult<Self> {
        let mut fields = [0u32; Self::FIELD_COUNT];
        let mut n = 0usize;
        for part in record.split(DESCRIPTOR_DELIMITER) {
            if n == Self::FIELD_COUNT {
                return Err(CanvasAnimError::descriptor(format!(
                    "expected {} fields, found more in '{record}'",
                    Self::FIELD_COUNT
                )));
            }
            fields[n] = part.parse().map_err(|_| {
                CanvasAnimError::descriptor(format!("field {n} is not a slot index: '{part}'"))
            })?;
            n += 1;
        }
        if n != Self::FIELD_COUNT {
            return Err(CanvasAnimError::descriptor(format!(
                "expected {} fields, found {n} in '{record}'",
                Self::FIELD_COUNT
            )));
        }
        Ok(Self::from_fields(fields))
    }
}

impl fmt::Display for TaskDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.to_fields().iter().enumerate() {
            if i > 0 {
                f.write_str(DESCRIPTOR_DELIMITER)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

impl FromStr for TaskDescriptor {
    type Err = CanvasAnimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pool/descriptor.rs"]
mod tests;
