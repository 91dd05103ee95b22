/// Tracks the dataset record currently being validated.
///
/// This is primarily used to add record-context to field mapping errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordTracker {
    /// Current 0-based record index in the dataset.
    pub record_index: usize,
}

impl RecordTracker {
    /// Creates a new tracker positioned on the first record.
    pub fn new() -> Self {
        RecordTracker { record_index: 0 }
    }

    /// Advances the tracker to the next record.
    pub fn next_record(&mut self) {
        self.record_index += 1;
    }

    /// Prefixes `message` with the current record position.
    pub fn describe(&self, message: &str) -> String {
        format!("Record {}: {}", self.record_index, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_advances_and_describes() {
        let mut t = RecordTracker::new();
        assert_eq!(t.describe("missing field"), "Record 0: missing field");
        t.next_record();
        t.next_record();
        assert_eq!(t.record_index, 2);
        assert_eq!(t.describe("x"), "Record 2: x");
    }
}
