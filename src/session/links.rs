use std::collections::HashMap;

/// Remembers which destination each point source was last generated into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurveLinks {
    destinations: HashMap<String, String>,
}

impl CurveLinks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `source_id` generates into `destination_id`, replacing
    /// any earlier pairing for the source.
    pub fn link(&mut self, source_id: &str, destination_id: &str) {
        self.destinations
            .insert(source_id.to_owned(), destination_id.to_owned());
    }

    /// Returns the destination last paired with `source_id`.
    #[must_use]
    pub fn destination_for(&self, source_id: &str) -> Option<&str> {
        self.destinations.get(source_id).map(String::as_str)
    }

    /// Forgets the pairing for `source_id`, returning its destination.
    pub fn unlink(&mut self, source_id: &str) -> Option<String> {
        self.destinations.remove(source_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_and_lookup() {
        let mut links = CurveLinks::new();
        assert!(links.is_empty());
        links.link("F", "Model_1");
        assert_eq!(links.destination_for("F"), Some("Model_1"));
        assert_eq!(links.destination_for("G"), None);
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn relink_replaces_destination() {
        let mut links = CurveLinks::new();
        links.link("F", "Model_1");
        links.link("F", "Model_2");
        assert_eq!(links.destination_for("F"), Some("Model_2"));
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn unlink_removes_pairing() {
        let mut links = CurveLinks::new();
        links.link("F", "Model_1");
        assert_eq!(links.unlink("F").as_deref(), Some("Model_1"));
        assert!(links.unlink("F").is_none());
        assert!(links.is_empty());
    }
}
