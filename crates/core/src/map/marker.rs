use std::sync::Arc;

use crate::map::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub label: Arc<str>,
    pub coordinate: Coordinate,
}

impl Marker {
    pub fn new(label: impl AsRef<str>, coordinate: Coordinate) -> Self {
        Self {
            label: label.as_ref().into(),
            coordinate,
        }
    }
}
