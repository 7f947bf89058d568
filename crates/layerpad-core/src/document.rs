//! The ordered layer list.

use crate::layers::Layer;
use serde::Serialize;

/// All committed layers, back to front.
///
/// Position in the list is the paint order; there is no separate z-index.
/// Out-of-range indices are ignored by every mutating operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    layers: Vec<Layer>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer on top.
    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Remove the layer at `index`, keeping the relative order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<Layer> {
        if index < self.layers.len() {
            Some(self.layers.remove(index))
        } else {
            None
        }
    }

    /// Replace the layer at `index`. Returns the previous layer.
    pub fn replace(&mut self, index: usize, layer: Layer) -> Option<Layer> {
        let slot = self.layers.get_mut(index)?;
        Some(std::mem::replace(slot, layer))
    }

    /// Get a layer by index.
    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Layers in paint order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{BoxShape, TextLayer};
    use kurbo::Point;

    fn rect(x: f64) -> Layer {
        Layer::Rectangle(BoxShape::new(Point::new(x, 0.0), 10.0, 10.0))
    }

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_push_keeps_paint_order() {
        let mut doc = Document::new();
        doc.push(rect(0.0));
        doc.push(rect(1.0));
        assert_eq!(doc.layers(), &[rect(0.0), rect(1.0)]);
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let mut doc = Document::new();
        for x in 0..4 {
            doc.push(rect(f64::from(x)));
        }
        let removed = doc.remove(1);
        assert_eq!(removed, Some(rect(1.0)));
        assert_eq!(doc.layers(), &[rect(0.0), rect(2.0), rect(3.0)]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut doc = Document::new();
        doc.push(rect(0.0));
        assert_eq!(doc.remove(1), None);
        assert_eq!(doc.remove(usize::MAX), None);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_replace() {
        let mut doc = Document::new();
        doc.push(rect(0.0));
        let text = Layer::Text(TextLayer::new(Point::ZERO, "t"));
        assert_eq!(doc.replace(0, text.clone()), Some(rect(0.0)));
        assert_eq!(doc.get(0), Some(&text));
        assert_eq!(doc.replace(3, rect(5.0)), None);
        assert_eq!(doc.len(), 1);
    }
}
