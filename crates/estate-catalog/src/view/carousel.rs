use crate::catalog::Property;

/// Per-card image cursor. Navigation wraps in both directions; indices are always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageCarousel {
    index: usize,
    len: usize,
}

impl ImageCarousel {
    /// `image_count` of zero is treated as a single slot so the index stays at 0.
    pub fn new(image_count: usize) -> Self {
        Self {
            index: 0,
            len: image_count.max(1),
        }
    }

    pub fn for_property(property: &Property) -> Self {
        Self::new(property.images.len())
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn image_count(&self) -> usize {
        self.len
    }

    /// Prev/next arrows and dot indicators are only shown for multi-image listings.
    pub fn has_navigation(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }

    /// Jumps to `index`, wrapping anything past the end.
    pub fn jump_to(&mut self, index: usize) -> usize {
        self.index = index % self.len;
        self.index
    }

    pub fn current_image<'a>(&self, property: &'a Property) -> Option<&'a str> {
        property
            .images
            .get(self.index % property.images.len().max(1))
            .map(String::as_str)
    }
}
