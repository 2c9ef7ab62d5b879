//! Player skin table
//!
//! Images are loaded by the platform layer; the core only needs to know which
//! indices loaded and their natural size. A failed load is recorded as a gap,
//! never an error.

/// Default skin image paths, relative to the page
pub const DEFAULT_SKINS: [&str; 5] = [
    "images/re_1.png",
    "images/re_2.png",
    "images/re_3.png",
    "images/re_4.png",
    "images/re_5.png",
];

/// Natural pixel size of a loaded skin image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinInfo {
    pub width: f32,
    pub height: f32,
}

impl SkinInfo {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest scale that fits the image inside `box_w × box_h` keeping aspect
    pub fn fit_scale(&self, box_w: f32, box_h: f32) -> f32 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return 0.0;
        }
        (box_w / self.width).min(box_h / self.height)
    }

    /// Drawn size after fitting into the box
    pub fn fitted(&self, box_w: f32, box_h: f32) -> (f32, f32) {
        let scale = self.fit_scale(box_w, box_h);
        (self.width * scale, self.height * scale)
    }
}

/// Loaded skins by index; `None` marks an image that failed to load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkinSet {
    entries: Vec<Option<SkinInfo>>,
}

impl SkinSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Option<SkinInfo>>) -> Self {
        Self { entries }
    }

    /// Record the outcome of loading the image at `index`
    pub fn set(&mut self, index: usize, info: Option<SkinInfo>) {
        if index >= self.entries.len() {
            self.entries.resize(index + 1, None);
        }
        if info.is_none() {
            log::warn!("Skin {index} failed to load, falling back to a plain circle");
        }
        self.entries[index] = info;
    }

    pub fn get(&self, index: usize) -> Option<&SkinInfo> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First index that actually loaded
    pub fn first_available(&self) -> Option<usize> {
        self.entries.iter().position(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_keeps_aspect() {
        let wide = SkinInfo::new(200.0, 100.0);
        assert_eq!(wide.fitted(80.0, 80.0), (80.0, 40.0));

        let tall = SkinInfo::new(50.0, 100.0);
        assert_eq!(tall.fitted(80.0, 80.0), (40.0, 80.0));
    }

    #[test]
    fn test_degenerate_image_scales_to_zero() {
        assert_eq!(SkinInfo::new(0.0, 10.0).fit_scale(80.0, 80.0), 0.0);
    }

    #[test]
    fn test_set_out_of_order() {
        let mut skins = SkinSet::new();
        skins.set(2, Some(SkinInfo::new(10.0, 10.0)));
        skins.set(0, None);
        assert_eq!(skins.len(), 3);
        assert!(skins.get(0).is_none());
        assert!(skins.get(1).is_none());
        assert!(skins.get(2).is_some());
        assert_eq!(skins.first_available(), Some(2));
    }
}
