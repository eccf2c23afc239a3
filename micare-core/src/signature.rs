//! Signature pad: freehand strokes as point lists.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Strokes drawn so far. A stroke starts on press and grows while the
/// pointer moves with the button held.
#[derive(Debug, Clone, Default)]
pub struct SignaturePad {
    strokes: Vec<Vec<Point>>,
    drawing: bool,
}

impl SignaturePad {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.drawing = true;
        self.strokes.push(vec![Point { x, y }]);
    }

    /// Extend the current stroke. Ignored unless a stroke is in progress.
    pub fn extend(&mut self, x: f64, y: f64) {
        if !self.drawing {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.push(Point { x, y });
        }
    }

    pub fn end(&mut self) {
        self.drawing = false;
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.drawing = false;
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn is_signed(&self) -> bool {
        !self.strokes.is_empty()
    }

    /// Line segments between consecutive points of each stroke.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.strokes
            .iter()
            .flat_map(|s| s.windows(2).map(|w| (w[0], w[1])))
    }

    pub fn strokes(&self) -> &[Vec<Point>] {
        &self.strokes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_without_press_are_ignored() {
        let mut pad = SignaturePad::default();
        pad.extend(1.0, 1.0);
        assert!(!pad.is_signed());
    }

    #[test]
    fn stroke_segments() {
        let mut pad = SignaturePad::default();
        pad.begin(0.0, 0.0);
        pad.extend(1.0, 1.0);
        pad.extend(2.0, 1.0);
        pad.end();
        pad.extend(9.0, 9.0);

        assert!(pad.is_signed());
        assert!(!pad.is_drawing());
        assert_eq!(pad.strokes()[0].len(), 3);
        assert_eq!(pad.segments().count(), 2);
    }

    #[test]
    fn clear_wipes_strokes() {
        let mut pad = SignaturePad::default();
        pad.begin(3.0, 4.0);
        pad.clear();
        assert!(!pad.is_signed());
        assert_eq!(pad.segments().count(), 0);
    }
}
