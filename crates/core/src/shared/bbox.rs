/// Axis-aligned pixel rectangle in frame coordinates.
///
/// `left`/`top` may be negative: decoded boxes are allowed to hang off
/// the frame edge and are only clipped when pixels are actually read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Builds a box from corner coordinates `(x1, y1)`–`(x2, y2)`.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn area(&self) -> i64 {
        if self.width <= 0 || self.height <= 0 {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    pub fn intersection(&self, other: &BoundingBox) -> BoundingBox {
        let x1 = self.left.max(other.left);
        let y1 = self.top.max(other.top);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        if x2 <= x1 || y2 <= y1 {
            BoundingBox::default()
        } else {
            BoundingBox::from_corners(x1, y1, x2, y2)
        }
    }

    /// Intersection over union. Zero when the union is empty.
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let inter = self.intersection(other).area();
        if inter == 0 {
            return 0.0;
        }
        let union = self.area() + other.area() - inter;
        if union <= 0 {
            return 0.0;
        }
        inter as f64 / union as f64
    }

    /// The part of the box that lies inside a `frame_width` × `frame_height`
    /// frame, or `None` if nothing does.
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> Option<BoundingBox> {
        let frame = BoundingBox::new(0, 0, frame_width as i32, frame_height as i32);
        let clipped = self.intersection(&frame);
        (clipped.area() > 0).then_some(clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_iou_identical_boxes() {
        let a = BoundingBox::new(10, 10, 100, 100);
        assert_relative_eq!(a.iou(&a), 1.0);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = BoundingBox::new(0, 0, 50, 50);
        let b = BoundingBox::new(100, 100, 50, 50);
        assert_relative_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        // intersection 50*100 = 5000, union 15000
        let a = BoundingBox::new(0, 0, 100, 100);
        let b = BoundingBox::new(50, 0, 100, 100);
        assert_relative_eq!(a.iou(&b), 5000.0 / 15000.0);
    }

    #[test]
    fn test_iou_contained() {
        let a = BoundingBox::new(0, 0, 100, 100);
        let b = BoundingBox::new(25, 25, 50, 50);
        assert_relative_eq!(a.iou(&b), 2500.0 / 10000.0);
    }

    #[test]
    fn test_iou_touching_edges() {
        let a = BoundingBox::new(0, 0, 50, 50);
        let b = BoundingBox::new(50, 0, 50, 50);
        assert_relative_eq!(a.iou(&b), 0.0);
    }

    #[rstest]
    #[case::zero_width(BoundingBox::new(0, 0, 0, 100), BoundingBox::new(0, 0, 50, 50))]
    #[case::zero_height(BoundingBox::new(0, 0, 100, 0), BoundingBox::new(0, 0, 50, 50))]
    #[case::negative_width(BoundingBox::new(10, 0, -5, 10), BoundingBox::new(0, 0, 50, 50))]
    fn test_iou_degenerate(#[case] a: BoundingBox, #[case] b: BoundingBox) {
        assert_relative_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_from_corners() {
        let b = BoundingBox::from_corners(10, 20, 40, 60);
        assert_eq!(b, BoundingBox::new(10, 20, 30, 40));
        assert_eq!((b.right(), b.bottom()), (40, 60));
    }

    #[test]
    fn test_clamp_inside_is_unchanged() {
        let b = BoundingBox::new(10, 10, 20, 20);
        assert_eq!(b.clamp_to(100, 100), Some(b));
    }

    #[test]
    fn test_clamp_cuts_negative_origin() {
        let b = BoundingBox::new(-10, -5, 30, 20);
        assert_eq!(b.clamp_to(100, 100), Some(BoundingBox::new(0, 0, 20, 15)));
    }

    #[test]
    fn test_clamp_cuts_far_edge() {
        let b = BoundingBox::new(90, 95, 30, 30);
        assert_eq!(b.clamp_to(100, 100), Some(BoundingBox::new(90, 95, 10, 5)));
    }

    #[test]
    fn test_clamp_outside_is_none() {
        assert!(BoundingBox::new(200, 0, 10, 10).clamp_to(100, 100).is_none());
    }
}
