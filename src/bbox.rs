//! Labeled bounding boxes in normalized image coordinates.

/// Detected object box with both corner and center/size encodings.
///
/// All coordinates are normalized to the model input. A `BoundingBox` can only
/// be built with every corner inside `[0, 1]`; candidates that fall outside
/// are rejected rather than clamped.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    cx: f32,
    cy: f32,
    w: f32,
    h: f32,
    confidence: f32,
    class_index: usize,
    class_name: String,
}

fn in_unit(v: f32) -> bool {
    (0.0..=1.0).contains(&v)
}

impl BoundingBox {
    /// Builds a box from its center and size.
    ///
    /// Corners are `center -/+ size / 2`. Returns `None` if any corner is
    /// outside the unit square or not finite.
    pub fn from_center(
        cx: f32,
        cy: f32,
        w: f32,
        h: f32,
        confidence: f32,
        class_index: usize,
        class_name: impl Into<String>,
    ) -> Option<Self> {
        let x1 = cx - w / 2.0;
        let y1 = cy - h / 2.0;
        let x2 = cx + w / 2.0;
        let y2 = cy + h / 2.0;
        if !(in_unit(x1) && in_unit(y1) && in_unit(x2) && in_unit(y2)) {
            return None;
        }
        Some(Self {
            x1,
            y1,
            x2,
            y2,
            cx,
            cy,
            w,
            h,
            confidence,
            class_index,
            class_name: class_name.into(),
        })
    }

    /// Builds a box from its top-left and bottom-right corners.
    ///
    /// Center and size are derived from the corners. Returns `None` if the
    /// corners are inverted or leave the unit square.
    pub fn from_corners(
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        confidence: f32,
        class_index: usize,
        class_name: impl Into<String>,
    ) -> Option<Self> {
        if !(in_unit(x1) && in_unit(y1) && in_unit(x2) && in_unit(y2)) || x2 < x1 || y2 < y1 {
            return None;
        }
        let w = x2 - x1;
        let h = y2 - y1;
        Some(Self {
            x1,
            y1,
            x2,
            y2,
            cx: x1 + w / 2.0,
            cy: y1 + h / 2.0,
            w,
            h,
            confidence,
            class_index,
            class_name: class_name.into(),
        })
    }

    /// Left edge.
    pub fn x1(&self) -> f32 {
        self.x1
    }

    /// Top edge.
    pub fn y1(&self) -> f32 {
        self.y1
    }

    /// Right edge.
    pub fn x2(&self) -> f32 {
        self.x2
    }

    /// Bottom edge.
    pub fn y2(&self) -> f32 {
        self.y2
    }

    /// Center x as decoded.
    pub fn cx(&self) -> f32 {
        self.cx
    }

    /// Center y as decoded.
    pub fn cy(&self) -> f32 {
        self.cy
    }

    /// Width as decoded.
    pub fn w(&self) -> f32 {
        self.w
    }

    /// Height as decoded.
    pub fn h(&self) -> f32 {
        self.h
    }

    /// Area computed from the decoded size, not from the corners.
    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Winning class score.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Index into the label table.
    pub fn class_index(&self) -> usize {
        self.class_index
    }

    /// Label resolved when the box was decoded.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Corners as `[x1, y1, x2, y2]`.
    pub fn corners(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}
