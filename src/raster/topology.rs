//! Decodes a buffer's primitive type into a stream of triangle ordinals.
//!
//! This is the single source of truth for winding and parity rules; the
//! renderer and any index-table builder must consume this stream rather than
//! re-deriving the walk per primitive type.

use super::vertex::PrimitiveType;

/// Lazily yields `[v0, v1, v2]` vertex ordinals for every triangle the
/// buffer describes. Trailing vertices that do not complete a primitive are
/// ignored.
pub fn triangles(primitive: PrimitiveType, vertex_count: usize) -> TriangleIter {
    TriangleIter {
        primitive,
        count: vertex_count,
        cursor: if primitive == PrimitiveType::TriangleFan {
            1
        } else {
            0
        },
        emitted: 0,
        second_half: false,
    }
}

pub struct TriangleIter {
    primitive: PrimitiveType,
    count: usize,
    cursor: usize,
    emitted: usize,
    second_half: bool,
}

impl Iterator for TriangleIter {
    type Item = [usize; 3];

    fn next(&mut self) -> Option<[usize; 3]> {
        match self.primitive {
            PrimitiveType::Triangles => {
                if self.cursor + 3 > self.count {
                    return None;
                }
                let i = self.cursor;
                self.cursor += 3;
                Some([i, i + 1, i + 2])
            }

            PrimitiveType::TriangleStrip => {
                if self.cursor + 3 > self.count {
                    return None;
                }
                let i = self.cursor;
                self.cursor += 1;
                let parity = self.emitted % 2;
                self.emitted += 1;
                // odd triangles swap the first two ordinals to keep a
                // consistent winding along the strip
                if parity == 0 {
                    Some([i, i + 1, i + 2])
                } else {
                    Some([i + 1, i, i + 2])
                }
            }

            PrimitiveType::TriangleFan => {
                if self.cursor + 2 > self.count {
                    return None;
                }
                let j = self.cursor;
                self.cursor += 1;
                Some([0, j, j + 1])
            }

            PrimitiveType::Quads => self.quad_split(4),

            PrimitiveType::QuadStrip => self.quad_split(2),
        }
    }
}

impl TriangleIter {
    /// Quads and quad strips share the diagonal split `(v1,v2,v3)` /
    /// `(v3,v2,v4)`; only the window advance differs.
    fn quad_split(&mut self, step: usize) -> Option<[usize; 3]> {
        if self.cursor + 4 > self.count {
            return None;
        }
        let i = self.cursor;
        if !self.second_half {
            self.second_half = true;
            Some([i, i + 1, i + 2])
        } else {
            self.second_half = false;
            self.cursor += step;
            Some([i + 2, i + 1, i + 3])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(primitive: PrimitiveType, count: usize) -> Vec<[usize; 3]> {
        triangles(primitive, count).collect()
    }

    #[test]
    fn test_triangle_list_ignores_trailing() {
        assert_eq!(
            collect(PrimitiveType::Triangles, 7),
            vec![[0, 1, 2], [3, 4, 5]]
        );
    }

    #[test]
    fn test_strip_swaps_odd_triangles() {
        // 5 vertices, 3 triangles: the middle (odd) one swaps its leading pair
        assert_eq!(
            collect(PrimitiveType::TriangleStrip, 5),
            vec![[0, 1, 2], [2, 1, 3], [2, 3, 4]]
        );
    }

    #[test]
    fn test_fan_is_anchored_at_zero() {
        assert_eq!(
            collect(PrimitiveType::TriangleFan, 5),
            vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]
        );
    }

    #[test]
    fn test_quads_split_on_shared_diagonal() {
        assert_eq!(
            collect(PrimitiveType::Quads, 8),
            vec![[0, 1, 2], [2, 1, 3], [4, 5, 6], [6, 5, 7]]
        );
    }

    #[test]
    fn test_quad_strip_advances_by_two() {
        assert_eq!(
            collect(PrimitiveType::QuadStrip, 6),
            vec![[0, 1, 2], [2, 1, 3], [2, 3, 4], [4, 3, 5]]
        );
    }

    #[test]
    fn test_incomplete_buffers_yield_nothing() {
        for primitive in [
            PrimitiveType::Triangles,
            PrimitiveType::TriangleStrip,
            PrimitiveType::TriangleFan,
            PrimitiveType::Quads,
            PrimitiveType::QuadStrip,
        ] {
            assert_eq!(collect(primitive, 0), Vec::<[usize; 3]>::new());
            assert_eq!(collect(primitive, 2), Vec::<[usize; 3]>::new());
        }
        // a quad needs all four corners
        assert_eq!(collect(PrimitiveType::Quads, 3), Vec::<[usize; 3]>::new());
        assert_eq!(collect(PrimitiveType::QuadStrip, 3), Vec::<[usize; 3]>::new());
    }
}
