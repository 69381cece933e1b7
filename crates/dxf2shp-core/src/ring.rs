//! 顶点环
//!
//! 从单个 DXF 实体提取的有序 (x, y) 顶点序列。
//! 规范化后首尾顶点相等（显式闭合），坐标按固定小数位数舍入。

use crate::math::{round_to_decimals, BoundingBox2, Point2};
use serde::{Deserialize, Serialize};

/// 坐标固定小数位数
///
/// 超出 f64 有效精度的部分舍入为空操作，见 `math::round_to_decimals`。
pub const COORDINATE_PRECISION: u32 = 16;

/// 有序顶点环
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRing {
    points: Vec<Point2>,
}

impl VertexRing {
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// 由 (x, y) 坐标对构造
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self {
            points: pairs
                .into_iter()
                .map(|(x, y)| Point2::new(x, y))
                .collect(),
        }
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 首尾顶点是否严格相等
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// 规范化：坐标舍入到 `digits` 位小数，并在首尾不等时补上首点闭合
    ///
    /// 已闭合的环不再追加顶点。不做自相交与环方向检查。
    pub fn normalized(&self, digits: u32) -> Self {
        let mut points: Vec<Point2> = self
            .points
            .iter()
            .map(|p| {
                Point2::new(
                    round_to_decimals(p.x, digits),
                    round_to_decimals(p.y, digits),
                )
            })
            .collect();

        if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
            if first != last {
                points.push(first);
            }
        }

        Self { points }
    }

    /// 计算包围盒
    ///
    /// 空环返回 `None`。
    pub fn bounding_box(&self) -> Option<BoundingBox2> {
        BoundingBox2::from_points(self.points.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> VertexRing {
        VertexRing::from_pairs([
            (500000.0, 7500000.0),
            (500100.0, 7500000.0),
            (500100.0, 7500100.0),
        ])
    }

    #[test]
    fn test_normalized_closes_open_ring() {
        let ring = triangle().normalized(COORDINATE_PRECISION);

        assert_eq!(ring.len(), 4);
        assert!(ring.is_closed());
        assert_eq!(ring.points()[0], ring.points()[3]);
    }

    #[test]
    fn test_normalized_keeps_closed_ring() {
        let closed = VertexRing::from_pairs([
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 0.0),
        ]);
        let ring = closed.normalized(COORDINATE_PRECISION);

        // 已闭合的环不再追加顶点
        assert_eq!(ring.len(), 4);
        assert!(ring.is_closed());
    }

    #[test]
    fn test_normalized_rounds_coordinates() {
        let ring = VertexRing::from_pairs([(1.23456, 0.0), (2.0, 0.0), (2.0, 2.0)]);
        let rounded = ring.normalized(2);

        assert_eq!(rounded.points()[0], Point2::new(1.23, 0.0));
    }

    #[test]
    fn test_empty_ring() {
        let ring = VertexRing::new(Vec::new());

        assert!(ring.is_empty());
        assert!(!ring.is_closed());
        assert!(ring.bounding_box().is_none());
        assert!(ring.normalized(COORDINATE_PRECISION).is_empty());
    }

    #[test]
    fn test_bounding_box() {
        let bbox = triangle().bounding_box().unwrap();

        assert_eq!(bbox.min, Point2::new(500000.0, 7500000.0));
        assert_eq!(bbox.max, Point2::new(500100.0, 7500100.0));
    }

    #[test]
    fn test_serde_roundtrip() {
        let ring = triangle();
        let json = serde_json::to_string(&ring).unwrap();
        let back: VertexRing = serde_json::from_str(&json).unwrap();

        assert_eq!(ring, back);
    }
}
