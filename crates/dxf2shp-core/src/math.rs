//! 基础数学类型
//!
//! 基于 nalgebra 的 2D 点/向量别名与包围盒。

use serde::{Deserialize, Serialize};

/// 2D 点
pub type Point2 = nalgebra::Point2<f64>;

/// 2D 向量
pub type Vector2 = nalgebra::Vector2<f64>;

/// 默认几何容差
pub const EPSILON: f64 = 1e-9;

/// 2D 轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// 由点集构造包围盒
    ///
    /// 空集合返回 `None`。
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(first, first);
        for point in iter {
            bbox.expand(point);
        }
        Some(bbox)
    }

    /// 扩展包围盒以包含指定点
    pub fn expand(&mut self, point: Point2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// 按固定小数位数进行十进制舍入
///
/// 注意：f64 只能可靠表示约 15~17 位有效数字，当数值本身较大时
/// （例如 UTM 坐标动辄百万米量级），超出该范围的位数舍入是空操作。
pub fn round_to_decimals(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
