//! DXF2SHP 核心模型
//!
//! 提供转换管线共享的数据类型：
//! - `VertexRing`: 从单个实体提取的有序顶点环
//! - `UtmCrs`: UTM 投影坐标系描述（区号 + 半球）
//! - `ConversionRequest`: 一次转换的完整不可变配置
//!
//! # 架构设计
//!
//! 管线严格单向：路径 → 图形 → 实体 → 顶点环 → 磁盘文件。
//! 本 crate 只定义数据与校验，不做任何文件 I/O。
//!
//! # 示例
//!
//! ```rust
//! use dxf2shp_core::prelude::*;
//!
//! let crs = UtmCrs::new(22, Hemisphere::South);
//! assert_eq!(crs.epsg_code(), 32722);
//! ```

pub mod crs;
pub mod math;
pub mod request;
pub mod ring;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::crs::{Hemisphere, UtmCrs};
    pub use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};
    pub use crate::request::{ConversionRequest, RequestParseError};
    pub use crate::ring::{VertexRing, COORDINATE_PRECISION};
}
