//! DXF2SHP 文件格式处理
//!
//! 支持：
//! - `.dxf` 读取（定位多段线实体、提取顶点环）
//! - ESRI Shapefile 矢量包写入（.shp/.shx/.dbf/.prj）
//! - 完整转换管线：加载 → 定位 → 提取 → 写入

pub mod dxf_io;
pub mod error;
pub mod pipeline;
pub mod shp;

pub use error::FileError;
pub use pipeline::{convert, ConversionSummary};
pub use shp::ShapefileBundle;
