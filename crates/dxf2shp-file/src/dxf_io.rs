//! DXF 文件读取
//!
//! 覆盖管线前三个阶段：
//! - 加载图形容器（模型空间实体按插入顺序迭代）
//! - 按句柄定位多段线类实体
//! - 按实体类型多态地提取 (x, y) 顶点环

use crate::error::FileError;
use dxf::entities::{Entity, EntityType};
use dxf::Drawing;
use dxf2shp_core::ring::VertexRing;
use std::path::Path;
use tracing::info;

/// 加载 DXF 图形
///
/// 路径不可读与内容非法分别报告为不同错误。
pub fn load(path: &Path) -> Result<Drawing, FileError> {
    // 先区分"文件不存在/不可读"与"内容不是合法 DXF"
    if !path.is_file() || std::fs::File::open(path).is_err() {
        return Err(FileError::InputNotFound(path.to_path_buf()));
    }

    let drawing = Drawing::load_file(path).map_err(|e| FileError::Dxf(e.to_string()))?;
    info!("Loaded DXF drawing from {}", path.display());
    Ok(drawing)
}

/// 实体是否为多段线类（可构成多边形边界）
fn is_polygon_capable(entity: &Entity) -> bool {
    matches!(
        entity.specific,
        EntityType::LwPolyline(_) | EntityType::Polyline(_)
    )
}

/// 句柄匹配：规范十六进制形式与请求串做大小写不敏感比较
///
/// 句柄始终按不透明字符串处理，非法输入永不匹配而不是报错。
fn handle_matches(entity: &Entity, requested: &str) -> bool {
    let handle = format!("{:X}", entity.common.handle.0);
    handle.eq_ignore_ascii_case(requested.trim())
}

/// 按句柄定位多边形实体
///
/// 按模型空间迭代顺序返回第一个类型与句柄同时匹配的实体；
/// 其他类型的实体即使句柄相同也不会命中。
pub fn find_polygon_entity<'a>(
    drawing: &'a Drawing,
    handle: &str,
) -> Result<&'a Entity, FileError> {
    drawing
        .entities()
        .find(|entity| is_polygon_capable(entity) && handle_matches(entity, handle))
        .ok_or_else(|| FileError::EntityNotFound(handle.trim().to_string()))
}

/// 实体类型名（用于状态输出）
pub fn entity_kind(entity: &Entity) -> &'static str {
    match &entity.specific {
        EntityType::LwPolyline(_) => "LWPOLYLINE",
        EntityType::Polyline(_) => "POLYLINE",
        _ => "UNSUPPORTED",
    }
}

/// 提取顶点环
///
/// - LWPOLYLINE: 直接读取顶点 (x, y)，丢弃 bulge/线宽
/// - POLYLINE: 读取每个 VERTEX 子记录的 (x, y)，忽略 Z
/// - 其他类型按约定已被定位阶段过滤，返回空环而不是崩溃
pub fn extract_ring(entity: &Entity) -> VertexRing {
    match &entity.specific {
        EntityType::LwPolyline(lwpoly) => {
            VertexRing::from_pairs(lwpoly.vertices.iter().map(|v| (v.x, v.y)))
        }
        EntityType::Polyline(poly) => {
            VertexRing::from_pairs(poly.vertices().map(|v| (v.location.x, v.location.y)))
        }
        _ => VertexRing::new(Vec::new()),
    }
}
