//! 转换管线
//!
//! 严格单向执行：加载 → 定位 → 提取 → 写入。
//! 任一阶段失败立即中止，不产生可被误用的半成品输出。

use crate::dxf_io;
use crate::error::FileError;
use crate::shp::{self, ShapefileBundle};
use dxf2shp_core::request::ConversionRequest;
use tracing::info;

/// 一次成功转换的结果摘要
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    /// 命中实体的 DXF 类型名
    pub entity_kind: &'static str,
    /// 提取到的原始顶点数（闭合前）
    pub point_count: usize,
    /// 坐标系代码
    pub epsg_code: u32,
    /// 产生的四个输出文件
    pub bundle: ShapefileBundle,
}

/// 执行完整转换
pub fn convert(request: &ConversionRequest) -> Result<ConversionSummary, FileError> {
    let drawing = dxf_io::load(request.dxf_path())?;

    let entity = dxf_io::find_polygon_entity(&drawing, &request.entity_handle)?;
    let entity_kind = dxf_io::entity_kind(entity);
    info!("Found entity {} ({})", request.entity_handle, entity_kind);

    let ring = dxf_io::extract_ring(entity);
    if ring.is_empty() {
        return Err(FileError::EmptyGeometry(request.entity_handle.clone()));
    }
    info!("Extracted {} points", ring.len());

    let point_count = ring.len();
    let bundle = shp::write_bundle(&ring, &request.crs, &request.output_base())?;

    Ok(ConversionSummary {
        entity_kind,
        point_count,
        epsg_code: request.crs.epsg_code(),
        bundle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dxf::entities::{Entity, EntityType, LwPolyline};
    use dxf::enums::AcadVersion;
    use dxf::{Drawing, LwPolylineVertex};
    use std::path::PathBuf;

    fn drawing_with_lwpolyline(points: &[(f64, f64)]) -> (Drawing, String) {
        let mut drawing = Drawing::new();
        // R12 无法表示 LWPOLYLINE，存盘后再读回会丢失该实体；
        // 提升到 R2000 让测试夹具能完整往返序列化。
        drawing.header.version = AcadVersion::R2000;
        let mut lwpoly = LwPolyline::default();
        for &(x, y) in points {
            lwpoly.vertices.push(LwPolylineVertex {
                x,
                y,
                ..Default::default()
            });
        }
        let added = drawing.add_entity(Entity::new(EntityType::LwPolyline(lwpoly)));
        let handle = format!("{:X}", added.common.handle.0);
        (drawing, handle)
    }

    fn save_drawing(drawing: &Drawing, name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        drawing.save_file(&path).expect("Failed to save test DXF");
        path
    }

    fn request_for(dxf_path: &PathBuf, handle: &str) -> ConversionRequest {
        ConversionRequest::from_raw_input(dxf_path.to_str().unwrap(), handle, "23", "S").unwrap()
    }

    #[test]
    fn test_convert_end_to_end() {
        let (drawing, handle) = drawing_with_lwpolyline(&[
            (500000.0, 7500000.0),
            (500100.0, 7500000.0),
            (500100.0, 7500100.0),
        ]);
        let dxf_path = save_drawing(&drawing, "test_pipeline_e2e.dxf");
        let request = request_for(&dxf_path, &handle);

        let summary = convert(&request).expect("Conversion failed");

        assert_eq!(summary.entity_kind, "LWPOLYLINE");
        assert_eq!(summary.point_count, 3);
        assert_eq!(summary.epsg_code, 32723);
        for path in summary.bundle.paths() {
            assert!(path.exists());
            std::fs::remove_file(path).ok();
        }
        std::fs::remove_file(&dxf_path).ok();
    }

    #[test]
    fn test_convert_missing_entity() {
        let (drawing, _) = drawing_with_lwpolyline(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let dxf_path = save_drawing(&drawing, "test_pipeline_missing.dxf");
        let request = request_for(&dxf_path, "DEAD");

        let result = convert(&request);
        assert!(matches!(result, Err(FileError::EntityNotFound(_))));

        // 未产生任何输出文件
        let bundle_base = request.output_base();
        assert!(!bundle_base.with_extension("shp").exists());
        std::fs::remove_file(&dxf_path).ok();
    }

    #[test]
    fn test_convert_too_few_points() {
        let (drawing, handle) = drawing_with_lwpolyline(&[(0.0, 0.0), (1.0, 1.0)]);
        let dxf_path = save_drawing(&drawing, "test_pipeline_two_points.dxf");
        let request = request_for(&dxf_path, &handle);

        let result = convert(&request);
        assert!(matches!(result, Err(FileError::Validation(_))));
        std::fs::remove_file(&dxf_path).ok();
    }

    #[test]
    fn test_convert_missing_input_file() {
        let request = ConversionRequest::from_raw_input(
            "/nonexistent/input.dxf",
            "1A",
            "22",
            "N",
        )
        .unwrap();

        let result = convert(&request);
        assert!(matches!(result, Err(FileError::InputNotFound(_))));
    }
}
