//! ESRI Shapefile 矢量包写入
//!
//! 一次写出共享基础名的四个文件：
//! - `.shp` 几何主文件（单个 Polygon 要素，外环无孔）
//! - `.shx` 空间索引（单条索引记录）
//! - `.dbf` 属性表（dBASE III，单记录单占位字段）
//! - `.prj` 坐标系 WKT 描述
//!
//! # 文件结构（.shp/.shx 共用 100 字节文件头）
//!
//! ```text
//! 字节 0..4    文件代码 9994（big-endian）
//! 字节 4..24   保留（5 × i32，全 0）
//! 字节 24..28  文件长度，单位 16 位字（big-endian）
//! 字节 28..32  版本 1000（little-endian）
//! 字节 32..36  形状类型（little-endian，5 = Polygon）
//! 字节 36..68  XY 范围（4 × f64，little-endian）
//! 字节 68..100 ZM 范围（4 × f64，未使用，全 0）
//! ```
//!
//! 长度字段以 16 位字计，记录头为 big-endian，记录内容为 little-endian。

use crate::error::FileError;
use chrono::Datelike;
use dxf2shp_core::crs::UtmCrs;
use dxf2shp_core::math::BoundingBox2;
use dxf2shp_core::ring::{VertexRing, COORDINATE_PRECISION};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Shapefile 文件代码
const FILE_CODE: i32 = 9994;

/// Shapefile 格式版本
const FILE_VERSION: i32 = 1000;

/// 形状类型：Polygon
const SHAPE_TYPE_POLYGON: i32 = 5;

/// 主文件头长度（16 位字）
const HEADER_LENGTH_WORDS: i32 = 50;

/// 记录头长度（16 位字）：记录号 + 内容长度
const RECORD_HEADER_WORDS: i32 = 4;

/// dBASE III 版本号
const DBF_VERSION: u8 = 0x03;

/// 占位属性字段宽度
const DBF_FIELD_WIDTH: u8 = 10;

/// .shp 与 .shx 共用的主文件头
#[derive(Debug)]
struct ShpFileHeader {
    /// 文件总长度（16 位字）
    file_length_words: i32,
    /// XY 范围
    bbox: BoundingBox2,
}

impl ShpFileHeader {
    fn new(file_length_words: i32, bbox: BoundingBox2) -> Self {
        Self {
            file_length_words,
            bbox,
        }
    }

    fn write(&self, writer: &mut impl Write) -> Result<(), std::io::Error> {
        writer.write_all(&FILE_CODE.to_be_bytes())?;
        for _ in 0..5 {
            writer.write_all(&0i32.to_be_bytes())?;
        }
        writer.write_all(&self.file_length_words.to_be_bytes())?;
        writer.write_all(&FILE_VERSION.to_le_bytes())?;
        writer.write_all(&SHAPE_TYPE_POLYGON.to_le_bytes())?;
        writer.write_all(&self.bbox.min.x.to_le_bytes())?;
        writer.write_all(&self.bbox.min.y.to_le_bytes())?;
        writer.write_all(&self.bbox.max.x.to_le_bytes())?;
        writer.write_all(&self.bbox.max.y.to_le_bytes())?;
        // Z/M 范围未使用
        for _ in 0..4 {
            writer.write_all(&0f64.to_le_bytes())?;
        }
        Ok(())
    }
}

/// 输出文件组（四个文件共享基础名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapefileBundle {
    pub shp: PathBuf,
    pub shx: PathBuf,
    pub dbf: PathBuf,
    pub prj: PathBuf,
}

impl ShapefileBundle {
    fn for_base(base: &Path) -> Self {
        Self {
            shp: with_suffix(base, "shp"),
            shx: with_suffix(base, "shx"),
            dbf: with_suffix(base, "dbf"),
            prj: with_suffix(base, "prj"),
        }
    }

    pub fn paths(&self) -> [&Path; 4] {
        [&self.shp, &self.shx, &self.dbf, &self.prj]
    }
}

/// 在基础名后追加扩展名
///
/// 不用 `Path::with_extension`：句柄里出现 `.` 时它会截断基础名。
fn with_suffix(base: &Path, extension: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// 写入完整矢量包
///
/// 步骤与硬性约束：
/// 1. 少于 3 个顶点直接拒绝，不产生任何文件
/// 2. 坐标按固定小数位数舍入后闭合成环
/// 3. 四个文件作为一个集合写入：任一文件失败即删除本次已产生的文件
pub fn write_bundle(
    ring: &VertexRing,
    crs: &UtmCrs,
    output_base: &Path,
) -> Result<ShapefileBundle, FileError> {
    if ring.len() < 3 {
        return Err(FileError::Validation(format!(
            "Polygon needs at least 3 points, got {}",
            ring.len()
        )));
    }

    let ring = ring.normalized(COORDINATE_PRECISION);
    let bbox = ring
        .bounding_box()
        .ok_or_else(|| FileError::Validation("Polygon has no extent".to_string()))?;

    let bundle = ShapefileBundle::for_base(output_base);
    let mut written: Vec<PathBuf> = Vec::new();
    if let Err(err) = write_files(&bundle, &ring, &bbox, crs, &mut written) {
        // 不留下半成品文件组
        for path in &written {
            let _ = std::fs::remove_file(path);
        }
        return Err(err);
    }

    info!(
        "Wrote shapefile bundle {} ({} ring points, {})",
        output_base.display(),
        ring.len(),
        crs
    );

    Ok(bundle)
}

fn write_files(
    bundle: &ShapefileBundle,
    ring: &VertexRing,
    bbox: &BoundingBox2,
    crs: &UtmCrs,
    written: &mut Vec<PathBuf>,
) -> Result<(), FileError> {
    written.push(bundle.shp.clone());
    write_shp(&bundle.shp, ring, bbox)?;

    written.push(bundle.shx.clone());
    write_shx(&bundle.shx, ring, bbox)?;

    written.push(bundle.dbf.clone());
    write_dbf(&bundle.dbf)?;

    written.push(bundle.prj.clone());
    write_prj(&bundle.prj, crs)?;

    Ok(())
}

/// Polygon 记录内容长度（16 位字）
///
/// 形状类型 4 + 范围 32 + 部件数 4 + 点数 4 + 部件索引 4 + 每点 16 字节。
fn record_content_words(ring: &VertexRing) -> i32 {
    ((52 + 16 * ring.len()) / 2) as i32
}

/// 单要素 Polygon 记录内容（little-endian）
fn polygon_record_content(ring: &VertexRing, bbox: &BoundingBox2) -> Vec<u8> {
    let mut content = Vec::with_capacity(52 + 16 * ring.len());
    content.extend_from_slice(&SHAPE_TYPE_POLYGON.to_le_bytes());
    content.extend_from_slice(&bbox.min.x.to_le_bytes());
    content.extend_from_slice(&bbox.min.y.to_le_bytes());
    content.extend_from_slice(&bbox.max.x.to_le_bytes());
    content.extend_from_slice(&bbox.max.y.to_le_bytes());
    content.extend_from_slice(&1i32.to_le_bytes()); // 部件数
    content.extend_from_slice(&(ring.len() as i32).to_le_bytes()); // 点数
    content.extend_from_slice(&0i32.to_le_bytes()); // 外环起始索引
    for point in ring.points() {
        content.extend_from_slice(&point.x.to_le_bytes());
        content.extend_from_slice(&point.y.to_le_bytes());
    }
    content
}

fn write_shp(path: &Path, ring: &VertexRing, bbox: &BoundingBox2) -> Result<(), FileError> {
    let content = polygon_record_content(ring, bbox);
    let content_words = record_content_words(ring);
    let header = ShpFileHeader::new(
        HEADER_LENGTH_WORDS + RECORD_HEADER_WORDS + content_words,
        *bbox,
    );

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    header.write(&mut writer)?;

    // 记录头（big-endian）：记录号从 1 开始
    writer.write_all(&1i32.to_be_bytes())?;
    writer.write_all(&content_words.to_be_bytes())?;
    writer.write_all(&content)?;
    writer.flush()?;
    Ok(())
}

fn write_shx(path: &Path, ring: &VertexRing, bbox: &BoundingBox2) -> Result<(), FileError> {
    let content_words = record_content_words(ring);
    let header = ShpFileHeader::new(HEADER_LENGTH_WORDS + RECORD_HEADER_WORDS, *bbox);

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    header.write(&mut writer)?;

    // 唯一一条索引记录（big-endian）：记录偏移 + 内容长度
    writer.write_all(&HEADER_LENGTH_WORDS.to_be_bytes())?;
    writer.write_all(&content_words.to_be_bytes())?;
    writer.flush()?;
    Ok(())
}

/// 写入 dBASE III 属性表
///
/// 源数据不携带属性，只有一个占位数值字段 `ID` 和一条记录。
fn write_dbf(path: &Path) -> Result<(), FileError> {
    let today = chrono::Local::now().date_naive();

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    // 文件头（32 字节）
    writer.write_all(&[DBF_VERSION])?;
    writer.write_all(&[
        (today.year() - 1900) as u8,
        today.month() as u8,
        today.day() as u8,
    ])?;
    writer.write_all(&1u32.to_le_bytes())?; // 记录数
    writer.write_all(&65u16.to_le_bytes())?; // 头长度：32 + 32 + 1
    writer.write_all(&(DBF_FIELD_WIDTH as u16 + 1).to_le_bytes())?; // 记录长度：删除标记 + 字段宽度
    writer.write_all(&[0u8; 20])?;

    // 字段描述符（32 字节）
    let mut field_name = [0u8; 11];
    field_name[..2].copy_from_slice(b"ID");
    writer.write_all(&field_name)?;
    writer.write_all(b"N")?; // 数值类型
    writer.write_all(&[0u8; 4])?;
    writer.write_all(&[DBF_FIELD_WIDTH, 0])?; // 宽度、小数位
    writer.write_all(&[0u8; 14])?;

    writer.write_all(&[0x0D])?; // 头结束标记

    // 唯一一条记录：未删除标记 + 右对齐的占位值
    writer.write_all(b" ")?;
    writer.write_all(format!("{:>width$}", 1, width = DBF_FIELD_WIDTH as usize).as_bytes())?;

    writer.write_all(&[0x1A])?; // 文件结束标记
    writer.flush()?;
    Ok(())
}

fn write_prj(path: &Path, crs: &UtmCrs) -> Result<(), FileError> {
    let mut file = File::create(path)?;
    file.write_all(crs.to_esri_wkt().as_bytes())?;
    Ok(())
}
