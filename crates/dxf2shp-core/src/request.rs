//! 转换请求
//!
//! 将交互输入一次性收拢为不可变配置值，管线不依赖任何具体输入界面
//! （交互式、文件驱动或程序化调用皆可构造请求）。

use crate::crs::{CrsParseError, Hemisphere, UtmCrs};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 请求解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestParseError {
    /// 实体句柄为空
    MissingHandle,
    /// 区号/半球无效
    Crs(CrsParseError),
}

impl std::fmt::Display for RequestParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestParseError::MissingHandle => write!(f, "Entity handle must not be empty"),
            RequestParseError::Crs(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for RequestParseError {}

impl From<CrsParseError> for RequestParseError {
    fn from(err: CrsParseError) -> Self {
        RequestParseError::Crs(err)
    }
}

/// 一次转换的完整配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// 输入 DXF 文件路径
    pub dxf_path: PathBuf,
    /// 目标实体句柄（不透明字符串，不做数值解释）
    pub entity_handle: String,
    /// 目标坐标系
    pub crs: UtmCrs,
}

impl ConversionRequest {
    pub fn new(dxf_path: impl Into<PathBuf>, entity_handle: impl Into<String>, crs: UtmCrs) -> Self {
        Self {
            dxf_path: dxf_path.into(),
            entity_handle: entity_handle.into(),
            crs,
        }
    }

    /// 由原始输入字符串构造请求
    ///
    /// 半球输入为空时默认南半球。
    pub fn from_raw_input(
        dxf_path: &str,
        entity_handle: &str,
        zone: &str,
        hemisphere: &str,
    ) -> Result<Self, RequestParseError> {
        let handle = entity_handle.trim();
        if handle.is_empty() {
            return Err(RequestParseError::MissingHandle);
        }

        let zone = UtmCrs::parse_zone(zone)?;
        let hemisphere = if hemisphere.trim().is_empty() {
            Hemisphere::South
        } else {
            Hemisphere::parse(hemisphere)?
        };

        Ok(Self::new(
            dxf_path.trim(),
            handle,
            UtmCrs::new(zone, hemisphere),
        ))
    }

    /// 输出文件基础名：`{输入文件名去扩展}_poligono_{句柄}`
    ///
    /// 四个输出文件共享该基础名，位于当前工作目录。
    pub fn output_base(&self) -> PathBuf {
        let stem = self
            .dxf_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        PathBuf::from(format!("{}_poligono_{}", stem, self.entity_handle))
    }

    /// 输入路径访问器
    pub fn dxf_path(&self) -> &Path {
        &self.dxf_path
    }
}
