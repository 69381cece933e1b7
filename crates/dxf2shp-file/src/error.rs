//! 文件操作错误定义

use std::path::PathBuf;
use thiserror::Error;

/// 转换管线错误
///
/// 每个阶段的失败都有独立变体，发生即中止，不做重试。
#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found or unreadable: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("DXF error: {0}")]
    Dxf(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Entity {0} yielded no extractable vertices")]
    EmptyGeometry(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
