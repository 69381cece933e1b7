//! DXF2SHP 主程序入口
//!
//! 交互式终端界面：依次询问输入文件、实体句柄、UTM 区号和半球，
//! 全部输入收集完毕后构造一次性请求并执行转换管线。

use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use dxf2shp_core::request::ConversionRequest;
use dxf2shp_file::pipeline;

/// 读取一行用户输入
///
/// 返回 `None` 表示输入流关闭（用户取消），与错误区分开。
fn prompt(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().lock().read_line(&mut line)?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// 收集全部交互输入并构造请求
///
/// 任何一步输入流关闭都视为干净取消，返回 `None`。
fn gather_request() -> Result<Option<ConversionRequest>> {
    let Some(dxf_path) = prompt("DXF 文件路径: ")? else {
        return Ok(None);
    };

    let Some(handle) = prompt("多边形实体句柄 (handle): ")? else {
        return Ok(None);
    };

    let Some(zone) = prompt("UTM 区号 (如 22): ")? else {
        return Ok(None);
    };

    let Some(hemisphere) = prompt("半球 (N/S) [默认: S]: ")? else {
        return Ok(None);
    };

    match ConversionRequest::from_raw_input(&dxf_path, &handle, &zone, &hemisphere) {
        Ok(request) => Ok(Some(request)),
        Err(err) => {
            eprintln!("输入无效: {}", err);
            std::process::exit(1);
        }
    }
}

fn main() -> Result<()> {
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    println!("============================================================");
    println!("DXF 转 Shapefile 转换器");
    println!("坐标系: UTM | 基准: WGS 84 (EPSG 326xx/327xx)");
    println!("============================================================");

    let Some(request) = gather_request()? else {
        println!("\n操作已取消");
        return Ok(());
    };

    info!("Starting conversion of {}", request.dxf_path().display());

    println!("\n处理中...");

    match pipeline::convert(&request) {
        Ok(summary) => {
            println!("\n============================================================");
            println!("转换完成");
            println!("============================================================");
            println!("实体类型: {}", summary.entity_kind);
            println!("顶点数: {}", summary.point_count);
            println!("生成文件:");
            for path in summary.bundle.paths() {
                println!("   • {}", path.display());
            }
            println!(
                "坐标系: UTM {} 区 ({}半球), EPSG:{}",
                request.crs.zone,
                match request.crs.hemisphere {
                    dxf2shp_core::crs::Hemisphere::North => "北",
                    dxf2shp_core::crs::Hemisphere::South => "南",
                },
                summary.epsg_code
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("\n转换失败: {}", err);
            std::process::exit(1);
        }
    }
}
