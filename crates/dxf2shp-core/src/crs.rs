//! UTM 投影坐标系描述
//!
//! 坐标系由区号 + 半球唯一确定，EPSG 风格代码：
//! - 北半球: `32600 + zone`
//! - 南半球: `32700 + zone`
//!
//! 输入坐标已是目标投影系下的米制坐标，本工具只标注坐标系，不做重投影。

use serde::{Deserialize, Serialize};

/// 半球
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// 解析半球输入，大小写不敏感
    ///
    /// 只接受 `N` / `S`；空串由调用方决定默认值。
    pub fn parse(input: &str) -> Result<Self, CrsParseError> {
        match input.trim() {
            s if s.eq_ignore_ascii_case("N") => Ok(Hemisphere::North),
            s if s.eq_ignore_ascii_case("S") => Ok(Hemisphere::South),
            other => Err(CrsParseError::InvalidHemisphere(other.to_string())),
        }
    }

    /// 区号后缀字母（如 `23S` 中的 `S`）
    pub fn suffix(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }
}

/// 坐标系解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrsParseError {
    /// 无效半球（期望 N 或 S）
    InvalidHemisphere(String),
    /// 无效区号（期望正整数）
    InvalidZone(String),
}

impl std::fmt::Display for CrsParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrsParseError::InvalidHemisphere(value) => {
                write!(f, "Invalid hemisphere (expected N or S): {}", value)
            }
            CrsParseError::InvalidZone(value) => {
                write!(f, "Invalid UTM zone (expected positive integer): {}", value)
            }
        }
    }
}

impl std::error::Error for CrsParseError {}

/// UTM 投影坐标系
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmCrs {
    /// UTM 区号（理论范围 1-60，输入不做范围校验）
    pub zone: u32,
    pub hemisphere: Hemisphere,
}

impl UtmCrs {
    pub fn new(zone: u32, hemisphere: Hemisphere) -> Self {
        Self { zone, hemisphere }
    }

    /// 解析区号字符串
    pub fn parse_zone(input: &str) -> Result<u32, CrsParseError> {
        let trimmed = input.trim();
        match trimmed.parse::<u32>() {
            Ok(zone) if zone > 0 => Ok(zone),
            _ => Err(CrsParseError::InvalidZone(trimmed.to_string())),
        }
    }

    /// EPSG 风格坐标系代码
    pub fn epsg_code(&self) -> u32 {
        match self.hemisphere {
            Hemisphere::North => 32600 + self.zone,
            Hemisphere::South => 32700 + self.zone,
        }
    }

    /// 中央子午线经度（度）
    pub fn central_meridian_deg(&self) -> f64 {
        f64::from(self.zone) * 6.0 - 183.0
    }

    /// 纵轴假偏移（米）
    pub fn false_northing_m(&self) -> f64 {
        match self.hemisphere {
            Hemisphere::North => 0.0,
            Hemisphere::South => 10_000_000.0,
        }
    }

    /// 生成 .prj 所需的 ESRI WKT 坐标系定义
    ///
    /// 完整展开投影参数，下游 GIS 软件无需代码查找表即可识别。
    pub fn to_esri_wkt(&self) -> String {
        format!(
            concat!(
                "PROJCS[\"WGS_1984_UTM_Zone_{zone}{suffix}\",",
                "GEOGCS[\"GCS_WGS_1984\",",
                "DATUM[\"D_WGS_1984\",",
                "SPHEROID[\"WGS_1984\",6378137.0,298.257223563]],",
                "PRIMEM[\"Greenwich\",0.0],",
                "UNIT[\"Degree\",0.0174532925199433]],",
                "PROJECTION[\"Transverse_Mercator\"],",
                "PARAMETER[\"False_Easting\",500000.0],",
                "PARAMETER[\"False_Northing\",{false_northing:.1}],",
                "PARAMETER[\"Central_Meridian\",{central_meridian:.1}],",
                "PARAMETER[\"Scale_Factor\",0.9996],",
                "PARAMETER[\"Latitude_Of_Origin\",0.0],",
                "UNIT[\"Meter\",1.0]]",
            ),
            zone = self.zone,
            suffix = self.hemisphere.suffix(),
            false_northing = self.false_northing_m(),
            central_meridian = self.central_meridian_deg(),
        )
    }
}

impl std::fmt::Display for UtmCrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.epsg_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsg_code_is_deterministic() {
        assert_eq!(UtmCrs::new(22, Hemisphere::South).epsg_code(), 32722);
        assert_eq!(UtmCrs::new(22, Hemisphere::North).epsg_code(), 32622);
        assert_eq!(UtmCrs::new(1, Hemisphere::South).epsg_code(), 32701);
    }

    #[test]
    fn test_hemisphere_parse_case_insensitive() {
        assert_eq!(Hemisphere::parse("S").unwrap(), Hemisphere::South);
        assert_eq!(Hemisphere::parse("s").unwrap(), Hemisphere::South);
        assert_eq!(Hemisphere::parse(" n ").unwrap(), Hemisphere::North);
    }

    #[test]
    fn test_hemisphere_parse_rejects_other_values() {
        assert!(matches!(
            Hemisphere::parse("W"),
            Err(CrsParseError::InvalidHemisphere(_))
        ));
        assert!(matches!(
            Hemisphere::parse(""),
            Err(CrsParseError::InvalidHemisphere(_))
        ));
    }

    #[test]
    fn test_parse_zone() {
        assert_eq!(UtmCrs::parse_zone("22").unwrap(), 22);
        assert_eq!(UtmCrs::parse_zone(" 23 ").unwrap(), 23);
        assert!(matches!(
            UtmCrs::parse_zone("abc"),
            Err(CrsParseError::InvalidZone(_))
        ));
        assert!(matches!(
            UtmCrs::parse_zone("0"),
            Err(CrsParseError::InvalidZone(_))
        ));
        assert!(matches!(
            UtmCrs::parse_zone("-3"),
            Err(CrsParseError::InvalidZone(_))
        ));
    }

    #[test]
    fn test_central_meridian() {
        // 23 区中央子午线 -45°（巴西东部）
        assert_eq!(UtmCrs::new(23, Hemisphere::South).central_meridian_deg(), -45.0);
        assert_eq!(UtmCrs::new(31, Hemisphere::North).central_meridian_deg(), 3.0);
    }

    #[test]
    fn test_wkt_contains_zone_parameters() {
        let wkt = UtmCrs::new(23, Hemisphere::South).to_esri_wkt();

        assert!(wkt.starts_with("PROJCS[\"WGS_1984_UTM_Zone_23S\""));
        assert!(wkt.contains("PARAMETER[\"Central_Meridian\",-45.0]"));
        assert!(wkt.contains("PARAMETER[\"False_Northing\",10000000.0]"));
        assert!(wkt.contains("PROJECTION[\"Transverse_Mercator\"]"));

        let north = UtmCrs::new(23, Hemisphere::North).to_esri_wkt();
        assert!(north.contains("PARAMETER[\"False_Northing\",0.0]"));
    }
}
