//! 记录端点
//!
//! 一条记录按源/目的角色拆成两个端点，聚合器对两个端点执行同一套流程。

use serde::{Deserialize, Serialize};

/// 地址在记录中出现的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Source,
    Destination,
}

/// IP 版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// 优先使用记录里的 `ip_ver`，缺失或非法时按地址形态推断
    pub fn resolve(ip_ver: Option<u8>, addr: &str) -> Self {
        match ip_ver {
            Some(4) => Self::V4,
            Some(6) => Self::V6,
            _ if addr.contains(':') => Self::V6,
            _ => Self::V4,
        }
    }
}

/// 缺少必需的 MAC 字段，整条记录被丢弃
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed packet record: missing `{field}`")]
pub struct MalformedRecordError {
    pub field: &'static str,
}

/// 记录中某一角色的地址集合（借用自记录）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub role: Role,
    pub mac: &'a str,
    pub ip: Option<&'a str>,
    pub ip_version: Option<IpVersion>,
    pub vendor: Option<&'a str>,
}

impl<'a> Endpoint<'a> {
    pub(crate) fn new(
        role: Role,
        mac: &'a str,
        ip: Option<&'a str>,
        ip_ver: Option<u8>,
        vendor: Option<&'a str>,
    ) -> Self {
        Self {
            role,
            mac,
            ip,
            ip_version: ip.map(|addr| IpVersion::resolve(ip_ver, addr)),
            vendor,
        }
    }
}
