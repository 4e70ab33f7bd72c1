//! 数据包摘要记录
//!
//! 每个被观测到的数据包对应一条记录，字段与推送通道上的 JSON 对象一一对应。

use serde::{Deserialize, Serialize};

use super::endpoint::{Endpoint, MalformedRecordError, Role};

/// 单个数据包的摘要（不可变输入）
///
/// MAC 字段在线格式上是可选的：缺失 MAC 的记录仍能反序列化，
/// 随后由 [`PacketRecord::endpoints`] 拒绝。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PacketRecord {
    #[serde(default)]
    pub src_mac: Option<String>,
    #[serde(default)]
    pub dst_mac: Option<String>,
    /// 上游已解析出的厂商名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_mac_vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_mac_vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_ver: Option<u8>,
    #[serde(default)]
    pub eth_type: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_proto: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_port: Option<u16>,
    /// 捕获时间（秒，Unix 时间戳）
    #[serde(default)]
    pub timestamp: f64,
}

impl PacketRecord {
    /// 创建只有链路层地址的记录
    pub fn new(src_mac: impl Into<String>, dst_mac: impl Into<String>) -> Self {
        Self {
            src_mac: Some(src_mac.into()),
            dst_mac: Some(dst_mac.into()),
            ..Self::default()
        }
    }

    /// 附加网络层地址
    pub fn with_ips(mut self, src_ip: impl Into<String>, dst_ip: impl Into<String>) -> Self {
        self.src_ip = Some(src_ip.into());
        self.dst_ip = Some(dst_ip.into());
        self
    }

    pub fn with_ip_ver(mut self, ip_ver: u8) -> Self {
        self.ip_ver = Some(ip_ver);
        self
    }

    pub fn with_eth_type(mut self, eth_type: u16) -> Self {
        self.eth_type = eth_type;
        self
    }

    /// 附加传输层信息
    pub fn with_transport(mut self, ip_proto: u8, src_port: Option<u16>, dst_port: Option<u16>) -> Self {
        self.ip_proto = Some(ip_proto);
        self.src_port = src_port;
        self.dst_port = dst_port;
        self
    }

    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// 取指定角色的端点视图
    pub fn endpoint(&self, role: Role) -> Result<Endpoint<'_>, MalformedRecordError> {
        let (mac, ip, vendor, field) = match role {
            Role::Source => (&self.src_mac, &self.src_ip, &self.src_mac_vendor, "src_mac"),
            Role::Destination => (&self.dst_mac, &self.dst_ip, &self.dst_mac_vendor, "dst_mac"),
        };
        let mac = non_empty(mac).ok_or(MalformedRecordError { field })?;
        Ok(Endpoint::new(role, mac, non_empty(ip), self.ip_ver, non_empty(vendor)))
    }

    /// 校验并一次取出源、目的两个端点
    pub fn endpoints(&self) -> Result<(Endpoint<'_>, Endpoint<'_>), MalformedRecordError> {
        Ok((self.endpoint(Role::Source)?, self.endpoint(Role::Destination)?))
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
