//! 节点类别过滤

use std::str::FromStr;

use serde::Serialize;

use crate::Error;
use crate::topo::NodeKind;

/// 视图中启用的地址类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeFilter {
    pub eth: bool,
    pub ipv4: bool,
    pub ipv6: bool,
}

impl Default for NodeFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl NodeFilter {
    pub fn all() -> Self {
        Self {
            eth: true,
            ipv4: true,
            ipv6: true,
        }
    }

    pub fn none() -> Self {
        Self {
            eth: false,
            ipv4: false,
            ipv6: false,
        }
    }

    pub fn allows(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Eth => self.eth,
            NodeKind::Ipv4 => self.ipv4,
            NodeKind::Ipv6 => self.ipv6,
        }
    }

    /// 由类别名构建：`eth`、`ip`（= ipv4 + ipv6）、`ipv4`、`ipv6`
    pub fn from_kinds<I, S>(kinds: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::none();
        for kind in kinds {
            match kind.as_ref().trim().to_ascii_lowercase().as_str() {
                "" => {}
                "eth" => filter.eth = true,
                "ip" => {
                    filter.ipv4 = true;
                    filter.ipv6 = true;
                }
                "ipv4" => filter.ipv4 = true,
                "ipv6" => filter.ipv6 = true,
                _ => return Err(Error::InvalidNodeKind(kind.as_ref().to_string())),
            }
        }
        Ok(filter)
    }
}

impl FromStr for NodeFilter {
    type Err = Error;

    /// 逗号分隔，例如 `eth,ip`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_kinds(s.split(','))
    }
}
