//! 数据包记录
//!
//! 定义上游推送的数据包摘要记录，以及按源/目的角色拆分出的端点视图。

// 子模块声明
mod endpoint;
mod packet_record;

// 重新导出公共接口
pub use endpoint::{Endpoint, IpVersion, MalformedRecordError, Role};
pub use packet_record::PacketRecord;
