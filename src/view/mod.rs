//! 视图投影与差分
//!
//! 此模块把注册表投影成平面图或径向树，并计算相邻两次投影之间的最小差分。

// 子模块声明
mod diff;
mod filter;
mod flat;
mod projection;
mod radial;
mod scale;

// 重新导出公共接口
pub use diff::{Delta, EdgeChange, Keyed, ViewDiff, diff_keyed};
pub use filter::NodeFilter;
pub use projection::{EdgeKind, Projection, ProjectionKind, ViewEdge, ViewNode, ViewNodeKind};
pub use radial::{ROOT_ID, translate_pulse};
pub use scale::{LinkWidthScale, MAX_WIDTH, MIN_WIDTH};
