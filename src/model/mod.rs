//! 库中使用的数据模型。

pub mod song;
pub mod stat_row;
pub mod track;
