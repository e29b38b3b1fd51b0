//! 定义了整个 `lyric-empirics` 库的错误类型 `LyricEmpiricsError`。

use std::io;
use thiserror::Error;

/// `lyric-empirics` 库的通用错误枚举。
///
/// 分析核心本身不会返回错误：缺少发音或音节数据时使用默认值，
/// 没有段落的歌曲得到 `SongStatistics::Empty`。
/// 这里的错误都来自外围的配置、词典加载和歌词来源。
#[derive(Error, Debug)]
pub enum LyricEmpiricsError {
    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O 错误 (源自 `io::Error`)
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    /// 客户端配置参数不合法
    #[error("配置参数不合法: {0}")]
    InvalidConfig(String),

    /// 发音词典内容格式错误
    #[error("发音词典解析失败: {0}")]
    Dictionary(String),

    /// 歌词来源返回了错误
    #[error("歌词来源出错: {0}")]
    Source(String),

    /// 请求歌词来源超时
    #[error("请求超时: {0}")]
    Timeout(String),

    /// 没有注册任何歌词来源
    #[error("尚未注册任何歌词来源")]
    NoSources,

    /// 不支持的歌词来源
    #[error("不支持的歌词来源: '{0}'")]
    SourceNotSupported(String),
}

/// `LyricEmpiricsError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, LyricEmpiricsError>;
