//! 负责处理客户端配置以及统计数据的存储路径。
//!
//! 配置是一个普通的值，在调用歌词来源时显式传入，库内不持有任何全局状态。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::{LyricEmpiricsError, Result};

const CLIENT_CONFIG_FILE: &str = "client_config.json";

/// 歌词来源客户端的配置项。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// 单次请求的超时时间（秒），必须为正数。
    timeout_secs: u64,
    /// 两次请求之间的等待时间（秒），必须为正数。
    sleep_secs: f64,
    /// 是否输出状态信息。
    verbose: bool,
    /// 搜索标题时需要排除的词语。
    excluded_terms: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            sleep_secs: 0.2,
            verbose: true,
            excluded_terms: vec!["(Live)".to_string()],
        }
    }
}

impl ClientConfig {
    /// 创建并校验一个新的配置。
    pub fn new(
        timeout_secs: u64,
        sleep_secs: f64,
        verbose: bool,
        excluded_terms: Vec<String>,
    ) -> Result<Self> {
        let config = Self {
            timeout_secs,
            sleep_secs,
            verbose,
            excluded_terms,
        };
        config.validate()?;
        Ok(config)
    }

    /// 检查所有参数是否合法。
    ///
    /// 从文件反序列化得到的配置没有经过构造函数，因此加载后也会调用一次。
    pub fn validate(&self) -> Result<()> {
        validate_timeout(self.timeout_secs)?;
        validate_sleep(self.sleep_secs)?;
        for term in &self.excluded_terms {
            validate_term(term)?;
        }
        Ok(())
    }

    /// 请求超时时间。
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 请求间隔时间。
    pub fn sleep(&self) -> Duration {
        Duration::from_secs_f64(self.sleep_secs)
    }

    /// 是否输出状态信息。
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// 当前的排除词列表。
    pub fn excluded_terms(&self) -> &[String] {
        &self.excluded_terms
    }

    /// 修改超时时间。
    pub fn set_timeout(&mut self, timeout_secs: u64) -> Result<()> {
        validate_timeout(timeout_secs)?;
        self.timeout_secs = timeout_secs;
        if self.verbose {
            info!("[Config] 新的超时时间为 {} 秒", timeout_secs);
        }
        Ok(())
    }

    /// 修改请求间隔时间。
    pub fn set_sleep(&mut self, sleep_secs: f64) -> Result<()> {
        validate_sleep(sleep_secs)?;
        self.sleep_secs = sleep_secs;
        if self.verbose {
            info!("[Config] 新的请求间隔为 {} 秒", sleep_secs);
        }
        Ok(())
    }

    /// 打开或关闭状态信息。
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
        if verbose {
            info!("[Config] 状态信息已开启");
        }
    }

    /// 替换整个排除词列表。
    pub fn set_excluded_terms(&mut self, terms: Vec<String>) -> Result<()> {
        for term in &terms {
            validate_term(term)?;
        }
        if self.verbose {
            info!("[Config] 排除词已修改为: {:?}", terms);
        }
        self.excluded_terms = terms;
        Ok(())
    }

    /// 添加一个排除词。
    pub fn add_excluded_term(&mut self, term: &str) -> Result<()> {
        validate_term(term)?;
        self.excluded_terms.push(term.to_string());
        if self.verbose {
            info!("[Config] 搜索时将排除 \"{}\"", term);
        }
        Ok(())
    }

    /// 移除一个排除词。
    ///
    /// # 返回
    /// 如果该词原本在列表中并已被移除，返回 `true`。
    pub fn remove_excluded_term(&mut self, term: &str) -> bool {
        let Some(index) = self.excluded_terms.iter().position(|t| t == term) else {
            if self.verbose {
                info!("[Config] \"{}\" 当前并未被排除", term);
            }
            return false;
        };
        self.excluded_terms.remove(index);
        if self.verbose {
            info!("[Config] 搜索时将重新包含 \"{}\"", term);
        }
        true
    }

    /// 判断一个标题是否包含任何排除词（不区分大小写）。
    pub fn is_excluded(&self, title: &str) -> bool {
        let title = title.to_lowercase();
        self.excluded_terms
            .iter()
            .any(|term| title.contains(&term.to_lowercase()))
    }
}

fn validate_timeout(timeout_secs: u64) -> Result<()> {
    if timeout_secs == 0 {
        return Err(LyricEmpiricsError::InvalidConfig(
            "超时时间必须为正整数".to_string(),
        ));
    }
    Ok(())
}

fn validate_sleep(sleep_secs: f64) -> Result<()> {
    if !sleep_secs.is_finite() || sleep_secs <= 0.0 {
        return Err(LyricEmpiricsError::InvalidConfig(
            "请求间隔必须为正数".to_string(),
        ));
    }
    Ok(())
}

fn validate_term(term: &str) -> Result<()> {
    if term.trim().is_empty() {
        return Err(LyricEmpiricsError::InvalidConfig(
            "排除词不能为空".to_string(),
        ));
    }
    Ok(())
}

/// 统计数据与歌词文本的存储位置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new("LyricEmpiricsStorage")
    }
}

impl StoragePaths {
    /// 以指定目录为根创建存储路径。
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 存储根目录。
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 存放歌词文本的目录。
    pub fn lyrics_dir(&self) -> PathBuf {
        self.root.join("SongLyrics")
    }

    /// 存放统计数据表格的文件。
    pub fn stats_file(&self) -> PathBuf {
        self.root.join("song_data.csv")
    }

    /// 指定歌词文件的完整路径。
    pub fn lyrics_file(&self, file_name: &str) -> PathBuf {
        self.lyrics_dir().join(file_name)
    }
}

/// 获取应用配置目录下指定文件的完整路径。
///
/// # 参数
/// * `filename` - 目标配置文件的名称，例如 "client_config.json"。
pub(crate) fn get_config_file_path(filename: &str) -> Result<PathBuf> {
    if let Some(mut config_dir) = dirs::config_dir() {
        config_dir.push("lyric-empirics");
        fs::create_dir_all(&config_dir)?;
        config_dir.push(filename);
        Ok(config_dir)
    } else {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "无法找到用户配置目录").into())
    }
}

/// 从指定文件加载客户端配置。
pub fn load_client_config_from(path: &Path) -> Result<ClientConfig> {
    let content = fs::read_to_string(path)?;
    let config: ClientConfig = serde_json::from_str(&content)?;
    config.validate()?;
    info!("[Config] 已从 {:?} 加载客户端配置", path);
    Ok(config)
}

/// 将客户端配置序列化为 JSON 并保存到指定文件。
pub fn save_client_config_to(config: &ClientConfig, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    info!("[Config] 已将客户端配置保存到 {:?}", path);
    Ok(())
}

/// 从用户配置目录加载客户端配置，文件不存在时返回默认配置。
pub fn load_client_config() -> Result<ClientConfig> {
    let path = get_config_file_path(CLIENT_CONFIG_FILE)?;
    match load_client_config_from(&path) {
        Ok(config) => Ok(config),
        Err(LyricEmpiricsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("[Config] 配置文件不存在，将使用默认配置。");
            Ok(ClientConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// 将客户端配置保存到用户配置目录。
pub fn save_client_config(config: &ClientConfig) -> Result<()> {
    let path = get_config_file_path(CLIENT_CONFIG_FILE)?;
    save_client_config_to(config, &path)
}
