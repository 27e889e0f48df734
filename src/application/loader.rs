use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::domain::User;
use crate::infrastructure::LoggerTrait;

/// 加载用户数据失败。`Display` 即打印给用户的提示
#[derive(Debug, Error)]
pub enum LoadError {
    /// 文件不存在
    #[error("{} not found.", .path.display())]
    NotFound { path: PathBuf },

    /// 内容不是合法的 UTF-8 JSON
    #[error("Invalid JSON format in {}: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// 顶层不是数组
    #[error("{} must contain a list of users", .path.display())]
    NotAList { path: PathBuf },

    /// 其他读取错误（权限、目录等）
    #[error("Cannot read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl LoadError {
    /// 是否属于格式错误
    pub fn is_format(&self) -> bool {
        matches!(self, LoadError::InvalidJson { .. } | LoadError::NotAList { .. })
    }
}

/// 从 JSON 文件加载用户列表，保持原有顺序
///
/// 只要求顶层是数组；元素的字段类型不做校验，见 [`User::from_value`]。
pub fn load_users(path: &Path, logger: &dyn LoggerTrait) -> Result<Vec<User>, LoadError> {
    let content = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    // 非 UTF-8 内容由解析器报告为格式错误
    let root: Value = serde_json::from_slice(&content).map_err(|source| LoadError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(records) = root else {
        return Err(LoadError::NotAList {
            path: path.to_path_buf(),
        });
    };

    let users: Vec<User> = records.into_iter().map(User::from_value).collect();

    if logger.is_enabled() {
        let _ = logger.log_load(path, content.len() as u64, users.len());
    }

    Ok(users)
}
