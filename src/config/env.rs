use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{PracharError, Result};

/// 环境变量配置管理
pub struct EnvConfig;

impl EnvConfig {
    /// 从环境变量获取值
    pub fn get_env(key: &str) -> Result<String> {
        Self::get_env_optional(key).ok_or_else(|| {
            PracharError::Config(format!(
                "环境变量 '{key}' 未设置。请在 .env 文件中设置或通过环境变量传递。"
            ))
        })
    }

    /// 获取可选的环境变量，空白值视为未设置
    pub fn get_env_optional(key: &str) -> Option<String> {
        env::var(key)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn get_or(key: &str, default: &str) -> String {
        Self::get_env_optional(key).unwrap_or_else(|| default.to_string())
    }

    /// 布尔开关：true/1/yes/on 为真，false/0/no/off 为假，其他值报错
    pub fn get_bool(key: &str, default: bool) -> Result<bool> {
        match Self::get_env_optional(key) {
            None => Ok(default),
            Some(value) => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                other => Err(PracharError::Config(format!(
                    "环境变量 '{key}' 不是有效的布尔值: '{other}'"
                ))),
            },
        }
    }

    pub fn get_parsed<T>(key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        match Self::get_env_optional(key) {
            None => Ok(default),
            Some(value) => value.parse::<T>().map_err(|e| {
                PracharError::Config(format!("环境变量 '{key}' 解析失败 ('{value}'): {e}"))
            }),
        }
    }

    /// 脱敏显示：长值保留前 8 位和后 4 位
    pub fn mask_secret(value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        if chars.len() > 12 {
            let head: String = chars[..8].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}...{tail}")
        } else {
            "***".to_string()
        }
    }

    /// 检查是否启用调试模式
    pub fn is_debug_mode() -> bool {
        env::var("PRACHAR_DEBUG").is_ok()
    }
}
