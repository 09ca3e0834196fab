//! 配置：环境变量读取与进程级配置

pub mod campaign;
pub mod env;

pub use campaign::{aws_credentials_report, has_aws_credentials, Backend, CampaignConfig, StoreKind};
pub use env::EnvConfig;
