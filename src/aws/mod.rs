//! AWS 后端（`bedrock` 特性）
//!
//! - `BedrockTextClient`: Nova 消息格式的文本生成
//! - `TitanImageClient`: Titan 文生图
//! - `S3ObjectStore`: 海报上传
//!
//! SDK 自带重试被关闭，限流重试只在生成器里做一次。

mod bedrock;
mod s3;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_bedrockruntime::config::retry::RetryConfig;
use aws_sdk_bedrockruntime::config::Region;

pub use bedrock::{BedrockTextClient, TitanImageClient};
pub use s3::S3ObjectStore;

/// 加载共享的 SDK 配置（凭据走标准链）
pub async fn load_sdk_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await
}

/// Bedrock Runtime 客户端，关闭 SDK 重试
pub fn bedrock_runtime_client(sdk_config: &SdkConfig) -> aws_sdk_bedrockruntime::Client {
    let config = aws_sdk_bedrockruntime::config::Builder::from(sdk_config)
        .retry_config(RetryConfig::standard().with_max_attempts(1))
        .build();
    aws_sdk_bedrockruntime::Client::from_conf(config)
}

pub fn s3_client(sdk_config: &SdkConfig) -> aws_sdk_s3::Client {
    aws_sdk_s3::Client::new(sdk_config)
}
