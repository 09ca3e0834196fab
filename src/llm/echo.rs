use async_trait::async_trait;

use super::client::LlmClient;
use super::types::{LlmRequest, LlmResponse};
use crate::error::Result;

/// 本地回显客户端：原样返回用户输入，离线调试用
#[derive(Default, Clone)]
pub struct LocalEchoClient;

#[async_trait]
impl LlmClient for LocalEchoClient {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        Ok(LlmResponse::text(request.user))
    }

    fn model(&self) -> &str {
        "local-echo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_user_text() {
        let response = LocalEchoClient
            .complete(LlmRequest::new("Hook: hello").with_system("ignored"))
            .await
            .unwrap();
        assert_eq!(response.content, "Hook: hello");
    }
}
