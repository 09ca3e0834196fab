use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, timeout};

use crate::error::{PracharError, Result};

/// 限流重试策略：首次 + `max_retries` 次，指数退避
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// 第 `attempt` 次失败（从 0 计）后的等待时长：base * 2^attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// 仅在限流时重试；其他错误立即返回
    pub async fn run<T, F, Fut>(&self, phase: &str, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0;
        loop {
            tracing::debug!(phase, attempt = attempt + 1, max = self.max_attempts(), "calling upstream");
            match op(attempt).await {
                Ok(value) => {
                    if attempt > 0 {
                        tracing::info!(phase, attempt = attempt + 1, "upstream succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) if err.is_rate_limited() && attempt < self.max_retries => {
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        phase,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "throttled, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// 给单次外部调用加超时
pub async fn bounded<T, Fut>(phase: &str, limit: Duration, fut: Fut) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(PracharError::Timeout {
            phase: phase.to_string(),
            secs: limit.as_secs(),
        }),
    }
}
