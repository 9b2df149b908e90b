//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use thiserror::Error;

use crate::core::TranslayerError;

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 翻译服务返回错误
    #[error("翻译服务错误: {0}")]
    ApiError(String),

    /// 响应结构不符合预期
    #[error("响应格式错误: {0}")]
    MalformedResponse(String),

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 缓存错误
    #[error("缓存错误: {0}")]
    CacheError(String),

    /// 批次处理错误
    #[error("批次处理错误: {0}")]
    BatchProcessingError(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl TranslationError {
    /// 检查错误是否可重试
    ///
    /// 批次调度器本身从不重试（失败批次直接跳过），该判断留给上层调用方。
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TranslationError::NetworkError(_)
                | TranslationError::ApiError(_)
                | TranslationError::CacheError(_)
                | TranslationError::BatchProcessingError(_)
        )
    }
}

impl From<TranslayerError> for TranslationError {
    fn from(error: TranslayerError) -> Self {
        TranslationError::InternalError(error.to_string())
    }
}

/// 转换为 TranslayerError（库边界使用）
impl From<TranslationError> for TranslayerError {
    fn from(error: TranslationError) -> Self {
        TranslayerError::new(&error.to_string())
    }
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::NetworkError(format!("IO错误: {}", error))
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::SerializationError(format!("JSON序列化错误: {}", error))
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        TranslationError::NetworkError(error.to_string())
    }
}

impl From<toml::de::Error> for TranslationError {
    fn from(error: toml::de::Error) -> Self {
        TranslationError::ConfigError(format!("TOML解析错误: {}", error))
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(TranslationError::NetworkError("x".into()).is_retryable());
        assert!(TranslationError::ApiError("x".into()).is_retryable());
        assert!(!TranslationError::ConfigError("x".into()).is_retryable());
        assert!(!TranslationError::InvalidInput("x".into()).is_retryable());
    }

    #[test]
    fn test_boundary_conversion() {
        let err = TranslationError::MalformedResponse("not an array".into());
        let outer: TranslayerError = err.into();
        assert!(outer.to_string().contains("not an array"));
    }
}
