//! 统一错误类型模块
//!
//! 提供 otprs 库中所有操作的错误类型定义。
//!
//! 所有错误都是确定性的输入错误或环境错误，同步返回给调用方，
//! 库内部不会重试、不会记录日志、也不会为非法值猜测默认值。

use std::fmt;

/// otprs 库的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// otprs 库的错误类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// HOTP 计数器为负数
    InvalidCounter(i64),

    /// OTP 类型不匹配（例如对 HOTP 参数调用 TOTP 操作），
    /// 或 URI 中出现未知的类型标记
    InvalidOtpType(String),

    /// 不支持的哈希算法标记
    InvalidAlgorithm(String),

    /// 验证码位数不在 {6, 7, 8} 之内
    InvalidDigits(u32),

    /// TOTP 周期不在 {15, 30, 60} 之内
    InvalidPeriod(u64),

    /// 构造参数时缺少必需字段或字段值非法
    InvalidParameter(String),

    /// URI 中缺少 secret 参数
    MissingSecret,

    /// 密钥不是合法的 Base32 文本
    InvalidSecretEncoding,

    /// URI 格式错误（scheme 不符、缺少路径、查询串无法解析等）
    MalformedUri(String),

    /// 随机数生成失败
    RngFailed(String),
}

impl Error {
    /// 创建一个参数错误
    pub fn parameter(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }

    /// 创建一个 URI 格式错误
    pub fn malformed_uri(msg: impl Into<String>) -> Self {
        Error::MalformedUri(msg.into())
    }
}

// ============================================================================
// Display 实现
// ============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCounter(counter) => {
                write!(f, "counter cannot be negative, got {}", counter)
            }
            Error::InvalidOtpType(value) => write!(f, "invalid OTP type: {}", value),
            Error::InvalidAlgorithm(value) => write!(f, "invalid algorithm: {}", value),
            Error::InvalidDigits(value) => {
                write!(f, "invalid digits: {}, must be 6, 7 or 8", value)
            }
            Error::InvalidPeriod(value) => {
                write!(f, "invalid period: {}, must be 15, 30 or 60 seconds", value)
            }
            Error::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
            Error::MissingSecret => write!(f, "missing secret parameter"),
            Error::InvalidSecretEncoding => write!(f, "secret is not valid base32"),
            Error::MalformedUri(msg) => write!(f, "malformed otpauth uri: {}", msg),
            Error::RngFailed(msg) => write!(f, "random number generation failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
