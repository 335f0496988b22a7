//! TOTP (基于时间的一次性密码) 生成模块
//!
//! 符合 RFC 6238 标准：TOTP = HOTP(K, T)，其中 T = unix 时间 / 周期。
//!
//! 计数器推导使用整数除法，同一周期桶内的任意时刻产生相同的验证码。
//! 验证时允许一个可配置的偏差窗口以容忍时钟偏移。
//!
//! ## 示例
//!
//! ```rust
//! use otprs::params::{OtpParameters, OtpType, Secret};
//! use otprs::totp;
//!
//! let params = OtpParameters::builder()
//!     .with_type(OtpType::Totp)
//!     .with_label("alice@example.com")
//!     .with_secret(Secret::generate().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let code = totp::now(&params).unwrap();
//! assert!(totp::verify(&params, &code).unwrap());
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};
use crate::hotp;
use crate::params::{OtpParameters, OtpType, Period};
use crate::uri;

/// 默认验证窗口：允许前后各一个周期的时钟偏差
const DEFAULT_WINDOW: u32 = 1;

/// 生成当前时刻的 TOTP 验证码
///
/// # Errors
///
/// 参数类型不是 TOTP 时返回 [`Error::InvalidOtpType`]。
pub fn now(params: &OtpParameters) -> Result<String> {
    let period = check_otp_type(params)?;
    let counter = calculate_counter(current_timestamp(), period);
    hotp::generate(params, counter)
}

/// 生成指定 unix 时间戳（秒）的 TOTP 验证码
///
/// 用于确定性测试和历史验证码查询。
///
/// # Errors
///
/// 参数类型不是 TOTP 时返回 [`Error::InvalidOtpType`]。
pub fn at(params: &OtpParameters, unix_seconds: u64) -> Result<String> {
    let period = check_otp_type(params)?;
    let counter = calculate_counter(unix_seconds, period);
    hotp::generate(params, counter)
}

/// 验证 TOTP 验证码（默认窗口：前后各 1 个周期）
pub fn verify(params: &OtpParameters, code: &str) -> Result<bool> {
    verify_with_window(params, code, DEFAULT_WINDOW)
}

/// 验证 TOTP 验证码，使用指定的偏差窗口
///
/// 以当前时间推导计数器，委托给 HOTP 的窗口验证。
///
/// # Errors
///
/// 参数类型不是 TOTP 时返回 [`Error::InvalidOtpType`]。
pub fn verify_with_window(params: &OtpParameters, code: &str, window: u32) -> Result<bool> {
    let period = check_otp_type(params)?;
    let counter = calculate_counter(current_timestamp(), period);
    hotp::verify(params, code, counter, window)
}

/// 从 otpauth URI 解析参数并生成当前的 TOTP 验证码
pub fn from_uri(input: &str) -> Result<String> {
    let params = uri::parse(input)?;
    now(&params)
}

/// 获取当前验证码的剩余有效时间（秒）
///
/// # Errors
///
/// 参数类型不是 TOTP 时返回 [`Error::InvalidOtpType`]。
pub fn time_remaining(params: &OtpParameters) -> Result<u64> {
    let period = check_otp_type(params)?.seconds();
    Ok(period - (current_timestamp() % period))
}

/// 计算时间戳对应的 TOTP 计数器
///
/// T = floor(unix_seconds / period)，整数除法避免浮点舍入漂移。
pub fn calculate_counter(unix_seconds: u64, period: Period) -> i64 {
    (unix_seconds / period.seconds()) as i64
}

/// 获取当前 unix 时间戳（秒）
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}

/// 检查参数类型是 TOTP 并返回周期
fn check_otp_type(params: &OtpParameters) -> Result<Period> {
    match (params.otp_type(), params.period()) {
        (OtpType::Totp, Some(period)) => Ok(period),
        _ => Err(Error::InvalidOtpType(params.otp_type().as_str().to_string())),
    }
}
