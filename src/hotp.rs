//! HOTP (基于计数器的一次性密码) 生成模块
//!
//! 符合 RFC 4226 标准：HMAC + 动态截断。
//!
//! 所有函数都是纯函数，相同输入始终产生相同输出，可以安全地并发调用。
//!
//! ## 示例
//!
//! ```rust
//! use otprs::params::{OtpParameters, OtpType, Secret};
//! use otprs::hotp;
//!
//! let params = OtpParameters::builder()
//!     .with_type(OtpType::Hotp)
//!     .with_label("test")
//!     .with_secret(Secret::from_base32("JBSWY3DPEHPK3PXP").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let code = hotp::generate(&params, 1).unwrap();
//! assert!(hotp::verify(&params, &code, 1, 0).unwrap());
//! ```

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::{Error, Result};
use crate::params::{Algorithm, OtpParameters};
use crate::random::constant_time_compare_str;
use crate::uri;

/// 生成指定计数器的 HOTP 验证码
///
/// 计数器以 8 字节大端序编码后作为 HMAC 消息，结果经 RFC 4226 §5.3
/// 动态截断后取模 10^digits，左侧补零到固定位数。
///
/// # Errors
///
/// 计数器为负数时返回 [`Error::InvalidCounter`]。
pub fn generate(params: &OtpParameters, counter: i64) -> Result<String> {
    if counter < 0 {
        return Err(Error::InvalidCounter(counter));
    }

    let counter_bytes = counter.to_be_bytes();
    let hash = compute_hmac(params.algorithm(), params.secret().as_bytes(), &counter_bytes);

    let digits = params.digits().value();
    let code = truncate(&hash) % 10u32.pow(digits);

    // 左填充零，前导零是验证码的一部分
    Ok(format!("{:0width$}", code, width = digits as usize))
}

/// 验证 HOTP 验证码
///
/// 在 `[counter - window, counter + window]` 范围内依次重新计算验证码，
/// 任意一个匹配即返回 `true`。`window = 0` 只检查给定计数器本身。
/// 验证码长度不符时直接返回 `false`，不做任何哈希计算。
///
/// # Errors
///
/// 窗口内出现负计数器时返回 [`Error::InvalidCounter`]。
pub fn verify(params: &OtpParameters, code: &str, counter: i64, window: u32) -> Result<bool> {
    if code.len() != params.digits().value() as usize {
        return Ok(false);
    }

    let window = i64::from(window);
    for offset in -window..=window {
        let expected = generate(params, counter + offset)?;
        if constant_time_compare_str(code, &expected) {
            return Ok(true);
        }
    }

    Ok(false)
}

/// 从 otpauth URI 解析参数并生成 HOTP 验证码
pub fn from_uri(input: &str, counter: i64) -> Result<String> {
    let params = uri::parse(input)?;
    generate(&params, counter)
}

/// 计算 HMAC 摘要
///
/// HMAC 对任意长度密钥都有效，实例化失败说明构建本身有问题，直接 panic。
fn compute_hmac(algorithm: Algorithm, secret: &[u8], message: &[u8]) -> Vec<u8> {
    match algorithm {
        Algorithm::Sha1 => {
            let mut mac =
                Hmac::<Sha1>::new_from_slice(secret).expect("HMAC accepts keys of any length");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha256 => {
            let mut mac =
                Hmac::<Sha256>::new_from_slice(secret).expect("HMAC accepts keys of any length");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
        Algorithm::Sha512 => {
            let mut mac =
                Hmac::<Sha512>::new_from_slice(secret).expect("HMAC accepts keys of any length");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }
    }
}

/// RFC 4226 §5.3 动态截断
///
/// 用摘要最后一个字节的低 4 位作为偏移量，取 4 个字节，
/// 屏蔽最高位后作为 31 位大端序无符号整数。
fn truncate(hash: &[u8]) -> u32 {
    let offset = (hash[hash.len() - 1] & 0x0f) as usize;

    ((u32::from(hash[offset] & 0x7f)) << 24)
        | (u32::from(hash[offset + 1]) << 16)
        | (u32::from(hash[offset + 2]) << 8)
        | u32::from(hash[offset + 3])
}
