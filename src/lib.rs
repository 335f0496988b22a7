//! # OtpRS
//!
//! RFC 4226 (HOTP) 和 RFC 6238 (TOTP) 一次性密码库。
//!
//! ## 功能特性
//!
//! - **HOTP**: 基于计数器的一次性密码生成与窗口验证
//! - **TOTP**: 基于时间的一次性密码，支持时钟偏差窗口
//! - **otpauth URI**: 双向的 `otpauth://` 编解码，兼容主流认证器应用
//! - **多种哈希算法**: SHA1 / SHA256 / SHA512
//! - **安全密钥**: 密码学安全的密钥生成，常量时间验证码比较
//!
//! 所有操作都是纯同步函数，没有共享可变状态，可以安全地并发调用。
//!
//! ## TOTP 示例
//!
//! ```rust
//! use otprs::{OtpParameters, OtpType, Secret, totp};
//!
//! // 构造 TOTP 参数（周期默认 30 秒，6 位，SHA1）
//! let params = OtpParameters::builder()
//!     .with_type(OtpType::Totp)
//!     .with_label("alice@example.com")
//!     .with_issuer("Example")
//!     .with_secret(Secret::generate().unwrap())
//!     .build()
//!     .unwrap();
//!
//! // 生成当前验证码
//! let code = totp::now(&params).unwrap();
//!
//! // 验证用户输入的码（默认允许前后各 1 个周期的偏差）
//! assert!(totp::verify(&params, &code).unwrap());
//! ```
//!
//! ## HOTP 示例
//!
//! ```rust
//! use otprs::{OtpParameters, OtpType, Secret, hotp};
//!
//! let params = OtpParameters::builder()
//!     .with_type(OtpType::Hotp)
//!     .with_label("alice@example.com")
//!     .with_secret(Secret::generate().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let code = hotp::generate(&params, 0).unwrap();
//! assert!(hotp::verify(&params, &code, 0, 0).unwrap());
//! ```
//!
//! ## URI 编解码示例
//!
//! ```rust
//! use otprs::{OtpParameters, OtpType};
//!
//! let params = OtpParameters::from_uri(
//!     "otpauth://totp/Example:alice@google.com?secret=JBSWY3DPEHPK3PXP&issuer=Example",
//! )
//! .unwrap();
//!
//! assert_eq!(params.otp_type(), OtpType::Totp);
//!
//! // 编码回规范 URI 形式
//! let uri = params.to_uri();
//! assert!(uri.starts_with("otpauth://totp/"));
//! ```

pub mod error;
pub mod hotp;
pub mod params;
pub mod random;
pub mod totp;
pub mod uri;

pub use error::{Error, Result};

// ============================================================================
// 参数模型导出
// ============================================================================

pub use params::{Algorithm, Digits, OtpParameters, OtpType, ParametersBuilder, Period, Secret};

// ============================================================================
// 随机数与比较函数导出
// ============================================================================

pub use random::{constant_time_compare, constant_time_compare_str, generate_random_bytes};
