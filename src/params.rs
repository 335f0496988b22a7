//! OTP 参数模型模块
//!
//! 定义描述一个 OTP 凭证所需的全部参数：类型、标签、签发者、密钥、
//! 哈希算法、验证码位数、周期（TOTP）和计数器（HOTP）。
//!
//! 参数通过带校验的 builder 构造，构造完成后不可变；
//! 已签发的验证码必须始终能从原始参数重现。
//!
//! ## 示例
//!
//! ```rust
//! use otprs::params::{OtpParameters, OtpType, Secret};
//!
//! let params = OtpParameters::builder()
//!     .with_type(OtpType::Totp)
//!     .with_label("alice@example.com")
//!     .with_secret(Secret::generate().unwrap())
//!     .build()
//!     .unwrap();
//!
//! // TOTP 默认周期为 30 秒
//! assert_eq!(params.period().unwrap().seconds(), 30);
//! ```

use std::fmt;

use base32::{Alphabet, decode as base32_decode, encode as base32_encode};

use crate::error::{Error, Result};
use crate::random::generate_random_bytes;
use crate::uri;

/// 默认密钥长度（位）
const DEFAULT_SECRET_BITS: u32 = 160;

/// OTP 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpType {
    /// 基于时间的一次性密码 (RFC 6238)
    Totp,
    /// 基于计数器的一次性密码 (RFC 4226)
    Hotp,
}

impl OtpType {
    /// 获取类型标记（用于 otpauth URI 的 authority 位置）
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpType::Totp => "totp",
            OtpType::Hotp => "hotp",
        }
    }

    /// 从 URI 类型标记解析（不区分大小写）
    pub fn from_param(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "totp" => Ok(OtpType::Totp),
            "hotp" => Ok(OtpType::Hotp),
            _ => Err(Error::InvalidOtpType(value.to_string())),
        }
    }
}

/// OTP 哈希算法
///
/// RFC 4226 要求 HMAC-SHA-1，RFC 6238 扩展支持 HMAC-SHA-256 和 HMAC-SHA-512。
/// 默认 SHA1 是历史兼容默认值，不是安全性推荐。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// HMAC-SHA-1（默认，最广泛支持）
    #[default]
    Sha1,
    /// HMAC-SHA-256
    Sha256,
    /// HMAC-SHA-512
    Sha512,
}

impl Algorithm {
    /// 获取规范 URI 标记
    pub fn uri_token(&self) -> &'static str {
        match self {
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// 从 URI 标记解析（不区分大小写）
    pub fn from_param(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "sha1" => Ok(Algorithm::Sha1),
            "sha256" => Ok(Algorithm::Sha256),
            "sha512" => Ok(Algorithm::Sha512),
            _ => Err(Error::InvalidAlgorithm(value.to_string())),
        }
    }
}

/// 验证码位数
///
/// 只允许 6、7、8 位，决定输出长度和截断模数 (10^digits)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Digits {
    /// 6 位（默认）
    #[default]
    Six,
    /// 7 位
    Seven,
    /// 8 位
    Eight,
}

impl Digits {
    /// 获取位数值
    pub fn value(&self) -> u32 {
        match self {
            Digits::Six => 6,
            Digits::Seven => 7,
            Digits::Eight => 8,
        }
    }

    /// 从整数解析
    pub fn from_value(value: u32) -> Result<Self> {
        match value {
            6 => Ok(Digits::Six),
            7 => Ok(Digits::Seven),
            8 => Ok(Digits::Eight),
            _ => Err(Error::InvalidDigits(value)),
        }
    }
}

/// TOTP 周期（秒）
///
/// 只允许 15、30、60 秒，仅对 TOTP 有意义。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// 15 秒
    Fifteen,
    /// 30 秒（默认）
    #[default]
    Thirty,
    /// 60 秒
    Sixty,
}

impl Period {
    /// 获取周期秒数
    pub fn seconds(&self) -> u64 {
        match self {
            Period::Fifteen => 15,
            Period::Thirty => 30,
            Period::Sixty => 60,
        }
    }

    /// 从秒数解析
    pub fn from_seconds(value: u64) -> Result<Self> {
        match value {
            15 => Ok(Period::Fifteen),
            30 => Ok(Period::Thirty),
            60 => Ok(Period::Sixty),
            _ => Err(Error::InvalidPeriod(value)),
        }
    }
}

/// OTP 共享密钥
///
/// 内部持有原始密钥字节（用于 HMAC），对外以 Base32 文本形式编码（用于 URI）。
/// `Debug` 输出只包含长度，永不打印密钥内容。
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Vec<u8>);

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl Secret {
    /// 从原始字节创建密钥
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Secret(bytes.into())
    }

    /// 从 Base32 文本解码密钥
    ///
    /// 使用 RFC 4648 Base32 字母表，忽略空格和连字符，不区分大小写，
    /// 允许尾部 `=` 填充。解码立即执行，文本非法时返回错误。
    pub fn from_base32(encoded: &str) -> Result<Self> {
        let clean = encoded.replace([' ', '-'], "").to_uppercase();
        let clean = clean.trim_end_matches('=');

        if clean.is_empty() {
            return Err(Error::InvalidSecretEncoding);
        }

        let raw = base32_decode(Alphabet::Rfc4648 { padding: false }, clean)
            .ok_or(Error::InvalidSecretEncoding)?;

        Ok(Secret(raw))
    }

    /// 生成默认长度（160 位 / 20 字节）的随机密钥
    pub fn generate() -> Result<Self> {
        Self::generate_bits(DEFAULT_SECRET_BITS)
    }

    /// 生成指定位数的随机密钥
    ///
    /// 位数必须是 8 的正整数倍
    pub fn generate_bits(bits: u32) -> Result<Self> {
        if bits == 0 || bits % 8 != 0 {
            return Err(Error::parameter(format!(
                "secret bits must be a positive multiple of 8, got {}",
                bits
            )));
        }

        let bytes = generate_random_bytes((bits / 8) as usize)?;
        Ok(Secret(bytes))
    }

    /// 获取原始密钥字节（用于 HMAC）
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// 获取 Base32 编码的密钥文本（用于 URI）
    pub fn encoded(&self) -> String {
        base32_encode(Alphabet::Rfc4648 { padding: false }, &self.0)
    }
}

/// OTP 参数集合
///
/// 描述一个完整的 OTP 凭证，构造后不可变。
///
/// 不变式：
/// - TOTP 参数始终有 `period`（未指定时默认 30 秒），没有 `counter`
/// - HOTP 参数始终有 `counter`（未指定时默认 0），没有 `period`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpParameters {
    otp_type: OtpType,
    label: String,
    issuer: Option<String>,
    secret: Secret,
    algorithm: Algorithm,
    digits: Digits,
    period: Option<Period>,
    counter: Option<u64>,
}

impl OtpParameters {
    /// 创建参数 builder
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::new()
    }

    /// 从 otpauth URI 解析参数
    pub fn from_uri(input: &str) -> Result<Self> {
        uri::parse(input)
    }

    /// 将参数编码为 otpauth URI
    pub fn to_uri(&self) -> String {
        uri::encode(self)
    }

    /// OTP 类型
    pub fn otp_type(&self) -> OtpType {
        self.otp_type
    }

    /// 标签（通常是账户名）
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 签发者
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }

    /// 共享密钥
    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    /// 哈希算法
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// 验证码位数
    pub fn digits(&self) -> Digits {
        self.digits
    }

    /// TOTP 周期（HOTP 参数返回 None）
    pub fn period(&self) -> Option<Period> {
        self.period
    }

    /// HOTP 计数器（TOTP 参数返回 None）
    pub fn counter(&self) -> Option<u64> {
        self.counter
    }
}

/// OTP 参数 builder
///
/// 所有校验和默认值填充集中在 [`ParametersBuilder::build`] 中一次完成，
/// 外部观察不到部分构造的可变状态。
#[derive(Debug, Clone, Default)]
pub struct ParametersBuilder {
    otp_type: Option<OtpType>,
    label: Option<String>,
    issuer: Option<String>,
    secret: Option<Secret>,
    algorithm: Option<Algorithm>,
    digits: Option<Digits>,
    period: Option<Period>,
    counter: Option<u64>,
}

impl ParametersBuilder {
    /// 创建空 builder
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置 OTP 类型（必需）
    pub fn with_type(mut self, otp_type: OtpType) -> Self {
        self.otp_type = Some(otp_type);
        self
    }

    /// 设置标签（必需）
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// 设置签发者
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// 设置密钥（必需）
    pub fn with_secret(mut self, secret: Secret) -> Self {
        self.secret = Some(secret);
        self
    }

    /// 设置哈希算法
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// 设置验证码位数
    pub fn with_digits(mut self, digits: Digits) -> Self {
        self.digits = Some(digits);
        self
    }

    /// 设置 TOTP 周期
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// 设置 HOTP 计数器
    pub fn with_counter(mut self, counter: u64) -> Self {
        self.counter = Some(counter);
        self
    }

    /// 校验并构造不可变的 [`OtpParameters`]
    ///
    /// 缺少类型、标签或密钥时返回 [`Error::InvalidParameter`]。
    /// TOTP 未指定周期时默认 30 秒；HOTP 未指定计数器时默认 0。
    pub fn build(self) -> Result<OtpParameters> {
        let otp_type = self
            .otp_type
            .ok_or_else(|| Error::parameter("otp type is required"))?;

        let label = self
            .label
            .ok_or_else(|| Error::parameter("label is required"))?;

        let secret = self
            .secret
            .ok_or_else(|| Error::parameter("secret is required"))?;

        // 与类型无关的字段对应的默认值
        let algorithm = self.algorithm.unwrap_or_default();
        let digits = self.digits.unwrap_or_default();

        // period 只属于 TOTP，counter 只属于 HOTP
        let (period, counter) = match otp_type {
            OtpType::Totp => (Some(self.period.unwrap_or_default()), None),
            OtpType::Hotp => (None, Some(self.counter.unwrap_or(0))),
        };

        Ok(OtpParameters {
            otp_type,
            label,
            issuer: self.issuer,
            secret,
            algorithm,
            digits,
            period,
            counter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_secret() -> Secret {
        Secret::from_base32("JBSWY3DPEHPK3PXP").unwrap()
    }

    #[test]
    fn test_otp_type_tokens() {
        assert_eq!(OtpType::Totp.as_str(), "totp");
        assert_eq!(OtpType::Hotp.as_str(), "hotp");

        assert_eq!(OtpType::from_param("totp").unwrap(), OtpType::Totp);
        assert_eq!(OtpType::from_param("HOTP").unwrap(), OtpType::Hotp);
        assert_eq!(OtpType::from_param("Totp").unwrap(), OtpType::Totp);

        let err = OtpType::from_param("motp").unwrap_err();
        assert_eq!(err, Error::InvalidOtpType("motp".to_string()));
    }

    #[test]
    fn test_algorithm_tokens() {
        assert_eq!(Algorithm::Sha1.uri_token(), "sha1");
        assert_eq!(Algorithm::Sha256.uri_token(), "sha256");
        assert_eq!(Algorithm::Sha512.uri_token(), "sha512");

        assert_eq!(Algorithm::from_param("SHA1").unwrap(), Algorithm::Sha1);
        assert_eq!(Algorithm::from_param("sha256").unwrap(), Algorithm::Sha256);
        assert_eq!(Algorithm::from_param("Sha512").unwrap(), Algorithm::Sha512);

        let err = Algorithm::from_param("md5").unwrap_err();
        assert_eq!(err, Error::InvalidAlgorithm("md5".to_string()));
    }

    #[test]
    fn test_digits_values() {
        assert_eq!(Digits::from_value(6).unwrap(), Digits::Six);
        assert_eq!(Digits::from_value(7).unwrap(), Digits::Seven);
        assert_eq!(Digits::from_value(8).unwrap(), Digits::Eight);
        assert_eq!(Digits::default().value(), 6);

        assert_eq!(Digits::from_value(5).unwrap_err(), Error::InvalidDigits(5));
        assert_eq!(Digits::from_value(9).unwrap_err(), Error::InvalidDigits(9));
    }

    #[test]
    fn test_period_values() {
        assert_eq!(Period::from_seconds(15).unwrap(), Period::Fifteen);
        assert_eq!(Period::from_seconds(30).unwrap(), Period::Thirty);
        assert_eq!(Period::from_seconds(60).unwrap(), Period::Sixty);
        assert_eq!(Period::default().seconds(), 30);

        assert_eq!(
            Period::from_seconds(45).unwrap_err(),
            Error::InvalidPeriod(45)
        );
    }

    #[test]
    fn test_secret_base32_round_trip() {
        let secret = test_secret();
        assert_eq!(secret.encoded(), "JBSWY3DPEHPK3PXP");
        assert_eq!(secret.as_bytes().len(), 10);
    }

    #[test]
    fn test_secret_base32_normalization() {
        // 空格、连字符、小写和尾部填充都应被接受
        let reference = test_secret();

        let spaced = Secret::from_base32("JBSW Y3DP EHPK 3PXP").unwrap();
        assert_eq!(spaced, reference);

        let lowercase = Secret::from_base32("jbswy3dpehpk3pxp").unwrap();
        assert_eq!(lowercase, reference);

        let padded = Secret::from_base32("JBSWY3DPEHPK3PXP====").unwrap();
        assert_eq!(padded, reference);
    }

    #[test]
    fn test_secret_invalid_base32() {
        assert_eq!(
            Secret::from_base32("not!valid").unwrap_err(),
            Error::InvalidSecretEncoding
        );
        assert_eq!(
            Secret::from_base32("").unwrap_err(),
            Error::InvalidSecretEncoding
        );
    }

    #[test]
    fn test_secret_generate() {
        let secret = Secret::generate().unwrap();
        assert_eq!(secret.as_bytes().len(), 20); // 160 位

        let secret = Secret::generate_bits(256).unwrap();
        assert_eq!(secret.as_bytes().len(), 32);

        // 两次生成不应相同
        let another = Secret::generate().unwrap();
        assert_ne!(secret, another);
    }

    #[test]
    fn test_secret_generate_invalid_bits() {
        assert!(matches!(
            Secret::generate_bits(0).unwrap_err(),
            Error::InvalidParameter(_)
        ));
        assert!(matches!(
            Secret::generate_bits(100).unwrap_err(),
            Error::InvalidParameter(_)
        ));
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = test_secret();
        let debug = format!("{:?}", secret);
        assert!(debug.contains("len"));
        assert!(!debug.contains("JBSW"));
        // 任何密钥字节都不应出现在 Debug 输出里
        assert!(!debug.contains("72"));
    }

    #[test]
    fn test_builder_totp_defaults() {
        let params = OtpParameters::builder()
            .with_type(OtpType::Totp)
            .with_label("test")
            .with_secret(test_secret())
            .build()
            .unwrap();

        assert_eq!(params.otp_type(), OtpType::Totp);
        assert_eq!(params.label(), "test");
        assert_eq!(params.issuer(), None);
        assert_eq!(params.algorithm(), Algorithm::Sha1);
        assert_eq!(params.digits(), Digits::Six);
        assert_eq!(params.period(), Some(Period::Thirty));
        assert_eq!(params.counter(), None);
    }

    #[test]
    fn test_builder_hotp_defaults() {
        let params = OtpParameters::builder()
            .with_type(OtpType::Hotp)
            .with_label("test")
            .with_secret(test_secret())
            .build()
            .unwrap();

        assert_eq!(params.counter(), Some(0));
        assert_eq!(params.period(), None);
    }

    #[test]
    fn test_builder_ignores_mismatched_fields() {
        // TOTP 忽略 counter，HOTP 忽略 period
        let totp = OtpParameters::builder()
            .with_type(OtpType::Totp)
            .with_label("test")
            .with_secret(test_secret())
            .with_counter(42)
            .build()
            .unwrap();
        assert_eq!(totp.counter(), None);

        let hotp = OtpParameters::builder()
            .with_type(OtpType::Hotp)
            .with_label("test")
            .with_secret(test_secret())
            .with_period(Period::Sixty)
            .build()
            .unwrap();
        assert_eq!(hotp.period(), None);
    }

    #[test]
    fn test_builder_missing_required_fields() {
        let err = OtpParameters::builder()
            .with_label("test")
            .with_secret(test_secret())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));

        let err = OtpParameters::builder()
            .with_type(OtpType::Totp)
            .with_secret(test_secret())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));

        let err = OtpParameters::builder()
            .with_type(OtpType::Totp)
            .with_label("test")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_builder_full_configuration() {
        let params = OtpParameters::builder()
            .with_type(OtpType::Totp)
            .with_label("alice@example.com")
            .with_issuer("Example")
            .with_secret(test_secret())
            .with_algorithm(Algorithm::Sha256)
            .with_digits(Digits::Eight)
            .with_period(Period::Sixty)
            .build()
            .unwrap();

        assert_eq!(params.issuer(), Some("Example"));
        assert_eq!(params.algorithm(), Algorithm::Sha256);
        assert_eq!(params.digits(), Digits::Eight);
        assert_eq!(params.period(), Some(Period::Sixty));
    }

    #[test]
    fn test_parameters_equality() {
        let build = || {
            OtpParameters::builder()
                .with_type(OtpType::Hotp)
                .with_label("test")
                .with_secret(test_secret())
                .with_counter(7)
                .build()
                .unwrap()
        };

        assert_eq!(build(), build());
    }
}
