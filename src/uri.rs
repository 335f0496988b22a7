//! otpauth URI 编解码模块
//!
//! 实现认证器应用和二维码配置使用的事实标准交换格式：
//!
//! ```text
//! otpauth://{totp|hotp}/{label}?secret=...&issuer=...&algorithm=...&digits=...&period=...&counter=...
//! ```
//!
//! 解码对显式给出的非法值严格报错，从不猜测默认值；
//! 编码省略与默认值相同的字段以保持 URI 简短，与常见配置工具一致。
//!
//! ## 示例
//!
//! ```rust
//! use otprs::params::{OtpParameters, OtpType};
//! use otprs::uri;
//!
//! let params = uri::parse(
//!     "otpauth://totp/Example:alice@google.com?secret=JBSWY3DPEHPK3PXP&issuer=Example",
//! )
//! .unwrap();
//!
//! assert_eq!(params.otp_type(), OtpType::Totp);
//! assert_eq!(uri::parse(&uri::encode(&params)).unwrap(), params);
//! ```

use url::Url;

use crate::error::{Error, Result};
use crate::params::{Algorithm, Digits, OtpParameters, OtpType, Period, Secret};

/// otpauth URI 的 scheme
const SCHEME: &str = "otpauth";

/// 解析 otpauth URI
///
/// authority 位置携带 OTP 类型标记（不区分大小写），路径去掉前导 `/`
/// 后百分号解码作为标签。查询参数按出现顺序处理，重复键以最后一个为准，
/// 未识别的键忽略。解析结果经过 builder 校验，§3 的默认值规则随之生效。
///
/// # Errors
///
/// - [`Error::MalformedUri`] - scheme 不是 `otpauth`、缺少路径或查询串无法解析
/// - [`Error::InvalidOtpType`] - 未知的类型标记
/// - [`Error::MissingSecret`] - 缺少 `secret` 参数
/// - [`Error::InvalidAlgorithm`] / [`Error::InvalidDigits`] /
///   [`Error::InvalidPeriod`] / [`Error::InvalidSecretEncoding`] - 显式给出的非法值
pub fn parse(input: &str) -> Result<OtpParameters> {
    let url = Url::parse(input).map_err(|e| Error::malformed_uri(e.to_string()))?;

    if url.scheme() != SCHEME {
        return Err(Error::malformed_uri(format!(
            "expected {} scheme, got {}",
            SCHEME,
            url.scheme()
        )));
    }

    let type_token = url
        .host_str()
        .ok_or_else(|| Error::malformed_uri("missing otp type"))?;
    let otp_type = OtpType::from_param(type_token)?;

    // 去掉路径的前导 "/"，剩余部分百分号解码后是标签
    let raw_label = url.path().trim_start_matches('/');
    if raw_label.is_empty() {
        return Err(Error::malformed_uri("missing label"));
    }
    let label = urlencoding::decode(raw_label)
        .map_err(|_| Error::malformed_uri("label is not valid utf-8"))?;

    let mut builder = OtpParameters::builder()
        .with_type(otp_type)
        .with_label(label.into_owned());
    let mut has_secret = false;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "secret" => {
                builder = builder.with_secret(Secret::from_base32(&value)?);
                has_secret = true;
            }
            "issuer" => {
                builder = builder.with_issuer(value.into_owned());
            }
            "algorithm" => {
                builder = builder.with_algorithm(Algorithm::from_param(&value)?);
            }
            "digits" => {
                let digits = parse_int::<u32>("digits", &value)?;
                builder = builder.with_digits(Digits::from_value(digits)?);
            }
            "period" => {
                let period = parse_int::<u64>("period", &value)?;
                builder = builder.with_period(Period::from_seconds(period)?);
            }
            "counter" => {
                builder = builder.with_counter(parse_int::<u64>("counter", &value)?);
            }
            // 未识别的键不是错误
            _ => {}
        }
    }

    if !has_secret {
        return Err(Error::MissingSecret);
    }

    builder.build()
}

/// 将参数编码为规范的 otpauth URI
///
/// `secret` 始终输出；`issuer` 仅在存在时输出；`algorithm`、`digits`、
/// `period` 仅在不等于默认值时输出；`counter` 当且仅当类型为 HOTP 时输出。
/// 字段顺序固定：secret、issuer、algorithm、digits、period、counter。
pub fn encode(params: &OtpParameters) -> String {
    let mut uri = format!(
        "otpauth://{}/{}?secret={}",
        params.otp_type().as_str(),
        urlencoding::encode(params.label()),
        params.secret().encoded()
    );

    if let Some(issuer) = params.issuer() {
        uri.push_str(&format!("&issuer={}", urlencoding::encode(issuer)));
    }

    if params.algorithm() != Algorithm::Sha1 {
        uri.push_str(&format!("&algorithm={}", params.algorithm().uri_token()));
    }

    if params.digits() != Digits::Six {
        uri.push_str(&format!("&digits={}", params.digits().value()));
    }

    if let Some(period) = params.period() {
        if period != Period::Thirty {
            uri.push_str(&format!("&period={}", period.seconds()));
        }
    }

    if let Some(counter) = params.counter() {
        uri.push_str(&format!("&counter={}", counter));
    }

    uri
}

/// 解析查询参数中的整数值
fn parse_int<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::malformed_uri(format!("{} is not a valid integer: {}", key, value)))
}
