//! OTP 配置与验证示例
//!
//! 展示如何使用 OtpRS 完成一次完整的 OTP 配置交换：
//! 服务端生成密钥和 otpauth URI，客户端解析 URI 并生成验证码。
//!
//! 运行: cargo run --example provision

use otprs::{OtpParameters, OtpType, Secret, hotp, totp};

fn main() {
    println!("=== OtpRS 配置示例 ===\n");

    // ===== TOTP 演示 =====
    println!("📱 设置 TOTP (基于时间的一次性密码)...");
    println!("   适用于 Google Authenticator、Authy 等 App\n");

    let secret = Secret::generate().expect("密钥生成失败");
    let params = OtpParameters::builder()
        .with_type(OtpType::Totp)
        .with_label("alice@example.com")
        .with_issuer("OtpRS Example")
        .with_secret(secret)
        .build()
        .expect("参数构造失败");

    println!("   Base32 密钥: {}", params.secret().encoded());

    // 生成 otpauth URI，通常渲染为二维码供认证器扫描
    let uri = params.to_uri();
    println!("   OTPAuth URI: {}\n", uri);

    // 模拟认证器端：解析 URI 并生成当前验证码
    let scanned = OtpParameters::from_uri(&uri).expect("URI 解析失败");
    let code = totp::now(&scanned).expect("验证码生成失败");
    println!("   🔍 认证器显示的验证码: {}", code);
    println!(
        "   ⏳ 剩余有效时间: {}s",
        totp::time_remaining(&scanned).unwrap()
    );

    // 服务端验证用户输入
    match totp::verify(&params, &code) {
        Ok(true) => println!("   ✅ TOTP 验证成功\n"),
        Ok(false) => println!("   ❌ TOTP 验证码错误\n"),
        Err(e) => println!("   ❌ 验证失败: {}\n", e),
    }

    // ===== HOTP 演示 =====
    println!("🔢 设置 HOTP (基于计数器的一次性密码)...");
    println!("   适用于硬件令牌等设备\n");

    let hotp_params = OtpParameters::builder()
        .with_type(OtpType::Hotp)
        .with_label("alice@example.com")
        .with_secret(Secret::generate().expect("密钥生成失败"))
        .build()
        .expect("参数构造失败");

    println!("   📊 生成 HOTP 序列:");
    for counter in 0..5 {
        let code = hotp::generate(&hotp_params, counter).expect("验证码生成失败");
        println!("   计数器 {}: {}", counter, code);
    }
    println!();

    // 客户端在计数器 5 处生成，服务端还停留在 3，用前瞻窗口追上
    let code = hotp::generate(&hotp_params, 5).unwrap();
    match hotp::verify(&hotp_params, &code, 3, 3) {
        Ok(true) => println!("   ✅ HOTP 验证成功（窗口内追上了计数器）\n"),
        Ok(false) => println!("   ❌ HOTP 验证码错误\n"),
        Err(e) => println!("   ❌ 验证失败: {}\n", e),
    }

    println!("=== 示例结束 ===");
}
