// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）、英文、巴西葡萄牙语
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 导出文本必须走显式 locale 的 tr / tr_with_args，不依赖全局语言
// ==========================================

/// 缺省语言
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// 支持的语言
pub const SUPPORTED_LOCALES: [&str; 3] = ["zh-CN", "en", "pt-BR"];

/// 规范化语言代码；不受支持时返回 None
pub fn normalize_locale(raw: &str) -> Option<&'static str> {
    match raw.trim().to_lowercase().replace('_', "-").as_str() {
        "zh" | "zh-cn" => Some("zh-CN"),
        "en" | "en-us" | "en-gb" => Some("en"),
        "pt" | "pt-br" => Some("pt-BR"),
        _ => None,
    }
}

/// 翻译消息（显式语言）
pub fn tr(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息（显式语言，带参数）
///
/// # 示例
/// ```no_run
/// use shift_handover::i18n::tr_with_args;
/// let label = tr_with_args("en", "team.label", &[("team", "C")]);
/// ```
pub fn tr_with_args(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    fill_args(tr(locale, key), args)
}

fn fill_args(mut text: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        text = text.replace(&placeholder, v);
    }
    text
}
