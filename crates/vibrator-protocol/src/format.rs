//! 浮点数文本格式
//!
//! 驱动解析的是通用格式（`%g`，6 位有效数字，去掉尾随零）的数值文本，
//! 例如 `0.5`、`150`、`152.5`、`1e-05`。Rust 的 `{}` 会输出最短往返表示
//! （如 `0.12345679`），与驱动期望不一致，因此这里单独实现。

/// 有效数字位数
const SIGNIFICANT_DIGITS: i32 = 6;

/// 按通用格式输出浮点数
pub fn format_general(value: f32) -> String {
    let value = f64::from(value);

    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // 先按科学计数法取舍到 6 位有效数字，得到舍入后的指数
    let sci = format!("{:.*e}", (SIGNIFICANT_DIGITS - 1) as usize, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS {
        let mantissa = trim_fraction(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// 去掉小数部分的尾随零（以及多余的小数点）
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values() {
        assert_eq!(format_general(150.0), "150");
        assert_eq!(format_general(140.0), "140");
        assert_eq!(format_general(1.0), "1");
        assert_eq!(format_general(0.0), "0");
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(format_general(0.5), "0.5");
        assert_eq!(format_general(0.8), "0.8");
        assert_eq!(format_general(0.1), "0.1");
        assert_eq!(format_general(152.5), "152.5");
        assert_eq!(format_general(0.99), "0.99");
    }

    #[test]
    fn test_six_significant_digits() {
        assert_eq!(format_general(0.123_456_79), "0.123457");
        assert_eq!(format_general(159.999_99), "160");
        assert_eq!(format_general(145.123_46), "145.123");
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(format_general(0.000_01), "1e-05");
        assert_eq!(format_general(1_000_000.0), "1e+06");
        assert_eq!(format_general(0.000_123), "0.000123");
    }

    #[test]
    fn test_special_values() {
        assert_eq!(format_general(f32::NAN), "nan");
        assert_eq!(format_general(f32::INFINITY), "inf");
        assert_eq!(format_general(-0.0), "-0");
        assert_eq!(format_general(-0.25), "-0.25");
    }
}
