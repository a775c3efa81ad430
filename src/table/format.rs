//! 金额与数量的显示格式 (法语区习惯)
//!
//! 千分位使用窄不换行空格, 小数点使用逗号, 货币代码以不换行空格
//! 接在数值之后, 例如 `1 234,50 MAD`。

use bigdecimal::{BigDecimal, Zero};

use crate::models::Currency;

pub const GROUP_SEPARATOR: char = '\u{202F}';
pub const DECIMAL_SEPARATOR: char = ',';
pub const CURRENCY_SEPARATOR: char = '\u{00A0}';

const FRACTION_DIGITS: i64 = 2;

/// 固定两位小数 (四舍五入) 并附加货币代码
pub fn format_currency(amount: &BigDecimal, currency: Currency) -> String {
    let mut out = format_decimal(amount, FRACTION_DIGITS);
    out.push(CURRENCY_SEPARATOR);
    out.push_str(currency.code());
    out
}

/// 整数, 仅千分位
pub fn format_number(n: u64) -> String {
    group_digits(&n.to_string())
}

/// 按给定小数位数四舍五入后输出, 不带货币
pub fn format_decimal(amount: &BigDecimal, fraction_digits: i64) -> String {
    let rounded = round_half_up(amount, fraction_digits);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text.as_str(), ""),
    };

    let mut out = String::with_capacity(text.len() + 8);
    if rounded < BigDecimal::zero() {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac_part.is_empty() {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(frac_part);
    }
    out
}

/// 四舍五入 (远离零方向) 到指定小数位
///
/// 全程使用 BigDecimal 运算, 任意大小的金额都不会溢出。
pub fn round_half_up(value: &BigDecimal, digits: i64) -> BigDecimal {
    // with_scale 向零截断; 余数的两倍截断后非零即表示需要进一位
    let truncated = value.with_scale(digits);
    let remainder = (value.clone() - truncated.clone()).abs();
    let carry = (remainder * BigDecimal::from(2)).with_scale(digits);
    if carry.is_zero() {
        truncated
    } else if *value < BigDecimal::zero() {
        truncated - carry
    } else {
        truncated + carry
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * GROUP_SEPARATOR.len_utf8());
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn currency_has_grouping_and_two_fraction_digits() {
        assert_eq!(
            format_currency(&dec("1234.5"), Currency::Mad),
            "1\u{202F}234,50\u{00A0}MAD"
        );
    }

    #[test]
    fn currency_pads_integers_and_small_values() {
        assert_eq!(format_currency(&dec("780"), Currency::Eur), "780,00\u{00A0}EUR");
        assert_eq!(format_currency(&dec("0.5"), Currency::Usd), "0,50\u{00A0}USD");
        assert_eq!(format_currency(&BigDecimal::zero(), Currency::Mad), "0,00\u{00A0}MAD");
    }

    #[test]
    fn currency_rounds_to_cents() {
        assert_eq!(
            format_currency(&dec("1234567.891"), Currency::Mad),
            "1\u{202F}234\u{202F}567,89\u{00A0}MAD"
        );
        assert_eq!(format_currency(&dec("9.996"), Currency::Mad), "10,00\u{00A0}MAD");
    }

    #[test]
    fn long_fractions_round_without_overflow() {
        let third = BigDecimal::from(1) / BigDecimal::from(3);
        assert_eq!(round_half_up(&third, 1), dec("0.3"));
        assert_eq!(round_half_up(&dec("12.35"), 1), dec("12.4"));
        assert_eq!(round_half_up(&dec("12.3499"), 1), dec("12.3"));
    }

    #[test]
    fn negative_amounts_keep_sign_in_front() {
        assert_eq!(format_currency(&dec("-1500"), Currency::Mad), "-1\u{202F}500,00\u{00A0}MAD");
    }

    #[test]
    fn numbers_group_by_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1\u{202F}000");
        assert_eq!(format_number(12345678), "12\u{202F}345\u{202F}678");
    }

    #[test]
    fn huge_amounts_round_without_overflow() {
        let amount = dec("100000000000000000000000000000000000000000.125");
        assert_eq!(format_decimal(&amount, 2), "100\u{202F}000\u{202F}000\u{202F}000\u{202F}000\u{202F}000\u{202F}000\u{202F}000\u{202F}000\u{202F}000\u{202F}000\u{202F}000\u{202F}000\u{202F}000,13");
        assert_eq!(round_half_up(&dec("-2.25"), 1), dec("-2.3"));
        assert_eq!(round_half_up(&dec("-2.24"), 1), dec("-2.2"));
    }
}
