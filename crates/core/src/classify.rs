//! File name classification: date and channel from the export's name.

use crate::channel::ChannelCode;
use chrono::{Local, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// How the digits captured from a file name map onto a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// `YYMMDD`, century fixed to 20.
    ShortYear,
    /// `YYYYMMDD`
    LongYear,
}

impl DateLayout {
    fn format(self, digits: &str) -> String {
        match self {
            DateLayout::ShortYear => {
                format!("20{}/{}/{}", &digits[0..2], &digits[2..4], &digits[4..6])
            }
            DateLayout::LongYear => {
                format!("{}/{}/{}", &digits[0..4], &digits[4..6], &digits[6..8])
            }
        }
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyRule {
    /// Substring the name must contain for the rule to apply.
    pub marker: &'static str,
    /// Pattern whose first capture group holds the date digits.
    pub pattern: &'static str,
    pub layout: DateLayout,
    pub channel: ChannelCode,
}

/// Classification rules, evaluated top-down; the first match wins.
pub const CLASSIFY_RULES: [ClassifyRule; 6] = [
    ClassifyRule {
        marker: "복지_",
        pattern: r"복지_([0-9]{6})",
        layout: DateLayout::ShortYear,
        channel: ChannelCode::WelfareMall,
    },
    ClassifyRule {
        marker: "쇼핑_",
        pattern: r"쇼핑_([0-9]{6})",
        layout: DateLayout::ShortYear,
        channel: ChannelCode::ShoppingMall,
    },
    ClassifyRule {
        marker: "통합주문목록",
        pattern: r"통합주문목록\.([0-9]{8})",
        layout: DateLayout::LongYear,
        channel: ChannelCode::OrderList,
    },
    ClassifyRule {
        marker: "지정일_주문",
        pattern: r"지정일_주문\.([0-9]{8})",
        layout: DateLayout::LongYear,
        channel: ChannelCode::OrderList,
    },
    ClassifyRule {
        marker: "네이버페이_전체주문발주발송관리",
        pattern: r"([0-9]{8})",
        layout: DateLayout::LongYear,
        channel: ChannelCode::MarketplacePay,
    },
    ClassifyRule {
        marker: "네이버페이_구매확정내역",
        pattern: r"([0-9]{8})",
        layout: DateLayout::LongYear,
        channel: ChannelCode::MarketplacePay,
    },
];

/// Substring hints used to guess the channel when no rule matched.
const CHANNEL_HINTS: [(&str, ChannelCode); 3] = [
    ("복지", ChannelCode::WelfareMall),
    ("쇼핑", ChannelCode::ShoppingMall),
    ("네이버페이", ChannelCode::MarketplacePay),
];

impl ClassifyRule {
    /// The formatted date if this rule matches `file_name`.
    fn apply(&self, file_name: &str, regex: &Regex) -> Option<String> {
        if !file_name.contains(self.marker) {
            return None;
        }
        let captures = regex.captures(file_name)?;
        let digits = captures.get(1)?.as_str();
        Some(self.layout.format(digits))
    }
}

fn rule_regexes() -> &'static [Regex] {
    static RE: OnceLock<Vec<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        CLASSIFY_RULES
            .iter()
            .map(|rule| Regex::new(rule.pattern).expect("valid regex"))
            .collect()
    })
}

/// Where a classification's date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSource {
    FileName,
    /// No rule matched; the date is the day of conversion.
    Today,
}

/// Date and channel derived from a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// `YYYY/MM/DD`
    pub date: String,
    pub channel: ChannelCode,
    pub date_source: DateSource,
}

/// Classify a file name, falling back to today's local date.
#[must_use]
pub fn classify(file_name: &str) -> Classification {
    classify_on(file_name, Local::now().date_naive())
}

/// Classify a file name, using `today` when no rule matches.
#[must_use]
pub fn classify_on(file_name: &str, today: NaiveDate) -> Classification {
    let matched = CLASSIFY_RULES
        .iter()
        .zip(rule_regexes())
        .find_map(|(rule, regex)| rule.apply(file_name, regex).map(|date| (date, rule.channel)));

    if let Some((date, channel)) = matched {
        return Classification {
            date,
            channel,
            date_source: DateSource::FileName,
        };
    }

    Classification {
        date: today.format("%Y/%m/%d").to_string(),
        channel: guess_channel(file_name),
        date_source: DateSource::Today,
    }
}

/// Channel guess for names no rule matched.
#[must_use]
pub fn guess_channel(file_name: &str) -> ChannelCode {
    CHANNEL_HINTS
        .iter()
        .find(|(hint, _)| file_name.contains(hint))
        .map(|(_, channel)| *channel)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
    }

    fn check(name: &str, date: &str, channel: ChannelCode) {
        let result = classify_on(name, today());
        assert_eq!(result.date, date, "date for {name}");
        assert_eq!(result.channel, channel, "channel for {name}");
    }

    #[test]
    fn test_welfare_and_shopping() {
        check("복지_240331.xlsx", "2024/03/31", ChannelCode::WelfareMall);
        check("쇼핑_240331.xlsx", "2024/03/31", ChannelCode::ShoppingMall);
    }

    #[test]
    fn test_order_lists() {
        check(
            "통합주문목록.20240331090248.xlsx",
            "2024/03/31",
            ChannelCode::OrderList,
        );
        check(
            "지정일_주문.20240331090534.xlsx",
            "2024/03/31",
            ChannelCode::OrderList,
        );
    }

    #[test]
    fn test_marketplace_pay() {
        check(
            "네이버페이_전체주문발주발송관리_20240331_0910.xlsx",
            "2024/03/31",
            ChannelCode::MarketplacePay,
        );
        check(
            "네이버페이_구매확정내역_20240331_1154.xlsx",
            "2024/03/31",
            ChannelCode::MarketplacePay,
        );
    }

    #[test]
    fn test_unknown_uses_today() {
        let result = classify_on("unknown_file.xlsx", today());
        assert_eq!(result.date, "2025/01/05");
        assert_eq!(result.channel, ChannelCode::OrderList);
        assert_eq!(result.date_source, DateSource::Today);
    }

    #[test]
    fn test_earlier_rule_wins() {
        // both markers present; the welfare rule is checked first
        check("쇼핑_복지_240101_250202.xlsx", "2024/01/01", ChannelCode::WelfareMall);
        check("복지_x_쇼핑_250202.xlsx", "2025/02/02", ChannelCode::ShoppingMall);
    }

    #[test]
    fn test_marker_without_digits_falls_through() {
        // no dot before the digits, so the order-list rule does not match
        let result = classify_on("통합주문목록_20240331.xlsx", today());
        assert_eq!(result.date_source, DateSource::Today);
        assert_eq!(result.channel, ChannelCode::OrderList);

        let result = classify_on("복지_몰.xlsx", today());
        assert_eq!(result.date, "2025/01/05");
        assert_eq!(result.channel, ChannelCode::WelfareMall);
    }

    #[test]
    fn test_guess_channel_order() {
        assert_eq!(guess_channel("복지쇼핑.xlsx"), ChannelCode::WelfareMall);
        assert_eq!(guess_channel("쇼핑몰.xlsx"), ChannelCode::ShoppingMall);
        assert_eq!(guess_channel("네이버페이.xlsx"), ChannelCode::MarketplacePay);
        assert_eq!(guess_channel("orders.xlsx"), ChannelCode::OrderList);
    }

    #[test]
    fn test_marketplace_takes_first_eight_digits_anywhere() {
        check(
            "20230101_네이버페이_구매확정내역_20240331.xlsx",
            "2023/01/01",
            ChannelCode::MarketplacePay,
        );
    }

    #[test]
    fn test_non_ascii_digits_ignored() {
        // full-width digits are not date digits
        let result = classify_on("복지_２４０３３１.xlsx", today());
        assert_eq!(result.date_source, DateSource::Today);
    }

    #[test]
    fn test_classify_uses_local_today() {
        let result = classify("unknown_file.xlsx");
        let expected = Local::now().date_naive().format("%Y/%m/%d").to_string();
        assert_eq!(result.date, expected);
        assert_eq!(result.channel, ChannelCode::OrderList);
    }
}
