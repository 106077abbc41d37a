//! Sales channel codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The sales channel (and export format) a file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelCode {
    /// 1001: integrated and reserved-date order lists.
    #[serde(rename = "1001")]
    OrderList,
    /// 1002: marketplace-pay exports.
    #[serde(rename = "1002")]
    MarketplacePay,
    /// 1003: welfare-mall exports.
    #[serde(rename = "1003")]
    WelfareMall,
    /// 1004: shopping-mall exports.
    #[serde(rename = "1004")]
    ShoppingMall,
}

impl ChannelCode {
    /// Every channel, in code order.
    pub const ALL: [ChannelCode; 4] = [
        ChannelCode::OrderList,
        ChannelCode::MarketplacePay,
        ChannelCode::WelfareMall,
        ChannelCode::ShoppingMall,
    ];

    /// The four-digit code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ChannelCode::OrderList => "1001",
            ChannelCode::MarketplacePay => "1002",
            ChannelCode::WelfareMall => "1003",
            ChannelCode::ShoppingMall => "1004",
        }
    }
}

impl Default for ChannelCode {
    fn default() -> Self {
        ChannelCode::OrderList
    }
}

impl fmt::Display for ChannelCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ChannelCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChannelCode::ALL
            .into_iter()
            .find(|channel| channel.code() == s.trim())
            .ok_or_else(|| format!("unknown channel code: {s}"))
    }
}
