//! Field resolution: raw header-keyed rows to product, option, quantity and sales.
//!
//! Each export format names its columns differently and some fold shipping
//! into sales. A [`ResolverTable`] maps `(channel, file name)` onto the
//! [`FieldRule`] that knows where each field lives.

use crate::channel::ChannelCode;
use std::sync::OnceLock;
use xlconv_sheet::{CellValue, Row};

/// Where one field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// A single column.
    Key(&'static str),
    /// The first listed column holding a filled-in value (see
    /// [`CellValue::is_truthy`]); zero and `false` are skipped.
    FirstPresent(&'static [&'static str]),
}

impl FieldSource {
    fn lookup<'a>(&self, row: &'a Row) -> Option<&'a CellValue> {
        match self {
            FieldSource::Key(key) => row.get(*key),
            FieldSource::FirstPresent(keys) => keys
                .iter()
                .find_map(|key| row.get(*key).filter(|cell| cell.is_truthy())),
        }
    }

    /// Zero, `false` and blank cells all read as `""`.
    fn text(&self, row: &Row) -> String {
        self.lookup(row)
            .filter(|cell| cell.is_truthy())
            .map(CellValue::to_text)
            .unwrap_or_default()
    }

    fn number(&self, row: &Row) -> f64 {
        self.lookup(row).map_or(0.0, CellValue::to_number)
    }
}

/// How the sales amount of a row is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesFormula {
    Field(FieldSource),
    /// Product amount plus shipping; a missing addend counts as zero.
    Sum(&'static str, &'static str),
}

impl SalesFormula {
    fn evaluate(&self, row: &Row) -> f64 {
        match self {
            SalesFormula::Field(source) => source.number(row),
            SalesFormula::Sum(amount, shipping) => {
                FieldSource::Key(*amount).number(row) + FieldSource::Key(*shipping).number(row)
            }
        }
    }
}

/// Column mapping for one export format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub product_name: FieldSource,
    pub option: FieldSource,
    pub quantity: FieldSource,
    pub sales: SalesFormula,
}

/// The normalized fields of one row.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFields {
    pub product_name: String,
    pub option: String,
    pub quantity: i64,
    pub sales: f64,
}

impl FieldRule {
    /// Resolve a row. Missing or malformed cells default to `""` / `0`.
    #[must_use]
    pub fn resolve(&self, row: &Row) -> ResolvedFields {
        ResolvedFields {
            product_name: self.product_name.text(row),
            option: self.option.text(row),
            quantity: self.quantity.number(row).trunc() as i64,
            sales: self.sales.evaluate(row),
        }
    }
}

/// Welfare-mall and shopping-mall exports.
pub const MALL_RULE: FieldRule = FieldRule {
    name: "mall",
    product_name: FieldSource::Key("상품명"),
    option: FieldSource::Key("단품명"),
    quantity: FieldSource::Key("수량"),
    sales: SalesFormula::Field(FieldSource::Key("결제금액")),
};

/// Integrated order lists; sales include shipping.
pub const INTEGRATED_ORDER_RULE: FieldRule = FieldRule {
    name: "integrated-order-list",
    product_name: FieldSource::Key("상품명"),
    option: FieldSource::Key("옵션"),
    quantity: FieldSource::Key("수량"),
    sales: SalesFormula::Sum("상품 결제금액", "배송비"),
};

/// Reserved-date order lists; product amount only.
pub const RESERVED_DATE_ORDER_RULE: FieldRule = FieldRule {
    name: "reserved-date-order-list",
    product_name: FieldSource::Key("상품명"),
    option: FieldSource::Key("옵션"),
    quantity: FieldSource::Key("수량"),
    sales: SalesFormula::Field(FieldSource::Key("상품 결제금액")),
};

/// Marketplace-pay exports; sales include the shipping total.
pub const MARKETPLACE_PAY_RULE: FieldRule = FieldRule {
    name: "marketplace-pay",
    product_name: FieldSource::Key("상품명"),
    option: FieldSource::Key("옵션정보"),
    quantity: FieldSource::Key("수량"),
    sales: SalesFormula::Sum("최종 상품별 총 주문금액", "배송비 합계"),
};

/// Last resort for files no specific rule claims.
pub const FALLBACK_RULE: FieldRule = FieldRule {
    name: "fallback",
    product_name: FieldSource::FirstPresent(&["상품명", "product_name", "productName"]),
    option: FieldSource::FirstPresent(&["옵션", "단품명", "옵션정보", "option"]),
    quantity: FieldSource::FirstPresent(&["수량", "quantity", "qty"]),
    sales: SalesFormula::Field(FieldSource::FirstPresent(&[
        "결제금액",
        "상품 결제금액",
        "최종 상품별 총 주문금액",
        "sales",
        "price",
    ])),
};

/// Which files a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSelector {
    pub channels: &'static [ChannelCode],
    /// Extra substring the file name must contain, if any.
    pub file_name_contains: Option<&'static str>,
}

impl RuleSelector {
    #[must_use]
    pub fn matches(&self, channel: ChannelCode, file_name: &str) -> bool {
        self.channels.contains(&channel)
            && self
                .file_name_contains
                .map_or(true, |marker| file_name.contains(marker))
    }
}

/// Ordered dispatch table from `(channel, file name)` to a [`FieldRule`].
#[derive(Debug, Clone, Default)]
pub struct ResolverTable {
    entries: Vec<(RuleSelector, FieldRule)>,
    fallback: Option<FieldRule>,
}

impl ResolverTable {
    /// An empty table with no fallback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table for the four known channels plus the fallback rule.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_rule(
                RuleSelector {
                    channels: &[ChannelCode::WelfareMall, ChannelCode::ShoppingMall],
                    file_name_contains: None,
                },
                MALL_RULE,
            )
            .with_rule(
                RuleSelector {
                    channels: &[ChannelCode::OrderList],
                    file_name_contains: Some("통합주문목록"),
                },
                INTEGRATED_ORDER_RULE,
            )
            .with_rule(
                RuleSelector {
                    channels: &[ChannelCode::OrderList],
                    file_name_contains: Some("지정일_주문"),
                },
                RESERVED_DATE_ORDER_RULE,
            )
            .with_rule(
                RuleSelector {
                    channels: &[ChannelCode::MarketplacePay],
                    file_name_contains: None,
                },
                MARKETPLACE_PAY_RULE,
            )
            .with_fallback(FALLBACK_RULE)
    }

    /// Append a rule; earlier rules take precedence.
    #[must_use]
    pub fn with_rule(mut self, selector: RuleSelector, rule: FieldRule) -> Self {
        self.entries.push((selector, rule));
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, rule: FieldRule) -> Self {
        self.fallback = Some(rule);
        self
    }

    #[must_use]
    pub fn without_fallback(mut self) -> Self {
        self.fallback = None;
        self
    }

    /// The rule for a file, or `None` when nothing (not even a fallback) applies.
    #[must_use]
    pub fn select(&self, channel: ChannelCode, file_name: &str) -> Option<&FieldRule> {
        self.entries
            .iter()
            .find(|(selector, _)| selector.matches(channel, file_name))
            .map(|(_, rule)| rule)
            .or(self.fallback.as_ref())
    }
}

fn standard_table() -> &'static ResolverTable {
    static TABLE: OnceLock<ResolverTable> = OnceLock::new();
    TABLE.get_or_init(ResolverTable::standard)
}

/// Resolve one row with the standard table. Never fails.
#[must_use]
pub fn resolve(row: &Row, channel: ChannelCode, file_name: &str) -> ResolvedFields {
    standard_table()
        .select(channel, file_name)
        .unwrap_or(&FALLBACK_RULE)
        .resolve(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, CellValue)]) -> Row {
        cells
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_mall_rule() {
        let r = row(&[
            ("상품명", "상품A".into()),
            ("단품명", "옵션1".into()),
            ("수량", CellValue::Int(2)),
            ("결제금액", CellValue::Int(20000)),
        ]);

        for channel in [ChannelCode::WelfareMall, ChannelCode::ShoppingMall] {
            let fields = resolve(&r, channel, "복지_240331.xlsx");
            assert_eq!(fields.product_name, "상품A");
            assert_eq!(fields.option, "옵션1");
            assert_eq!(fields.quantity, 2);
            assert_eq!(fields.sales, 20000.0);
        }
    }

    #[test]
    fn test_integrated_order_adds_shipping() {
        let r = row(&[
            ("상품명", "상품C".into()),
            ("옵션", "옵션X".into()),
            ("수량", CellValue::Int(2)),
            ("상품 결제금액", CellValue::Int(20000)),
            ("배송비", CellValue::Int(3000)),
        ]);

        let fields = resolve(&r, ChannelCode::OrderList, "통합주문목록.20240401.xlsx");
        assert_eq!(fields.sales, 23000.0);

        let fields = resolve(&r, ChannelCode::OrderList, "지정일_주문.20240401.xlsx");
        assert_eq!(fields.sales, 20000.0);
    }

    #[test]
    fn test_missing_shipping_counts_as_zero() {
        let r = row(&[("상품 결제금액", "12000".into())]);
        let fields = resolve(&r, ChannelCode::OrderList, "통합주문목록.20240401.xlsx");
        assert_eq!(fields.sales, 12000.0);
        assert_eq!(fields.product_name, "");
        assert_eq!(fields.quantity, 0);
    }

    #[test]
    fn test_marketplace_pay_rule() {
        let r = row(&[
            ("상품명", "상품G".into()),
            ("옵션정보", "옵션P".into()),
            ("수량", "2".into()),
            ("최종 상품별 총 주문금액", CellValue::Int(30000)),
            ("배송비 합계", CellValue::Int(3000)),
        ]);

        let fields = resolve(&r, ChannelCode::MarketplacePay, "네이버페이_구매확정내역.xlsx");
        assert_eq!(fields.option, "옵션P");
        assert_eq!(fields.quantity, 2);
        assert_eq!(fields.sales, 33000.0);
    }

    #[test]
    fn test_order_list_without_known_name_uses_fallback() {
        let r = row(&[
            ("product_name", "Widget".into()),
            ("단품명", "Blue".into()),
            ("qty", CellValue::Float(3.0)),
            ("price", "1500".into()),
        ]);

        let fields = resolve(&r, ChannelCode::OrderList, "orders.xlsx");
        assert_eq!(fields.product_name, "Widget");
        assert_eq!(fields.option, "Blue");
        assert_eq!(fields.quantity, 3);
        assert_eq!(fields.sales, 1500.0);
    }

    #[test]
    fn test_fallback_skips_blank_candidates() {
        let r = row(&[
            ("상품명", "".into()),
            ("productName", "Gadget".into()),
            ("결제금액", "".into()),
            ("sales", CellValue::Int(700)),
        ]);

        let fields = FALLBACK_RULE.resolve(&r);
        assert_eq!(fields.product_name, "Gadget");
        assert_eq!(fields.sales, 700.0);
    }

    #[test]
    fn test_fallback_skips_zero_and_false() {
        let r = row(&[
            ("상품명", "Widget".into()),
            ("결제금액", CellValue::Int(0)),
            ("상품 결제금액", CellValue::Int(5000)),
            ("수량", CellValue::Float(0.0)),
            ("quantity", CellValue::Int(3)),
            ("옵션", CellValue::Bool(false)),
            ("option", "Red".into()),
        ]);

        let fields = resolve(&r, ChannelCode::OrderList, "orders.xlsx");
        assert_eq!(fields.sales, 5000.0);
        assert_eq!(fields.quantity, 3);
        assert_eq!(fields.option, "Red");
    }

    #[test]
    fn test_zero_and_false_text_is_empty() {
        let r = row(&[
            ("상품명", CellValue::Int(0)),
            ("단품명", CellValue::Bool(false)),
            ("수량", CellValue::Int(0)),
        ]);

        let fields = MALL_RULE.resolve(&r);
        assert_eq!(fields.product_name, "");
        assert_eq!(fields.option, "");
        assert_eq!(fields.quantity, 0);
    }

    #[test]
    fn test_malformed_values_default() {
        let r = row(&[
            ("상품명", CellValue::Int(1234)),
            ("단품명", CellValue::Float(1.5)),
            ("수량", "two".into()),
            ("결제금액", "1,000".into()),
        ]);

        let fields = MALL_RULE.resolve(&r);
        assert_eq!(fields.product_name, "1234");
        assert_eq!(fields.option, "1.5");
        assert_eq!(fields.quantity, 0);
        assert_eq!(fields.sales, 0.0);
    }

    #[test]
    fn test_fractional_quantity_truncates() {
        let r = row(&[("수량", CellValue::Float(2.9))]);
        assert_eq!(MALL_RULE.resolve(&r).quantity, 2);
    }

    #[test]
    fn test_table_selection_order() {
        let table = ResolverTable::standard();
        let pick = |channel, name| table.select(channel, name).map(|rule| rule.name);

        assert_eq!(pick(ChannelCode::WelfareMall, "x.xlsx"), Some("mall"));
        assert_eq!(
            pick(ChannelCode::OrderList, "통합주문목록.20240331.xlsx"),
            Some("integrated-order-list")
        );
        assert_eq!(
            pick(ChannelCode::OrderList, "지정일_주문.20240331.xlsx"),
            Some("reserved-date-order-list")
        );
        assert_eq!(pick(ChannelCode::MarketplacePay, "x.xlsx"), Some("marketplace-pay"));
        assert_eq!(pick(ChannelCode::OrderList, "x.xlsx"), Some("fallback"));
    }

    #[test]
    fn test_table_without_fallback() {
        let table = ResolverTable::standard().without_fallback();
        assert!(table.select(ChannelCode::OrderList, "x.xlsx").is_none());
        assert!(ResolverTable::new().select(ChannelCode::WelfareMall, "x").is_none());
    }
}
