//! Fixed seed values for the first chained period, and the entity lists
//! the views are restricted to

use crate::period::PeriodKey;
use std::collections::BTreeMap;

/// The 70 cities tracked by the national housing price index
pub const CITIES: [&str; 70] = [
    "北京", "唐山", "天津", "秦皇岛", "石家庄", "包头", "太原", "丹东", "呼和浩特", "锦州",
    "沈阳", "吉林", "大连", "牡丹江", "长春", "无锡", "哈尔滨", "徐州", "上海", "扬州",
    "南京", "温州", "杭州", "金华", "宁波", "蚌埠", "合肥", "安庆", "福州", "泉州",
    "厦门", "九江", "南昌", "赣州", "济南", "烟台", "青岛", "济宁", "郑州", "洛阳",
    "武汉", "平顶山", "长沙", "宜昌", "广州", "襄阳", "深圳", "岳阳", "南宁", "常德",
    "海口", "韶关", "重庆", "湛江", "成都", "惠州", "贵阳", "桂林", "昆明", "北海",
    "西安", "三亚", "兰州", "泸州", "西宁", "南充", "银川", "遵义", "乌鲁木齐", "大理",
];

/// Asset classes of the permanent-portfolio split: stocks, treasuries, cash, gold
pub const ASSETS: [&str; 4] = ["股票", "国债", "现金", "黄金"];

/// Month the city index is rebased to
pub const CITY_BASELINE_PERIOD: &str = "202205";
/// City index value at the baseline month
pub const CITY_BASELINE_INDEX: f64 = 100.0;

/// Month before the first asset return file
pub const ASSET_BASELINE_PERIOD: &str = "199912";
/// Starting dollar value of each asset (25% of the $10,000 portfolio)
pub const ASSET_INITIAL_INVESTMENT: f64 = 2_500.0;

/// Starting dollar value of each combined portfolio strategy
pub const PORTFOLIO_INITIAL_INVESTMENT: f64 = 10_000.0;

/// Absolute values for every tracked entity at a fixed epoch.
///
/// Only ever used as the "previous period" for the first chained period.
/// There are no mutating accessors once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    period: PeriodKey,
    values: BTreeMap<String, f64>,
}

impl Baseline {
    /// Build a baseline giving every entity the same starting value
    pub fn uniform<'a>(
        period: PeriodKey,
        entities: impl IntoIterator<Item = &'a str>,
        value: f64,
    ) -> Self {
        Self::from_values(period, entities.into_iter().map(|e| (e.to_string(), value)))
    }

    pub fn from_values(period: PeriodKey, values: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            period,
            values: values.into_iter().collect(),
        }
    }

    /// Every tracked city at index 100 in May 2022
    pub fn cities() -> Self {
        Self::uniform(
            PeriodKey::from_static(CITY_BASELINE_PERIOD),
            CITIES,
            CITY_BASELINE_INDEX,
        )
    }

    /// Every asset class at $2,500 before January 2000
    pub fn assets() -> Self {
        Self::uniform(
            PeriodKey::from_static(ASSET_BASELINE_PERIOD),
            ASSETS,
            ASSET_INITIAL_INVESTMENT,
        )
    }

    pub fn period(&self) -> &PeriodKey {
        &self.period
    }

    pub fn get(&self, entity: &str) -> Option<f64> {
        self.values.get(entity).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, v)| (name.as_str(), *v))
    }
}
