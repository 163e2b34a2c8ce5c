//! Catalog classification enums.
//!
//! Wire names (`as_str`) are the upper snake case identifiers stored in the
//! database and accepted in query strings. Labels are the storefront display
//! names shown in listing headers.

use std::fmt;
use std::str::FromStr;

/// Returned when parsing an unknown enum wire name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Top level product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    PhoneCase,
    Tok,
    Airpods,
    Digital,
}

impl ProductCategory {
    pub const ALL: [Self; 4] = [Self::PhoneCase, Self::Tok, Self::Airpods, Self::Digital];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhoneCase => "PHONE_CASE",
            Self::Tok => "TOK",
            Self::Airpods => "AIRPODS",
            Self::Digital => "DIGITAL",
        }
    }

    #[must_use]
    #[allow(clippy::non_ascii_literal)]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PhoneCase => "폰 케이스",
            Self::Tok => "톡",
            Self::Airpods => "에어팟/버즈",
            Self::Digital => "디지털",
        }
    }

    /// Product types listed under this category.
    #[must_use]
    pub fn types(self) -> Vec<ProductType> {
        ProductType::ALL
            .into_iter()
            .filter(|t| t.category() == self)
            .collect()
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "product category",
                value: s.to_owned(),
            })
    }
}

/// Product sub type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductType {
    Hard,
    Jelly,
    Card,
    Zflip,
    Round,
    Heart,
    Acrylic,
    Airpods12,
    AirpodsPro,
    Airpods3,
    Buds,
    AppleWatch,
}

impl ProductType {
    pub const ALL: [Self; 12] = [
        Self::Hard,
        Self::Jelly,
        Self::Card,
        Self::Zflip,
        Self::Round,
        Self::Heart,
        Self::Acrylic,
        Self::Airpods12,
        Self::AirpodsPro,
        Self::Airpods3,
        Self::Buds,
        Self::AppleWatch,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hard => "HARD",
            Self::Jelly => "JELLY",
            Self::Card => "CARD",
            Self::Zflip => "ZFLIP",
            Self::Round => "ROUND",
            Self::Heart => "HEART",
            Self::Acrylic => "ACRYLIC",
            Self::Airpods12 => "AIRPODS_1_2",
            Self::AirpodsPro => "AIRPODS_PRO",
            Self::Airpods3 => "AIRPODS_3",
            Self::Buds => "BUDS",
            Self::AppleWatch => "APPLE_WATCH",
        }
    }

    #[must_use]
    #[allow(clippy::non_ascii_literal)]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hard => "하드",
            Self::Jelly => "젤리",
            Self::Card => "카드 수납",
            Self::Zflip => "Z플립",
            Self::Round => "원형톡",
            Self::Heart => "하트톡",
            Self::Acrylic => "아크릴톡",
            Self::Airpods12 => "에어팟1/2세대",
            Self::AirpodsPro => "에어팟PRO",
            Self::Airpods3 => "에어팟3세대",
            Self::Buds => "버즈",
            Self::AppleWatch => "애플워치",
        }
    }

    #[must_use]
    pub const fn category(self) -> ProductCategory {
        match self {
            Self::Hard | Self::Jelly | Self::Card | Self::Zflip => ProductCategory::PhoneCase,
            Self::Round | Self::Heart | Self::Acrylic => ProductCategory::Tok,
            Self::Airpods12 | Self::AirpodsPro | Self::Airpods3 | Self::Buds => {
                ProductCategory::Airpods
            }
            Self::AppleWatch => ProductCategory::Digital,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "product type",
                value: s.to_owned(),
            })
    }
}

/// Whether a product is offered on the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SellStatus {
    #[default]
    Sell,
    SoldOut,
}

impl SellStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sell => "SELL",
            Self::SoldOut => "SOLD_OUT",
        }
    }
}

impl fmt::Display for SellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SellStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SELL" => Ok(Self::Sell),
            "SOLD_OUT" => Ok(Self::SoldOut),
            other => Err(UnknownVariant {
                kind: "sell status",
                value: other.to_owned(),
            }),
        }
    }
}
