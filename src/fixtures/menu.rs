//! Menu Fixtures

use std::collections::BTreeMap;

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    catalog::{ComboTier, MenuCatalog, MenuCategory, MenuItem, TierSlot, TierSlotKind},
    fixtures::FixtureError,
};

/// Menu file
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Currency code for every price in the file
    pub currency: String,

    /// Categories in display order
    #[serde(default)]
    pub categories: Vec<CategoryFixture>,

    /// Combo tier definitions
    #[serde(default)]
    pub combo_tiers: Vec<ComboTierFixture>,
}

/// Menu category
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    /// Category key
    pub key: String,

    /// Items in display order
    #[serde(default)]
    pub items: Vec<MenuItemFixture>,
}

/// Menu item
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Item name
    pub name: String,

    /// Price in major units
    pub price: i64,

    /// Combo price in major units, by tier code
    #[serde(default)]
    pub combos: BTreeMap<String, i64>,
}

/// Combo tier definition
#[derive(Debug, Deserialize)]
pub struct ComboTierFixture {
    /// Tier code
    pub code: String,

    /// Display label
    pub label: String,

    /// Side slots in fill order
    #[serde(default)]
    pub slots: Vec<TierSlotFixture>,
}

/// Kind of a combo tier slot
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierSlotKindFixture {
    /// Fries
    Fries,

    /// Drink
    Drink,

    /// Nuggets
    Nuggets,

    /// Keyword list, given in `keywords`
    Keywords,
}

/// Combo tier slot
#[derive(Debug, Deserialize)]
pub struct TierSlotFixture {
    /// Slot kind
    pub kind: TierSlotKindFixture,

    /// Keywords for `keywords` slots
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Human-readable description
    pub description: String,

    /// Menu name to price the slot with
    #[serde(default)]
    pub retail_name: Option<String>,
}

impl TryFrom<TierSlotFixture> for TierSlot {
    type Error = FixtureError;

    fn try_from(fixture: TierSlotFixture) -> Result<Self, Self::Error> {
        let kind = match fixture.kind {
            TierSlotKindFixture::Fries => TierSlotKind::Fries,
            TierSlotKindFixture::Drink => TierSlotKind::Drink,
            TierSlotKindFixture::Nuggets => TierSlotKind::Nuggets,
            TierSlotKindFixture::Keywords if fixture.keywords.is_empty() => {
                return Err(FixtureError::InvalidTierSlot(fixture.description));
            }
            TierSlotKindFixture::Keywords => TierSlotKind::Keywords(fixture.keywords),
        };

        Ok(TierSlot {
            kind,
            description: fixture.description,
            retail_name: fixture.retail_name,
        })
    }
}

impl MenuFixture {
    /// Convert to a [`MenuCatalog`] priced in `currency`
    ///
    /// # Errors
    ///
    /// Returns an error if a keyword slot has no keywords.
    pub fn into_menu<'a>(
        self,
        currency: &'static Currency,
    ) -> Result<MenuCatalog<'a>, FixtureError> {
        let categories = self
            .categories
            .into_iter()
            .map(|category| MenuCategory {
                key: category.key,
                items: category
                    .items
                    .into_iter()
                    .map(|item| MenuItem {
                        name: item.name,
                        price: Money::from_major(item.price, currency),
                        combos: item
                            .combos
                            .into_iter()
                            .map(|(code, price)| (code, Money::from_major(price, currency)))
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let tiers: Vec<ComboTier> = self
            .combo_tiers
            .into_iter()
            .map(|tier| -> Result<ComboTier, FixtureError> {
                Ok(ComboTier {
                    code: tier.code,
                    label: tier.label,
                    slots: tier
                        .slots
                        .into_iter()
                        .map(TierSlot::try_from)
                        .collect::<Result<_, _>>()?,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(MenuCatalog::new(categories, tiers))
    }
}
