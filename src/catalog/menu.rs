//! Menu Catalog

use std::collections::BTreeMap;

use rusty_money::{Money, iso::Currency};

use crate::names::{self, is_drink, is_fries, is_nuggets};

/// Category key that holds combo-tier metadata rather than orderable items.
pub const RESERVED_CATEGORY: &str = "combo_tiers";

/// An orderable menu entry.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<'a> {
    /// Display name
    pub name: String,

    /// À la carte price
    pub price: Money<'a, Currency>,

    /// Combo price by tier code, for items that can be upgraded to a combo meal
    pub combos: BTreeMap<String, Money<'a, Currency>>,
}

impl<'a> MenuItem<'a> {
    /// Create a menu item without combo tiers.
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            price,
            combos: BTreeMap::new(),
        }
    }

    /// Attach a combo tier price.
    #[must_use]
    pub fn with_combo(mut self, code: impl Into<String>, price: Money<'a, Currency>) -> Self {
        self.combos.insert(code.into(), price);
        self
    }
}

/// A named group of menu items.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuCategory<'a> {
    /// Category key (e.g. `main_menu`)
    pub key: String,

    /// Items in display order
    pub items: Vec<MenuItem<'a>>,
}

/// How a combo tier side slot recognises an ordered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierSlotKind {
    /// Fries of any size.
    Fries,

    /// Any drink.
    Drink,

    /// Nuggets of any count.
    Nuggets,

    /// Any item whose name contains one of these keywords.
    Keywords(Vec<String>),
}

/// A side item included in a combo tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSlot {
    /// Matcher for ordered items
    pub kind: TierSlotKind,

    /// Human-readable description (e.g. `中薯`)
    pub description: String,

    /// Menu name used to price this slot when it is granted as an extra
    pub retail_name: Option<String>,
}

impl TierSlot {
    /// Create a slot.
    pub fn new(kind: TierSlotKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            retail_name: None,
        }
    }

    /// Set the menu name used to look up this slot's retail price.
    #[must_use]
    pub fn with_retail_name(mut self, name: impl Into<String>) -> Self {
        self.retail_name = Some(name.into());
        self
    }

    /// Whether an ordered item with this name can fill the slot.
    pub fn accepts(&self, name: &str) -> bool {
        match &self.kind {
            TierSlotKind::Fries => is_fries(name),
            TierSlotKind::Drink => is_drink(name),
            TierSlotKind::Nuggets => is_nuggets(name),
            TierSlotKind::Keywords(keywords) => {
                let name = names::normalize(name);
                keywords
                    .iter()
                    .any(|keyword| name.contains(&names::normalize(keyword)))
            }
        }
    }

    /// What this slot would cost bought on its own, if the menu says.
    ///
    /// Drink slots are valued at the cheapest drink on the menu.
    pub fn retail_price<'a>(&self, menu: &MenuCatalog<'a>) -> Option<Money<'a, Currency>> {
        if self.kind == TierSlotKind::Drink {
            return menu.cheapest_drink().map(|drink| drink.price);
        }

        let lookup = match (&self.retail_name, &self.kind) {
            (Some(name), _) => name.as_str(),
            (None, TierSlotKind::Keywords(keywords)) => keywords
                .first()
                .map_or(self.description.as_str(), String::as_str),
            (None, _) => self.description.as_str(),
        };

        menu.lookup_price(lookup)
    }
}

/// A combo meal tier: a main item plus an ordered list of sides at a flat price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboTier {
    /// Tier code as used in item combo mappings (e.g. `A`)
    pub code: String,

    /// Display label
    pub label: String,

    /// Side slots, filled in order
    pub slots: Vec<TierSlot>,
}

/// The menu: item categories plus combo tier definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuCatalog<'a> {
    categories: Vec<MenuCategory<'a>>,
    tiers: Vec<ComboTier>,
}

impl<'a> MenuCatalog<'a> {
    /// Create a menu from categories and combo tiers.
    pub fn new(categories: Vec<MenuCategory<'a>>, tiers: Vec<ComboTier>) -> Self {
        Self { categories, tiers }
    }

    /// Categories in catalog order, including the reserved metadata category.
    pub fn categories(&self) -> &[MenuCategory<'a>] {
        &self.categories
    }

    /// Orderable items in catalog order.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem<'a>> {
        self.categories
            .iter()
            .filter(|category| category.key != RESERVED_CATEGORY)
            .flat_map(|category| category.items.iter())
    }

    /// First orderable item whose name fuzzy-matches `name`.
    pub fn lookup(&self, name: &str) -> Option<&MenuItem<'a>> {
        self.items().find(|item| names::matches(name, &item.name))
    }

    /// Price of the first orderable item whose name fuzzy-matches `name`.
    pub fn lookup_price(&self, name: &str) -> Option<Money<'a, Currency>> {
        self.lookup(name).map(|item| item.price)
    }

    /// Cheapest drink on the menu; the earliest listed wins a tie.
    pub fn cheapest_drink(&self) -> Option<&MenuItem<'a>> {
        self.items()
            .filter(|item| is_drink(&item.name))
            .min_by_key(|item| item.price.to_minor_units())
    }

    /// Combo tier definition by code.
    pub fn tier(&self, code: &str) -> Option<&ComboTier> {
        self.tiers.iter().find(|tier| tier.code == code)
    }

    /// All combo tier definitions.
    pub fn tiers(&self) -> &[ComboTier] {
        &self.tiers
    }

    /// Every price quoted by the menu, including combo prices.
    pub(crate) fn prices(&self) -> impl Iterator<Item = &Money<'a, Currency>> {
        self.items()
            .flat_map(|item| std::iter::once(&item.price).chain(item.combos.values()))
    }
}
