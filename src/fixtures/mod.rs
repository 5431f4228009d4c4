//! Fixtures
//!
//! Catalogs and carts stored as YAML, one file per concern:
//! `<base>/{menu,promotions,coupons,carts}/<set>.yml`. Prices are whole
//! major units in the currency named at the top of each file.

use std::{fs, path::PathBuf};

use rusty_money::iso::{Currency, EUR, GBP, TWD, USD};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError, OrderLine},
    catalog::{Coupon, MenuCatalog, MenuItem, Promotion},
    fixtures::{
        carts::CartsFixture, coupons::CouponsFixture, menu::MenuFixture,
        promotions::PromotionsFixture,
    },
    optimizer::Optimizer,
};

pub mod carts;
pub mod coupons;
pub mod menu;
pub mod promotions;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between files of one set
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No priced file loaded yet
    #[error("No menu, promotions or coupons loaded yet; currency unknown")]
    NoCurrency,

    /// Cart line names an item missing from the menu
    #[error("Item not found on the menu: {0}")]
    ItemNotFound(String),

    /// Cart not found
    #[error("Cart not found: {0}")]
    CartNotFound(String),

    /// Bundle slot that is neither an item name nor `drink:<max price>`
    #[error("Invalid bundle slot: {0}")]
    InvalidBundleSlot(String),

    /// Combo tier slot that cannot match anything
    #[error("Invalid combo tier slot: {0}")]
    InvalidTierSlot(String),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Resolve an ISO currency code used in fixture files.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for unsupported codes.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim() {
        "TWD" => Ok(TWD),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// A cart stored in a fixture set.
#[derive(Debug, Clone)]
pub struct NamedCart<'a> {
    /// Cart name, unique within the set
    pub name: String,

    /// The cart
    pub cart: Cart<'a>,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    menu: MenuCatalog<'a>,
    promotions: Vec<Promotion<'a>>,
    coupons: Vec<Coupon<'a>>,
    carts: Vec<NamedCart<'a>>,

    /// Currency shared by every priced file
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            menu: MenuCatalog::default(),
            promotions: Vec::new(),
            coupons: Vec::new(),
            carts: Vec::new(),
            currency: None,
        }
    }

    fn read<T: DeserializeOwned>(&self, category: &str, name: &str) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }

    fn track_currency(&mut self, code: &str) -> Result<&'static Currency, FixtureError> {
        let currency = parse_currency(code)?;

        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(currency),
            None => {
                self.currency = Some(currency);
                Ok(currency)
            }
        }
    }

    /// Load the menu from a YAML fixture file, replacing any menu loaded before
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a combo tier
    /// slot is invalid, or if its currency differs from files already loaded.
    pub fn load_menu(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: MenuFixture = self.read("menu", name)?;
        let currency = self.track_currency(&fixture.currency)?;

        self.menu = fixture.into_menu(currency)?;

        Ok(self)
    }

    /// Load promotions from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if its
    /// currency differs from files already loaded.
    pub fn load_promotions(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: PromotionsFixture = self.read("promotions", name)?;
        let currency = self.track_currency(&fixture.currency)?;

        self.promotions.extend(fixture.into_promotions(currency));

        Ok(self)
    }

    /// Load coupons from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a bundle slot
    /// is invalid, or if its currency differs from files already loaded.
    pub fn load_coupons(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CouponsFixture = self.read("coupons", name)?;
        let currency = self.track_currency(&fixture.currency)?;

        self.coupons.extend(fixture.into_coupons(currency)?);

        Ok(self)
    }

    /// Load carts from a YAML fixture file. Lines take their price and combo
    /// tiers from the menu, so the menu must be loaded first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if no currency
    /// is known yet, or if a line names an item missing from the menu.
    pub fn load_carts(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CartsFixture = self.read("carts", name)?;
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        for cart_fixture in fixture.carts {
            let lines = cart_fixture
                .lines
                .iter()
                .map(|line| {
                    self.menu_item(&line.item)
                        .map(|item| OrderLine::from_menu_item(item, line.quantity))
                        .ok_or_else(|| FixtureError::ItemNotFound(line.item.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;

            self.carts.push(NamedCart {
                name: cart_fixture.name,
                cart: Cart::with_lines(lines, currency)?,
            });
        }

        Ok(self)
    }

    /// Load a complete fixture set (menu, promotions, coupons and carts with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_menu(name)?
            .load_promotions(name)?
            .load_coupons(name)?
            .load_carts(name)?;

        Ok(fixture)
    }

    /// Exact name match first, then the first fuzzy match.
    fn menu_item(&self, name: &str) -> Option<&MenuItem<'a>> {
        self.menu
            .items()
            .find(|item| item.name == name)
            .or_else(|| self.menu.lookup(name))
    }

    /// Get a cart by name
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is not found.
    pub fn cart(&self, name: &str) -> Result<&Cart<'a>, FixtureError> {
        self.carts
            .iter()
            .find(|named| named.name == name)
            .map(|named| &named.cart)
            .ok_or_else(|| FixtureError::CartNotFound(name.to_string()))
    }

    /// Get all carts
    pub fn carts(&self) -> &[NamedCart<'a>] {
        &self.carts
    }

    /// Get the menu
    pub fn menu(&self) -> &MenuCatalog<'a> {
        &self.menu
    }

    /// Get all promotions
    pub fn promotions(&self) -> &[Promotion<'a>] {
        &self.promotions
    }

    /// Get all coupons
    pub fn coupons(&self) -> &[Coupon<'a>] {
        &self.coupons
    }

    /// An optimizer over the loaded catalogs with the default configuration
    pub fn optimizer(&self) -> Optimizer<'_, 'a> {
        Optimizer::new(&self.menu, &self.promotions, &self.coupons)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no priced file has been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
