//! Commerce catalogue access for the store components.
//!
//! Two backends feed the product grid: the commerce engine itself (live
//! prices for the first region) and the CMS's synced product collection.
//! Both reduce to the same [`Product`] summary.

use crate::error::BlockResult;
use crate::upstream::Upstream;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Shown when a product has no usable price.
pub const PRICE_TBD: &str = "Price TBD";

/// Product summary as stored in a grid's `resolvedProducts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub thumbnail: String,
    pub price: String,
}

impl Product {
    /// Storefront link of the product, `#` without a handle.
    pub fn href(&self) -> String {
        if self.handle.is_empty() {
            "#".to_string()
        } else {
            format!("/store/{}", self.handle)
        }
    }
}

/// Which backend a product grid reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Live catalogue from the commerce engine.
    #[default]
    Medusa,
    /// Products synced into the CMS.
    Strapi,
}

impl CatalogSource {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "medusa" => Some(Self::Medusa),
            "strapi" => Some(Self::Strapi),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Medusa => "medusa",
            Self::Strapi => "strapi",
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lists products from one backend.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Up to `limit` products, newest first where the backend orders them.
    async fn products(&self, limit: usize) -> BlockResult<Vec<Product>>;
}

/// One product source per [`CatalogSource`].
#[derive(Clone)]
pub struct Catalog {
    medusa: Arc<dyn ProductSource>,
    strapi: Arc<dyn ProductSource>,
}

impl Catalog {
    pub fn new(medusa: Arc<dyn ProductSource>, strapi: Arc<dyn ProductSource>) -> Self {
        Self { medusa, strapi }
    }

    /// A catalogue with no products in either backend.
    pub fn empty() -> Self {
        let none: Arc<dyn ProductSource> = Arc::new(StaticProducts::default());
        Self::new(Arc::clone(&none), none)
    }

    pub fn source(&self, which: CatalogSource) -> &dyn ProductSource {
        match which {
            CatalogSource::Medusa => self.medusa.as_ref(),
            CatalogSource::Strapi => self.strapi.as_ref(),
        }
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog").finish_non_exhaustive()
    }
}

/// A fixed product list, truncated to the requested limit.
#[derive(Debug, Clone, Default)]
pub struct StaticProducts(pub Vec<Product>);

#[async_trait]
impl ProductSource for StaticProducts {
    async fn products(&self, limit: usize) -> BlockResult<Vec<Product>> {
        Ok(self.0.iter().take(limit).cloned().collect())
    }
}

// ── Pricing ───────────────────────────────────────────────────────

/// A product variant as the commerce engine returns it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Variant {
    pub calculated_price: Option<CalculatedPrice>,
    pub prices: Vec<VariantPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CalculatedPrice {
    pub calculated_amount: Option<f64>,
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VariantPrice {
    pub amount: Option<f64>,
    pub currency_code: Option<String>,
}

/// Cheapest price across all variants, calculated or listed, formatted in
/// its currency. Amounts are in minor units.
pub fn format_product_price(variants: &[Variant]) -> String {
    let mut cheapest: Option<(f64, &str)> = None;
    for variant in variants {
        if let Some(calculated) = &variant.calculated_price {
            consider(
                &mut cheapest,
                calculated.calculated_amount,
                calculated.currency_code.as_deref(),
            );
        }
        for price in &variant.prices {
            consider(&mut cheapest, price.amount, price.currency_code.as_deref());
        }
    }

    match cheapest {
        Some((amount, code)) => format_money(amount, code),
        None => PRICE_TBD.to_string(),
    }
}

fn consider<'a>(cheapest: &mut Option<(f64, &'a str)>, amount: Option<f64>, code: Option<&'a str>) {
    if let Some(amount) = amount
        && cheapest.is_none_or(|(best, _)| amount < best)
    {
        *cheapest = Some((amount, code.filter(|c| !c.is_empty()).unwrap_or("usd")));
    }
}

/// Formats `minor` units of `currency` as an en-US price (`$1,234.50`).
pub fn format_money(minor: f64, currency: &str) -> String {
    let code = currency.to_ascii_uppercase();
    let symbol = match code.as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "CAD" => "CA$".to_string(),
        "AUD" => "A$".to_string(),
        _ => format!("{code} "),
    };

    let cents = minor.round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!(
        "{sign}{symbol}{}.{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Medusa ────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RegionList {
    regions: Vec<Region>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Region {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MedusaProductList {
    products: Vec<MedusaProduct>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MedusaProduct {
    id: String,
    title: String,
    handle: String,
    thumbnail: Option<String>,
    images: Vec<MedusaImage>,
    variants: Vec<Variant>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MedusaImage {
    url: String,
}

impl From<MedusaProduct> for Product {
    fn from(p: MedusaProduct) -> Self {
        let thumbnail = p
            .thumbnail
            .filter(|t| !t.is_empty())
            .or_else(|| p.images.into_iter().next().map(|i| i.url))
            .unwrap_or_default();
        Product {
            price: format_product_price(&p.variants),
            id: p.id,
            title: p.title,
            handle: p.handle,
            thumbnail,
        }
    }
}

/// Store API client of the commerce engine.
#[derive(Debug, Clone)]
pub struct MedusaProducts {
    upstream: Upstream,
    publishable_key: String,
}

impl MedusaProducts {
    /// `publishable_key` may be empty; it is only sent when set.
    pub fn new(base_url: &str, publishable_key: &str, timeout: Duration) -> BlockResult<Self> {
        Ok(Self {
            upstream: Upstream::new(base_url, timeout)?,
            publishable_key: publishable_key.to_string(),
        })
    }

    fn headers(&self) -> Vec<(&'static str, &str)> {
        if self.publishable_key.is_empty() {
            Vec::new()
        } else {
            vec![("x-publishable-api-key", self.publishable_key.as_str())]
        }
    }

    /// Id of the first region, used as pricing context. Best effort.
    async fn first_region(&self) -> Option<String> {
        match self
            .upstream
            .get_json::<RegionList>("/store/regions", &[], &self.headers())
            .await
        {
            Ok(list) => list.regions.into_iter().next().map(|r| r.id),
            Err(e) => {
                debug!(error = %e, "No pricing region available");
                None
            }
        }
    }
}

#[async_trait]
impl ProductSource for MedusaProducts {
    async fn products(&self, limit: usize) -> BlockResult<Vec<Product>> {
        let mut query = vec![
            ("limit", limit.to_string()),
            ("fields", "+variants.calculated_price".to_string()),
        ];
        if let Some(region) = self.first_region().await.filter(|r| !r.is_empty()) {
            query.push(("region_id", region));
        }

        let list: MedusaProductList = self
            .upstream
            .get_json("/store/products", &query, &self.headers())
            .await?;
        let products: Vec<Product> = list.products.into_iter().map(Product::from).collect();
        info!(count = products.len(), source = "medusa", "Loaded products");
        Ok(products)
    }
}

// ── Strapi ────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SyncedProductList {
    data: Vec<SyncedProduct>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SyncedProduct {
    id: Value,
    medusa_id: Option<String>,
    title: String,
    handle: String,
    thumbnail: Option<String>,
    variants: Vec<Variant>,
}

impl From<SyncedProduct> for Product {
    fn from(p: SyncedProduct) -> Self {
        let id = match (p.medusa_id.filter(|m| !m.is_empty()), p.id) {
            (Some(medusa_id), _) => medusa_id,
            (None, Value::String(s)) => s,
            (None, Value::Null) => String::new(),
            (None, other) => other.to_string(),
        };
        let price = p
            .variants
            .first()
            .and_then(|v| v.prices.first())
            .and_then(|price| price.amount)
            .map_or_else(|| PRICE_TBD.to_string(), |amount| format!("${:.2}", amount / 100.0));
        Product {
            id,
            title: p.title,
            handle: p.handle,
            thumbnail: p.thumbnail.unwrap_or_default(),
            price,
        }
    }
}

/// The CMS's synced copy of the catalogue.
#[derive(Debug, Clone)]
pub struct StrapiProducts {
    upstream: Upstream,
}

impl StrapiProducts {
    pub fn new(base_url: &str, timeout: Duration) -> BlockResult<Self> {
        Ok(Self {
            upstream: Upstream::new(base_url, timeout)?,
        })
    }
}

#[async_trait]
impl ProductSource for StrapiProducts {
    async fn products(&self, limit: usize) -> BlockResult<Vec<Product>> {
        let query = [
            ("pagination[pageSize]", limit.to_string()),
            ("sort", "createdAt:desc".to_string()),
        ];
        let list: SyncedProductList = self
            .upstream
            .get_json("/api/medusa-products", &query, &[])
            .await?;
        let products: Vec<Product> = list.data.into_iter().map(Product::from).collect();
        info!(count = products.len(), source = "strapi", "Loaded products");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn variants(v: Value) -> Vec<Variant> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn no_variants_is_tbd() {
        assert_eq!(format_product_price(&[]), PRICE_TBD);
        assert_eq!(format_product_price(&variants(json!([{}]))), PRICE_TBD);
    }

    #[test]
    fn cheapest_of_calculated_and_listed() {
        let v = variants(json!([
            {"calculated_price": {"calculated_amount": 2500, "currency_code": "usd"}},
            {"prices": [{"amount": 1999, "currency_code": "eur"}, {"amount": 3000}]}
        ]));
        assert_eq!(format_product_price(&v), "€19.99");
    }

    #[test]
    fn missing_currency_defaults_to_usd() {
        let v = variants(json!([{"prices": [{"amount": 123456}]}]));
        assert_eq!(format_product_price(&v), "$1,234.56");
    }

    #[test]
    fn money_formatting() {
        assert_eq!(format_money(0.0, "usd"), "$0.00");
        assert_eq!(format_money(100_000_000.0, "USD"), "$1,000,000.00");
        assert_eq!(format_money(505.0, "chf"), "CHF 5.05");
    }

    #[test]
    fn synced_product_prefers_medusa_id() {
        let p: SyncedProduct = serde_json::from_value(json!({
            "id": 7, "medusa_id": "prod_1", "title": "Mug", "handle": "mug",
            "variants": [{"prices": [{"amount": 1250}]}]
        }))
        .unwrap();
        let product = Product::from(p);
        assert_eq!(product.id, "prod_1");
        assert_eq!(product.price, "$12.50");

        let p: SyncedProduct = serde_json::from_value(json!({"id": 7, "title": "Cap"})).unwrap();
        let product = Product::from(p);
        assert_eq!(product.id, "7");
        assert_eq!(product.price, PRICE_TBD);
    }

    #[test]
    fn source_parse() {
        assert_eq!(CatalogSource::parse("strapi"), Some(CatalogSource::Strapi));
        assert_eq!(CatalogSource::parse("shopify"), None);
        assert_eq!(CatalogSource::default().to_string(), "medusa");
    }
}
