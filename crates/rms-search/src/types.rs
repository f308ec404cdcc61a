//! Search types, result records and selection events

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which remote endpoint and render template a search uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Customers,
    Menu,
    Orders,
}

impl SearchType {
    pub const ALL: &'static [SearchType] =
        &[SearchType::Customers, SearchType::Menu, SearchType::Orders];

    /// Parse the discriminator attached to a search input.
    ///
    /// Returns `None` for anything that is not a known search type; callers
    /// treat that as a silent no-op.
    pub fn from_discriminator(value: &str) -> Option<Self> {
        match value {
            "customers" => Some(SearchType::Customers),
            "menu" => Some(SearchType::Menu),
            "orders" => Some(SearchType::Orders),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Customers => "customers",
            SearchType::Menu => "menu",
            SearchType::Orders => "orders",
        }
    }

    /// Human-readable tab label
    pub fn label(&self) -> &'static str {
        match self {
            SearchType::Customers => "Customers",
            SearchType::Menu => "Menu",
            SearchType::Orders => "Orders",
        }
    }

    /// Identifier of the results container this type renders into
    pub fn container_id(&self) -> String {
        format!("{}-search-results", self.as_str())
    }

    /// Server path queried when no override is configured
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            SearchType::Customers => "/customers/ajax/search/",
            SearchType::Menu => "/menu/ajax/search/",
            SearchType::Orders => "/orders/ajax/search/",
        }
    }

    /// Key the server uses when it wraps the result array in an object
    pub(crate) fn envelope_key(&self) -> &'static str {
        match self {
            SearchType::Customers => "customers",
            SearchType::Menu => "items",
            SearchType::Orders => "orders",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = crate::SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_discriminator(s).ok_or_else(|| crate::SearchError::UnknownType(s.to_string()))
    }
}

/// The text and type a request was dispatched for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub search_type: SearchType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl MenuItemRecord {
    /// Image reference, if the server sent a usable one
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|image| !image.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: u64,
    pub customer: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Decimal>,
}

impl OrderRecord {
    pub fn order_status(&self) -> Option<OrderStatus> {
        self.status.parse().ok()
    }
}

/// One record returned by a search endpoint; the variant follows the search type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    Customer(CustomerRecord),
    MenuItem(MenuItemRecord),
    Order(OrderRecord),
}

impl SearchResult {
    pub fn search_type(&self) -> SearchType {
        match self {
            SearchResult::Customer(_) => SearchType::Customers,
            SearchResult::MenuItem(_) => SearchType::Menu,
            SearchResult::Order(_) => SearchType::Orders,
        }
    }

    /// Short display name used in toasts and plain output
    pub fn name(&self) -> String {
        match self {
            SearchResult::Customer(customer) => customer.name.clone(),
            SearchResult::MenuItem(item) => item.name.clone(),
            SearchResult::Order(order) => format!("Order #{}", order.id),
        }
    }
}

/// Emitted once per activation of a rendered result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionEvent {
    pub item: SearchResult,
    #[serde(rename = "type")]
    pub search_type: SearchType,
}

/// Badge colours, named after the web app's stylesheet classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Warning,
    Info,
    Primary,
    Success,
    Danger,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: &'static [OrderStatus] = &[
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn badge_color(&self) -> BadgeColor {
        match self {
            OrderStatus::Pending => BadgeColor::Warning,
            OrderStatus::Confirmed => BadgeColor::Info,
            OrderStatus::Preparing => BadgeColor::Primary,
            OrderStatus::Ready | OrderStatus::Delivered => BadgeColor::Success,
            OrderStatus::Cancelled => BadgeColor::Danger,
        }
    }

    /// Next step in the kitchen workflow; delivered and cancelled orders are final
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Badge colour for a raw status string; unknown statuses get `Secondary`
    pub fn badge_color_for(status: &str) -> BadgeColor {
        status
            .parse::<OrderStatus>()
            .map(|status| status.badge_color())
            .unwrap_or(BadgeColor::Secondary)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = crate::SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| crate::SearchError::UnknownStatus(s.to_string()))
    }
}
