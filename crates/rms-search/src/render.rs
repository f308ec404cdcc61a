//! Result containers and the per-type render templates

use crate::types::{
    BadgeColor, CustomerRecord, MenuItemRecord, OrderRecord, OrderStatus, SearchResult,
    SearchType, SelectionEvent,
};
use std::collections::BTreeMap;

pub const NO_RESULTS: &str = "No results found";

/// Glyph shown in place of a menu item image
pub const IMAGE_PLACEHOLDER: char = '▣';

/// Leading element of a rendered result row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leading {
    /// Initial of the customer's name
    Avatar(char),
    /// Image reference sent by the server
    Image(String),
    ImagePlaceholder,
    Badge { label: String, color: BadgeColor },
}

/// Display-ready fields of one result row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub leading: Leading,
    pub title: String,
    pub detail: String,
}

impl ResultView {
    pub fn for_result(result: &SearchResult) -> Self {
        match result {
            SearchResult::Customer(customer) => Self::customer(customer),
            SearchResult::MenuItem(item) => Self::menu_item(item),
            SearchResult::Order(order) => Self::order(order),
        }
    }

    fn customer(customer: &CustomerRecord) -> Self {
        Self {
            leading: Leading::Avatar(customer.name.chars().next().unwrap_or('?')),
            title: customer.name.clone(),
            detail: format!("{} • {}", customer.phone, customer.email),
        }
    }

    fn menu_item(item: &MenuItemRecord) -> Self {
        let leading = match item.image() {
            Some(image) => Leading::Image(image.to_string()),
            None => Leading::ImagePlaceholder,
        };
        Self {
            leading,
            title: item.name.clone(),
            detail: format!("${} • {}", item.price, item.category),
        }
    }

    fn order(order: &OrderRecord) -> Self {
        let label = order
            .order_status()
            .map(|status| status.label().to_string())
            .unwrap_or_else(|| order.status.clone());
        let detail = match &order.total_price {
            Some(total) => format!("{label} • ${total}"),
            None => label.clone(),
        };
        Self {
            leading: Leading::Badge {
                label,
                color: OrderStatus::badge_color_for(&order.status),
            },
            title: format!("Order #{} - {}", order.id, order.customer),
            detail,
        }
    }
}

/// An interactive row: the record it came from and how it looks
#[derive(Debug, Clone, PartialEq)]
pub struct ResultNode {
    pub item: SearchResult,
    pub view: ResultView,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ContainerContent {
    /// Nothing rendered yet
    #[default]
    Blank,
    /// Non-interactive message shown for an empty result set
    Placeholder(String),
    Results(Vec<ResultNode>),
}

/// Target area for one search type's results
#[derive(Debug, Clone, PartialEq)]
pub struct ResultContainer {
    id: String,
    search_type: SearchType,
    content: ContainerContent,
}

impl ResultContainer {
    pub fn new(search_type: SearchType) -> Self {
        Self {
            id: search_type.container_id(),
            search_type,
            content: ContainerContent::Blank,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    pub fn content(&self) -> &ContainerContent {
        &self.content
    }

    pub fn clear(&mut self) {
        self.content = ContainerContent::Blank;
    }

    /// Interactive nodes; empty when blank or showing the placeholder
    pub fn nodes(&self) -> &[ResultNode] {
        match &self.content {
            ContainerContent::Results(nodes) => nodes,
            _ => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.content {
            ContainerContent::Placeholder(message) => Some(message),
            _ => None,
        }
    }

    /// Number of child nodes, the placeholder included
    pub fn child_count(&self) -> usize {
        match &self.content {
            ContainerContent::Blank => 0,
            ContainerContent::Placeholder(_) => 1,
            ContainerContent::Results(nodes) => nodes.len(),
        }
    }

    /// Build the selection event for the node at `index`
    pub fn activate(&self, index: usize) -> Option<SelectionEvent> {
        self.nodes().get(index).map(|node| SelectionEvent {
            item: node.item.clone(),
            search_type: self.search_type,
        })
    }
}

/// All result containers present on screen, keyed by container id
#[derive(Debug, Clone, Default)]
pub struct ResultBoard {
    containers: BTreeMap<String, ResultContainer>,
}

impl ResultBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board with one container per given type
    pub fn with_types(types: &[SearchType]) -> Self {
        let mut board = Self::new();
        for ty in types {
            board.add_container(*ty);
        }
        board
    }

    pub fn add_container(&mut self, search_type: SearchType) {
        let container = ResultContainer::new(search_type);
        self.containers.insert(container.id.clone(), container);
    }

    pub fn remove_container(&mut self, search_type: SearchType) -> Option<ResultContainer> {
        self.containers.remove(&search_type.container_id())
    }

    pub fn container(&self, search_type: SearchType) -> Option<&ResultContainer> {
        self.containers.get(&search_type.container_id())
    }

    pub fn container_mut(&mut self, search_type: SearchType) -> Option<&mut ResultContainer> {
        self.containers.get_mut(&search_type.container_id())
    }

    pub fn containers(&self) -> impl Iterator<Item = &ResultContainer> {
        self.containers.values()
    }
}

/// Replaces a container's content with a result set
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    placeholder: String,
}

impl Default for ResultRenderer {
    fn default() -> Self {
        Self {
            placeholder: NO_RESULTS.to_string(),
        }
    }
}

impl ResultRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `results` into the container for `search_type`.
    ///
    /// Returns `false` when the board has no such container.
    pub fn render(
        &self,
        board: &mut ResultBoard,
        results: Vec<SearchResult>,
        search_type: SearchType,
    ) -> bool {
        let Some(container) = board.container_mut(search_type) else {
            log::debug!("no container {} on the board", search_type.container_id());
            return false;
        };

        container.clear();
        container.content = if results.is_empty() {
            ContainerContent::Placeholder(self.placeholder.clone())
        } else {
            ContainerContent::Results(
                results
                    .into_iter()
                    .map(|item| {
                        let view = ResultView::for_result(&item);
                        ResultNode { item, view }
                    })
                    .collect(),
            )
        };
        true
    }
}
