//! Configuration for the list view model.
//!
//! The resource type stamped onto new todo items normally comes from the
//! page's `itemResourceType` property. It is passed through verbatim, never
//! validated.

use tracing::debug;

use crate::types::Resource;

pub const DEFAULT_ITEM_RESOURCE_TYPE: &str = "todo/components/item";
pub const ITEM_RESOURCE_TYPE_ENV: &str = "TODO_ITEM_RESOURCE_TYPE";
pub const ITEM_RESOURCE_TYPE_PROPERTY: &str = "itemResourceType";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub item_resource_type: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            item_resource_type: DEFAULT_ITEM_RESOURCE_TYPE.to_string(),
        }
    }
}

impl ViewConfig {
    pub fn from_env() -> Self {
        match std::env::var(ITEM_RESOURCE_TYPE_ENV) {
            Ok(item_resource_type) => Self { item_resource_type },
            Err(_) => Self::default(),
        }
    }

    /// Page-level `itemResourceType` wins over this config.
    pub fn for_page(&self, page: &Resource) -> Self {
        match page
            .properties
            .get(ITEM_RESOURCE_TYPE_PROPERTY)
            .and_then(|v| v.as_str())
        {
            Some(item_resource_type) => {
                debug!(page = %page.path, item_resource_type, "using page item resource type");
                Self {
                    item_resource_type: item_resource_type.to_string(),
                }
            }
            None => self.clone(),
        }
    }
}
