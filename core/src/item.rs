//! View model for a single todo item.

use serde::Serialize;
use tracing::debug;

use crate::action::{type_hint, ActionDescriptor, BOOLEAN_HINT, CHARSET, DELETE, OPERATION, TITLE, UTF_8};
use crate::filter::FilterContext;
use crate::types::{Resource, COMPLETED};

/// Action fields are absent, not null, when the item is hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemModel {
    pub show: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_item_action: Option<ActionDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destroy_item_action: Option<ActionDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_item_action: Option<ActionDescriptor>,
}

/// Decide visibility and, for visible items, build the update, destroy and
/// toggle actions.
///
/// Visibility compares the item's state against `filter.is_completed` for
/// every non-`all` filter. Under `active` that flag is false, so only
/// active items match.
pub fn build_item_model(resource: &Resource, filter: &FilterContext) -> ItemModel {
    let is_completed = resource.is_completed();
    let show = filter.is_all || filter.is_completed == is_completed;
    debug!(path = %resource.path, is_completed, show, "built item model");

    if !show {
        return ItemModel {
            show,
            update_item_action: None,
            destroy_item_action: None,
            toggle_item_action: None,
        };
    }

    ItemModel {
        show,
        update_item_action: Some(update_item_action(resource)),
        destroy_item_action: Some(destroy_item_action(resource)),
        toggle_item_action: Some(toggle_item_action(resource)),
    }
}

fn update_item_action(resource: &Resource) -> ActionDescriptor {
    ActionDescriptor::new(resource.path.as_str())
        .field(CHARSET, UTF_8)
        .append(TITLE)
}

fn destroy_item_action(resource: &Resource) -> ActionDescriptor {
    ActionDescriptor::new(resource.path.as_str()).field(OPERATION, DELETE)
}

fn toggle_item_action(resource: &Resource) -> ActionDescriptor {
    ActionDescriptor::new(resource.path.as_str())
        .field(type_hint(COMPLETED), BOOLEAN_HINT)
        .append(COMPLETED)
}
