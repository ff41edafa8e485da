//! View model for the todo page: item lists plus the bulk actions.
//!
//! # Design
//! The page's children are fetched through a `ChildSource`, the only await
//! point of the builder. Its failure propagates to the caller untouched; no
//! retry and no timeout are applied here, request deadlines belong to the
//! host pipeline.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::action::{
    type_hint, ActionDescriptor, FieldValue, APPLY_TO, BOOLEAN_HINT, CHARSET, DELETE, OPERATION,
    RESOURCE_TYPE, TITLE, UTF_8,
};
use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::filter::FilterContext;
use crate::types::{Resource, COMPLETED};

/// Enumerates the direct children of a resource, in repository order.
#[async_trait]
pub trait ChildSource: Send + Sync {
    async fn children(&self, parent: &Resource) -> Result<Vec<Resource>, ViewError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListModel {
    #[serde(flatten)]
    pub filter: FilterContext,
    pub all_items: Vec<String>,
    pub active_items: Vec<String>,
    pub completed_items: Vec<String>,
    pub add_item_action: ActionDescriptor,
    pub toggle_all_action: ActionDescriptor,
    pub destroy_completed_action: ActionDescriptor,
}

/// Partition the page's children by completion state and build the add,
/// toggle-all and destroy-completed actions.
///
/// The item resource type is taken from `config`, overridden by the page's
/// own `itemResourceType` property when present.
pub async fn build_list_model<S>(
    source: &S,
    page: &Resource,
    filter: &FilterContext,
    config: &ViewConfig,
) -> Result<ListModel, ViewError>
where
    S: ChildSource + ?Sized,
{
    let children = source.children(page).await.inspect_err(|e| {
        warn!(page = %page.path, error = %e, "child enumeration failed");
    })?;

    let mut all_items = Vec::with_capacity(children.len());
    let mut active_items = Vec::new();
    let mut completed_items = Vec::new();
    for child in children {
        if child.is_completed() {
            completed_items.push(child.path.clone());
        } else {
            active_items.push(child.path.clone());
        }
        all_items.push(child.path);
    }

    debug!(
        page = %page.path,
        all = all_items.len(),
        active = active_items.len(),
        completed = completed_items.len(),
        "built list model"
    );

    let config = config.for_page(page);
    Ok(ListModel {
        filter: filter.clone(),
        add_item_action: add_item_action(page, &config),
        toggle_all_action: toggle_all_action(page, &active_items, &completed_items),
        destroy_completed_action: destroy_completed_action(page, &completed_items),
        all_items,
        active_items,
        completed_items,
    })
}

/// `<page>/*` asks the repository to create a node under a generated name.
fn add_item_action(page: &Resource, config: &ViewConfig) -> ActionDescriptor {
    ActionDescriptor::new(format!("{}/*", page.path))
        .field(RESOURCE_TYPE, config.item_resource_type.as_str())
        .field(CHARSET, UTF_8)
        .append(TITLE)
}

/// Completes every active item, or reopens every completed one when nothing
/// is active. With no items at all the data is empty.
fn toggle_all_action(
    page: &Resource,
    active_items: &[String],
    completed_items: &[String],
) -> ActionDescriptor {
    let completed = active_items.is_empty();
    let targets = if completed { completed_items } else { active_items };

    targets
        .iter()
        .fold(ActionDescriptor::new(page.path.as_str()), |action, path| {
            let field = format!("{path}/{COMPLETED}");
            action
                .field(type_hint(&field), BOOLEAN_HINT)
                .field(field, !completed)
        })
}

fn destroy_completed_action(page: &Resource, completed_items: &[String]) -> ActionDescriptor {
    ActionDescriptor::new(page.path.as_str())
        .field(OPERATION, DELETE)
        .field(APPLY_TO, FieldValue::Paths(completed_items.to_vec()))
}
