//! Verify the view-model builders against JSON test vectors stored in
//! `test-vectors/`.
//!
//! Each vector file lists inputs (resources, selector) and the model the
//! templates should receive. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use async_trait::async_trait;
use todo_view::{
    build_item_model, build_list_model, ChildSource, FilterContext, Resource, ViewConfig, ViewError,
};

struct Children(Vec<Resource>);

#[async_trait]
impl ChildSource for Children {
    async fn children(&self, _parent: &Resource) -> Result<Vec<Resource>, ViewError> {
        Ok(self.0.clone())
    }
}

fn selector(case: &serde_json::Value) -> FilterContext {
    FilterContext::resolve(case["selector"].as_str())
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

#[test]
fn item_test_vectors() {
    let raw = include_str!("../../test-vectors/item.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let resource: Resource = serde_json::from_value(case["resource"].clone()).unwrap();

        let model = build_item_model(&resource, &selector(case));
        let actual = serde_json::to_value(&model).unwrap();
        assert_eq!(actual, case["expected"], "{name}: item model");
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let page: Resource = serde_json::from_value(case["page"].clone()).unwrap();
        let children: Vec<Resource> = serde_json::from_value(case["children"].clone()).unwrap();

        let model = build_list_model(&Children(children), &page, &selector(case), &ViewConfig::default())
            .await
            .unwrap();
        let actual = serde_json::to_value(&model).unwrap();
        assert_eq!(actual, case["expected"], "{name}: list model");

        assert_eq!(
            model.all_items.len(),
            model.active_items.len() + model.completed_items.len(),
            "{name}: partition"
        );
    }
}
