//! Reads widget options from a mount element's attributes.
//!
//! Recognised attributes (plain and `data-` prefixed):
//! - `key` / `data-key`: publishable key
//! - `nocvc` / `data-nocvc`: presence disables CVC collection
//! - `notoken` / `data-notoken`: presence disables token collection
//!
//! The host form is the closest enclosing `<form>`.

use crate::domain::foundation::NodeId;
use crate::domain::widget::WidgetOptions;
use crate::ports::{Document, Selector};

/// Attribute-sourced options for one mount element.
pub struct MountAttributes;

impl MountAttributes {
    pub fn read(document: &dyn Document, element: NodeId) -> WidgetOptions {
        let mut options = WidgetOptions::new();

        options.publishable_key = ["key", "data-key"]
            .into_iter()
            .find_map(|name| document.attribute(element, name));

        if has_flag(document, element, "nocvc") {
            options.collect_cvc = Some(false);
        }
        if has_flag(document, element, "notoken") {
            options.collect_token = Some(false);
        }

        options.host_form = document.closest_ancestor(element, &Selector::tag("form"));
        options
    }
}

fn has_flag(document: &dyn Document, element: NodeId, name: &str) -> bool {
    document.has_attribute(element, name) || document.has_attribute(element, &format!("data-{}", name))
}
