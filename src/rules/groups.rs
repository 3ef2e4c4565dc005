//! Group flattening.
//!
//! The one structural rule that can grow a document (a group attribute is
//! duplicated onto every child), so it is the one rule the pipeline size-
//! checks.

use crate::ast::{Document, Element, Node};

/// Flatten every `<g>`: copy the group's attributes onto children that don't
/// already define them (child wins), combine transforms, splice the children
/// into the group's place, and drop the group.
pub fn flatten_groups(doc: &mut Document) {
    flatten_in(&mut doc.root);
}

fn flatten_in(parent: &mut Element) {
    let mut i = 0;
    while i < parent.children.len() {
        let is_group = matches!(&parent.children[i], Node::Element(e) if e.is("g"));

        if is_group {
            let Node::Element(mut group) = parent.children.remove(i) else {
                unreachable!()
            };
            push_attributes_down(&mut group);
            let children = std::mem::take(&mut group.children);
            // Splice in place and re-examine from the same index: the
            // spliced children may themselves be groups.
            parent.children.splice(i..i, children);
        } else {
            if let Node::Element(child) = &mut parent.children[i] {
                flatten_in(child);
            }
            i += 1;
        }
    }
}

fn push_attributes_down(group: &mut Element) {
    let attrs = group.attributes.clone();
    let group_transform = group.get_attr("transform").unwrap_or("").to_string();

    for child in group.child_elements_mut() {
        for attr in &attrs {
            let name = attr.name.full_name();
            if !child.has_attr(&name) {
                child.attributes.push(attr.clone());
            }
        }

        if !group_transform.is_empty() {
            let child_transform = child.get_attr("transform").unwrap_or("").to_string();
            let combined = combine_transforms(&group_transform, &child_transform);
            if !combined.is_empty() {
                child.set_attr("transform", combined);
            }
        }
    }
}

/// Concatenate two transform lists, deduplicating identical values.
fn combine_transforms(first: &str, second: &str) -> String {
    if first == second {
        return first.to_string();
    }
    if second.is_empty() {
        return first.to_string();
    }
    format!("{} {}", first, second)
}
