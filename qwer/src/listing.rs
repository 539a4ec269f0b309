use std::collections::btree_map;

use crate::command::Command;

/// Depth-first walk over the runnable commands below a command, yielding each
/// one's full space-joined path. Namespaces are descended into but not yielded.
/// Children are visited in name order.
#[derive(Clone)]
pub struct Listing<'a> {
    stack: Vec<(String, btree_map::Values<'a, String, Command>)>,
}

impl<'a> Iterator for Listing<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let (prefix, children) = self.stack.last_mut()?;
            let Some(child) = children.next() else {
                self.stack.pop();
                continue;
            };

            let path = if prefix.is_empty() {
                child.name.clone()
            } else {
                format!("{} {}", prefix, child.name)
            };

            if !child.children.is_empty() {
                self.stack.push((path.clone(), child.children.values()));
            }
            if child.is_runnable() {
                return Some(path);
            }
        }
    }
}

/// List the runnable commands under `command`, prefixing each path with
/// `prefix` (pass `""` for the root).
pub fn list<'a>(command: &'a Command, prefix: &str) -> Listing<'a> {
    Listing {
        stack: vec![(prefix.to_string(), command.children.values())],
    }
}
