//! Functional subtree builders.
//!
//! Describe the shape of a tree as a composition of [`Builder`] values and
//! build concrete trees later by supplying a context. The toolkit knows
//! nothing about the node type beyond the [`Node`] trait: appending a child
//! and attaching an annotation.
//!
//! ```
//! use fstree::{Builder, Node};
//!
//! #[derive(Debug, Default)]
//! struct Item {
//!     name: String,
//!     children: Vec<Item>,
//!     notes: Vec<String>,
//! }
//!
//! impl Node<String> for Item {
//!     fn append(&mut self, child: Self) {
//!         self.children.push(child);
//!     }
//!
//!     fn annotate(&mut self, note: String) {
//!         self.notes.push(note);
//!     }
//! }
//!
//! let item = |name: &'static str| {
//!     Builder::<Vec<String>, Item, String>::new(move |_| Item {
//!         name: name.to_string(),
//!         ..Item::default()
//!     })
//! };
//!
//! let menu = item("menu")
//!     .annotate(["top".to_string()])
//!     .child(item("home"))
//!     .lift_all(|entries: &Vec<String>| {
//!         entries
//!             .iter()
//!             .map(|entry| {
//!                 let entry = entry.clone();
//!                 Builder::<Vec<String>, Item, String>::new(move |_| Item {
//!                     name: entry.clone(),
//!                     ..Item::default()
//!                 })
//!             })
//!             .collect::<Vec<_>>()
//!     });
//!
//! let tree = menu.build(&vec!["docs".to_string(), "blog".to_string()]);
//! let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
//! assert_eq!(names, ["home", "docs", "blog"]);
//! assert_eq!(tree.notes, ["top"]);
//! ```

pub mod builder;
pub mod fallible;
pub mod node;
pub mod scope;
pub mod util;

pub use builder::Builder;
pub use fallible::{try_scope, TryBuilder};
pub use node::Node;
pub use scope::{scope, scope_ref};
