//! Category Picker - product category selection for a content field
//!
//! Loads every category of a commerce project, shapes the flat list into a
//! depth-annotated tree for a selector UI, and maps the editor's choice back
//! to the list of ids the content platform stores.
//!
//! # Pipeline
//!
//! ```text
//! host config ──▶ CommerceClient ──▶ token ──▶ pages (500 each)
//!                                                   │
//!                                                   ▼
//! stored value ◀── to_value ◀── selection ◀── CategoryTree ──▶ flatten
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use category_picker::{CategoryPicker, InMemoryHost};
//!
//! # async fn example(config: serde_json::Value) {
//! let mut picker = CategoryPicker::new(InMemoryHost::new(config));
//! picker.mount_from_host().await;
//!
//! if let Some(message) = picker.error_message() {
//!     eprintln!("Error: {message}");
//!     return;
//! }
//!
//! for option in picker.filter("coffee") {
//!     println!("{}{}", "  ".repeat(option.depth), picker.label(&option.category));
//! }
//! # }
//! ```

// Stored value parsing and encoding
pub mod value;

// Arena-backed category hierarchy
pub mod tree;

// Selection mapping and option filtering
pub mod selection;

// Host environment interface
pub mod host;

// Load cycle state machine
pub mod load;

// Picker controller
pub mod picker;

// Error types
pub mod error;

// Re-export core types
pub use value::{parse_value, serialize_value, ParsedValue, Value, ValueUpdate};
pub use tree::{CategoryNode, CategoryTree, FlatCategory, NodeId, TreeNode};
pub use selection::{filter_options, is_selected, selected_options, to_value};
pub use host::{Host, InMemoryHost};
pub use load::{run_load_cycle, CategorySource, LoadState};
pub use picker::{CategoryPicker, TeardownHandle};
pub use error::{PickerError, Result};

// Re-export from the client crate
pub use commerce_client::{Category, CategoryReference, CommerceClient, CommerceConfig, CommerceError};
