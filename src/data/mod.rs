//! Site data access.
//!
//! ## Resources
//! Every page reads from a fixed set of files published alongside the site:
//!
//! ```text
//! data/
//! ├── home/content.json              - open positions flag, news, sponsors
//! ├── team/team.json                 - member roster
//! ├── publications/publications.json - paper list
//! ├── join/join.md                   - "Join us" page (Markdown)
//! └── research/research.txt          - declared, not rendered yet
//! ```
//!
//! ### Key Types
//! - `Resource`: key + path + format of one file
//! - `DataStore`: cached, retrying fetches over a `Transport`
//! - `model`: typed records decoded from the JSON resources

pub mod model;
pub mod resource;
pub mod store;
pub mod transport;

pub use resource::{Resource, ResourceFormat, ResourceKey, ResourceValue};
pub use store::{DataStore, DecodeError, FetchOutcome};
pub use transport::{FetchError, HttpResponse, Transport};

#[cfg(target_arch = "wasm32")]
pub use transport::BrowserTransport;
