//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one group of endpoints. All
//! paths are relative to the client's base URL and all calls are POST.
//!
//! | Module | Endpoints |
//! |--------|-----------|
//! | `casts` | `/casts/feed/for-you`, `/casts/feed/trending`, `/casts/feed/popular`, `/casts/search/semantic` |
//! | `labels` | `/casts/labels/for-items`, `/casts/labels/for-text`, `/casts/labels/top-items` |
//! | `users` | `/users/feed/similar`, `/users/search/semantic`, `/users/feed/for-channel`, `/users/feed/for-item`, `/users/feed/for-topic` |

pub mod casts;
pub mod labels;
pub mod users;

pub use casts::CastsApi;
pub use labels::LabelsApi;
pub use users::UsersApi;
