//! REST client for the HR backend.
//!
//! Every call goes through [`ApiClient`], which owns the base URL and the
//! cookie jar. Endpoint methods are split by area:
//!
//! | Module      | Endpoints                                                  |
//! |-------------|------------------------------------------------------------|
//! | `auth`      | `/auth/me`, `/auth/login`, `/auth/logout`                  |
//! | `boards`    | `/workspaces`, `/boards/**`, `/tasks/**`                   |
//! | `directory` | `/employees`, `/attendance`, `/documents`, `/dashboard`    |
//! | `envelope`  | `{ data: [...] }` / `{ <entity>: {...} }` decoding         |

pub mod auth;
pub mod boards;
pub mod client;
pub mod directory;
pub mod envelope;

pub use client::ApiClient;
pub use envelope::Page;
