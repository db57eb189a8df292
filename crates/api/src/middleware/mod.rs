//! Request extractors and middleware.
//!
//! - [`admin::RequireAdmin`] -- admin JSON endpoints, 401 when denied.
//! - [`admin::AdminView`] -- admin views, redirect to the login page when denied.
//! - [`origin::RequestOrigin`] -- client address and user agent.
//! - [`lang::SiteLang`] -- resolved site language; [`lang::persist_lang_cookie`]
//!   remembers an explicit `?lang=` choice.

pub mod admin;
pub mod cookies;
pub mod lang;
pub mod origin;
