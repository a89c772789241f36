//! SiteGate Core Types and Traits
//!
//! This crate provides the fundamental types shared by every SiteGate crate:
//! - Tenant slugs and the per-request tenant context
//! - Project metadata as served by the website-builder backend
//! - The `ProjectSource` abstraction over that backend
//! - Canonical theme identifiers
//! - Core error types

pub mod error;
pub mod project;
pub mod project_source;
pub mod tenant;
pub mod theme;

pub use error::{Error, Result};
pub use project::{ProjectEnvelope, ProjectMetadata, SocialLinks, ThemeRef};
pub use project_source::ProjectSource;
pub use tenant::{TenantContext, TenantSlug};
pub use theme::{DEFAULT_THEME, ThemeId, resolve_theme_id};
