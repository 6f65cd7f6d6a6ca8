//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod invitation_override_repo;
pub mod media_asset_repo;

pub use invitation_override_repo::InvitationOverrideRepo;
pub use media_asset_repo::MediaAssetRepo;
